//! RIPEMD160 of SHA256, the 20-byte payload of every address.

use bitcoin_hashes::{hash160 as bh_hash160, Hash as BHHash};
use std::fmt;

/// 20-byte public key hash or script hash.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash160(pub [u8; 20]);

/// Hashes a serialized public key or redeem script.
#[must_use]
#[inline]
pub fn hash160(data: &[u8]) -> Hash160 {
    Hash160(bh_hash160::Hash::hash(data).to_byte_array())
}

impl fmt::Debug for Hash160 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
