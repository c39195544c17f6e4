//! Double-SHA256 digests: transaction ids and signature hashes.
//!
//! Bytes are held in the order they are hashed and serialized. Txids are shown to users
//! reversed ([`Hash256::encode`]/[`Hash256::decode`]), sighashes as-is
//! ([`Hash256::to_hex`]/[`Hash256::from_hex`]).
use crate::util::{Error, Result, Serializable};
use bitcoin_hashes::{sha256d as bh_sha256d, Hash as BHHash};
use std::fmt;
use std::io;
use std::io::{Read, Write};

/// 32-byte double-SHA256 output.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Txid display form: hex of the reversed bytes.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut display = self.0;
        display.reverse();
        hex::encode(display)
    }

    /// Parses a txid in display form.
    ///
    /// # Errors
    /// `Error::InvalidEncoding` if not hex or not 32 bytes.
    pub fn decode(s: &str) -> Result<Hash256> {
        let mut bytes = hex_32(s, "txid")?;
        bytes.reverse();
        Ok(Hash256(bytes))
    }

    /// Hex of the bytes as hashed.
    #[must_use]
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses hex of the bytes as hashed.
    ///
    /// # Errors
    /// `Error::InvalidEncoding` if not hex or not 32 bytes.
    pub fn from_hex(s: &str) -> Result<Hash256> {
        Ok(Hash256(hex_32(s, "hash")?))
    }
}

fn hex_32(s: &str, what: &str) -> Result<[u8; 32]> {
    hex::decode(s)?
        .try_into()
        .map_err(|v: Vec<u8>| Error::InvalidEncoding(format!("{} is {} bytes, expected 32", what, v.len())))
}

impl Serializable<Hash256> for Hash256 {
    fn read(reader: &mut dyn Read) -> Result<Hash256> {
        let mut bytes = [0; 32];
        reader.read_exact(&mut bytes)?;
        Ok(Hash256(bytes))
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_all(&self.0)
    }
}

/// SHA256 applied twice.
#[must_use]
#[inline]
pub fn sha256d(data: &[u8]) -> Hash256 {
    Hash256(bh_sha256d::Hash::hash(data).to_byte_array())
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
