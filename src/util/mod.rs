//! Hashing primitives, compact-size codec and the crate error type.

pub mod hash160;
mod hash256;
mod result;
mod serdes;
pub(crate) mod var_int;

pub use self::hash160::{hash160, Hash160};
pub use self::hash256::{sha256d, Hash256};
pub use self::result::{Error, Result};
pub use self::serdes::{read_exact_all, Serializable};

/// Decodes hex, mapping failures with the given error constructor.
pub(crate) fn decode_hex_as(s: &str, err: fn(String) -> Error) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|e| err(format!("bad hex: {}", e)))
}
