//! secp256k1 key parsing and public key derivation.

use crate::util::{Error, Result};
use secp256k1::{PublicKey, Secp256k1, SecretKey};

/// Parses a 32-byte private key scalar.
///
/// # Errors
/// `Error::InvalidKey` for a wrong length, zero, or a scalar not below the curve order.
pub fn parse_private_key(bytes: &[u8]) -> Result<SecretKey> {
    if bytes.len() != 32 {
        return Err(Error::InvalidKey(format!("Private key must be 32 bytes, got {}", bytes.len())));
    }
    SecretKey::from_slice(bytes).map_err(|e| Error::InvalidKey(format!("Private key: {}", e)))
}

/// Parses a compressed (33-byte) or uncompressed (65-byte) public key.
///
/// # Errors
/// `Error::InvalidKey` if the bytes are not a point on the curve.
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey> {
    PublicKey::from_slice(bytes).map_err(|e| Error::InvalidKey(format!("Public key: {}", e)))
}

/// Derives the compressed public key of a private key.
///
/// # Errors
/// `Error::InvalidKey` if the private key is invalid.
pub fn derive_public_key(private_key: &[u8]) -> Result<[u8; 33]> {
    let secret_key = parse_private_key(private_key)?;
    let secp = Secp256k1::signing_only();
    Ok(PublicKey::from_secret_key(&secp, &secret_key).serialize())
}
