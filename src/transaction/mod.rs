//! Transaction building and signing for Dogecoin.
//!
//! Supports P2PKH and P2SH-multisig inputs, legacy SIGHASH_ALL computation and ECDSA signing.
//!
//! # Examples
//!
//! Sign a P2PKH input:
//! ```
//! use dogecoin_tx::address::Address;
//! use dogecoin_tx::network::Network;
//! use dogecoin_tx::messages::OutPoint;
//! use dogecoin_tx::transaction::{assembler, builder, generate_signature, sighash, SigType};
//! use dogecoin_tx::wallet::derive_public_key;
//!
//! let mut private_key = [0u8; 32];
//! private_key[31] = 1;
//! let pubkey = derive_public_key(&private_key).unwrap();
//! let address = Address::from_pubkey(&pubkey, Network::Mainnet).unwrap();
//! let outpoint = OutPoint::from_txid(&"11".repeat(32), 0).unwrap();
//!
//! let tx = builder::new_base(outpoint);
//! let tx = builder::add_output(&tx, &address, 5_000_000_000);
//! let hash = sighash::compute_sighash(&tx, 0, SigType::P2PKH, &pubkey).unwrap();
//! let signature = generate_signature(&private_key, &hash).unwrap();
//! let tx = assembler::apply_signature(&tx, &signature, &outpoint, SigType::P2PKH, &pubkey).unwrap();
//! assert!(!tx.inputs[0].unlock_script.0.is_empty());
//! ```
pub mod assembler;
pub mod builder;
pub mod p2pkh;
pub mod p2sh;
pub mod sighash;

use crate::util::{Error, Hash256, Result};
use crate::wallet::keys::parse_private_key;
use secp256k1::ecdsa::Signature;
use secp256k1::{Message, PublicKey, Secp256k1};
use std::fmt;

/// Spending path of an input, selecting script templates and script code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigType {
    /// Pay to public key hash
    P2PKH,
    /// Pay to script hash wrapping a multisig redeem script
    P2SH,
}

impl TryFrom<u32> for SigType {
    type Error = Error;

    fn try_from(value: u32) -> Result<SigType> {
        match value {
            0 => Ok(SigType::P2PKH),
            1 => Ok(SigType::P2SH),
            _ => Err(Error::InvalidSigType(value)),
        }
    }
}

impl From<SigType> for u32 {
    fn from(sig_type: SigType) -> u32 {
        match sig_type {
            SigType::P2PKH => 0,
            SigType::P2SH => 1,
        }
    }
}

impl fmt::Display for SigType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SigType::P2PKH => f.write_str("p2pkh"),
            SigType::P2SH => f.write_str("p2sh"),
        }
    }
}

/// Generates a DER-encoded ECDSA signature over a sighash.
///
/// Nonces follow RFC6979, so the result is a pure function of key and hash.
/// S is normalized low. The sighash type byte is not appended.
///
/// # Errors
/// `Error::InvalidKey` for an invalid private key.
pub fn generate_signature(private_key: &[u8], sighash: &Hash256) -> Result<Vec<u8>> {
    let secp = Secp256k1::signing_only();
    let secret_key = parse_private_key(private_key)?;
    let message = Message::from_digest(sighash.0);
    let mut signature = secp.sign_ecdsa(&message, &secret_key);
    signature.normalize_s();
    Ok(signature.serialize_der().to_vec())
}

/// Parses a DER signature, tolerating a trailing SIGHASH_ALL byte.
///
/// The returned signature has low S.
///
/// # Errors
/// `Error::InvalidSignature` if the bytes are not DER.
pub fn parse_signature(bytes: &[u8]) -> Result<Signature> {
    let mut signature = match Signature::from_der(bytes) {
        Ok(signature) => signature,
        Err(e) => match bytes.split_last() {
            Some((&sighash::SIGHASH_ALL, der)) => {
                Signature::from_der(der).map_err(|e| Error::InvalidSignature(format!("DER: {}", e)))?
            }
            _ => return Err(Error::InvalidSignature(format!("DER: {}", e))),
        },
    };
    signature.normalize_s();
    Ok(signature)
}

/// Checks `signature` over `sighash` against `pubkey`.
#[must_use]
pub fn verify_signature(signature: &Signature, sighash: &Hash256, pubkey: &PublicKey) -> bool {
    let secp = Secp256k1::verification_only();
    let message = Message::from_digest(sighash.0);
    secp.verify_ecdsa(&message, signature, pubkey).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::keys::{derive_public_key, parse_public_key};
    use bitcoin_hashes::{sha256, Hash};
    use pretty_assertions::assert_eq;

    fn key(n: u8) -> [u8; 32] {
        let mut k = [0u8; 32];
        k[31] = n;
        k
    }

    #[test]
    fn sig_type_from_u32() {
        assert_eq!(SigType::try_from(0).unwrap(), SigType::P2PKH);
        assert_eq!(SigType::try_from(1).unwrap(), SigType::P2SH);
        assert!(matches!(SigType::try_from(2), Err(Error::InvalidSigType(2))));
        assert_eq!(u32::from(SigType::P2SH), 1);
    }

    #[test]
    fn rfc6979_vector() -> Result<()> {
        let msg = sha256::Hash::hash(b"Satoshi Nakamoto");
        let sig = generate_signature(&key(1), &Hash256(msg.to_byte_array()))?;
        assert_eq!(sig, generate_signature(&key(1), &Hash256(msg.to_byte_array()))?);
        assert_eq!(
            hex::encode(sig),
            "3045022100934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d802202442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5"
        );
        Ok(())
    }

    #[test]
    fn sign_verify() -> Result<()> {
        let hash = Hash256([7; 32]);
        let sig = generate_signature(&key(3), &hash)?;
        let parsed = parse_signature(&sig)?;
        let pubkey = parse_public_key(&derive_public_key(&key(3))?)?;
        assert!(verify_signature(&parsed, &hash, &pubkey));
        let other = parse_public_key(&derive_public_key(&key(2))?)?;
        assert!(!verify_signature(&parsed, &hash, &other));
        assert!(!verify_signature(&parsed, &Hash256([8; 32]), &pubkey));
        Ok(())
    }

    #[test]
    fn parse_signature_with_type_byte() -> Result<()> {
        let mut sig = generate_signature(&key(2), &Hash256([1; 32]))?;
        let plain = parse_signature(&sig)?;
        sig.push(sighash::SIGHASH_ALL);
        assert_eq!(parse_signature(&sig)?, plain);
        assert!(matches!(parse_signature(&[0x30, 0x01]), Err(Error::InvalidSignature(_))));
        Ok(())
    }

    #[test]
    fn invalid_private_key() {
        assert!(matches!(generate_signature(&[0u8; 32], &Hash256([1; 32])), Err(Error::InvalidKey(_))));
        assert!(matches!(generate_signature(&[1u8; 16], &Hash256([1; 32])), Err(Error::InvalidKey(_))));
    }
}
