//! Pay-to-Public-Key-Hash (P2PKH) scripts.
//!
//! Standard for "sending to an address"; creates/checks lock/unlock scripts.
use crate::script::op_codes::{OP_CHECKSIG, OP_DUP, OP_EQUALVERIFY, OP_HASH160, OP_PUSH};
use crate::script::{Instruction, Script};
use crate::transaction::sighash::SIGHASH_ALL;
use crate::util::{hash160, Error, Hash160, Result};
use crate::wallet::keys::parse_public_key;

/// Creates P2PKH lock script (DUP HASH160 [hash] EQUALVERIFY CHECKSIG).
#[must_use]
#[inline]
pub fn create_lock_script(address: &Hash160) -> Script {
    let mut script = Script::new();
    script.append(OP_DUP);
    script.append(OP_HASH160);
    script.append(OP_PUSH + 20);
    script.append_slice(&address.0);
    script.append(OP_EQUALVERIFY);
    script.append(OP_CHECKSIG);
    script
}

/// Creates P2PKH unlock script (push sig + SIGHASH_ALL, push pubkey).
#[must_use]
pub fn create_unlock_script(der_sig: &[u8], public_key: &[u8]) -> Script {
    let mut sig = Vec::with_capacity(der_sig.len() + 1);
    sig.extend_from_slice(der_sig);
    sig.push(SIGHASH_ALL);
    let mut script = Script::new();
    script.append_data(&sig);
    script.append_data(public_key);
    script
}

/// Checks if script is P2PKH lock (len=25, ops match).
#[must_use]
#[inline]
pub fn check_lock_script(lock_script: &[u8]) -> bool {
    lock_script.len() == 25
        && lock_script[0] == OP_DUP
        && lock_script[1] == OP_HASH160
        && lock_script[2] == OP_PUSH + 20
        && lock_script[23] == OP_EQUALVERIFY
        && lock_script[24] == OP_CHECKSIG
}

/// Extracts hash160 from P2PKH lock.
///
/// # Errors
/// `Error::InvalidScript` if not a P2PKH lock script.
pub fn extract_pubkeyhash(lock_script: &[u8]) -> Result<Hash160> {
    if !check_lock_script(lock_script) {
        return Err(Error::InvalidScript("Not P2PKH lock".to_string()));
    }
    let mut hash160 = Hash160([0; 20]);
    hash160.0.copy_from_slice(&lock_script[3..23]);
    Ok(hash160)
}

/// Splits a P2PKH unlock script into signature (with type byte) and pubkey.
///
/// # Errors
/// `Error::InvalidScript` if the script is not exactly two pushes.
pub fn parse_unlock_script(unlock_script: &Script) -> Result<(Vec<u8>, Vec<u8>)> {
    match unlock_script.instructions()?.as_slice() {
        [Instruction::Push(sig), Instruction::Push(pubkey)] => Ok((sig.to_vec(), pubkey.to_vec())),
        _ => Err(Error::InvalidScript("Not P2PKH unlock".to_string())),
    }
}

/// What the caller identified the signer by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signer {
    /// The serialized public key itself
    PublicKey(Vec<u8>),
    /// Only the hash, from a lock script
    PubKeyHash(Hash160),
}

impl Signer {
    /// Interprets P2PKH script bytes as either a public key or a lock script.
    ///
    /// # Errors
    /// `Error::InvalidScript` if the bytes are neither.
    pub fn from_script_bytes(script: &[u8]) -> Result<Signer> {
        if check_lock_script(script) {
            return Ok(Signer::PubKeyHash(extract_pubkeyhash(script)?));
        }
        match parse_public_key(script) {
            Ok(_) => Ok(Signer::PublicKey(script.to_vec())),
            Err(_) => Err(Error::InvalidScript(
                "P2PKH script must be a public key or a P2PKH lock script".to_string(),
            )),
        }
    }

    /// Hash the output being spent commits to.
    #[must_use]
    pub fn pubkey_hash(&self) -> Hash160 {
        match self {
            Signer::PublicKey(pubkey) => hash160(pubkey),
            Signer::PubKeyHash(hash) => *hash,
        }
    }

    /// Script code substituted into the signed input.
    #[must_use]
    pub fn script_code(&self) -> Script {
        create_lock_script(&self.pubkey_hash())
    }
}
