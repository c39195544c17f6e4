//! Places signatures into input unlock scripts.
//!
//! Each signature is checked against the sighash of the transaction it is applied to,
//! so a signature made before the transaction was changed is rejected instead of
//! producing a transaction the network would refuse.
//!
//! Multisig inputs collect signatures across calls. The collected set is read back
//! from the input's current unlock script each time and rewritten in key order.

use crate::messages::{OutPoint, Tx};
use crate::script::multisig::MultisigScript;
use crate::script::Script;
use crate::transaction::p2pkh::{self, Signer};
use crate::transaction::sighash::compute_sighash;
use crate::transaction::{p2sh, parse_signature, verify_signature, SigType};
use crate::util::{hash160, Error, Hash160, Hash256, Result};
use crate::wallet::keys::parse_public_key;
use log::debug;
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId, Signature};
use secp256k1::{Message, Secp256k1};

/// Signing progress of one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningState {
    /// No signature placed
    Unsigned,
    /// Some but not all multisig signatures placed
    PartiallySigned {
        /// Signatures present
        have: usize,
        /// Signatures required
        need: usize,
    },
    /// Spendable as far as signatures go
    FullySigned,
}

/// Reports how far the input spending `outpoint` has been signed.
///
/// # Errors
/// `Error::InputNotFound` for an unknown outpoint, `Error::InvalidScript` if
/// `script` or the current unlock script is malformed.
pub fn signing_state(tx: &Tx, outpoint: &OutPoint, sig_type: SigType, script: &[u8]) -> Result<SigningState> {
    let unlock_script = &tx.inputs[tx.find_input(outpoint)?].unlock_script;
    if unlock_script.0.is_empty() {
        return Ok(SigningState::Unsigned);
    }
    match sig_type {
        SigType::P2PKH => Ok(SigningState::FullySigned),
        SigType::P2SH => {
            let multisig = MultisigScript::parse(&Script(script.to_vec()))?;
            let (sigs, _) = p2sh::parse_unlock_script(unlock_script)?;
            Ok(progress(sigs.len(), multisig.threshold))
        }
    }
}

fn progress(have: usize, need: usize) -> SigningState {
    if have == 0 {
        SigningState::Unsigned
    } else if have >= need {
        SigningState::FullySigned
    } else {
        SigningState::PartiallySigned { have, need }
    }
}

/// Applies `signature` to the input spending `outpoint` and returns the updated transaction.
///
/// `signature` is DER, optionally followed by the SIGHASH_ALL byte. `script` is what
/// was passed when computing the sighash: the public key or P2PKH lock script for
/// [`SigType::P2PKH`], the redeem script for [`SigType::P2SH`].
///
/// # Errors
/// - `Error::InputNotFound` if no input spends `outpoint`.
/// - `Error::AlreadyFullySigned` if the input needs no more signatures.
/// - `Error::InvalidSignature` if the signature is malformed, does not match a key
///   for this input, or was made over a different transaction state.
/// - `Error::InvalidScript` if `script` does not fit `sig_type` or the input's
///   existing signatures were made for a different redeem script.
pub fn apply_signature(
    tx: &Tx,
    signature: &[u8],
    outpoint: &OutPoint,
    sig_type: SigType,
    script: &[u8],
) -> Result<Tx> {
    let n_input = tx.find_input(outpoint)?;
    let signature = parse_signature(signature)?;
    let sighash = compute_sighash(tx, n_input, sig_type, script)?;
    let current = &tx.inputs[n_input].unlock_script;

    let unlock_script = match sig_type {
        SigType::P2PKH => {
            if !current.0.is_empty() {
                return Err(Error::AlreadyFullySigned(outpoint.to_string()));
            }
            let pubkey = match Signer::from_script_bytes(script)? {
                Signer::PublicKey(pubkey) => {
                    if !verify_signature(&signature, &sighash, &parse_public_key(&pubkey)?) {
                        return Err(Error::InvalidSignature(format!(
                            "signature does not match public key for {}",
                            outpoint
                        )));
                    }
                    pubkey
                }
                Signer::PubKeyHash(pubkey_hash) => recover_pubkey(&signature, &sighash, &pubkey_hash)?,
            };
            debug!("{} p2pkh: unsigned -> fully signed", outpoint);
            p2pkh::create_unlock_script(&signature.serialize_der(), &pubkey)
        }
        SigType::P2SH => {
            let redeem_script = Script(script.to_vec());
            let multisig = MultisigScript::parse(&redeem_script)?;
            let mut slots = collect_existing(current, &redeem_script, &multisig, &sighash)?;
            let have = slots.iter().flatten().count();
            if have >= multisig.threshold {
                return Err(Error::AlreadyFullySigned(outpoint.to_string()));
            }
            let key_index = match_key(&signature, &sighash, &multisig, &slots).ok_or_else(|| {
                Error::InvalidSignature(format!("signature matches no unsigned key of the redeem script for {}", outpoint))
            })?;
            slots[key_index] = Some(signature);
            let state = progress(have + 1, multisig.threshold);
            debug!("{} p2sh: key {} signed, {}/{} -> {:?}", outpoint, key_index, have + 1, multisig.threshold, state);
            let der_sigs: Vec<Vec<u8>> = slots.iter().flatten().map(|sig| sig.serialize_der().to_vec()).collect();
            p2sh::create_unlock_script(&der_sigs, &redeem_script)
        }
    };

    let mut tx = tx.clone();
    tx.inputs[n_input].unlock_script = unlock_script;
    Ok(tx)
}

/// Reads back signatures already placed for a multisig input, one slot per key.
fn collect_existing(
    current: &Script,
    redeem_script: &Script,
    multisig: &MultisigScript,
    sighash: &Hash256,
) -> Result<Vec<Option<Signature>>> {
    let mut slots = vec![None; multisig.pubkeys.len()];
    if current.0.is_empty() {
        return Ok(slots);
    }
    let (der_sigs, placed_redeem) = p2sh::parse_unlock_script(current)?;
    if placed_redeem != *redeem_script {
        return Err(Error::InvalidScript("input already carries a different redeem script".to_string()));
    }
    for der_sig in der_sigs {
        let signature = parse_signature(&der_sig)?;
        let key_index = match_key(&signature, sighash, multisig, &slots).ok_or_else(|| {
            Error::InvalidSignature("a placed signature no longer matches the transaction".to_string())
        })?;
        slots[key_index] = Some(signature);
    }
    Ok(slots)
}

/// Index of the first unsigned key the signature verifies against.
fn match_key(
    signature: &Signature,
    sighash: &Hash256,
    multisig: &MultisigScript,
    slots: &[Option<Signature>],
) -> Option<usize> {
    multisig.pubkeys.iter().enumerate().position(|(i, pubkey)| {
        slots[i].is_none()
            && parse_public_key(pubkey)
                .map(|pubkey| verify_signature(signature, sighash, &pubkey))
                .unwrap_or(false)
    })
}

/// Recovers the serialized public key hashing to `pubkey_hash` that made `signature`.
fn recover_pubkey(signature: &Signature, sighash: &Hash256, pubkey_hash: &Hash160) -> Result<Vec<u8>> {
    let secp = Secp256k1::verification_only();
    let message = Message::from_digest(sighash.0);
    let compact = signature.serialize_compact();
    for id in 0..4 {
        let Ok(recovery_id) = RecoveryId::from_i32(id) else { continue };
        let Ok(recoverable) = RecoverableSignature::from_compact(&compact, recovery_id) else { continue };
        let Ok(pubkey) = secp.recover_ecdsa(&message, &recoverable) else { continue };
        let compressed = pubkey.serialize();
        if hash160(&compressed) == *pubkey_hash {
            return Ok(compressed.to_vec());
        }
        let uncompressed = pubkey.serialize_uncompressed();
        if hash160(&uncompressed) == *pubkey_hash {
            return Ok(uncompressed.to_vec());
        }
    }
    Err(Error::InvalidSignature(format!(
        "signature was not made by the key of pubkey hash {:?}",
        pubkey_hash
    )))
}
