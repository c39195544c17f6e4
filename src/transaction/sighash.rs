//! Legacy (pre-witness) signature hash computation.
//!
//! The signed message is a copy of the transaction where the input being signed carries
//! the script code and every other input an empty script, followed by the 4-byte
//! sighash type, hashed with double-SHA256.
use crate::messages::{OutPoint, Tx};
use crate::script::multisig::MultisigScript;
use crate::script::op_codes::OP_CODESEPARATOR;
use crate::script::{next_op, Script};
use crate::transaction::p2pkh::Signer;
use crate::transaction::SigType;
use crate::util::{sha256d, var_int, Error, Hash256, Result, Serializable};
use byteorder::{LittleEndian, WriteBytesExt};

/// Signs all inputs and all outputs.
pub const SIGHASH_ALL: u8 = 0x01;

/// Resolves the script code for an input from the caller-supplied script.
///
/// For P2PKH `script` is the signer's public key or the P2PKH lock script; for
/// P2SH it is the multisig redeem script.
///
/// # Errors
/// `Error::InvalidScript` if `script` does not fit `sig_type`.
pub fn script_code(sig_type: SigType, script: &[u8]) -> Result<Script> {
    match sig_type {
        SigType::P2PKH => Ok(Signer::from_script_bytes(script)?.script_code()),
        SigType::P2SH => {
            let redeem_script = Script(script.to_vec());
            MultisigScript::parse(&redeem_script)?;
            Ok(redeem_script)
        }
    }
}

/// Computes the SIGHASH_ALL digest for input `n_input`.
///
/// # Errors
/// `Error::IndexOutOfRange` if there is no such input, `Error::InvalidScript`
/// if `script` does not fit `sig_type`.
pub fn compute_sighash(tx: &Tx, n_input: usize, sig_type: SigType, script: &[u8]) -> Result<Hash256> {
    if n_input >= tx.inputs.len() {
        return Err(Error::IndexOutOfRange { index: n_input, len: tx.inputs.len() });
    }
    let script_code = script_code(sig_type, script)?;
    legacy_sighash(tx, n_input, &script_code.0, SIGHASH_ALL)
}

/// Computes the SIGHASH_ALL digest for the input spending `outpoint`.
///
/// # Errors
/// `Error::InputNotFound` if no input spends `outpoint`, otherwise as [`compute_sighash`].
pub fn compute_sighash_for(tx: &Tx, outpoint: &OutPoint, sig_type: SigType, script: &[u8]) -> Result<Hash256> {
    compute_sighash(tx, tx.find_input(outpoint)?, sig_type, script)
}

/// Legacy sighash over a modified copy of the transaction.
fn legacy_sighash(tx: &Tx, n_input: usize, script_code: &[u8], sighash_type: u8) -> Result<Hash256> {
    if n_input >= tx.inputs.len() {
        return Err(Error::IndexOutOfRange { index: n_input, len: tx.inputs.len() });
    }
    let mut s = Vec::with_capacity(tx.size() + script_code.len() + 4);
    // Sub-script (remove OP_CODESEPARATOR)
    let mut sub_script = Vec::with_capacity(script_code.len());
    let mut i = 0;
    while i < script_code.len() {
        let next = next_op(i, script_code);
        if script_code[i] != OP_CODESEPARATOR {
            sub_script.extend_from_slice(&script_code[i..next]);
        }
        i = next;
    }
    s.write_u32::<LittleEndian>(tx.version)?;
    var_int::write(tx.inputs.len() as u64, &mut s)?;
    for (i, input) in tx.inputs.iter().enumerate() {
        let mut tx_in = input.clone();
        tx_in.unlock_script = if i == n_input { Script(sub_script.clone()) } else { Script::new() };
        tx_in.write(&mut s)?;
    }
    var_int::write(tx.outputs.len() as u64, &mut s)?;
    for tx_out in &tx.outputs {
        tx_out.write(&mut s)?;
    }
    s.write_u32::<LittleEndian>(tx.lock_time)?;
    s.write_u32::<LittleEndian>(sighash_type as u32)?;
    Ok(sha256d(&s))
}
