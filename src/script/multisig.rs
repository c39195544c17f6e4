//! m-of-n multisig redeem scripts (`OP_m <pubkey>... OP_n OP_CHECKMULTISIG`).

use crate::script::op_codes::{decode_small_int, small_int_op, OP_CHECKMULTISIG};
use crate::script::{Instruction, Script};
use crate::util::{Error, Result};
use crate::wallet::keys::parse_public_key;

/// Most public keys a bare CHECKMULTISIG template can name.
pub const MAX_PUBKEYS_PER_MULTISIG: usize = 16;

/// Largest single push allowed by consensus; bounds the redeem script.
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Parsed multisig redeem script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigScript {
    /// Signatures required
    pub threshold: usize,
    /// Serialized public keys in script order
    pub pubkeys: Vec<Vec<u8>>,
}

impl MultisigScript {
    /// Validates threshold and keys.
    ///
    /// Key order is kept as given, it is part of the script hash.
    ///
    /// # Errors
    /// `Error::InvalidThreshold` unless `1 <= threshold <= pubkeys.len() <= 16`,
    /// `Error::InvalidKey` for a key that is not a curve point.
    pub fn new(pubkeys: Vec<Vec<u8>>, threshold: usize) -> Result<MultisigScript> {
        if pubkeys.len() > MAX_PUBKEYS_PER_MULTISIG {
            return Err(Error::InvalidThreshold(format!(
                "{} keys exceeds the maximum of {}",
                pubkeys.len(),
                MAX_PUBKEYS_PER_MULTISIG
            )));
        }
        if threshold == 0 || threshold > pubkeys.len() {
            return Err(Error::InvalidThreshold(format!("{} of {} keys", threshold, pubkeys.len())));
        }
        for pubkey in &pubkeys {
            parse_public_key(pubkey)?;
        }
        Ok(MultisigScript { threshold, pubkeys })
    }

    /// Serializes the redeem script.
    #[must_use]
    pub fn to_script(&self) -> Script {
        let mut script = Script::new();
        // Both counts are within 1..=16 once constructed
        script.append(small_int_op(self.threshold).unwrap_or_default());
        for pubkey in &self.pubkeys {
            script.append_data(pubkey);
        }
        script.append(small_int_op(self.pubkeys.len()).unwrap_or_default());
        script.append(OP_CHECKMULTISIG);
        script
    }

    /// Parses a redeem script of the standard multisig template.
    ///
    /// # Errors
    /// `Error::InvalidScript` if the script does not follow the template.
    pub fn parse(script: &Script) -> Result<MultisigScript> {
        let bad = |msg: &str| Error::InvalidScript(format!("Not a multisig redeem script: {}", msg));
        let ops = script.instructions()?;
        if ops.len() < 4 {
            return Err(bad("too short"));
        }
        let threshold = match ops[0] {
            Instruction::Op(op) => decode_small_int(op).ok_or_else(|| bad("threshold"))?,
            Instruction::Push(_) => return Err(bad("threshold")),
        };
        if ops[ops.len() - 1] != Instruction::Op(OP_CHECKMULTISIG) {
            return Err(bad("missing OP_CHECKMULTISIG"));
        }
        let n = match ops[ops.len() - 2] {
            Instruction::Op(op) => decode_small_int(op).ok_or_else(|| bad("key count"))?,
            Instruction::Push(_) => return Err(bad("key count")),
        };
        let mut pubkeys = Vec::with_capacity(n);
        for op in &ops[1..ops.len() - 2] {
            match op {
                Instruction::Push(data) => pubkeys.push(data.to_vec()),
                Instruction::Op(_) => return Err(bad("expected public key push")),
            }
        }
        if pubkeys.len() != n || threshold > n {
            return Err(bad("key count mismatch"));
        }
        let parsed = MultisigScript { threshold, pubkeys };
        // Non-minimal pushes would hash differently from what was committed to
        if parsed.to_script() != *script {
            return Err(bad("non-canonical encoding"));
        }
        Ok(parsed)
    }
}

/// Builds the redeem script for `threshold` of `pubkeys`.
///
/// # Errors
/// See [`MultisigScript::new`].
pub fn build_redeem_script(pubkeys: &[Vec<u8>], threshold: usize) -> Result<Script> {
    Ok(MultisigScript::new(pubkeys.to_vec(), threshold)?.to_script())
}

/// Splits concatenated serialized public keys, sizing each by its prefix byte.
///
/// # Errors
/// `Error::InvalidKey` on an unknown prefix or a truncated key.
pub fn split_pubkeys(concatenated: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut keys = Vec::new();
    let mut i = 0;
    while i < concatenated.len() {
        let len = match concatenated[i] {
            0x02 | 0x03 => 33,
            0x04 => 65,
            prefix => return Err(Error::InvalidKey(format!("Unknown public key prefix 0x{:02x} at byte {}", prefix, i))),
        };
        let key = concatenated
            .get(i..i + len)
            .ok_or_else(|| Error::InvalidKey(format!("Truncated public key at byte {}", i)))?;
        keys.push(key.to_vec());
        i += len;
    }
    Ok(keys)
}
