//! Pay-to-Script-Hash (P2SH) scripts for multisig redeem scripts (BIP-16).
use crate::script::op_codes::{OP_0, OP_EQUAL, OP_HASH160, OP_PUSH};
use crate::script::{Instruction, Script};
use crate::transaction::sighash::SIGHASH_ALL;
use crate::util::{Error, Hash160, Result};

/// Creates P2SH lock script (HASH160 [hash] EQUAL).
#[must_use]
#[inline]
pub fn create_lock_script(script_hash: &Hash160) -> Script {
    let mut script = Script::new();
    script.append(OP_HASH160);
    script.append(OP_PUSH + 20);
    script.append_slice(&script_hash.0);
    script.append(OP_EQUAL);
    script
}

/// Creates the multisig unlock script: OP_0, each signature with its type byte, then the redeem script.
///
/// `der_sigs` must already be in the order their keys appear in the redeem script.
#[must_use]
pub fn create_unlock_script(der_sigs: &[Vec<u8>], redeem_script: &Script) -> Script {
    let mut script = Script::new();
    // CHECKMULTISIG pops one item more than it uses
    script.append(OP_0);
    for der_sig in der_sigs {
        let mut sig = der_sig.clone();
        sig.push(SIGHASH_ALL);
        script.append_data(&sig);
    }
    script.append_data(&redeem_script.0);
    script
}

/// Splits a multisig unlock script into DER signatures (type byte removed) and the redeem script.
///
/// # Errors
/// `Error::InvalidScript` if the script does not follow the template or a
/// signature is not SIGHASH_ALL.
pub fn parse_unlock_script(unlock_script: &Script) -> Result<(Vec<Vec<u8>>, Script)> {
    let bad = |msg: &str| Error::InvalidScript(format!("Not a multisig unlock script: {}", msg));
    let ops = unlock_script.instructions()?;
    let (first, rest) = ops.split_first().ok_or_else(|| bad("empty"))?;
    if *first != Instruction::Op(OP_0) {
        return Err(bad("missing leading OP_0"));
    }
    let (last, sigs) = rest.split_last().ok_or_else(|| bad("missing redeem script"))?;
    let redeem_script = match last {
        Instruction::Push(data) => Script(data.to_vec()),
        Instruction::Op(_) => return Err(bad("missing redeem script")),
    };
    let mut der_sigs = Vec::with_capacity(sigs.len());
    for op in sigs {
        match op {
            Instruction::Push(sig) => match sig.split_last() {
                Some((&SIGHASH_ALL, der)) => der_sigs.push(der.to_vec()),
                _ => return Err(bad("signature is not SIGHASH_ALL")),
            },
            Instruction::Op(_) => return Err(bad("expected signature push")),
        }
    }
    Ok((der_sigs, redeem_script))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::op_codes::OP_PUSHDATA1;
    use crate::script::multisig::build_redeem_script;
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    fn redeem() -> Script {
        build_redeem_script(
            &[
                hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798").to_vec(),
                hex!("02c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5").to_vec(),
            ],
            1,
        )
        .unwrap()
    }

    #[test]
    fn lock_script() {
        let s = create_lock_script(&Hash160([3; 20]));
        assert_eq!(s.to_hex(), format!("a914{}87", "03".repeat(20)));
    }

    #[test]
    fn unlock_round_trip() -> Result<()> {
        let redeem = redeem();
        let sigs = vec![vec![0x30; 70], vec![0x30; 71]];
        let s = create_unlock_script(&sigs, &redeem);
        assert_eq!(s.0[0], OP_0);
        let (parsed, parsed_redeem) = parse_unlock_script(&s)?;
        assert_eq!(parsed, sigs);
        assert_eq!(parsed_redeem, redeem);
        Ok(())
    }

    #[test]
    fn no_signatures_yet() -> Result<()> {
        let s = create_unlock_script(&[], &redeem());
        let (parsed, _) = parse_unlock_script(&s)?;
        assert!(parsed.is_empty());
        Ok(())
    }

    #[test]
    fn large_redeem_uses_pushdata1() {
        let s = create_unlock_script(&[], &Script(vec![0x51; 105]));
        assert_eq!(&s.0[..3], &[OP_0, OP_PUSHDATA1, 105]);
    }

    #[test]
    fn malformed() {
        assert!(parse_unlock_script(&Script::new()).is_err());
        assert!(parse_unlock_script(&Script(vec![OP_0])).is_err());
        let mut wrong_type = Script::new();
        wrong_type.append(OP_0);
        wrong_type.append_data(&[0x30, 0x02]);
        wrong_type.append_data(&redeem().0);
        assert!(matches!(parse_unlock_script(&wrong_type), Err(Error::InvalidScript(_))));
    }
}
