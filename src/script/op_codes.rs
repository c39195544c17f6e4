//! Script opcodes used by the P2PKH and P2SH-multisig templates.
//!
//! # Examples
//! ```
//! use dogecoin_tx::script::op_codes::*;
//! assert_eq!(small_int_op(2), Some(OP_2));
//! assert_eq!(OP_CHECKMULTISIG, 174);
//! ```

// Pushdata and Constants
/// Pushes empty array (0/false) onto the stack.
pub const OP_0: u8 = 0;
/// Base for direct pushes of 1-75 bytes (`OP_PUSH + len`).
pub const OP_PUSH: u8 = 0;
/// Next byte is push length (up to 255 bytes).
pub const OP_PUSHDATA1: u8 = 76;
/// Next two bytes are push length (up to 65535 bytes).
pub const OP_PUSHDATA2: u8 = 77;
/// Next four bytes are push length.
pub const OP_PUSHDATA4: u8 = 78;

/// Pushes 1 onto the stack.
pub const OP_1: u8 = 81;
/// Pushes 2 onto the stack.
pub const OP_2: u8 = 82;
/// Pushes 3 onto the stack.
pub const OP_3: u8 = 83;
/// Pushes 16 onto the stack.
pub const OP_16: u8 = 96;

// Stack
/// Duplicates the top stack item.
pub const OP_DUP: u8 = 118;

// Bitwise logic
/// Pushes 1 if the top two items are equal.
pub const OP_EQUAL: u8 = 135;
/// OP_EQUAL then OP_VERIFY.
pub const OP_EQUALVERIFY: u8 = 136;

// Crypto
/// RIPEMD160(SHA256(top)).
pub const OP_HASH160: u8 = 169;
/// Signature checks only cover the script after the last one of these.
pub const OP_CODESEPARATOR: u8 = 171;
/// Verifies sig for pubkey/tx (1/0).
pub const OP_CHECKSIG: u8 = 172;
/// m-of-n multisig verify (1/0).
pub const OP_CHECKMULTISIG: u8 = 174;

/// Opcode pushing the small integer `n` (1-16).
#[must_use]
#[inline]
pub fn small_int_op(n: usize) -> Option<u8> {
    if (1..=16).contains(&n) {
        Some(OP_1 + (n as u8) - 1)
    } else {
        None
    }
}

/// Small integer (1-16) pushed by `op`, if any.
#[must_use]
#[inline]
pub fn decode_small_int(op: u8) -> Option<usize> {
    if (OP_1..=OP_16).contains(&op) {
        Some((op - OP_1) as usize + 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn small_ints() {
        assert_eq!(small_int_op(0), None);
        assert_eq!(small_int_op(1), Some(OP_1));
        assert_eq!(small_int_op(3), Some(OP_3));
        assert_eq!(small_int_op(16), Some(OP_16));
        assert_eq!(small_int_op(17), None);
        for n in 1..=16 {
            assert_eq!(decode_small_int(small_int_op(n).unwrap()), Some(n));
        }
        assert_eq!(decode_small_int(OP_0), None);
        assert_eq!(decode_small_int(OP_CHECKSIG), None);
    }
}
