//! Script byte sequences: building pushes and walking instructions.

pub mod multisig;
pub mod op_codes;

use crate::script::op_codes::{OP_PUSH, OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};
use crate::util::{var_int, Error, Result};
use std::fmt;
use std::io;
use std::io::{Read, Write};

/// Largest script accepted when parsing transaction bytes.
pub const MAX_SCRIPT_SIZE: usize = 10_000;

/// Transaction script (scriptSig, scriptPubKey or redeem script).
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Script(pub Vec<u8>);

/// One parsed script instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    /// A non-push opcode, or OP_0
    Op(u8),
    /// Data pushed by a push opcode
    Push(&'a [u8]),
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    #[inline]
    pub fn new() -> Script {
        Script(vec![])
    }

    /// Appends a single opcode or data byte.
    #[inline]
    pub fn append(&mut self, byte: u8) {
        self.0.push(byte);
    }

    /// Appends a slice of data verbatim.
    #[inline]
    pub fn append_slice(&mut self, slice: &[u8]) {
        self.0.extend_from_slice(slice);
    }

    /// Appends `data` with the shortest standard push prefix.
    pub fn append_data(&mut self, data: &[u8]) {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(OP_PUSH + len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
    }

    /// Parses the script into instructions.
    ///
    /// OP_0 is reported as `Op(OP_0)`, not as an empty push.
    ///
    /// # Errors
    /// `Error::InvalidScript` if a push runs past the end of the script.
    pub fn instructions(&self) -> Result<Vec<Instruction<'_>>> {
        let script = &self.0;
        let mut ops = Vec::new();
        let mut i = 0;
        while i < script.len() {
            let op = script[i];
            let (start, len) = match op {
                1..=75 => (i + 1, op as usize),
                OP_PUSHDATA1 => (i + 2, *script.get(i + 1).ok_or_else(truncated)? as usize),
                OP_PUSHDATA2 => {
                    let b = script.get(i + 1..i + 3).ok_or_else(truncated)?;
                    (i + 3, u16::from_le_bytes([b[0], b[1]]) as usize)
                }
                OP_PUSHDATA4 => {
                    let b = script.get(i + 1..i + 5).ok_or_else(truncated)?;
                    (i + 5, u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize)
                }
                _ => {
                    ops.push(Instruction::Op(op));
                    i += 1;
                    continue;
                }
            };
            let data = script.get(start..start + len).ok_or_else(truncated)?;
            ops.push(Instruction::Push(data));
            i = start + len;
        }
        Ok(ops)
    }

    /// Size on the wire: compact-size length followed by the bytes.
    #[must_use]
    #[inline]
    pub fn wire_size(&self) -> usize {
        var_int::size(self.0.len() as u64) + self.0.len()
    }

    /// Reads a length-prefixed script.
    ///
    /// # Errors
    /// `Error::SerializationError` on short input or a length over [`MAX_SCRIPT_SIZE`].
    pub fn read_prefixed(reader: &mut dyn Read) -> Result<Script> {
        let len = var_int::read(reader)?;
        if len > MAX_SCRIPT_SIZE as u64 {
            return Err(Error::SerializationError(format!("Script too long: {}", len)));
        }
        let mut bytes = vec![0; len as usize];
        reader.read_exact(&mut bytes)?;
        Ok(Script(bytes))
    }

    /// Writes the script with its length prefix.
    pub fn write_prefixed(&self, writer: &mut dyn Write) -> io::Result<()> {
        var_int::write(self.0.len() as u64, writer)?;
        writer.write_all(&self.0)
    }

    /// Lowercase hex of the script bytes.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

fn truncated() -> Error {
    Error::InvalidScript("Push past end of script".to_string())
}

impl From<Vec<u8>> for Script {
    fn from(v: Vec<u8>) -> Self {
        Script(v)
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}

/// Gets the next operation index in the script, or the script length if at the end
pub fn next_op(i: usize, script: &[u8]) -> usize {
    if i >= script.len() {
        return script.len();
    }
    let next = match script[i] {
        len @ 1..=75 => i + 1 + len as usize,
        OP_PUSHDATA1 => match script.get(i + 1) {
            Some(&len) => i + 2 + len as usize,
            None => script.len(),
        },
        OP_PUSHDATA2 => match script.get(i + 1..i + 3) {
            Some(b) => i + 3 + u16::from_le_bytes([b[0], b[1]]) as usize,
            None => script.len(),
        },
        OP_PUSHDATA4 => match script.get(i + 1..i + 5) {
            Some(b) => i + 5 + u32::from_le_bytes([b[0], b[1], b[2], b[3]]) as usize,
            None => script.len(),
        },
        _ => i + 1,
    };
    next.min(script.len())
}
