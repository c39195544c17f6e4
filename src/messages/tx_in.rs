//! Transaction input.
use crate::messages::out_point::OutPoint;
use crate::script::Script;
use crate::util::{Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Sequence number given to new inputs (final, no relative locktime).
pub const DEFAULT_SEQUENCE: u32 = 0xffffffff;

/// Spends one previous output.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct TxIn {
    /// Output being spent.
    pub prev_output: OutPoint,
    /// scriptSig, empty until signed.
    pub unlock_script: Script,
    /// Sequence number.
    pub sequence: u32,
}

impl TxIn {
    /// Unsigned input spending `prev_output` with the final sequence number.
    #[must_use]
    pub fn unsigned(prev_output: OutPoint) -> TxIn {
        TxIn { prev_output, unlock_script: Script::new(), sequence: DEFAULT_SEQUENCE }
    }

    /// Serialized size in bytes.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        OutPoint::SIZE + self.unlock_script.wire_size() + 4
    }
}

impl Serializable<TxIn> for TxIn {
    fn read(reader: &mut dyn Read) -> Result<TxIn> {
        Ok(TxIn {
            prev_output: OutPoint::read(reader)?,
            unlock_script: Script::read_prefixed(reader)?,
            sequence: reader.read_u32::<LittleEndian>()?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        self.prev_output.write(writer)?;
        self.unlock_script.write_prefixed(writer)?;
        writer.write_u32::<LittleEndian>(self.sequence)
    }
}
