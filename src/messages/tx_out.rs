//! Transaction output.

use crate::script::Script;
use crate::util::{Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Pays `amount` to whoever satisfies `lock_script`.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct TxOut {
    /// Amount in koinu (1e-8 DOGE).
    pub amount: u64,
    /// scriptPubKey of the destination address.
    pub lock_script: Script,
}

impl TxOut {
    /// Serialized size in bytes.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        8 + self.lock_script.wire_size()
    }
}

impl Serializable<TxOut> for TxOut {
    fn read(reader: &mut dyn Read) -> Result<TxOut> {
        let amount = reader.read_u64::<LittleEndian>()?;
        Ok(TxOut { amount, lock_script: Script::read_prefixed(reader)? })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u64::<LittleEndian>(self.amount)?;
        self.lock_script.write_prefixed(writer)
    }
}
