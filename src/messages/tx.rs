//! Raw transaction in the legacy (pre-witness) wire format.

use crate::messages::{OutPoint, TxIn, TxOut};
use crate::util::{read_exact_all, sha256d, var_int, Error, Hash256, Result, Serializable};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::io;
use std::io::{Read, Write};

/// Version given to newly built transactions.
pub const TX_VERSION: u32 = 1;

/// Lock time given to newly built transactions.
pub const DEFAULT_LOCK_TIME: u32 = 0;

// Caps preallocation when a count prefix is corrupt.
const MAX_PREALLOC: u64 = 1024;

/// Dogecoin transaction.
#[derive(Default, PartialEq, Eq, Hash, Clone)]
pub struct Tx {
    /// Transaction version.
    pub version: u32,
    /// Transaction inputs.
    pub inputs: Vec<TxIn>,
    /// Transaction outputs.
    pub outputs: Vec<TxOut>,
    /// The block number or timestamp at which this transaction is unlocked.
    pub lock_time: u32,
}

impl Tx {
    /// Calculates the hash of the transaction (txid).
    #[must_use]
    pub fn hash(&self) -> Hash256 {
        sha256d(&self.to_bytes())
    }

    /// Returns the serialized size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        8 + var_int::size(self.inputs.len() as u64)
            + self.inputs.iter().map(TxIn::size).sum::<usize>()
            + var_int::size(self.outputs.len() as u64)
            + self.outputs.iter().map(TxOut::size).sum::<usize>()
    }

    /// Position of the input spending `outpoint`.
    ///
    /// # Errors
    /// `Error::InputNotFound` if no input spends it.
    pub fn find_input(&self, outpoint: &OutPoint) -> Result<usize> {
        self.inputs
            .iter()
            .position(|tx_in| tx_in.prev_output == *outpoint)
            .ok_or_else(|| Error::InputNotFound(outpoint.to_string()))
    }

    /// Parses a transaction from bytes, rejecting trailing data.
    ///
    /// # Errors
    /// `Error::SerializationError` on malformed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Tx> {
        read_exact_all(bytes)
    }

    /// Parses a transaction from lowercase or uppercase hex.
    ///
    /// # Errors
    /// `Error::InvalidEncoding` for bad hex, `Error::SerializationError` for bad bytes.
    pub fn from_hex(s: &str) -> Result<Tx> {
        Tx::from_bytes(&hex::decode(s)?)
    }

    /// Lowercase hex of the serialized transaction.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl Serializable<Tx> for Tx {
    fn read(reader: &mut dyn Read) -> Result<Tx> {
        Ok(Tx {
            version: reader.read_u32::<LittleEndian>()?,
            inputs: read_list(reader)?,
            outputs: read_list(reader)?,
            lock_time: reader.read_u32::<LittleEndian>()?,
        })
    }

    fn write(&self, writer: &mut dyn Write) -> io::Result<()> {
        writer.write_u32::<LittleEndian>(self.version)?;
        write_list(&self.inputs, writer)?;
        write_list(&self.outputs, writer)?;
        writer.write_u32::<LittleEndian>(self.lock_time)
    }
}

fn read_list<T: Serializable<T>>(reader: &mut dyn Read) -> Result<Vec<T>> {
    let n = var_int::read(reader)?;
    let mut items = Vec::with_capacity(n.min(MAX_PREALLOC) as usize);
    for _ in 0..n {
        items.push(T::read(reader)?);
    }
    Ok(items)
}

fn write_list<T: Serializable<T>>(items: &[T], writer: &mut dyn Write) -> io::Result<()> {
    var_int::write(items.len() as u64, writer)?;
    items.iter().try_for_each(|item| item.write(writer))
}

impl fmt::Debug for Tx {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Tx")
            .field("txid", &self.hash())
            .field("version", &self.version)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("lock_time", &self.lock_time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;
    use pretty_assertions::assert_eq;

    #[test]
    fn signed_p2pkh_layout() -> Result<()> {
        let bytes = hex::decode("01000000011f1e1d1c1b1a191817161514131211100f0e0d0c0b0a09080706050403020100000000006a47304402201638c0fa981b266070ca43d7370636dbf15d7e80d4dddbd902ea4ea141f217dc02204f5f92fc7467bb9105586cf469b3b95ef3296ba5a599232ca8b6ca702e13cebd01210279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798ffffffff0100f2052a010000001976a914751e76e8199196d454941c45d1b3a323f1433bd688ac00000000")?;
        let t = Tx::from_bytes(&bytes)?;
        assert_eq!(t.version, TX_VERSION);
        assert_eq!(t.lock_time, DEFAULT_LOCK_TIME);
        assert_eq!(t.inputs.len(), 1);
        assert_eq!(t.inputs[0].unlock_script.0.len(), 0x6a);
        assert_eq!(t.outputs[0].amount, 5_000_000_000);
        assert_eq!(t.size(), bytes.len());
        assert_eq!(t.to_bytes(), bytes);
        Ok(())
    }

    #[test]
    fn many_inputs_and_long_scripts() -> Result<()> {
        let t = Tx {
            version: 2,
            inputs: (0..300)
                .map(|i| TxIn { prev_output: OutPoint { hash: Hash256([i as u8; 32]), index: i }, unlock_script: Script(vec![3; 333]), sequence: i })
                .collect(),
            outputs: vec![TxOut { amount: 199, lock_script: Script(vec![0x51]) }],
            lock_time: 1000,
        };
        let v = t.to_bytes();
        assert_eq!(&v[4..7], &[0xfd, 0x2c, 0x01]);
        assert_eq!(v.len(), t.size());
        assert_eq!(Tx::from_bytes(&v)?, t);
        Ok(())
    }

    #[test]
    fn txid_of_known_tx() {
        // Bitcoin genesis coinbase; the wire format is shared
        let tx = Tx {
            version: 1,
            inputs: vec![TxIn {
                prev_output: OutPoint { hash: Hash256([0; 32]), index: 0xffffffff },
                unlock_script: Script(vec![4, 255, 255, 0, 29, 1, 4, 69, 84, 104, 101, 32, 84, 105, 109, 101, 115, 32, 48, 51, 47, 74, 97, 110, 47, 50, 48, 48, 57, 32, 67, 104, 97, 110, 99, 101, 108, 108, 111, 114, 32, 111, 110, 32, 98, 114, 105, 110, 107, 32, 111, 102, 32, 115, 101, 99, 111, 110, 100, 32, 98, 97, 105, 108, 111, 117, 116, 32, 102, 111, 114, 32, 98, 97, 110, 107, 115]),
                sequence: 0xffffffff,
            }],
            outputs: vec![TxOut {
                amount: 5000000000,
                lock_script: Script(vec![
                    65, 4, 103, 138, 253, 176, 254, 85, 72, 39, 25, 103, 241, 166, 113, 48, 183, 16, 92, 214, 168, 40, 224, 57, 9, 166, 121, 98, 224, 234, 31, 97, 222, 182, 73, 246, 188, 63, 76, 239, 56, 196, 243, 85, 4, 229, 30, 193, 18, 222, 92, 56, 77, 247, 186, 11, 141, 87, 138, 76, 112, 43, 107, 241, 29, 95, 172,
                ]),
            }],
            lock_time: 0,
        };
        let h = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
        assert_eq!(tx.hash(), Hash256::decode(h).unwrap());
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(Tx::from_hex("zz"), Err(Error::InvalidEncoding(_))));
        assert!(matches!(Tx::from_hex("01000000"), Err(Error::SerializationError(_))));
        let base = "01000000011f1e1d1c1b1a191817161514131211100f0e0d0c0b0a090807060504030201000000000000ffffffff0000000000";
        assert!(Tx::from_hex(base).is_ok());
        assert!(matches!(Tx::from_hex(&format!("{}00", base)), Err(Error::SerializationError(_))));
    }

    #[test]
    fn find_input() -> Result<()> {
        let base = Tx::from_hex("01000000011f1e1d1c1b1a191817161514131211100f0e0d0c0b0a090807060504030201000000000000ffffffff0000000000")?;
        let op = OutPoint::from_txid("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f", 0)?;
        assert_eq!(base.find_input(&op)?, 0);
        let missing = OutPoint { index: 1, ..op };
        assert!(matches!(base.find_input(&missing), Err(Error::InputNotFound(_))));
        Ok(())
    }
}
