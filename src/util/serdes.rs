//! Binary serialization trait for wire objects.
use crate::util::Result;
use std::io;
use std::io::{Cursor, Read, Write};

/// An object that may be serialized and deserialized in wire format.
pub trait Serializable<T> {
    /// Reads the object from serialized form.
    ///
    /// # Errors
    /// `Error::SerializationError` on short or invalid data.
    fn read(reader: &mut dyn Read) -> Result<T>
    where
        Self: Sized;

    /// Writes the object to serialized form.
    ///
    /// # Errors
    /// IO errors from the writer.
    fn write(&self, writer: &mut dyn Write) -> io::Result<()>;

    /// Serializes into a fresh byte vector.
    fn to_bytes(&self) -> Vec<u8> {
        let mut v = Vec::new();
        // Writes into a Vec cannot fail.
        let _ = self.write(&mut v);
        v
    }
}

/// Reads a value that must consume the whole buffer.
///
/// # Errors
/// `Error::SerializationError` if the value is malformed or bytes trail it.
pub fn read_exact_all<T: Serializable<T>>(bytes: &[u8]) -> Result<T> {
    let mut cursor = Cursor::new(bytes);
    let value = T::read(&mut cursor)?;
    if cursor.position() as usize != bytes.len() {
        return Err(crate::util::Error::SerializationError(format!(
            "{} trailing bytes",
            bytes.len() - cursor.position() as usize
        )));
    }
    Ok(value)
}
