//! Compact-size integer encoding used for counts and script lengths.

use crate::util::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io;
use std::io::{Read, Write};

/// Encoded length of `n`: one byte up to 0xfc, otherwise a marker byte plus 2, 4 or 8.
#[must_use]
#[inline]
pub fn size(n: u64) -> usize {
    match n {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Writes `n` in its shortest form.
#[inline]
pub fn write(n: u64, writer: &mut dyn Write) -> io::Result<()> {
    match size(n) {
        1 => writer.write_u8(n as u8),
        3 => {
            writer.write_u8(0xfd)?;
            writer.write_u16::<LittleEndian>(n as u16)
        }
        5 => {
            writer.write_u8(0xfe)?;
            writer.write_u32::<LittleEndian>(n as u32)
        }
        _ => {
            writer.write_u8(0xff)?;
            writer.write_u64::<LittleEndian>(n)
        }
    }
}

/// Reads a compact size, rejecting non-minimal encodings.
///
/// # Errors
/// `Error::SerializationError` on short input or a non-canonical prefix.
pub fn read(reader: &mut dyn Read) -> Result<u64> {
    let n0 = reader.read_u8()?;
    let (n, min) = match n0 {
        0xff => (reader.read_u64::<LittleEndian>()?, 0x1_0000_0000),
        0xfe => (u64::from(reader.read_u32::<LittleEndian>()?), 0x1_0000),
        0xfd => (u64::from(reader.read_u16::<LittleEndian>()?), 0xfd),
        _ => return Ok(u64::from(n0)),
    };
    if n < min {
        return Err(Error::SerializationError(format!("Non-canonical compact size {}", n)));
    }
    Ok(n)
}
