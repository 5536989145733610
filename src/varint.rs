//! The packed signed integer used for every fixnum, length, and count in a marshal stream.
//!
//! The first byte, read as an `i8`, selects the form:
//!
//! - `0` is zero.
//! - `6..=127` is a small positive number, offset by 5.
//! - `-128..=-6` is a small negative number, offset by 5.
//! - `1..=5` is followed by that many little-endian bytes of magnitude.
//! - `-5..=-1` is followed by that many little-endian bytes, laid over an all-ones value.

use byteorder::ReadBytesExt;

use crate::error::{Error, Result};

/// Read one varint off the front of `buf`.
pub fn read(buf: &mut &[u8]) -> Result<i64> {
    let c = buf
        .read_i8()
        .map_err(|_| Error::short("decode varint", 0, 1))? as i64;
    if c == 0 {
        return Ok(0);
    }
    if 5 < c && c < 128 {
        return Ok(c - 5);
    }
    if -129 < c && c < -5 {
        return Ok(c + 5);
    }

    let n = c.unsigned_abs() as usize;
    if buf.len() < n {
        return Err(Error::short("decode varint bytes", buf.len(), n));
    }
    let mut result: i64 = if c > 0 { 0 } else { -1 };
    for i in 0..n {
        let byte = buf.read_u8().map_err(|_| Error::short("decode varint bytes", 0, 1))?;
        let shift = 8 * i as u32;
        result &= !(0xff_i64 << shift);
        result |= (byte as i64) << shift;
    }
    Ok(result)
}

/// Read a varint that must not be negative, such as a byte length or an element count.
pub fn read_len(buf: &mut &[u8], step: &'static str) -> Result<usize> {
    let len = read(buf)?;
    usize::try_from(len).map_err(|_| Error::BadLength { step, len })
}
