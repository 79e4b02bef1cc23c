//! Framing helpers shared by the codec implementations.

use crate::Error;
use bytes::{Buf, BufMut};

/// Width of every length and count prefix.
pub const PREFIX_SIZE: usize = 4;

/// Checks that the buffer has at least `len` bytes remaining.
#[inline]
pub fn at_least<B: Buf>(buf: &mut B, len: usize) -> Result<(), Error> {
    let remaining = buf.remaining();
    if remaining < len {
        return Err(Error::InsufficientData {
            needed: len,
            remaining,
        });
    }
    Ok(())
}

/// Writes a 4-byte little-endian length (or count) prefix.
#[inline]
pub fn write_len(len: usize, buf: &mut impl BufMut) -> Result<(), Error> {
    let len32 = u32::try_from(len).map_err(|_| Error::LengthOverflow(len))?;
    buf.put_u32_le(len32);
    Ok(())
}

/// Reads a 4-byte little-endian length (or count) prefix.
#[inline]
pub fn read_len(buf: &mut impl Buf) -> Result<usize, Error> {
    at_least(buf, PREFIX_SIZE)?;
    let len32 = buf.get_u32_le();
    usize::try_from(len32).map_err(|_| Error::Invalid("length prefix", "exceeds usize"))
}

/// Writes exactly `n` bytes of `data`, truncating it or padding it on the right with zeros.
#[inline]
pub fn write_fixed(data: &[u8], n: u32, buf: &mut impl BufMut) {
    let n = n as usize;
    let take = data.len().min(n);
    buf.put_slice(&data[..take]);
    buf.put_bytes(0, n - take);
}

/// Writes `data` behind a length prefix.
#[inline]
pub fn write_prefixed(data: &[u8], buf: &mut impl BufMut) -> Result<(), Error> {
    write_len(data.len(), buf)?;
    buf.put_slice(data);
    Ok(())
}
