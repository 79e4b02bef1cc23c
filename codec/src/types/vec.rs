//! Codec implementations for homogeneous sequences.
//!
//! With default framing a 4-byte element count precedes the elements. With [Framing::Fixed]
//! exactly `n` elements are written and no count: a longer sequence is truncated, and a shorter
//! one is padded with the element type's default (zero) value. Elements always use their own
//! default framing.
//!
//! A `Vec<u8>` is a sequence of single-byte elements, so its encoding is identical to the byte
//! framing used for [bytes::Bytes].
//!
//! Fixed-size arrays `[T; N]` keep the first `min(L, N)` of the `L` encoded elements. Elements
//! past `N` are decoded into a discarded temporary (keeping the buffer aligned) and positions past
//! `L` are filled with `T::default()`.

use crate::{
    util::{read_len, write_len},
    Error, Framing, Read, Write,
};
use bytes::{Buf, BufMut};

/// Writes one element, attaching its position to any error.
#[inline]
fn write_element<T: Write>(item: &T, buf: &mut impl BufMut, index: usize) -> Result<(), Error> {
    item.write(buf).map_err(|err| err.in_element(index))
}

/// Writes the elements of a sequence using the given framing.
fn write_elements<T: Write + Default>(
    items: &[T],
    buf: &mut impl BufMut,
    framing: Framing,
) -> Result<(), Error> {
    match framing {
        Framing::Default => {
            write_len(items.len(), buf)?;
            for (index, item) in items.iter().enumerate() {
                write_element(item, buf, index)?;
            }
        }
        Framing::Fixed(n) => {
            let n = n as usize;
            for (index, item) in items.iter().take(n).enumerate() {
                write_element(item, buf, index)?;
            }
            if items.len() < n {
                let zero = T::default();
                for index in items.len()..n {
                    write_element(&zero, buf, index)?;
                }
            }
        }
    }
    Ok(())
}

/// Returns the number of encoded elements that follow, consuming the count prefix if present.
fn read_count(buf: &mut impl Buf, framing: Framing) -> Result<usize, Error> {
    match framing {
        Framing::Default => read_len(buf),
        Framing::Fixed(n) => Ok(n as usize),
    }
}

/// Reads one element, attaching its position to any error.
#[inline]
fn read_element<T: Read>(buf: &mut impl Buf, index: usize) -> Result<T, Error> {
    T::read(buf).map_err(|err| err.in_element(index))
}

impl<T: Write + Default> Write for [T] {
    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
        write_elements(self, buf, framing)
    }
}

impl<T: Write + Default> Write for Vec<T> {
    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
        write_elements(self, buf, framing)
    }
}

impl<T: Read> Read for Vec<T> {
    fn read_framed(buf: &mut impl Buf, framing: Framing) -> Result<Self, Error> {
        let len = read_count(buf, framing)?;

        // Every element consumes at least one byte unless it is zero-sized, so the remaining
        // input bounds any honest count.
        let mut vec = Vec::with_capacity(len.min(buf.remaining()));
        for index in 0..len {
            vec.push(read_element(buf, index)?);
        }
        Ok(vec)
    }
}

impl<T: Write + Default, const N: usize> Write for [T; N] {
    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
        write_elements(self, buf, framing)
    }
}

impl<T: Read + Default, const N: usize> Read for [T; N] {
    fn read_framed(buf: &mut impl Buf, framing: Framing) -> Result<Self, Error> {
        let len = read_count(buf, framing)?;
        let mut items = Vec::with_capacity(N);
        for index in 0..len {
            let item = read_element::<T>(buf, index)?;
            if index < N {
                items.push(item);
            }
        }
        items.resize_with(N, T::default);
        items
            .try_into()
            .map_err(|_| Error::Invalid("array", "element count mismatch"))
    }
}
