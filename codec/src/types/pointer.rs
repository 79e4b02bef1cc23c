//! Codec implementations for boxes and references.
//!
//! Both are transparent: the pointee is encoded with the framing applied to the pointer, and
//! decoding a [Box] allocates a fresh value.

use crate::{Error, Framing, Read, Write};
use bytes::{Buf, BufMut};

impl<T: Write + ?Sized> Write for &T {
    const SELF_CODEC: bool = T::SELF_CODEC;

    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
        (**self).write_framed(buf, framing)
    }

    #[inline]
    fn marshal_into(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        (**self).marshal_into(buf)
    }
}

impl<T: Write + ?Sized> Write for Box<T> {
    const SELF_CODEC: bool = T::SELF_CODEC;

    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
        (**self).write_framed(buf, framing)
    }

    #[inline]
    fn marshal_into(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        (**self).marshal_into(buf)
    }
}

impl<T: Read> Read for Box<T> {
    const SELF_CODEC: bool = T::SELF_CODEC;

    #[inline]
    fn read_framed(buf: &mut impl Buf, framing: Framing) -> Result<Self, Error> {
        T::read_framed(buf, framing).map(Box::new)
    }

    #[inline]
    fn unmarshal_from(buf: &mut impl Buf) -> Result<Self, Error> {
        T::unmarshal_from(buf).map(Box::new)
    }
}
