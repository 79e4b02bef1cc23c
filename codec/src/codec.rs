//! Core codec traits and the top-level marshal/unmarshal operations

use crate::{error::Error, tag::Framing};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::trace;

/// Trait for types that can be written (encoded) to a buffer.
pub trait Write {
    /// Whether the type supplies its own encoding (see [crate::SelfCodec]).
    ///
    /// Self-encoding record fields ignore their tags, including exclusion.
    const SELF_CODEC: bool = false;

    /// Encodes this value by writing to a buffer using the given framing.
    ///
    /// Types without a variable size (scalars, records, tuples) ignore the framing.
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error>;

    /// Encodes this value using its default framing.
    ///
    /// (Provided method).
    fn write(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.write_framed(buf, Framing::Default)
    }

    /// Encodes this value as a top-level value.
    ///
    /// Identical to [Write::write] except for self-encoding types, which write their payload
    /// without an envelope.
    ///
    /// (Provided method).
    fn marshal_into(&self, buf: &mut impl BufMut) -> Result<(), Error> {
        self.write(buf)
    }
}

/// Trait for types that can be read (decoded) from a buffer.
pub trait Read: Sized {
    /// Whether the type supplies its own decoding (see [crate::SelfCodec]).
    const SELF_CODEC: bool = false;

    /// Reads a value from the buffer using the given framing, consuming the necessary bytes.
    fn read_framed(buf: &mut impl Buf, framing: Framing) -> Result<Self, Error>;

    /// Reads a value using its default framing.
    ///
    /// (Provided method).
    fn read(buf: &mut impl Buf) -> Result<Self, Error> {
        Self::read_framed(buf, Framing::Default)
    }

    /// Reads a top-level value.
    ///
    /// Identical to [Read::read] except for self-encoding types, which consume the whole
    /// remaining buffer.
    ///
    /// (Provided method).
    fn unmarshal_from(buf: &mut impl Buf) -> Result<Self, Error> {
        Self::read(buf)
    }
}

/// Extension trait providing top-level encoding for any [Write] type.
pub trait Encode: Write {
    /// Encodes this value into a new buffer.
    fn encode(&self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::new();
        self.marshal_into(&mut buf)?;
        trace!(len = buf.len(), "encoded value");
        Ok(buf.freeze())
    }
}

impl<T: Write + ?Sized> Encode for T {}

/// Extension trait providing top-level decoding for any [Read] type.
pub trait Decode: Read {
    /// Decodes a value, ensuring the buffer is fully consumed.
    fn decode(buf: impl Buf) -> Result<Self, Error> {
        let (remaining, result) = Self::decode_partial(buf);
        let value = result?;
        if remaining > 0 {
            return Err(Error::TrailingData(remaining));
        }
        Ok(value)
    }

    /// Decodes a value, returning the number of bytes left unconsumed alongside the result.
    ///
    /// The count is reported for failures too, reflecting how far decoding progressed.
    fn decode_partial(mut buf: impl Buf) -> (usize, Result<Self, Error>) {
        let result = Self::unmarshal_from(&mut buf);
        let remaining = buf.remaining();
        trace!(remaining, ok = result.is_ok(), "decoded value");
        (remaining, result)
    }
}

impl<T: Read> Decode for T {}

/// Encodes `value` into its binary form.
///
/// ```
/// let encoded = binwire_codec::marshal(&vec![10u32, 20, 30, 40, 50]).unwrap();
/// assert_eq!(encoded.len(), 4 + 5 * 4);
/// ```
pub fn marshal<T: Write + ?Sized>(value: &T) -> Result<Bytes, Error> {
    value.encode()
}

/// Decodes a value of type `T`, failing with [Error::TrailingData] if any bytes remain.
///
/// ```
/// let encoded = binwire_codec::marshal("hello").unwrap();
/// let decoded: String = binwire_codec::unmarshal(encoded).unwrap();
/// assert_eq!(decoded, "hello");
/// ```
pub fn unmarshal<T: Read>(buf: impl Buf) -> Result<T, Error> {
    T::decode(buf)
}

/// Decodes a value of type `T` from the front of `buf`, returning the number of bytes that
/// were not consumed.
///
/// ```
/// let mut data = binwire_codec::marshal(&7u16).unwrap().to_vec();
/// data.extend_from_slice(&[0xAA, 0xBB]);
/// let (remaining, decoded) = binwire_codec::unmarshal_partial::<u16>(&data[..]);
/// assert_eq!(remaining, 2);
/// assert_eq!(decoded.unwrap(), 7);
/// ```
pub fn unmarshal_partial<T: Read>(buf: impl Buf) -> (usize, Result<T, Error>) {
    T::decode_partial(buf)
}
