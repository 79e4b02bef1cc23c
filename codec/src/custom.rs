//! Values that supply their own encoding.
//!
//! A type implementing [SelfCodec] replaces the structural encoding entirely. Register it with
//! [impl_self_codec!](crate::impl_self_codec) to make it usable wherever [Read](crate::Read) and
//! [Write](crate::Write) are expected:
//!
//! - As a record field (or any nested position), the payload is wrapped in an envelope:
//!   `[4-byte LE length][payload]`. Tags on such fields are ignored.
//! - As a top-level value, the payload is written as-is, and decoding hands the whole remaining
//!   input to [SelfCodec::decode_self]. Since the codec cannot tell how much of that input was
//!   actually used, the unconsumed byte count is always reported as zero.
//!
//! ```
//! use binwire_codec::{impl_self_codec, marshal, unmarshal, Error, SelfCodec};
//! use bytes::Bytes;
//!
//! #[derive(Debug, PartialEq)]
//! struct Version(u8, u8);
//!
//! impl SelfCodec for Version {
//!     fn encode_self(&self) -> Result<Bytes, Error> {
//!         Ok(Bytes::from(format!("{}.{}", self.0, self.1)))
//!     }
//!
//!     fn decode_self(data: Bytes) -> Result<Self, Error> {
//!         let text = std::str::from_utf8(&data)?;
//!         let (major, minor) = text
//!             .split_once('.')
//!             .ok_or(Error::Invalid("Version", "missing separator"))?;
//!         let parse = |part: &str| -> Result<u8, Error> {
//!             part.parse::<u8>()
//!                 .map_err(|err| Error::Wrapped("Version", Box::new(err)))
//!         };
//!         Ok(Version(parse(major)?, parse(minor)?))
//!     }
//! }
//!
//! impl_self_codec!(Version);
//!
//! let encoded = marshal(&Version(1, 12)).unwrap();
//! assert_eq!(&encoded[..], b"1.12");
//! assert_eq!(unmarshal::<Version>(encoded).unwrap(), Version(1, 12));
//! ```

use crate::{
    util::{at_least, read_len, write_prefixed},
    Error,
};
use bytes::{Buf, BufMut, Bytes};

/// A value-level encode/decode pair that bypasses structural encoding.
pub trait SelfCodec: Sized {
    /// Produces the value's complete binary form.
    fn encode_self(&self) -> Result<Bytes, Error>;

    /// Reconstructs a value from its binary form.
    fn decode_self(data: Bytes) -> Result<Self, Error>;
}

/// Writes the value's payload behind a length prefix.
pub fn write_envelope<T: SelfCodec>(value: &T, buf: &mut impl BufMut) -> Result<(), Error> {
    let payload = value.encode_self()?;
    write_prefixed(&payload, buf)
}

/// Reads a length-prefixed payload and decodes the value from it.
pub fn read_envelope<T: SelfCodec>(buf: &mut impl Buf) -> Result<T, Error> {
    let len = read_len(buf)?;
    at_least(buf, len)?;
    T::decode_self(buf.copy_to_bytes(len))
}

/// Writes the value's payload with no envelope.
pub fn write_raw<T: SelfCodec>(value: &T, buf: &mut impl BufMut) -> Result<(), Error> {
    let payload = value.encode_self()?;
    buf.put_slice(&payload);
    Ok(())
}

/// Decodes the value from the whole remaining buffer.
pub fn read_raw<T: SelfCodec>(buf: &mut impl Buf) -> Result<T, Error> {
    let len = buf.remaining();
    T::decode_self(buf.copy_to_bytes(len))
}

/// Implements [Read](crate::Read) and [Write](crate::Write) for types implementing [SelfCodec].
#[macro_export]
macro_rules! impl_self_codec {
    ($($type:ty),+ $(,)?) => {
        $(
            impl $crate::Write for $type {
                const SELF_CODEC: bool = true;

                #[inline]
                fn write_framed(
                    &self,
                    buf: &mut impl $crate::bytes::BufMut,
                    _: $crate::Framing,
                ) -> ::core::result::Result<(), $crate::Error> {
                    $crate::custom::write_envelope(self, buf)
                }

                #[inline]
                fn marshal_into(
                    &self,
                    buf: &mut impl $crate::bytes::BufMut,
                ) -> ::core::result::Result<(), $crate::Error> {
                    $crate::custom::write_raw(self, buf)
                }
            }

            impl $crate::Read for $type {
                const SELF_CODEC: bool = true;

                #[inline]
                fn read_framed(
                    buf: &mut impl $crate::bytes::Buf,
                    _: $crate::Framing,
                ) -> ::core::result::Result<Self, $crate::Error> {
                    $crate::custom::read_envelope(buf)
                }

                #[inline]
                fn unmarshal_from(
                    buf: &mut impl $crate::bytes::Buf,
                ) -> ::core::result::Result<Self, $crate::Error> {
                    $crate::custom::read_raw(buf)
                }
            }
        )+
    };
}
