//! Codec implementations for text and byte sequences.
//!
//! With default framing the payload is written behind a 4-byte length prefix (a byte count,
//! never a character count). With [Framing::Fixed] exactly `n` bytes are written: longer payloads
//! are truncated and shorter ones padded on the right with zeros.
//!
//! Fixed-framed text is truncated on a character boundary, so the zero padding may start before
//! byte `n`. When decoding it, trailing zeros are stripped before the bytes are interpreted as
//! UTF-8. Fixed-framed [Bytes] keep their trailing zeros.

use crate::{
    util::{at_least, read_len, write_fixed, write_prefixed},
    Error, Framing, Read, Write,
};
use bytes::{Buf, BufMut, Bytes};

/// Writes `data` using the byte-oriented framing.
#[inline]
pub(crate) fn write_bytes(data: &[u8], buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
    match framing {
        Framing::Default => write_prefixed(data, buf),
        Framing::Fixed(n) => {
            write_fixed(data, n, buf);
            Ok(())
        }
    }
}

/// Reads bytes written with the byte-oriented framing.
#[inline]
pub(crate) fn read_bytes(buf: &mut impl Buf, framing: Framing) -> Result<Bytes, Error> {
    let len = match framing {
        Framing::Default => read_len(buf)?,
        Framing::Fixed(n) => n as usize,
    };
    at_least(buf, len)?;
    Ok(buf.copy_to_bytes(len))
}

impl Write for Bytes {
    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
        write_bytes(self, buf, framing)
    }
}

impl Read for Bytes {
    #[inline]
    fn read_framed(buf: &mut impl Buf, framing: Framing) -> Result<Self, Error> {
        read_bytes(buf, framing)
    }
}

/// Returns the longest prefix of `text` that fits in `n` bytes without splitting a character.
fn fit_text(text: &str, n: usize) -> &str {
    if text.len() <= n {
        return text;
    }
    let mut end = n;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

impl Write for str {
    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
        let text = match framing {
            Framing::Default => self,
            Framing::Fixed(n) => fit_text(self, n as usize),
        };
        write_bytes(text.as_bytes(), buf, framing)
    }
}

impl Write for String {
    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
        self.as_str().write_framed(buf, framing)
    }
}

impl Read for String {
    #[inline]
    fn read_framed(buf: &mut impl Buf, framing: Framing) -> Result<Self, Error> {
        let data = read_bytes(buf, framing)?;
        let text = match framing {
            Framing::Default => &data[..],
            Framing::Fixed(_) => {
                let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
                &data[..end]
            }
        };
        Ok(std::str::from_utf8(text)?.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decode, Encode};
    use bytes::BytesMut;

    fn framed<T: Write + ?Sized>(value: &T, framing: Framing) -> BytesMut {
        let mut buf = BytesMut::new();
        value.write_framed(&mut buf, framing).unwrap();
        buf
    }

    #[test]
    fn test_bytes() {
        let values = [
            Bytes::new(),
            Bytes::from_static(&[1, 2, 3]),
            Bytes::from(vec![0; 300]),
        ];
        for value in values {
            let encoded = value.encode().unwrap();
            assert_eq!(encoded.len(), 4 + value.len());
            assert_eq!(&encoded[..4], &(value.len() as u32).to_le_bytes());
            let decoded = Bytes::decode(encoded).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_string_default_framing() {
        let value = String::from("héllo");
        let encoded = value.encode().unwrap();
        // Byte count, not character count.
        assert_eq!(&encoded[..4], &[6, 0, 0, 0]);
        assert_eq!(&encoded[4..], "héllo".as_bytes());
        assert_eq!(String::decode(encoded).unwrap(), value);
    }

    #[test]
    fn test_string_fixed_pad() {
        let encoded = framed("abc", Framing::Fixed(6));
        assert_eq!(&encoded[..], b"abc\0\0\0");
        let decoded = String::read_framed(&mut &encoded[..], Framing::Fixed(6)).unwrap();
        assert_eq!(decoded, "abc");
    }

    #[test]
    fn test_string_fixed_truncate() {
        let encoded = framed("abcdefgh", Framing::Fixed(3));
        assert_eq!(&encoded[..], b"abc");
        let decoded = String::read_framed(&mut &encoded[..], Framing::Fixed(3)).unwrap();
        assert_eq!(decoded, "abc");
    }

    #[test]
    fn test_string_fixed_truncate_on_char_boundary() {
        let encoded = framed("aé", Framing::Fixed(2));
        assert_eq!(&encoded[..], &[b'a', 0]);
        let decoded = String::read_framed(&mut &encoded[..], Framing::Fixed(2)).unwrap();
        assert_eq!(decoded, "a");

        // A character wider than the whole frame leaves only padding.
        let encoded = framed("€uro", Framing::Fixed(2));
        assert_eq!(&encoded[..], &[0, 0]);
        let decoded = String::read_framed(&mut &encoded[..], Framing::Fixed(2)).unwrap();
        assert_eq!(decoded, "");

        // Exact fits are untouched.
        let encoded = framed("aé", Framing::Fixed(3));
        assert_eq!(&encoded[..], "aé".as_bytes());
    }

    #[test]
    fn test_string_fixed_all_zero() {
        let encoded = framed("", Framing::Fixed(4));
        assert_eq!(&encoded[..], &[0, 0, 0, 0]);
        let decoded = String::read_framed(&mut &encoded[..], Framing::Fixed(4)).unwrap();
        assert_eq!(decoded, "");
    }

    #[test]
    fn test_bytes_fixed_keeps_trailing_zeros() {
        let value = Bytes::from_static(&[1, 2]);
        let encoded = framed(&value, Framing::Fixed(4));
        assert_eq!(&encoded[..], &[1, 2, 0, 0]);
        let decoded = Bytes::read_framed(&mut &encoded[..], Framing::Fixed(4)).unwrap();
        assert_eq!(&decoded[..], &[1, 2, 0, 0]);
    }

    #[test]
    fn test_insufficient_payload() {
        let data = [5u8, 0, 0, 0, b'a', b'b'];
        assert!(matches!(
            String::decode(&data[..]),
            Err(Error::InsufficientData {
                needed: 5,
                remaining: 2
            })
        ));
        assert!(matches!(
            Bytes::read_framed(&mut &b"ab"[..], Framing::Fixed(3)),
            Err(Error::InsufficientData {
                needed: 3,
                remaining: 2
            })
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [2u8, 0, 0, 0, 0xC3, 0x28];
        assert!(matches!(String::decode(&data[..]), Err(Error::InvalidUtf8(_))));
    }
}
