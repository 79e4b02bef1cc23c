//! Codec implementations for Rust primitive types.
//!
//! Every integer and float is written least-significant byte first, with a fixed width.
//! Framing does not apply to scalars: a tag on a scalar field is accepted and ignored.
//!
//! `usize` and `isize` are carried as 8-byte values so that the wire format is identical across
//! 32-bit and 64-bit architectures. Decoding a value that does not fit the host fails.

use crate::{util::at_least, Error, Framing, Read, Write};
use bytes::{Buf, BufMut};

// Numeric types implementation
macro_rules! impl_numeric {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write_framed(&self, buf: &mut impl BufMut, _: Framing) -> Result<(), Error> {
                buf.$write_method(*self);
                Ok(())
            }
        }

        impl Read for $type {
            #[inline]
            fn read_framed(buf: &mut impl Buf, _: Framing) -> Result<Self, Error> {
                at_least(buf, std::mem::size_of::<$type>())?;
                Ok(buf.$read_method())
            }
        }
    };
}

impl_numeric!(u8, get_u8, put_u8);
impl_numeric!(u16, get_u16_le, put_u16_le);
impl_numeric!(u32, get_u32_le, put_u32_le);
impl_numeric!(u64, get_u64_le, put_u64_le);
impl_numeric!(i8, get_i8, put_i8);
impl_numeric!(i16, get_i16_le, put_i16_le);
impl_numeric!(i32, get_i32_le, put_i32_le);
impl_numeric!(i64, get_i64_le, put_i64_le);
impl_numeric!(f32, get_f32_le, put_f32_le);
impl_numeric!(f64, get_f64_le, put_f64_le);

// Pointer-sized integers implementation
macro_rules! impl_pointer_sized {
    ($type:ty, $wire:ty) => {
        impl Write for $type {
            #[inline]
            fn write_framed(&self, buf: &mut impl BufMut, framing: Framing) -> Result<(), Error> {
                // Lossless: pointer-sized integers are at most 64 bits wide.
                (*self as $wire).write_framed(buf, framing)
            }
        }

        impl Read for $type {
            #[inline]
            fn read_framed(buf: &mut impl Buf, framing: Framing) -> Result<Self, Error> {
                let wide = <$wire>::read_framed(buf, framing)?;
                <$type>::try_from(wide)
                    .map_err(|_| Error::Invalid(stringify!($type), "value exceeds platform width"))
            }
        }
    };
}

impl_pointer_sized!(usize, u64);
impl_pointer_sized!(isize, i64);

// Bool implementation
impl Write for bool {
    #[inline]
    fn write_framed(&self, buf: &mut impl BufMut, _: Framing) -> Result<(), Error> {
        buf.put_u8(if *self { 1 } else { 0 });
        Ok(())
    }
}

impl Read for bool {
    #[inline]
    fn read_framed(buf: &mut impl Buf, _: Framing) -> Result<Self, Error> {
        match u8::read(buf)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Decode, Encode};
    use bytes::{Bytes, BytesMut};
    use paste::paste;

    macro_rules! impl_num_test {
        ($type:ty, $size:literal) => {
            paste! {
                #[test]
                fn [<test_ $type>]() {
                    let values: [$type; 5] =
                        [0 as $type, 1 as $type, 42 as $type, <$type>::MAX, <$type>::MIN];
                    for value in values.iter() {
                        let encoded = value.encode().unwrap();
                        assert_eq!(encoded.len(), $size);
                        assert_eq!(&encoded[..], &value.to_le_bytes()[..]);
                        let decoded = <$type>::decode(encoded).unwrap();
                        assert_eq!(*value, decoded);
                    }
                }

                #[test]
                fn [<test_ $type _insufficient>]() {
                    let short = [0u8; $size - 1];
                    assert!(matches!(
                        <$type>::decode(&short[..]),
                        Err(Error::InsufficientData { needed: $size, .. })
                    ));
                }
            }
        };
    }
    impl_num_test!(u8, 1);
    impl_num_test!(u16, 2);
    impl_num_test!(u32, 4);
    impl_num_test!(u64, 8);
    impl_num_test!(i8, 1);
    impl_num_test!(i16, 2);
    impl_num_test!(i32, 4);
    impl_num_test!(i64, 8);
    impl_num_test!(f32, 4);
    impl_num_test!(f64, 8);
    impl_num_test!(usize, 8);
    impl_num_test!(isize, 8);

    #[test]
    fn test_endianness() {
        // u16
        let encoded = 0x0102u16.encode().unwrap();
        assert_eq!(encoded, Bytes::from_static(&[0x02, 0x01]));

        // u32
        let encoded = 0x01020304u32.encode().unwrap();
        assert_eq!(encoded, Bytes::from_static(&[0x04, 0x03, 0x02, 0x01]));

        // f32
        let encoded = 1.0f32.encode().unwrap();
        assert_eq!(encoded, Bytes::from_static(&[0x00, 0x00, 0x80, 0x3F])); // Little-endian IEEE 754
    }

    #[test]
    fn test_bool() {
        let values = [true, false];
        for value in values.iter() {
            let encoded = value.encode().unwrap();
            assert_eq!(encoded.len(), 1);
            let decoded = bool::decode(encoded).unwrap();
            assert_eq!(*value, decoded);
        }
        assert!(matches!(bool::decode(&[2u8][..]), Err(Error::InvalidBool)));
    }

    #[test]
    fn test_framing_ignored() {
        let mut buf = BytesMut::new();
        7u32.write_framed(&mut buf, Framing::Fixed(1)).unwrap();
        assert_eq!(&buf[..], &[7, 0, 0, 0]);
        let decoded = u32::read_framed(&mut &buf[..], Framing::Fixed(1)).unwrap();
        assert_eq!(decoded, 7);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_usize_exceeds_platform() {
        let encoded = u64::MAX.encode().unwrap();
        assert!(matches!(usize::decode(encoded), Err(Error::Invalid("usize", _))));
    }

    #[test]
    fn test_conformity() {
        // Bool
        assert_eq!(true.encode().unwrap(), &[0x01][..]);
        assert_eq!(false.encode().unwrap(), &[0x00][..]);

        // 8-bit integers
        assert_eq!(255u8.encode().unwrap(), &[0xFF][..]);
        assert_eq!((-1i8).encode().unwrap(), &[0xFF][..]);
        assert_eq!((-128i8).encode().unwrap(), &[0x80][..]);

        // 16-bit integers
        assert_eq!(0xABCDu16.encode().unwrap(), &[0xCD, 0xAB][..]);
        assert_eq!((-100i16).encode().unwrap(), &[0x9C, 0xFF][..]);

        // 32-bit integers
        assert_eq!(0xABCDEF01u32.encode().unwrap(), &[0x01, 0xEF, 0xCD, 0xAB][..]);
        assert_eq!(12345i32.encode().unwrap(), &[0x39, 0x30, 0x00, 0x00][..]);
        assert_eq!((-1i32).encode().unwrap(), &[0xFF, 0xFF, 0xFF, 0xFF][..]);

        // 64-bit integers
        assert_eq!(
            0x0123456789ABCDEFu64.encode().unwrap(),
            &[0xEF, 0xCD, 0xAB, 0x89, 0x67, 0x45, 0x23, 0x01][..]
        );
        assert_eq!((-1i64).encode().unwrap(), &[0xFF; 8][..]);
        assert_eq!(1usize.encode().unwrap(), &[0x01, 0, 0, 0, 0, 0, 0, 0][..]);

        // 64-bit floats
        assert_eq!(
            1.0f64.encode().unwrap(),
            &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F][..]
        );
        assert_eq!(
            (-1.0f64).encode().unwrap(),
            &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0xBF][..]
        );
        assert_eq!(f64::NAN.encode().unwrap(), f64::NAN.to_le_bytes()[..]);
    }
}
