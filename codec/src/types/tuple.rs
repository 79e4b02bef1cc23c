//! Codec implementations for tuples.
//!
//! A tuple is an anonymous record: its elements are concatenated in order, each with its own
//! default framing. Framing applied to the tuple itself is ignored.

use crate::{Error, Framing, Read, Write};
use bytes::{Buf, BufMut};
use paste::paste;

// Tuple implementation
macro_rules! impl_codec_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: Write ),*> Write for ( $( [<T $index>], )* ) {
                #[inline]
                fn write_framed(&self, buf: &mut impl BufMut, _: Framing) -> Result<(), Error> {
                    $( self.$index.write(buf).map_err(|err| err.in_element($index))?; )*
                    Ok(())
                }
            }

            impl<$( [<T $index>]: Read ),*> Read for ( $( [<T $index>], )* ) {
                #[inline]
                fn read_framed(buf: &mut impl Buf, _: Framing) -> Result<Self, Error> {
                    Ok(( $( [<T $index>]::read(buf).map_err(|err| err.in_element($index))?, )* ))
                }
            }
        }
    };
}

// Generate implementations for tuple sizes 1 through 12
impl_codec_for_tuple!(0);
impl_codec_for_tuple!(0, 1);
impl_codec_for_tuple!(0, 1, 2);
impl_codec_for_tuple!(0, 1, 2, 3);
impl_codec_for_tuple!(0, 1, 2, 3, 4);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11);

#[cfg(test)]
mod tests {
    use crate::{Decode, Encode, Error};

    #[test]
    fn test_tuple() {
        let tuple_values = [(1u16, String::new()), (1u16, String::from("two"))];
        for value in tuple_values {
            let encoded = value.encode().unwrap();
            assert_eq!(encoded.len(), 2 + 4 + value.1.len());
            let decoded = <(u16, String)>::decode(encoded).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_tuple_element_error() {
        let data = [1u8, 9];
        let err = <(bool, bool)>::decode(&data[..]).unwrap_err();
        assert!(matches!(err, Error::Element { index: 1, .. }));
    }
}
