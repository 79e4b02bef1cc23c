//! Tag-driven structural binary encoding.
//!
//! # Overview
//!
//! Encodes structured values (scalars, text, byte sequences, sequences, fixed-size arrays,
//! records and values that encode themselves) into a deterministic binary form, and decodes
//! them back given the target type.
//!
//! # Wire Format
//!
//! - Integers and floats have a fixed width and are written least-significant byte first.
//!   Booleans are a single `0` or `1` byte.
//! - Text and byte sequences are `[4-byte LE length][payload]` by default.
//! - Sequences and arrays are `[4-byte LE count][elements]` by default, each element using its own
//!   default framing.
//! - Records are the concatenation of their fields in declaration order, with no prefix.
//!
//! A record field can carry a length tag (see [Tag]) to switch its framing:
//!
//! - `#[codec(tag = "N")]` or `#[codec(tag = "len:N")]`: exactly `N` bytes (text, bytes) or
//!   elements (sequences), with no prefix. Longer values are truncated, shorter ones padded
//!   with zeros (or default elements).
//! - `#[codec(tag = "-")]`: the field is not encoded, and decodes to its default value. Values
//!   that encode themselves (see [SelfCodec]) ignore tags, so they are still written.
//! - `#[codec(skip)]`: the field is left out of the encoding entirely, whatever its type, and
//!   decodes to `Default::default()`.
//!
//! Malformed tags are rejected when the derive expands:
//!
//! ```compile_fail
//! use binwire_codec::{Read, Write};
//!
//! #[derive(Read, Write)]
//! struct Label {
//!     #[codec(tag = "len:abc")]
//!     name: String,
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use binwire_codec::{marshal, unmarshal, unmarshal_partial, Error, Read, Write};
//!
//! #[derive(Debug, Default, PartialEq, Read, Write)]
//! struct Header {
//!     #[codec(tag = "len:4")]
//!     magic: String,
//!     version: u16,
//!     flags: Vec<bool>,
//!     #[codec(skip)]
//!     cached: u64,
//! }
//!
//! let header = Header {
//!     magic: "BW".into(),
//!     version: 3,
//!     flags: vec![true, false],
//!     cached: 99,
//! };
//! let encoded = marshal(&header).unwrap();
//! assert_eq!(
//!     &encoded[..],
//!     &[b'B', b'W', 0, 0, 3, 0, 2, 0, 0, 0, 1, 0][..]
//! );
//!
//! let decoded: Header = unmarshal(encoded.clone()).unwrap();
//! assert_eq!(decoded, Header { cached: 0, ..header });
//!
//! // Trailing bytes are rejected by `unmarshal` and reported by `unmarshal_partial`.
//! let mut data = encoded.to_vec();
//! data.push(0xFF);
//! assert!(matches!(unmarshal::<Header>(&data[..]), Err(Error::TrailingData(1))));
//! let (remaining, decoded) = unmarshal_partial::<Header>(&data[..]);
//! assert_eq!(remaining, 1);
//! assert_eq!(decoded.unwrap().version, 3);
//! ```

// Lets the derive macros refer to this crate by name from within it.
extern crate self as binwire_codec;

pub mod codec;
pub mod custom;
pub mod error;
pub mod record;
pub mod tag;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use binwire_macros::{Read, Write};
pub use codec::{marshal, unmarshal, unmarshal_partial, Decode, Encode, Read, Write};
pub use custom::SelfCodec;
pub use error::Error;
pub use record::FieldDescriptor;
pub use tag::{Framing, Tag, TagError};

// Hidden from docs because it is only needed by macros expanding in other crates.
#[doc(hidden)]
pub use ::bytes;
