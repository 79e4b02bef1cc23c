//! Length tags: per-field directives selecting the framing of a value.
//!
//! A tag is a short string attached to a record field:
//! - `""` (no tag): default, length-prefixed framing.
//! - `"-"`: the field is excluded from both encoding and decoding.
//! - `"N"` or `"len:N"` (base-10, fits in a `u32`): fixed framing of exactly `N` bytes or
//!   elements, never length-prefixed.
//!
//! Anything else is malformed. [Tag::parse] reports malformed tags as errors, while
//! [Tag::resolve] degrades them to default framing.

use thiserror::Error;
use tracing::warn;

/// Prefix of the long form of a fixed-length tag.
const LEN_PREFIX: &[u8] = b"len:";

/// Error returned when a tag string cannot be resolved.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagError {
    #[error("empty tag")]
    Empty,
    #[error("expected `-`, `N` or `len:N`")]
    Malformed,
}

/// A resolved length tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tag {
    /// No tag: use the value's default framing.
    #[default]
    None,
    /// Exactly `n` bytes or elements, without a length prefix.
    Fixed(u32),
    /// Skip the field entirely.
    Excluded,
}

impl Tag {
    /// Parses a tag string.
    ///
    /// ```
    /// use binwire_codec::{Tag, TagError};
    ///
    /// assert_eq!(Tag::parse("-"), Ok(Tag::Excluded));
    /// assert_eq!(Tag::parse("16"), Ok(Tag::Fixed(16)));
    /// assert_eq!(Tag::parse("len:16"), Ok(Tag::Fixed(16)));
    /// assert_eq!(Tag::parse(""), Err(TagError::Empty));
    /// assert_eq!(Tag::parse("len:abc"), Err(TagError::Malformed));
    /// ```
    pub const fn parse(tag: &str) -> Result<Self, TagError> {
        let bytes = tag.as_bytes();
        if bytes.is_empty() {
            return Err(TagError::Empty);
        }
        if bytes.len() == 1 && bytes[0] == b'-' {
            return Ok(Self::Excluded);
        }
        if let Some(n) = parse_u32(bytes, 0) {
            return Ok(Self::Fixed(n));
        }
        if has_len_prefix(bytes) {
            if let Some(n) = parse_u32(bytes, LEN_PREFIX.len()) {
                return Ok(Self::Fixed(n));
            }
        }
        Err(TagError::Malformed)
    }

    /// Resolves a tag string, falling back to [Tag::None] when it is empty or malformed.
    ///
    /// Malformed tags are reported with a warning.
    pub fn resolve(tag: &str) -> Self {
        match Self::parse(tag) {
            Ok(resolved) => resolved,
            Err(TagError::Empty) => Self::None,
            Err(err @ TagError::Malformed) => {
                warn!(tag, %err, "malformed length tag, using default framing");
                Self::None
            }
        }
    }

    /// Returns the framing a codec should apply, or `None` if the tag excludes the value.
    pub const fn framing(self) -> Option<Framing> {
        match self {
            Self::None => Some(Framing::Default),
            Self::Fixed(n) => Some(Framing::Fixed(n)),
            Self::Excluded => None,
        }
    }

    /// Returns true if the tag excludes the value.
    pub const fn is_excluded(self) -> bool {
        matches!(self, Self::Excluded)
    }
}

/// How a variable-size value is framed on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Framing {
    /// A 4-byte little-endian length (or count) prefix followed by the payload.
    #[default]
    Default,
    /// Exactly `n` bytes or elements, truncated or zero-padded, with no prefix.
    Fixed(u32),
}

const fn has_len_prefix(bytes: &[u8]) -> bool {
    if bytes.len() < LEN_PREFIX.len() {
        return false;
    }
    let mut i = 0;
    while i < LEN_PREFIX.len() {
        if bytes[i] != LEN_PREFIX[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// Parses `bytes[start..]` as an unsigned base-10 integer that fits in a `u32`.
const fn parse_u32(bytes: &[u8], start: usize) -> Option<u32> {
    if start >= bytes.len() {
        return None;
    }
    let mut value: u32 = 0;
    let mut i = start;
    while i < bytes.len() {
        let digit = bytes[i];
        if !digit.is_ascii_digit() {
            return None;
        }
        value = match value.checked_mul(10) {
            Some(value) => value,
            None => return None,
        };
        value = match value.checked_add((digit - b'0') as u32) {
            Some(value) => value,
            None => return None,
        };
        i += 1;
    }
    Some(value)
}
