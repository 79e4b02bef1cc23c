//! Field-by-field encoding of records.
//!
//! A record is encoded as the concatenation of its non-excluded fields in declaration order,
//! with no record-level prefix or delimiter. Each field is described once per record type by a
//! [FieldDescriptor]; `#[derive(Read, Write)]` builds the descriptor table as a constant and
//! calls [write_field], [read_field] and [read_excluded] for every field.
//!
//! A field's tag applies to the field's own codec only. Nested records ignore the framing they
//! are given, so tags never leak into their fields.

use crate::{Error, Read, Tag, TagError, Write};
use bytes::{Buf, BufMut};

/// The name and resolved length tag of a record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: &'static str,
    tag: Tag,
}

impl FieldDescriptor {
    /// Creates a descriptor from a tag string, rejecting malformed tags.
    ///
    /// Evaluated in a constant context (as the derive does), a malformed tag is a compile-time
    /// error. An empty tag selects default framing.
    ///
    /// ```compile_fail
    /// use binwire_codec::FieldDescriptor;
    ///
    /// const NAME: FieldDescriptor = FieldDescriptor::new("name", "len:abc");
    /// let _ = NAME;
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `tag` is malformed.
    pub const fn new(name: &'static str, tag: &str) -> Self {
        let tag = match Tag::parse(tag) {
            Ok(tag) => tag,
            Err(TagError::Empty) => Tag::None,
            Err(TagError::Malformed) => {
                panic!("malformed length tag: expected `-`, `N` or `len:N`")
            }
        };
        Self { name, tag }
    }

    /// Creates a descriptor from a tag string at run time, rejecting malformed tags.
    ///
    /// An empty tag selects default framing.
    pub fn try_parse(name: &'static str, tag: &str) -> Result<Self, Error> {
        let tag = match Tag::parse(tag) {
            Ok(tag) => tag,
            Err(TagError::Empty) => Tag::None,
            Err(err @ TagError::Malformed) => return Err(Error::from(err).in_field(name)),
        };
        Ok(Self { name, tag })
    }

    /// Creates a descriptor from a tag string at run time.
    ///
    /// Malformed tags fall back to default framing (see [Tag::resolve]).
    pub fn parse(name: &'static str, tag: &str) -> Self {
        Self {
            name,
            tag: Tag::resolve(tag),
        }
    }

    /// Creates a descriptor from an already resolved tag.
    pub const fn with_tag(name: &'static str, tag: Tag) -> Self {
        Self { name, tag }
    }

    /// The field's name, used to identify it in errors.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The field's resolved tag.
    pub const fn tag(&self) -> Tag {
        self.tag
    }
}

/// Writes one record field.
///
/// Self-encoding fields always write their length-prefixed envelope, whatever their tag.
/// Excluded fields write nothing.
pub fn write_field<T: Write + ?Sized>(
    value: &T,
    buf: &mut impl BufMut,
    field: &FieldDescriptor,
) -> Result<(), Error> {
    let result = if T::SELF_CODEC {
        value.write(buf)
    } else {
        match field.tag.framing() {
            Some(framing) => value.write_framed(buf, framing),
            None => return Ok(()),
        }
    };
    result.map_err(|err| err.in_field(field.name))
}

/// Reads one record field that is not excluded.
///
/// Fails with [Error::Excluded] if the descriptor excludes a field that does not encode itself,
/// since there is nothing to read.
pub fn read_field<T: Read>(buf: &mut impl Buf, field: &FieldDescriptor) -> Result<T, Error> {
    let result = if T::SELF_CODEC {
        T::read(buf)
    } else {
        match field.tag.framing() {
            Some(framing) => T::read_framed(buf, framing),
            None => return Err(Error::Excluded(field.name)),
        }
    };
    result.map_err(|err| err.in_field(field.name))
}

/// Reads one record field that may be excluded.
///
/// Excluded fields consume nothing and take their default value.
pub fn read_excluded<T: Read + Default>(
    buf: &mut impl Buf,
    field: &FieldDescriptor,
) -> Result<T, Error> {
    if !T::SELF_CODEC && field.tag.is_excluded() {
        return Ok(T::default());
    }
    read_field(buf, field)
}
