//! Error types for codec operations

use crate::tag::TagError;
use thiserror::Error;

/// Error type for codec operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("insufficient data: needed {needed} bytes, {remaining} remaining")]
    InsufficientData { needed: usize, remaining: usize },
    #[error("trailing data: {0} bytes")]
    TrailingData(usize),
    #[error("malformed tag: {0}")]
    Tag(#[from] TagError),
    #[error("length {0} does not fit a 4-byte prefix")]
    LengthOverflow(usize),
    #[error("invalid bool")]
    InvalidBool,
    #[error("invalid utf-8 text: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("invalid {0}: {1}")]
    Invalid(&'static str, &'static str), // context, message
    #[error("field `{0}` is excluded")]
    Excluded(&'static str),
    #[error("field `{field}`: {source}")]
    Field {
        field: &'static str,
        source: Box<Error>,
    },
    #[error("element {index}: {source}")]
    Element { index: usize, source: Box<Error> },
    #[error("{0}: {1}")]
    Wrapped(&'static str, Box<dyn std::error::Error + Send + Sync>), // context, error
}

impl Error {
    /// Attaches the identity of the record field that produced this error.
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Attaches the position of the sequence element that produced this error.
    pub fn in_element(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }

    /// Returns the error with all field and element context removed.
    pub fn root_cause(&self) -> &Error {
        let mut err = self;
        while let Self::Field { source, .. } | Self::Element { source, .. } = err {
            err = source.as_ref();
        }
        err
    }

    /// Returns the path of field names and element positions leading to the root cause,
    /// outermost first (e.g. `header.items[2].name`).
    pub fn path(&self) -> String {
        let mut path = String::new();
        let mut err = self;
        loop {
            match err {
                Self::Field { field, source } => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(field);
                    err = source.as_ref();
                }
                Self::Element { index, source } => {
                    path.push_str(&format!("[{index}]"));
                    err = source.as_ref();
                }
                _ => return path,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_and_path() {
        let err = Error::InvalidBool
            .in_field("name")
            .in_element(2)
            .in_field("items")
            .in_field("header");
        assert!(matches!(err.root_cause(), Error::InvalidBool));
        assert_eq!(err.path(), "header.items[2].name");
        assert_eq!(
            err.to_string(),
            "field `header`: field `items`: element 2: field `name`: invalid bool"
        );
    }

    #[test]
    fn test_root_cause_without_context() {
        let err = Error::TrailingData(3);
        assert!(matches!(err.root_cause(), Error::TrailingData(3)));
        assert_eq!(err.path(), "");
    }
}
