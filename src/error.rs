use std::fmt::Display;

use crate::navigate::{Hop, Shape};
use crate::strategy::Strategy;

/// An extraction error, with the hop it occurred at when one is known.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Error {
    pub(crate) hop: Option<Hop>,
    pub(crate) kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Self {
        Self { hop: None, kind }
    }

    pub(crate) fn at(hop: Hop, kind: ErrorKind) -> Self {
        Self {
            hop: Some(hop),
            kind,
        }
    }

    /// Returns the kind of the error.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the navigation hop that failed, if the error was raised while
    /// walking a parsed value.
    #[must_use]
    pub const fn hop(&self) -> Option<Hop> {
        self.hop
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.hop {
            Some(hop) => write!(f, "error at {hop}: {}", self.kind),
            None => Display::fmt(&self.kind, f),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Deserialize(err.to_string()))
    }
}

/// The reason an extraction failed.
#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// An object did not contain the expected key.
    MissingKey(&'static str),
    /// A value had a different shape than the one the path requires.
    UnexpectedShape {
        /// The shape the path requires.
        expected: Shape,
        /// The shape that was encountered.
        found: Shape,
    },
    /// An array was shorter than the position being selected.
    IndexOutOfRange {
        /// The position being selected.
        index: usize,
        /// The length of the array.
        len: usize,
    },
    /// The JSON text could not be deserialized.
    Deserialize(String),
    /// The path-query engine rejected the query.
    Query(String),
    /// The path query matched nothing.
    NoMatch(&'static str),
    /// A strategy produced a different value than the others.
    Divergence {
        /// The strategy that disagreed.
        strategy: Strategy,
        /// The value the first strategy produced.
        expected: String,
        /// The value `strategy` produced.
        found: String,
    },
}

impl std::error::Error for ErrorKind {}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingKey(key) => write!(f, "missing key \"{key}\""),
            ErrorKind::UnexpectedShape { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ErrorKind::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for array of length {len}")
            }
            ErrorKind::Deserialize(err) => write!(f, "deserialization failed: {err}"),
            ErrorKind::Query(err) => write!(f, "path query failed: {err}"),
            ErrorKind::NoMatch(path) => write!(f, "path {path} matched nothing"),
            ErrorKind::Divergence {
                strategy,
                expected,
                found,
            } => write!(f, "{strategy} produced {found:?}, expected {expected:?}"),
        }
    }
}

#[test]
fn display_tests() {
    // Only ensures that display doesn't panic and carries the hop prefix.
    for kind in [
        ErrorKind::MissingKey("item1"),
        ErrorKind::UnexpectedShape {
            expected: Shape::Array,
            found: Shape::Null,
        },
        ErrorKind::IndexOutOfRange { index: 2, len: 1 },
        ErrorKind::Deserialize(String::from("eof")),
        ErrorKind::Query(String::from("bad path")),
        ErrorKind::NoMatch("$.a"),
        ErrorKind::Divergence {
            strategy: Strategy::TypedUnmarshal,
            expected: String::from("a"),
            found: String::new(),
        },
    ] {
        let message = Error::at(Hop::Index(2), kind.clone()).to_string();
        assert!(message.starts_with("error at [2]: "), "{message}");
        assert_eq!(Error::new(kind.clone()).to_string(), kind.to_string());
    }
}
