use std::fmt::Display;

use serde_json::{Map, Value};

use crate::{Error, ErrorKind};

/// The key holding the list of entries at the document root.
pub const LIST_KEY: &str = "item1";
/// The position of the nested entry within the list.
pub const POSITION: usize = 2;
/// The key of the object nested inside the entry.
pub const NESTED_KEY: &str = "some";
/// The key of the target string.
pub const TARGET_KEY: &str = "thing";

/// One step of the walk from the document root to the target value.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Hop {
    /// An object key lookup.
    Key(&'static str),
    /// An array position lookup.
    Index(usize),
}

impl Display for Hop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hop::Key(key) => write!(f, ".{key}"),
            Hop::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// The variant of an untyped JSON value.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Shape {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// Any number.
    Number,
    /// A string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl Shape {
    /// Returns the shape of `value`.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Boolean,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::Array(_) => Shape::Array,
            Value::Object(_) => Shape::Object,
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Shape::Null => "null",
            Shape::Boolean => "a boolean",
            Shape::Number => "a number",
            Shape::String => "a string",
            Shape::Array => "an array",
            Shape::Object => "an object",
        })
    }
}

fn key<'a>(object: &'a Map<String, Value>, key: &'static str) -> Result<&'a Value, Error> {
    object
        .get(key)
        .ok_or_else(|| Error::at(Hop::Key(key), ErrorKind::MissingKey(key)))
}

fn index(items: &[Value], index: usize) -> Result<&Value, Error> {
    items.get(index).ok_or_else(|| {
        Error::at(
            Hop::Index(index),
            ErrorKind::IndexOutOfRange {
                index,
                len: items.len(),
            },
        )
    })
}

fn unexpected(hop: Hop, expected: Shape, value: &Value) -> Error {
    Error::at(
        hop,
        ErrorKind::UnexpectedShape {
            expected,
            found: Shape::of(value),
        },
    )
}

fn array(hop: Hop, value: &Value) -> Result<&[Value], Error> {
    match value {
        Value::Array(items) => Ok(items.as_slice()),
        other => Err(unexpected(hop, Shape::Array, other)),
    }
}

fn object(hop: Hop, value: &Value) -> Result<&Map<String, Value>, Error> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(unexpected(hop, Shape::Object, other)),
    }
}

fn string(hop: Hop, value: &Value) -> Result<&str, Error> {
    match value {
        Value::String(string) => Ok(string.as_str()),
        other => Err(unexpected(hop, Shape::String, other)),
    }
}

#[track_caller]
fn fatal<T>(hop: Result<T, Error>) -> T {
    match hop {
        Ok(value) => value,
        Err(err) => panic!("dynamic navigation aborted: {err}"),
    }
}

/// Walks `root` to `item1[2].some.thing` using only runtime shape checks.
///
/// The first two hops are lenient: a missing `item1` key, or an `item1` that
/// isn't an array, yields an empty string. Every later hop is unchecked and
/// panics when its assumption does not hold: the position must exist, the
/// entry and `some` must be objects, and `thing` must be a string.
///
/// Use [`try_navigate`] to observe every failure as an [`Error`] instead.
#[must_use]
pub fn navigate(root: &Map<String, Value>) -> &str {
    let Ok(list) = key(root, LIST_KEY) else {
        return "";
    };
    let Ok(items) = array(Hop::Key(LIST_KEY), list) else {
        return "";
    };

    let entry = fatal(object(Hop::Index(POSITION), fatal(index(items, POSITION))));
    let nested = fatal(object(Hop::Key(NESTED_KEY), fatal(key(entry, NESTED_KEY))));
    fatal(string(Hop::Key(TARGET_KEY), fatal(key(nested, TARGET_KEY))))
}

/// Walks the same path as [`navigate`], returning an error from whichever hop
/// fails first rather than degrading or panicking.
pub fn try_navigate(root: &Map<String, Value>) -> Result<&str, Error> {
    let items = array(Hop::Key(LIST_KEY), key(root, LIST_KEY)?)?;
    let entry = object(Hop::Index(POSITION), index(items, POSITION)?)?;
    let nested = object(Hop::Key(NESTED_KEY), key(entry, NESTED_KEY)?)?;
    string(Hop::Key(TARGET_KEY), key(nested, TARGET_KEY)?)
}
