use std::fmt::{self, Display};

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::navigate::{navigate, Shape, POSITION};
use crate::{Error, ErrorKind};

/// The path expression resolved by [`library_path`].
pub const PATH: &str = "$.item1[2].some.thing";

/// A way of extracting the target value from a JSON document.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// [`library_path`]
    LibraryPath,
    /// [`dynamic_unmarshal`]
    DynamicUnmarshal,
    /// [`typed_unmarshal`]
    TypedUnmarshal,
}

impl Strategy {
    /// Every strategy, in reporting order.
    pub const ALL: [Strategy; 3] = [
        Strategy::LibraryPath,
        Strategy::DynamicUnmarshal,
        Strategy::TypedUnmarshal,
    ];

    /// Returns the name this strategy is reported under.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Strategy::LibraryPath => "library-path",
            Strategy::DynamicUnmarshal => "dynamic-unmarshal",
            Strategy::TypedUnmarshal => "typed-unmarshal",
        }
    }

    /// Extracts the target value from `json` with this strategy.
    pub fn extract(self, json: &str) -> Result<String, Error> {
        match self {
            Strategy::LibraryPath => library_path(json),
            Strategy::DynamicUnmarshal => dynamic_unmarshal(json),
            Strategy::TypedUnmarshal => typed_unmarshal(json),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The statically known part of the document.
#[derive(Debug, Deserialize)]
pub struct Record {
    /// The list holding the nested entry.
    pub item1: Vec<Entry>,
}

/// One element of [`Record::item1`].
#[derive(Debug)]
pub enum Entry {
    /// An object carrying the nested target.
    Nested(Nested),
    /// Any other value, skipped without being retained.
    Other,
}

impl Entry {
    /// Returns the target string, or an empty string for entries of any
    /// other shape.
    #[must_use]
    pub fn into_thing(self) -> String {
        match self {
            Entry::Nested(nested) => nested.some.thing,
            Entry::Other => String::new(),
        }
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EntryVisitor)
    }
}

// Decides on the first token, so non-object entries are skipped in place
// instead of being buffered and retried.
struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_map<A>(self, map: A) -> Result<Entry, A::Error>
    where
        A: MapAccess<'de>,
    {
        Nested::deserialize(MapAccessDeserializer::new(map)).map(Entry::Nested)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Entry, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Entry::Other)
    }

    fn visit_bool<E>(self, _value: bool) -> Result<Entry, E>
    where
        E: de::Error,
    {
        Ok(Entry::Other)
    }

    fn visit_i64<E>(self, _value: i64) -> Result<Entry, E>
    where
        E: de::Error,
    {
        Ok(Entry::Other)
    }

    fn visit_u64<E>(self, _value: u64) -> Result<Entry, E>
    where
        E: de::Error,
    {
        Ok(Entry::Other)
    }

    fn visit_f64<E>(self, _value: f64) -> Result<Entry, E>
    where
        E: de::Error,
    {
        Ok(Entry::Other)
    }

    fn visit_str<E>(self, _value: &str) -> Result<Entry, E>
    where
        E: de::Error,
    {
        Ok(Entry::Other)
    }

    fn visit_unit<E>(self) -> Result<Entry, E>
    where
        E: de::Error,
    {
        Ok(Entry::Other)
    }
}

/// The object stored at `item1[2]`. Absent fields are left empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Nested {
    /// The object holding the target.
    pub some: Inner,
}

/// The object stored at `item1[2].some`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Inner {
    /// The target string.
    pub thing: String,
}

/// Parses `json` into a query engine and resolves [`PATH`] against it.
pub fn library_path(json: &str) -> Result<String, Error> {
    let root: Value = serde_json::from_str(json)?;
    let matches = jsonpath_lib::select(&root, PATH)
        .map_err(|err| Error::new(ErrorKind::Query(format!("{err:?}"))))?;

    match matches.first() {
        Some(Value::String(thing)) => Ok(thing.clone()),
        Some(other) => Err(Error::new(ErrorKind::UnexpectedShape {
            expected: Shape::String,
            found: Shape::of(other),
        })),
        None => Err(Error::new(ErrorKind::NoMatch(PATH))),
    }
}

/// Deserializes `json` into a [`Record`] and reads `item1[2].some.thing`.
///
/// # Panics
///
/// Panics if `json` doesn't deserialize into a [`Record`] or if `item1` has
/// fewer than three entries.
pub fn typed_unmarshal(json: &str) -> Result<String, Error> {
    let mut record: Record = match serde_json::from_str(json) {
        Ok(record) => record,
        Err(err) => panic!("typed unmarshal failed: {err}"),
    };

    Ok(record.item1.swap_remove(POSITION).into_thing())
}

/// Deserializes `json` into an untyped map and walks it with [`navigate`].
///
/// Text that isn't a JSON object is walked as an empty map, which yields an
/// empty string.
///
/// # Panics
///
/// Panics wherever [`navigate`] does.
pub fn dynamic_unmarshal(json: &str) -> Result<String, Error> {
    let root: Map<String, Value> = serde_json::from_str(json).unwrap_or_default();
    Ok(navigate(&root).to_owned())
}

/// Runs every strategy once against `json` and returns the value they all
/// produced.
pub fn check_agreement(json: &str) -> Result<String, Error> {
    agree(
        Strategy::ALL
            .into_iter()
            .map(|strategy| (strategy, strategy.extract(json))),
    )
}

pub(crate) fn agree(
    outcomes: impl IntoIterator<Item = (Strategy, Result<String, Error>)>,
) -> Result<String, Error> {
    let mut outcomes = outcomes.into_iter();
    let Some((_, first)) = outcomes.next() else {
        return Ok(String::new());
    };

    let expected = first?;
    for (strategy, outcome) in outcomes {
        let found = outcome?;
        if found != expected {
            return Err(Error::new(ErrorKind::Divergence {
                strategy,
                expected,
                found,
            }));
        }
    }

    Ok(expected)
}
