//! Structural values at the engine boundary.
//!
//! Targets (Pokémon snapshots, team members, aggregated strength) are owned
//! by the simulators that consume this crate. The engine never sees their
//! Rust types; it sees a [`Value`] tree and addresses it by path.
//!
//! ## Value Types
//!
//! - `Null`: an explicit null (still a *defined* value for applicability)
//! - `Bool`: flags
//! - `Number`: every numeric field, stored as `f64`
//! - `Text`: strings (berry names, islands, skill ids)
//! - `List`: ordered sequences
//! - `Record`: nested field maps
//!
//! `List` and `Record` use `im` persistent collections, so cloning a target
//! is O(1) and rebuilding one path shares every untouched subtree with the
//! original.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

/// A node in a target snapshot.
///
/// Equality is structural; numbers compare as `f64`, so `NaN` never equals
/// itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// Explicit null.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
    /// Ordered list of values.
    List(Vector<Value>),
    /// Field map.
    Record(OrdMap<String, Value>),
}

impl Value {
    /// Create an empty record.
    #[must_use]
    pub fn record() -> Self {
        Value::Record(OrdMap::new())
    }

    /// Create an empty list.
    #[must_use]
    pub fn list() -> Self {
        Value::List(Vector::new())
    }

    /// Add a field (builder pattern).
    ///
    /// Non-record values are replaced by a record holding only the new field.
    #[must_use]
    pub fn with_field(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        match self {
            Value::Record(fields) => Value::Record(fields.update(key.into(), value.into())),
            _ => Value::Record(OrdMap::unit(key.into(), value.into())),
        }
    }

    /// Append an item (builder pattern).
    ///
    /// Non-list values are replaced by a list holding only the new item.
    #[must_use]
    pub fn with_item(self, value: impl Into<Value>) -> Self {
        match self {
            Value::List(mut items) => {
                items.push_back(value.into());
                Value::List(items)
            }
            _ => Value::List(Vector::unit(value.into())),
        }
    }

    /// Check for an explicit null.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as number if this is a Number value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the items if this is a List value.
    #[must_use]
    pub fn as_list(&self) -> Option<&Vector<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the fields if this is a Record value.
    #[must_use]
    pub fn as_record(&self) -> Option<&OrdMap<String, Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Numeric coercion used by arithmetic and ordering comparisons.
    ///
    /// - `Null` and `false` are `0`, `true` is `1`
    /// - blank text is `0`, other text parses as a decimal or is `NaN`
    /// - an empty list is `0`, a one-item list coerces its item
    /// - records and longer lists are `NaN`
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Text(s) => parse_number(s),
            Value::List(items) => match items.len() {
                0 => 0.0,
                1 => match &items[0] {
                    Value::List(_) | Value::Record(_) => f64::NAN,
                    item => item.to_number(),
                },
                _ => f64::NAN,
            },
            Value::Record(_) => f64::NAN,
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }
}

fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    // Only plain decimal notation; Rust also accepts "inf" and "nan".
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

// Convenient From implementations
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v.into_iter().collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}
