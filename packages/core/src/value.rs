//! Tagged field values.
//!
//! A field's kind is decided once, when the record is decoded, and edits are
//! coerced back into that kind. Rendering never looks at the raw JSON again.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

use crate::error::EditError;

/// A single value in a [`Record`](crate::Record).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(Number),
    Text(String),
    Boolean(bool),
    Null,
    /// A nested array or object. Carried through untouched unless edited.
    Structured(JsonValue),
}

impl FieldValue {
    pub fn is_number(&self) -> bool {
        matches!(self, FieldValue::Number(_))
    }

    /// Parse raw input text into a value of the same kind as `self`.
    ///
    /// `key` is only used for the error message.
    pub fn coerce(&self, key: &str, raw: &str) -> Result<FieldValue, EditError> {
        let invalid = |expected: &'static str| EditError::InvalidValue {
            key: key.to_string(),
            expected,
            value: raw.to_string(),
        };

        match self {
            FieldValue::Number(_) => parse_number(raw)
                .map(FieldValue::Number)
                .ok_or_else(|| invalid("a number")),
            FieldValue::Boolean(_) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(FieldValue::Boolean(true)),
                "false" => Ok(FieldValue::Boolean(false)),
                _ => Err(invalid("true or false")),
            },
            FieldValue::Text(_) | FieldValue::Null => Ok(FieldValue::Text(raw.to_string())),
            FieldValue::Structured(_) => match serde_json::from_str::<JsonValue>(raw) {
                Ok(value @ (JsonValue::Array(_) | JsonValue::Object(_))) => {
                    Ok(FieldValue::Structured(value))
                }
                _ => Err(invalid("a JSON array or object")),
            },
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            FieldValue::Number(n) => JsonValue::Number(n.clone()),
            FieldValue::Text(s) => JsonValue::String(s.clone()),
            FieldValue::Boolean(b) => JsonValue::Bool(*b),
            FieldValue::Null => JsonValue::Null,
            FieldValue::Structured(v) => v.clone(),
        }
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i.into());
    }
    if let Ok(u) = trimmed.parse::<u64>() {
        return Some(u.into());
    }
    trimmed.parse::<f64>().ok().and_then(Number::from_f64)
}

/// The text an input shows for this value.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
            FieldValue::Structured(v) => write!(f, "{}", v),
        }
    }
}

impl From<JsonValue> for FieldValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Number(n) => FieldValue::Number(n),
            JsonValue::String(s) => FieldValue::Text(s),
            JsonValue::Bool(b) => FieldValue::Boolean(b),
            JsonValue::Null => FieldValue::Null,
            other => FieldValue::Structured(other),
        }
    }
}

impl From<FieldValue> for JsonValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Number(n) => JsonValue::Number(n),
            FieldValue::Text(s) => JsonValue::String(s),
            FieldValue::Boolean(b) => JsonValue::Bool(b),
            FieldValue::Null => JsonValue::Null,
            FieldValue::Structured(v) => v,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Number(n) => n.serialize(serializer),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Boolean(b) => serializer.serialize_bool(*b),
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Structured(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(FieldValue::from)
    }
}
