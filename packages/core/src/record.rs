//! The flat record being edited, and the id used to address it.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::error::FetchError;
use crate::value::FieldValue;

/// The reserved identifier field. Never edited.
pub const ID_FIELD: &str = "id";

/// The primary label field, always rendered first.
pub const NAME_FIELD: &str = "name";

/// The id of the single record this application edits.
pub const FIXED_RECORD_ID: u64 = 1;

/// An ordered mapping from field name to [`FieldValue`].
///
/// Field order is the order the server sent. Keys are unique; inserting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mainly for constructing records in code.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Decode a record from a JSON response body.
    ///
    /// The body must be an object with an `id` that is a number or a
    /// non-empty string.
    pub fn from_json(value: JsonValue) -> Result<Self, FetchError> {
        let object = match value {
            JsonValue::Object(object) => object,
            other => {
                return Err(FetchError::Decode(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let record: Record = object
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from(value)))
            .collect();

        match record.get(ID_FIELD) {
            None => Err(FetchError::Decode("record has no 'id' field".to_string())),
            Some(_) if record.id().is_none() => Err(FetchError::Decode(
                "record 'id' must be a number or a non-empty string".to_string(),
            )),
            Some(_) => Ok(record),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let object: Map<String, JsonValue> = self
            .fields
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        JsonValue::Object(object)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The record's id as a path segment, if it has a usable one.
    pub fn id(&self) -> Option<RecordId> {
        self.get(ID_FIELD).and_then(RecordId::from_value)
    }

    pub fn name(&self) -> Option<&FieldValue> {
        self.get(NAME_FIELD)
    }

    /// Replace the value of an existing key. Returns false if the key is
    /// absent; the key set never grows through this path.
    pub(crate) fn replace(&mut self, key: &str, value: FieldValue) -> bool {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// True when both records have exactly the same keys, ignoring order.
    pub fn has_same_keys(&self, other: &Record) -> bool {
        self.len() == other.len() && self.keys().all(|key| other.contains_key(key))
    }

    fn insert(&mut self, key: String, value: FieldValue) {
        if !self.replace(&key, value.clone()) {
            self.fields.push((key, value));
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a flat JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
                let mut record = Record::new();
                while let Some((key, value)) = access.next_entry::<String, FieldValue>()? {
                    record.insert(key, value);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// A record identifier, rendered as one URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(segment: impl Into<String>) -> Self {
        RecordId(segment.into())
    }

    /// The id of the one record this application edits.
    pub fn fixed() -> Self {
        RecordId::from(FIXED_RECORD_ID)
    }

    pub fn from_value(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::Number(n) => Some(RecordId(n.to_string())),
            FieldValue::Text(s) if !s.is_empty() => Some(RecordId(s.clone())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
