//! Form derivation: which inputs to show, in which order, with which values.

use crate::record::{Record, ID_FIELD, NAME_FIELD};
use crate::value::FieldValue;

/// Label shown on the submit control when idle.
pub const SUBMIT_LABEL: &str = "Update Item";

/// Label shown on the submit control while a request is in flight.
pub const SUBMITTING_LABEL: &str = "Updating...";

/// The kind of input a field is edited through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Number,
    Text,
}

impl InputKind {
    pub fn for_value(value: &FieldValue) -> Self {
        if value.is_number() {
            InputKind::Number
        } else {
            InputKind::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Number => "number",
            InputKind::Text => "text",
        }
    }
}

/// One input in the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub kind: InputKind,
    pub value: String,
}

/// The full set of inputs plus the state of the two controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub submit_label: &'static str,
    /// Submit and reset are both disabled while a request is in flight.
    pub controls_enabled: bool,
}

impl Form {
    /// Build the form for a reference record and its draft.
    ///
    /// `name` always comes first as a text input, present even when the
    /// record has no such field. The remaining inputs follow the reference
    /// record's key order, skipping `id` and `name`. Input kinds come from
    /// the reference values; displayed values come from the draft.
    pub fn build(reference: &Record, draft: &Record, loading: bool) -> Self {
        let display = |key: &str| draft.get(key).map(ToString::to_string).unwrap_or_default();

        let mut fields = vec![FormField {
            key: NAME_FIELD.to_string(),
            label: label_for(NAME_FIELD),
            kind: InputKind::Text,
            value: display(NAME_FIELD),
        }];

        fields.extend(
            reference
                .iter()
                .filter(|(key, _)| *key != ID_FIELD && *key != NAME_FIELD)
                .map(|(key, value)| FormField {
                    key: key.to_string(),
                    label: label_for(key),
                    kind: InputKind::for_value(value),
                    value: display(key),
                }),
        );

        Self {
            fields,
            submit_label: if loading {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            controls_enabled: !loading,
        }
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.key.as_str())
    }
}

/// Field key with its first character upper-cased.
pub fn label_for(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
