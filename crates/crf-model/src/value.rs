//! Runtime value shapes for form state and submission.

use serde::{Deserialize, Serialize};

/// A value held in form state: a scalar string or a list of strings.
///
/// Untagged serde so that `"Aspirin"` and `["Aspirin", "Ibuprofen"]` both
/// deserialize directly from a form-values document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Empty scalar, the reset value for text and single-choice fields.
    pub fn empty_text() -> Self {
        FieldValue::Text(String::new())
    }

    /// Empty list, the reset value for multi-choice fields.
    pub fn empty_list() -> Self {
        FieldValue::List(Vec::new())
    }

    /// True when the value carries nothing: an empty string or empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// Scalar view: the text itself, or list items joined with `", "`.
    pub fn as_display_string(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::List(values)
    }
}
