//! Field naming and default-value derivation.
//!
//! Every question maps to a canonical field key derived from its label.
//! The transform is deterministic and idempotent; two questions with the
//! same label collide to the same key by design.

use crf_model::{DefaultValue, FieldKind, FieldValue, FormVersion, Question};

use crate::state::FormValues;

/// Derive the canonical field key for a question label.
///
/// Lowercases, collapses whitespace runs to a single underscore, and strips
/// every character that is not `[a-z0-9_]`. Applying the transform to its
/// own output returns the same key.
///
/// # Examples
///
/// ```
/// use crf_core::naming::field_key;
///
/// assert_eq!(field_key("Patient Name"), "patient_name");
/// assert_eq!(field_key("Dose (mg/day)"), "dose_mgday");
/// assert_eq!(field_key("patient_name"), "patient_name");
/// ```
pub fn field_key(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut pending_separator = false;
    for ch in label.trim().chars() {
        if ch.is_whitespace() {
            pending_separator = !key.is_empty();
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
            if pending_separator {
                key.push('_');
                pending_separator = false;
            }
            key.push(ch);
        }
    }
    key
}

/// Indexed field key for repeatable slots: `{base}_{index}`.
pub fn indexed_key(base: &str, index: usize) -> String {
    format!("{base}_{index}")
}

/// The kind-appropriate empty value a field resets to.
///
/// Multi-choice fields hold lists; everything else, including unknown
/// kinds, holds a scalar string.
pub fn empty_value(question: &Question) -> FieldValue {
    match question.kind() {
        Ok(FieldKind::MultiChoice) => FieldValue::empty_list(),
        _ => FieldValue::empty_text(),
    }
}

/// Derive the initial value for a question.
///
/// Multi-choice fields always start as an empty list. Other required kinds
/// take the schema-declared default coerced to a scalar (a list-shaped
/// default coerces to its first element); everything else starts empty.
pub fn default_value(question: &Question) -> FieldValue {
    if matches!(question.kind(), Ok(FieldKind::MultiChoice)) {
        return FieldValue::empty_list();
    }
    if question.required
        && let Some(declared) = &question.default_value
    {
        let scalar = match declared {
            DefaultValue::Scalar(text) => text.clone(),
            DefaultValue::List(items) => items.first().cloned().unwrap_or_default(),
        };
        return FieldValue::Text(scalar);
    }
    FieldValue::empty_text()
}

/// Build the full default form-values mapping for a schema version.
///
/// Every question gets a default regardless of its current visibility;
/// visibility depends on runtime values that do not exist yet. Repeatable
/// questions and questions inside a repeatable section bind to the `_0`
/// pending slot.
pub fn initial_values(version: &FormVersion) -> FormValues {
    let mut values = FormValues::new();
    for section in &version.sections {
        for question in &section.questions {
            let mut key = field_key(&question.label);
            if question.repeatable || section.repeatable {
                key = indexed_key(&key, 0);
            }
            values.insert(key, default_value(question));
        }
    }
    values
}
