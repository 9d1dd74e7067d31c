//! Host form-state abstraction.
//!
//! The engines read and write named field values and field-level validation
//! errors through this trait instead of a concrete store, so a host can
//! plug in its own form-state layer. [`MemoryFormState`] is the
//! implementation used by the session, the CLI, and tests.
//!
//! Form values are held in an insertion-ordered map: the submission
//! transformer's encounter-order flattening depends on it.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crf_model::FieldValue;

/// Insertion-ordered mapping from field key to current value.
pub type FormValues = IndexMap<String, FieldValue>;

/// Capability surface the engines require from the hosting form state.
pub trait FormState {
    /// Current value for a field key, if any.
    fn get(&self, key: &str) -> Option<&FieldValue>;

    /// Write a field value, inserting the key if it is new.
    fn set(&mut self, key: &str, value: FieldValue);

    /// Surface a field-level validation message.
    fn set_error(&mut self, key: &str, message: &str);

    /// Clear a field-level validation message.
    fn clear_error(&mut self, key: &str);

    /// Current validation message for a field key, if any.
    fn error(&self, key: &str) -> Option<&str>;

    /// Synchronous snapshot of the whole value mapping.
    fn values(&self) -> &FormValues;

    /// Synchronous snapshot read of a set of keys, in request order.
    fn watch(&self, keys: &[&str]) -> Vec<Option<FieldValue>> {
        keys.iter().map(|key| self.get(key).cloned()).collect()
    }
}

/// In-memory form state.
#[derive(Debug, Clone, Default)]
pub struct MemoryFormState {
    values: FormValues,
    errors: BTreeMap<String, String>,
}

impl MemoryFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an initial value mapping.
    pub fn with_values(values: FormValues) -> Self {
        Self {
            values,
            errors: BTreeMap::new(),
        }
    }

    /// Replace all values and drop all validation errors.
    pub fn reset(&mut self, values: FormValues) {
        self.values = values;
        self.errors.clear();
    }

    /// All current validation errors, keyed by field.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }
}

impl FormState for MemoryFormState {
    fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: FieldValue) {
        self.values.insert(key.to_string(), value);
    }

    fn set_error(&mut self, key: &str, message: &str) {
        self.errors.insert(key.to_string(), message.to_string());
    }

    fn clear_error(&mut self, key: &str) {
        self.errors.remove(key);
    }

    fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    fn values(&self) -> &FormValues {
        &self.values
    }
}
