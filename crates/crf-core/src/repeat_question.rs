//! Repeatable-question engine.
//!
//! Turns one question into an append-only ordered list of committed values
//! plus the always-present index-0 pending slot. Committed position `i`
//! renders at field key `{base}_{i + 1}`; deleting a position does not
//! renumber bindings, so the engine re-projects every committed value into
//! form state after each mutation.

use tracing::debug;

use crf_model::{FieldValue, Question};

use crate::naming::{empty_value, field_key, indexed_key};
use crate::state::FormState;

/// Validation message surfaced when a required slot is committed empty.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Stateful controller for a single repeatable question.
#[derive(Debug, Clone)]
pub struct RepeatQuestionEngine {
    base_key: String,
    required: bool,
    reset_value: FieldValue,
    /// Committed values in append order; `None` means "committed empty".
    committed: Vec<Option<String>>,
    editing: Option<usize>,
    edit_buffer: String,
}

impl RepeatQuestionEngine {
    pub fn new(question: &Question) -> Self {
        Self {
            base_key: field_key(&question.label),
            required: question.required,
            reset_value: empty_value(question),
            committed: Vec::new(),
            editing: None,
            edit_buffer: String::new(),
        }
    }

    /// Field key of the pending slot (`{base}_0`).
    pub fn pending_key(&self) -> String {
        indexed_key(&self.base_key, 0)
    }

    /// Field key a committed position renders at (`{base}_{index + 1}`).
    pub fn committed_key(&self, index: usize) -> String {
        indexed_key(&self.base_key, index + 1)
    }

    pub fn committed(&self) -> &[Option<String>] {
        &self.committed
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// Commit the pending slot's current value.
    ///
    /// A required question with an empty pending value raises a field-level
    /// validation error on the pending key and leaves committed state
    /// untouched. Otherwise the value (or `None` when empty) is appended,
    /// the pending slot resets to its kind-appropriate empty value, and any
    /// validation error clears. Returns whether a value was committed.
    pub fn append_pending<S: FormState + ?Sized>(&mut self, state: &mut S) -> bool {
        let pending_key = self.pending_key();
        let value = state.get(&pending_key).cloned();
        let is_empty = value.as_ref().is_none_or(FieldValue::is_empty);
        if self.required && is_empty {
            state.set_error(&pending_key, REQUIRED_MESSAGE);
            return false;
        }
        let stored = if is_empty {
            None
        } else {
            value.map(|v| v.as_display_string())
        };
        self.committed.push(stored);
        state.set(&pending_key, self.reset_value.clone());
        state.clear_error(&pending_key);
        self.resync(state);
        debug!(base = %self.base_key, count = self.committed.len(), "committed repeatable value");
        true
    }

    /// Remove the committed entry at `index`.
    ///
    /// Positions after it shift down in the list, so every committed value
    /// is re-written to its `_1..=_N` slot and the stale trailing slot is
    /// blanked.
    pub fn delete_committed<S: FormState + ?Sized>(&mut self, index: usize, state: &mut S) {
        if index >= self.committed.len() {
            return;
        }
        if self.editing == Some(index) {
            self.cancel_edit();
        }
        self.committed.remove(index);
        let stale_key = self.committed_key(self.committed.len());
        state.set(&stale_key, FieldValue::empty_text());
        state.clear_error(&stale_key);
        self.resync(state);
    }

    /// Load a committed value into the edit buffer.
    pub fn begin_edit(&mut self, index: usize) {
        if index >= self.committed.len() {
            return;
        }
        self.editing = Some(index);
        self.edit_buffer = self.committed[index].clone().unwrap_or_default();
    }

    /// Replace the transient edit buffer contents.
    pub fn set_edit_buffer(&mut self, value: impl Into<String>) {
        self.edit_buffer = value.into();
    }

    /// Store the edit buffer back into the committed list.
    ///
    /// The value is trimmed; a required question with an empty result
    /// raises a validation error on the committed slot's key and aborts.
    /// Empty-and-optional stores `None`. Returns whether the save applied.
    pub fn save_edit<S: FormState + ?Sized>(&mut self, state: &mut S) -> bool {
        let Some(index) = self.editing else {
            return false;
        };
        let slot_key = self.committed_key(index);
        let trimmed = self.edit_buffer.trim();
        if self.required && trimmed.is_empty() {
            state.set_error(&slot_key, REQUIRED_MESSAGE);
            return false;
        }
        self.committed[index] = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.editing = None;
        self.edit_buffer.clear();
        state.clear_error(&slot_key);
        self.resync(state);
        true
    }

    /// Discard the edit buffer without touching committed state.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.edit_buffer.clear();
    }

    /// Re-project the committed list into form state at `_1..=_N`.
    fn resync<S: FormState + ?Sized>(&self, state: &mut S) {
        for (index, value) in self.committed.iter().enumerate() {
            state.set(
                &self.committed_key(index),
                FieldValue::Text(value.clone().unwrap_or_default()),
            );
        }
    }
}
