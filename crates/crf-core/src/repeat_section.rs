//! Repeatable-section engine.
//!
//! Turns a whole section into an append-only ordered list of committed
//! multi-field entries plus one pending in-progress entry. The pending
//! entry always binds to index N where N is the current committed-entry
//! count: committing advances every pending field key by one. Unlike the
//! per-question engine there is no required-field gate; partial entries
//! are allowed and a fully-empty commit attempt is a silent no-op.

use std::collections::BTreeMap;

use tracing::debug;

use crf_model::{FieldValue, Section};

use crate::naming::{empty_value, field_key, indexed_key};
use crate::state::FormState;
use crate::visibility::{AliasMap, evaluate};

/// One confirmed section repetition: canonical field key to stored value.
/// `None` means "committed but empty" (only reachable by editing a value
/// down to the empty string).
pub type CommittedEntry = BTreeMap<String, Option<FieldValue>>;

/// Stateful controller for a repeatable section.
#[derive(Debug, Clone)]
pub struct RepeatSectionEngine {
    section: Section,
    committed: Vec<CommittedEntry>,
    editing: Option<usize>,
    edit_buffer: BTreeMap<String, String>,
}

impl RepeatSectionEngine {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            committed: Vec::new(),
            editing: None,
            edit_buffer: BTreeMap::new(),
        }
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn entries(&self) -> &[CommittedEntry] {
        &self.committed
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn edit_buffer(&self) -> &BTreeMap<String, String> {
        &self.edit_buffer
    }

    /// Index the pending entry currently binds to: the committed count.
    pub fn pending_index(&self) -> usize {
        self.committed.len()
    }

    /// Schema clone for rendering the pending entry.
    ///
    /// Every question label gets the `_{N}` suffix, so the derived field
    /// keys land on the pending index without re-implementing naming.
    pub fn pending_section(&self) -> Section {
        let index = self.pending_index();
        let mut section = self.section.clone();
        for question in &mut section.questions {
            question.label = format!("{}_{index}", question.label);
        }
        section
    }

    /// Alias map for the pending entry: aliases resolve to indexed keys so
    /// conditions read the in-progress values.
    fn pending_aliases(&self) -> AliasMap {
        let index = self.pending_index();
        let mut aliases = AliasMap::new();
        for question in &self.section.questions {
            if let Some(name) = question.variable_name() {
                aliases.insert(
                    name.to_string(),
                    indexed_key(&field_key(&question.label), index),
                );
            }
        }
        aliases
    }

    /// Commit the pending entry.
    ///
    /// Reads each currently-visible question's value at its pending indexed
    /// key; non-empty values go into a new committed entry keyed by the
    /// canonical (unsuffixed) field key, and their pending slots reset to
    /// the kind-appropriate empty value. An entry that ends up with zero
    /// keys is not committed and nothing resets. Returns whether an entry
    /// was committed.
    pub fn commit_pending<S: FormState + ?Sized>(&mut self, state: &mut S) -> bool {
        let index = self.pending_index();
        let aliases = self.pending_aliases();
        let mut entry = CommittedEntry::new();
        let mut resets: Vec<(String, FieldValue)> = Vec::new();
        for question in &self.section.questions {
            if !evaluate(question.visible_if.as_deref(), state.values(), &aliases) {
                continue;
            }
            let base = field_key(&question.label);
            let pending_key = indexed_key(&base, index);
            let Some(value) = state.get(&pending_key) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            entry.insert(base, Some(value.clone()));
            resets.push((pending_key, empty_value(question)));
        }
        if entry.is_empty() {
            return false;
        }
        for (key, reset) in resets {
            state.set(&key, reset);
        }
        self.committed.push(entry);
        debug!(
            section = %self.section.id,
            count = self.committed.len(),
            "committed section entry"
        );
        true
    }

    /// Remove the committed entry at `index`.
    ///
    /// Entries are shown by list position, not by a persistent field-key
    /// suffix, so no re-projection is needed.
    pub fn delete_entry(&mut self, index: usize) {
        if index >= self.committed.len() {
            return;
        }
        if self.editing == Some(index) {
            self.cancel_edit();
        }
        self.committed.remove(index);
    }

    /// Load a committed entry into the flat string edit buffer.
    ///
    /// List values are joined with `", "` for editing.
    pub fn begin_edit(&mut self, index: usize) {
        let Some(entry) = self.committed.get(index) else {
            return;
        };
        self.editing = Some(index);
        self.edit_buffer = entry
            .iter()
            .map(|(key, value)| {
                let text = value
                    .as_ref()
                    .map(FieldValue::as_display_string)
                    .unwrap_or_default();
                (key.clone(), text)
            })
            .collect();
    }

    /// Replace one field of the edit buffer.
    pub fn set_edit_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.edit_buffer.insert(key.into(), value.into());
    }

    /// Store the edit buffer back into the committed entry.
    ///
    /// The edited string replaces the stored value verbatim; a list-valued
    /// field edited here becomes a single string. An empty string stores
    /// `None` ("committed but empty"). Returns whether the save applied.
    pub fn save_edit(&mut self) -> bool {
        let Some(index) = self.editing else {
            return false;
        };
        let Some(entry) = self.committed.get_mut(index) else {
            return false;
        };
        for (key, text) in &self.edit_buffer {
            let stored = if text.is_empty() {
                None
            } else {
                Some(FieldValue::Text(text.clone()))
            };
            entry.insert(key.clone(), stored);
        }
        self.editing = None;
        self.edit_buffer.clear();
        true
    }

    /// Discard the edit buffer without touching committed entries.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.edit_buffer.clear();
    }
}
