//! Form session: one loaded schema, its form state, and its engines.
//!
//! A session is rebuilt from scratch whenever a schema loads; in-progress
//! repeatable state is discarded and never migrated across reloads.

use std::collections::BTreeMap;

use tracing::info;

use crf_model::{FormSchema, FormVersion, ModelError};

use crate::naming::initial_values;
use crate::render::{SectionPlan, render_section};
use crate::repeat_question::RepeatQuestionEngine;
use crate::repeat_section::RepeatSectionEngine;
use crate::state::{FormState, MemoryFormState};
use crate::submit::{Payload, build_payload};

/// Result of handing a payload to a submission sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success { message: String },
    Failure { message: String },
}

/// The transport collaborator that accepts a wire payload.
pub trait SubmissionSink {
    fn submit(&mut self, payload: &Payload) -> SubmitOutcome;
}

/// Interpreter state for one loaded form.
#[derive(Debug, Clone)]
pub struct FormSession {
    version: FormVersion,
    state: MemoryFormState,
    question_engines: BTreeMap<String, RepeatQuestionEngine>,
    section_engines: BTreeMap<String, RepeatSectionEngine>,
}

impl FormSession {
    /// Build a session against the schema's active version.
    pub fn new(schema: &FormSchema) -> Result<Self, ModelError> {
        let version = schema.active_version()?.clone();
        let state = MemoryFormState::with_values(initial_values(&version));
        let (question_engines, section_engines) = build_engines(&version);
        info!(
            version = %version.version,
            sections = version.sections.len(),
            "form session initialized"
        );
        Ok(Self {
            version,
            state,
            question_engines,
            section_engines,
        })
    }

    /// Replace the schema, discarding all in-progress state.
    pub fn load_schema(&mut self, schema: &FormSchema) -> Result<(), ModelError> {
        *self = Self::new(schema)?;
        Ok(())
    }

    pub fn version(&self) -> &FormVersion {
        &self.version
    }

    pub fn state(&self) -> &MemoryFormState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MemoryFormState {
        &mut self.state
    }

    pub fn question_engine(&self, question_id: &str) -> Option<&RepeatQuestionEngine> {
        self.question_engines.get(question_id)
    }

    pub fn section_engine(&self, section_id: &str) -> Option<&RepeatSectionEngine> {
        self.section_engines.get(section_id)
    }

    /// Commit the pending slot of a repeatable question.
    pub fn append_pending(&mut self, question_id: &str) -> bool {
        match self.question_engines.get_mut(question_id) {
            Some(engine) => engine.append_pending(&mut self.state),
            None => false,
        }
    }

    /// Delete a committed value of a repeatable question.
    pub fn delete_committed(&mut self, question_id: &str, index: usize) {
        if let Some(engine) = self.question_engines.get_mut(question_id) {
            engine.delete_committed(index, &mut self.state);
        }
    }

    /// Commit the pending entry of a repeatable section.
    pub fn commit_section_entry(&mut self, section_id: &str) -> bool {
        match self.section_engines.get_mut(section_id) {
            Some(engine) => engine.commit_pending(&mut self.state),
            None => false,
        }
    }

    /// Delete a committed entry of a repeatable section.
    pub fn delete_section_entry(&mut self, section_id: &str, index: usize) {
        if let Some(engine) = self.section_engines.get_mut(section_id) {
            engine.delete_entry(index);
        }
    }

    /// Render plans for every section against current values.
    ///
    /// Repeatable sections render their pending clone, so their fields
    /// always bind to the next entry index.
    pub fn render(&self) -> Vec<SectionPlan> {
        self.version
            .sections
            .iter()
            .map(|section| match self.section_engines.get(&section.id) {
                Some(engine) => render_section(&engine.pending_section(), &self.state),
                None => render_section(section, &self.state),
            })
            .collect()
    }

    /// Build the wire payload from current values.
    pub fn payload(&self) -> Payload {
        build_payload(self.state.values())
    }

    /// Restore schema defaults and recreate all engines.
    pub fn reset(&mut self) {
        self.state = MemoryFormState::with_values(initial_values(&self.version));
        let (question_engines, section_engines) = build_engines(&self.version);
        self.question_engines = question_engines;
        self.section_engines = section_engines;
    }

    /// Submit the current payload; on success the form resets to defaults.
    pub fn submit<K: SubmissionSink + ?Sized>(&mut self, sink: &mut K) -> SubmitOutcome {
        let payload = self.payload();
        let outcome = sink.submit(&payload);
        if matches!(outcome, SubmitOutcome::Success { .. }) {
            self.reset();
        }
        outcome
    }
}

type Engines = (
    BTreeMap<String, RepeatQuestionEngine>,
    BTreeMap<String, RepeatSectionEngine>,
);

/// One engine per repeatable question and per repeatable section. A
/// repeatable section owns all of its questions; per-question engines are
/// only built for questions in non-repeatable sections.
fn build_engines(version: &FormVersion) -> Engines {
    let mut question_engines = BTreeMap::new();
    let mut section_engines = BTreeMap::new();
    for section in &version.sections {
        if section.repeatable {
            section_engines.insert(section.id.clone(), RepeatSectionEngine::new(section.clone()));
            continue;
        }
        for question in &section.questions {
            if question.repeatable {
                question_engines.insert(question.id.clone(), RepeatQuestionEngine::new(question));
            }
        }
    }
    (question_engines, section_engines)
}
