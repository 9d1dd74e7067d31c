//! Dynamic form interpretation for schema-driven clinical evaluation forms.
//!
//! This crate holds the interpreter logic over the `crf-model` shapes:
//!
//! - **naming**: canonical field keys and default-value derivation
//! - **visibility**: the restricted condition grammar and its evaluator
//! - **repeat_question**: committed-list state machine for one question
//! - **repeat_section**: committed-entry state machine for a section
//! - **render**: host-agnostic section render plans
//! - **submit**: flattening indexed values into the wire payload
//! - **state**: the injected host form-state capability
//! - **session**: one loaded schema wired to state and engines

pub mod naming;
pub mod render;
pub mod repeat_question;
pub mod repeat_section;
pub mod session;
pub mod state;
pub mod submit;
pub mod visibility;

pub use naming::{default_value, empty_value, field_key, indexed_key, initial_values};
pub use render::{FieldControl, FieldPlan, SectionPlan, render_section};
pub use repeat_question::{REQUIRED_MESSAGE, RepeatQuestionEngine};
pub use repeat_section::{CommittedEntry, RepeatSectionEngine};
pub use session::{FormSession, SubmissionSink, SubmitOutcome};
pub use state::{FormState, FormValues, MemoryFormState};
pub use submit::{Payload, PayloadValue, build_payload};
pub use visibility::{
    AliasMap, Condition, ConditionError, build_alias_map, evaluate, parse_condition,
};
