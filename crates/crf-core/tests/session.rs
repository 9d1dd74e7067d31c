//! Tests for the form session lifecycle.

use crf_core::session::{FormSession, SubmissionSink, SubmitOutcome};
use crf_core::state::FormState;
use crf_core::submit::{Payload, PayloadValue};
use crf_model::{FieldValue, FormSchema};

fn schema() -> FormSchema {
    FormSchema::from_json(
        r#"{
            "versions": [{
                "version": "2.1",
                "sections": [
                    {
                        "id": "s-general", "title": "General",
                        "questions": [
                            {"id": "q-name", "label": "Name", "type": "short-text",
                             "required": true, "default_value": "Unknown"},
                            {"id": "q-symptom", "label": "Symptom", "type": "short-text",
                             "repeatable": true}
                        ]
                    },
                    {
                        "id": "s-meds", "title": "Medications", "repeatable": true,
                        "questions": [
                            {"id": "q-drug", "label": "Drug", "type": "short-text"},
                            {"id": "q-dose", "label": "Dose", "type": "short-text"}
                        ]
                    }
                ]
            }]
        }"#,
    )
    .expect("schema json")
}

/// Sink that records payloads and answers with a fixed outcome.
struct RecordingSink {
    accept: bool,
    submitted: Vec<Payload>,
}

impl RecordingSink {
    fn new(accept: bool) -> Self {
        Self {
            accept,
            submitted: Vec::new(),
        }
    }
}

impl SubmissionSink for RecordingSink {
    fn submit(&mut self, payload: &Payload) -> SubmitOutcome {
        self.submitted.push(payload.clone());
        if self.accept {
            SubmitOutcome::Success {
                message: "saved".to_string(),
            }
        } else {
            SubmitOutcome::Failure {
                message: "endpoint rejected payload".to_string(),
            }
        }
    }
}

#[test]
fn session_seeds_defaults_and_engines() {
    let session = FormSession::new(&schema()).expect("session");
    assert_eq!(
        session.state().get("name"),
        Some(&FieldValue::from("Unknown"))
    );
    assert_eq!(
        session.state().get("symptom_0"),
        Some(&FieldValue::empty_text())
    );
    assert!(session.question_engine("q-symptom").is_some());
    assert!(session.section_engine("s-meds").is_some());
    assert!(session.question_engine("q-name").is_none());
}

#[test]
fn empty_schema_is_a_whole_form_error() {
    assert!(FormSession::new(&FormSchema { versions: vec![] }).is_err());
}

#[test]
fn render_uses_pending_clone_for_repeatable_sections() {
    let mut session = FormSession::new(&schema()).expect("session");
    let plans = session.render();
    assert_eq!(plans[1].fields[0].key, "drug_0");

    session.state_mut().set("drug_0", FieldValue::from("Aspirin"));
    assert!(session.commit_section_entry("s-meds"));

    let plans = session.render();
    assert_eq!(plans[1].fields[0].key, "drug_1");
}

#[test]
fn successful_submit_resets_to_defaults() {
    let mut session = FormSession::new(&schema()).expect("session");
    session.state_mut().set("name", FieldValue::from("Bob"));
    session.state_mut().set("symptom_0", FieldValue::from("Pain"));
    session.append_pending("q-symptom");

    let mut sink = RecordingSink::new(true);
    let outcome = session.submit(&mut sink);

    assert!(matches!(outcome, SubmitOutcome::Success { .. }));
    assert_eq!(sink.submitted.len(), 1);
    assert_eq!(
        sink.submitted[0].get("name"),
        Some(&PayloadValue::Scalar("Bob".to_string()))
    );
    assert_eq!(
        sink.submitted[0].get("symptom"),
        Some(&PayloadValue::List(vec!["Pain".to_string()]))
    );

    // Values and engine state are back at schema defaults.
    assert_eq!(
        session.state().get("name"),
        Some(&FieldValue::from("Unknown"))
    );
    assert!(
        session
            .question_engine("q-symptom")
            .expect("engine")
            .committed()
            .is_empty()
    );
}

#[test]
fn failed_submit_keeps_state() {
    let mut session = FormSession::new(&schema()).expect("session");
    session.state_mut().set("name", FieldValue::from("Bob"));

    let mut sink = RecordingSink::new(false);
    let outcome = session.submit(&mut sink);

    assert!(matches!(outcome, SubmitOutcome::Failure { .. }));
    assert_eq!(session.state().get("name"), Some(&FieldValue::from("Bob")));
}

#[test]
fn schema_reload_discards_in_progress_state() {
    let mut session = FormSession::new(&schema()).expect("session");
    session.state_mut().set("symptom_0", FieldValue::from("Pain"));
    session.append_pending("q-symptom");
    session.state_mut().set("drug_0", FieldValue::from("Aspirin"));
    session.commit_section_entry("s-meds");

    session.load_schema(&schema()).expect("reload");

    assert!(
        session
            .question_engine("q-symptom")
            .expect("engine")
            .committed()
            .is_empty()
    );
    assert!(
        session
            .section_engine("s-meds")
            .expect("engine")
            .entries()
            .is_empty()
    );
    assert_eq!(
        session.state().get("symptom_0"),
        Some(&FieldValue::empty_text())
    );
}

#[test]
fn question_engine_validation_surfaces_in_session_state() {
    let schema = FormSchema::from_json(
        r#"{
            "versions": [{
                "version": "1.0",
                "sections": [{
                    "id": "s1", "title": "General",
                    "questions": [
                        {"id": "q-symptom", "label": "Symptom", "type": "short-text",
                         "required": true, "repeatable": true}
                    ]
                }]
            }]
        }"#,
    )
    .expect("schema json");
    let mut session = FormSession::new(&schema).expect("session");

    assert!(!session.append_pending("q-symptom"));
    assert!(session.state().error("symptom_0").is_some());
}
