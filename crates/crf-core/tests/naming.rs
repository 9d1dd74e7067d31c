//! Tests for field naming and default-value derivation.

use crf_core::naming::{default_value, field_key, indexed_key, initial_values};
use crf_model::{DefaultValue, FieldValue, FormSchema};
use proptest::prelude::{ProptestConfig, any, proptest};

fn question_json(body: &str) -> crf_model::Question {
    serde_json::from_str(body).expect("question json")
}

#[test]
fn field_key_slugifies_labels() {
    assert_eq!(field_key("Patient Name"), "patient_name");
    assert_eq!(field_key("Symptom"), "symptom");
    assert_eq!(field_key("Dose (mg/day)"), "dose_mgday");
    assert_eq!(field_key("  Multi   Word  Label "), "multi_word_label");
    assert_eq!(field_key("UPPER_case_9"), "upper_case_9");
}

#[test]
fn field_key_is_idempotent() {
    for label in ["Patient Name", "Dose (mg/day)", "a  b\tc", "Æther Über"] {
        let once = field_key(label);
        assert_eq!(field_key(&once), once, "label: {label:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn field_key_idempotent_for_any_label(label in any::<String>()) {
        let once = field_key(&label);
        prop_assert_key_shape(&once);
        assert_eq!(field_key(&once), once);
    }
}

fn prop_assert_key_shape(key: &str) {
    assert!(
        key.chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_'),
        "key contains invalid character: {key:?}"
    );
}

#[test]
fn indexed_key_appends_suffix() {
    assert_eq!(indexed_key("symptom", 0), "symptom_0");
    assert_eq!(indexed_key("symptom", 12), "symptom_12");
}

#[test]
fn multi_choice_defaults_to_empty_list() {
    let question = question_json(
        r#"{
            "id": "q1", "label": "Symptoms", "type": "multi-choice",
            "options": [{"id": "o1", "value": "pain", "label": "Pain"}],
            "required": true,
            "default_value": "pain"
        }"#,
    );
    assert_eq!(default_value(&question), FieldValue::empty_list());
}

#[test]
fn required_scalar_takes_schema_default() {
    let question = question_json(
        r#"{
            "id": "q1", "label": "Severity", "type": "short-text",
            "required": true, "default_value": "mild"
        }"#,
    );
    assert_eq!(default_value(&question), FieldValue::Text("mild".to_string()));
}

#[test]
fn required_list_default_coerces_to_first_element() {
    let mut question = question_json(
        r#"{"id": "q1", "label": "Severity", "type": "short-text", "required": true}"#,
    );
    question.default_value = Some(DefaultValue::List(vec![
        "mild".to_string(),
        "severe".to_string(),
    ]));
    assert_eq!(default_value(&question), FieldValue::Text("mild".to_string()));
}

#[test]
fn optional_question_defaults_to_empty_string() {
    let question = question_json(
        r#"{"id": "q1", "label": "Notes", "type": "long-text", "default_value": "n/a"}"#,
    );
    assert_eq!(default_value(&question), FieldValue::empty_text());
}

#[test]
fn initial_values_index_repeatable_slots() {
    let schema = FormSchema::from_json(
        r#"{
            "versions": [{
                "version": "1.0",
                "sections": [
                    {
                        "id": "s1", "title": "General",
                        "questions": [
                            {"id": "q1", "label": "Name", "type": "short-text"},
                            {"id": "q2", "label": "Symptom", "type": "short-text", "repeatable": true}
                        ]
                    },
                    {
                        "id": "s2", "title": "Medications", "repeatable": true,
                        "questions": [
                            {"id": "q3", "label": "Drug", "type": "short-text"},
                            {"id": "q4", "label": "Routes", "type": "multi-choice",
                             "options": [{"id": "o1", "value": "oral", "label": "Oral"}]}
                        ]
                    }
                ]
            }]
        }"#,
    )
    .expect("schema");
    let version = schema.active_version().expect("version");
    let values = initial_values(version);

    assert_eq!(values.get("name"), Some(&FieldValue::empty_text()));
    assert_eq!(values.get("symptom_0"), Some(&FieldValue::empty_text()));
    assert_eq!(values.get("drug_0"), Some(&FieldValue::empty_text()));
    assert_eq!(values.get("routes_0"), Some(&FieldValue::empty_list()));
    assert!(!values.contains_key("symptom"));
    assert!(!values.contains_key("drug"));
}
