//! Tests for the submission transformer.

use crf_core::state::FormValues;
use crf_core::submit::{PayloadValue, build_payload};
use crf_model::FieldValue;

fn values(pairs: &[(&str, FieldValue)]) -> FormValues {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[test]
fn indexed_values_flatten_and_empties_drop() {
    let values = values(&[
        ("symptom_0", FieldValue::from("Pain")),
        ("symptom_1", FieldValue::from("Fever")),
        ("name", FieldValue::from("Bob")),
        ("age", FieldValue::empty_text()),
    ]);

    let payload = build_payload(&values);

    assert_eq!(
        payload.get("symptom"),
        Some(&PayloadValue::List(vec![
            "Pain".to_string(),
            "Fever".to_string()
        ]))
    );
    assert_eq!(
        payload.get("name"),
        Some(&PayloadValue::Scalar("Bob".to_string()))
    );
    assert!(!payload.contains_key("age"));
    assert_eq!(payload.len(), 2);
}

#[test]
fn payload_snapshot() {
    let values = values(&[
        ("symptom_0", FieldValue::from("Pain")),
        ("symptom_1", FieldValue::from("Fever")),
        ("name", FieldValue::from("Bob")),
        ("age", FieldValue::empty_text()),
    ]);

    insta::assert_json_snapshot!(build_payload(&values), @r###"
    {
      "symptom": [
        "Pain",
        "Fever"
      ],
      "name": "Bob"
    }
    "###);
}

#[test]
fn raw_keys_are_recanonicalized() {
    let values = values(&[("Visit Reason", FieldValue::from("Checkup"))]);
    let payload = build_payload(&values);
    assert_eq!(
        payload.get("visit_reason"),
        Some(&PayloadValue::Scalar("Checkup".to_string()))
    );
}

#[test]
fn list_values_flatten_into_indexed_accumulation() {
    let values = values(&[
        (
            "route_0",
            FieldValue::from(vec!["oral".to_string(), "iv".to_string()]),
        ),
        ("route_1", FieldValue::from("topical")),
    ]);
    let payload = build_payload(&values);
    assert_eq!(
        payload.get("route"),
        Some(&PayloadValue::List(vec![
            "oral".to_string(),
            "iv".to_string(),
            "topical".to_string()
        ]))
    );
}

#[test]
fn non_indexed_list_stores_directly() {
    let values = values(&[(
        "symptoms",
        FieldValue::from(vec!["pain".to_string(), "fever".to_string()]),
    )]);
    let payload = build_payload(&values);
    assert_eq!(
        payload.get("symptoms"),
        Some(&PayloadValue::List(vec![
            "pain".to_string(),
            "fever".to_string()
        ]))
    );
}

#[test]
fn accumulation_preserves_encounter_order_not_index_order() {
    // Insertion order of the mapping wins, even when indices disagree.
    let values = values(&[
        ("symptom_2", FieldValue::from("Chills")),
        ("symptom_0", FieldValue::from("Pain")),
        ("symptom_1", FieldValue::from("Fever")),
    ]);
    let payload = build_payload(&values);
    assert_eq!(
        payload.get("symptom"),
        Some(&PayloadValue::List(vec![
            "Chills".to_string(),
            "Pain".to_string(),
            "Fever".to_string()
        ]))
    );
}

#[test]
fn accumulated_list_of_only_empties_is_omitted() {
    let values = values(&[
        ("note_0", FieldValue::empty_text()),
        ("note_1", FieldValue::empty_text()),
    ]);
    let payload = build_payload(&values);
    assert!(payload.is_empty());
}

#[test]
fn empty_mapping_produces_empty_payload() {
    assert!(build_payload(&FormValues::new()).is_empty());
}

#[test]
fn digit_suffix_detection_respects_underscored_bases() {
    let values = values(&[
        ("address_line", FieldValue::from("12 Elm St")),
        ("address_line_2", FieldValue::from("Apt 4")),
    ]);
    let payload = build_payload(&values);
    // "_2" reads as an index, so the second line accumulates under the base
    // and the earlier scalar folds into the list. Accepted key collision.
    assert_eq!(
        payload.get("address_line"),
        Some(&PayloadValue::List(vec![
            "12 Elm St".to_string(),
            "Apt 4".to_string()
        ]))
    );
    assert_eq!(payload.len(), 1);
}
