//! Submission transformation: flattening indexed repeatable values back
//! into arrays keyed by base field name.
//!
//! Accumulation preserves encounter order, the insertion order of the
//! value mapping, not numeric index order. Hosts that need index-stable
//! ordering must insert indexed keys in index order.

use indexmap::IndexMap;
use serde::Serialize;

use crf_model::FieldValue;

use crate::naming::field_key;
use crate::state::FormValues;

/// A wire-payload value: a scalar or a flattened list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PayloadValue {
    Scalar(String),
    List(Vec<String>),
}

/// The wire payload: base field key to scalar or flattened list, with all
/// empty and unset fields omitted.
pub type Payload = IndexMap<String, PayloadValue>;

/// Build the wire payload from the full form-values mapping.
///
/// For every non-empty value the raw key is re-canonicalized through the
/// field-key transform (idempotent on already-canonical keys). Keys
/// matching `{base}_{digits}` accumulate into a per-base list; list values
/// flatten into it. Everything else stores directly under its canonical
/// key. A final pass drops empty accumulated items and omits bases whose
/// list ends up empty.
pub fn build_payload(values: &FormValues) -> Payload {
    let mut payload = Payload::new();
    for (raw_key, value) in values {
        if value.is_empty() {
            continue;
        }
        let canonical = field_key(raw_key);
        match indexed_base(&canonical) {
            Some(base) => accumulate(&mut payload, base, value),
            None => {
                let stored = match value {
                    FieldValue::Text(text) => PayloadValue::Scalar(text.clone()),
                    FieldValue::List(items) => PayloadValue::List(items.clone()),
                };
                payload.insert(canonical, stored);
            }
        }
    }

    payload
        .into_iter()
        .filter_map(|(key, value)| match value {
            PayloadValue::List(items) => {
                let items: Vec<String> = items.into_iter().filter(|item| !item.is_empty()).collect();
                if items.is_empty() {
                    None
                } else {
                    Some((key, PayloadValue::List(items)))
                }
            }
            scalar => Some((key, scalar)),
        })
        .collect()
}

fn accumulate(payload: &mut Payload, base: &str, value: &FieldValue) {
    let slot = payload
        .entry(base.to_string())
        .or_insert_with(|| PayloadValue::List(Vec::new()));
    // A scalar stored earlier under the same base folds into the list.
    if let PayloadValue::Scalar(existing) = slot {
        *slot = PayloadValue::List(vec![std::mem::take(existing)]);
    }
    if let PayloadValue::List(items) = slot {
        match value {
            FieldValue::Text(text) => items.push(text.clone()),
            FieldValue::List(list) => items.extend(list.iter().cloned()),
        }
    }
}

/// Split `{base}_{digits}` keys, returning the base. The suffix must be
/// all ASCII digits and both halves non-empty.
fn indexed_base(key: &str) -> Option<&str> {
    let (base, suffix) = key.rsplit_once('_')?;
    if base.is_empty() || suffix.is_empty() {
        return None;
    }
    suffix
        .bytes()
        .all(|byte| byte.is_ascii_digit())
        .then_some(base)
}

#[cfg(test)]
mod tests {
    use super::indexed_base;

    #[test]
    fn indexed_base_splits_digit_suffixes_only() {
        assert_eq!(indexed_base("symptom_0"), Some("symptom"));
        assert_eq!(indexed_base("symptom_12"), Some("symptom"));
        assert_eq!(indexed_base("address_line"), None);
        assert_eq!(indexed_base("address_line_2"), Some("address_line"));
        assert_eq!(indexed_base("_3"), None);
        assert_eq!(indexed_base("plain"), None);
    }
}
