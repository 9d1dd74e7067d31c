//! Visibility-condition evaluation.
//!
//! Conditions use one fixed grammar: `<identifier> == '<literal>'`. Any
//! string that does not match is treated as fail-closed: the question is
//! hidden and a diagnostic is logged. The evaluator is pure and uncached;
//! callers re-invoke it on every observed value change because any
//! dependency field can change at any time and there is no dependency
//! graph. Forms are small (tens of questions), so the full re-evaluation
//! per render is acceptable.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::warn;

use crf_model::{FieldValue, Section};

use crate::naming::field_key;
use crate::state::FormValues;

/// Mapping from a question's declared variable alias to its field key.
pub type AliasMap = BTreeMap<String, String>;

/// A parsed visibility condition: strict equality against a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub identifier: String,
    pub literal: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConditionError {
    #[error("unsupported condition syntax: {0:?}")]
    Syntax(String),
}

/// Parse a condition string against the fixed grammar.
pub fn parse_condition(input: &str) -> Result<Condition, ConditionError> {
    let Some((left, right)) = input.split_once("==") else {
        return Err(ConditionError::Syntax(input.to_string()));
    };
    let identifier = left.trim();
    if !is_identifier(identifier) {
        return Err(ConditionError::Syntax(input.to_string()));
    }
    let right = right.trim();
    let literal = right
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .ok_or_else(|| ConditionError::Syntax(input.to_string()))?;
    // No escapes in the grammar, so a quote inside the literal means the
    // expression is something richer than single equality.
    if literal.contains('\'') {
        return Err(ConditionError::Syntax(input.to_string()));
    }
    Ok(Condition {
        identifier: identifier.to_string(),
        literal: literal.to_string(),
    })
}

fn is_identifier(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

/// Decide whether a question is currently shown.
///
/// An absent condition is always visible. The identifier resolves through
/// the alias map, falling back to the raw identifier when unmapped, and is
/// compared with strict string equality: no coercion across types, so a
/// list-valued field never matches a literal.
pub fn evaluate(condition: Option<&str>, values: &FormValues, aliases: &AliasMap) -> bool {
    let Some(expression) = condition else {
        return true;
    };
    let condition = match parse_condition(expression) {
        Ok(parsed) => parsed,
        Err(error) => {
            warn!(%error, "hiding question with malformed visibility condition");
            return false;
        }
    };
    let key = aliases
        .get(&condition.identifier)
        .map(String::as_str)
        .unwrap_or(&condition.identifier);
    match values.get(key) {
        Some(FieldValue::Text(current)) => *current == condition.literal,
        _ => false,
    }
}

/// Build the alias map for one section render.
///
/// Maps each question's declared variable name to its canonical field key.
/// Built fresh per render; aliases never outlive the section they were
/// declared in.
pub fn build_alias_map(section: &Section) -> AliasMap {
    let mut aliases = AliasMap::new();
    for question in &section.questions {
        if let Some(name) = question.variable_name() {
            aliases.insert(name.to_string(), field_key(&question.label));
        }
    }
    aliases
}
