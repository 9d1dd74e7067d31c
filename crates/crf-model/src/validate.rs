//! Structural validation of a loaded form schema.
//!
//! Checks the schema invariants that the interpreter relies on: choice
//! kinds carry a non-empty option list with unique ids, non-choice kinds
//! carry none, and every kind token is recognized. Validation never fails
//! hard; it accumulates coded issues so a caller can decide what blocks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::schema::{FormSchema, Question, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// A structural issue found in a schema document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaIssue {
    /// Stable issue code (e.g. "SCH001").
    pub code: String,
    /// Human-readable message describing the issue.
    pub message: String,
    pub severity: IssueSeverity,
    /// Section id (if applicable).
    pub section: Option<String>,
    /// Question id (if applicable).
    pub question: Option<String>,
}

/// Validation report for a whole schema document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaReport {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaReport {
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

/// Validate a schema against the structural invariants of the data model.
pub fn validate_schema(schema: &FormSchema) -> SchemaReport {
    let mut issues = Vec::new();

    if schema.versions.is_empty() {
        issues.push(SchemaIssue {
            code: "SCH001".to_string(),
            message: "schema document has no versions".to_string(),
            severity: IssueSeverity::Error,
            section: None,
            question: None,
        });
        return SchemaReport { issues };
    }

    // Only the first version is consumed; later versions are not checked.
    if let Ok(version) = schema.active_version() {
        for section in &version.sections {
            check_section(section, &mut issues);
        }
    }

    SchemaReport { issues }
}

fn check_section(section: &Section, issues: &mut Vec<SchemaIssue>) {
    for question in &section.questions {
        check_question(section, question, issues);
    }
}

fn check_question(section: &Section, question: &Question, issues: &mut Vec<SchemaIssue>) {
    let push = |issues: &mut Vec<SchemaIssue>, code: &str, message: String, severity| {
        issues.push(SchemaIssue {
            code: code.to_string(),
            message,
            severity,
            section: Some(section.id.clone()),
            question: Some(question.id.clone()),
        });
    };

    if question.label.trim().is_empty() {
        push(
            issues,
            "SCH002",
            format!("question '{}' has an empty label", question.id),
            IssueSeverity::Error,
        );
    }

    match question.kind() {
        Ok(kind) if kind.is_choice() => {
            if question.options.is_empty() {
                push(
                    issues,
                    "SCH003",
                    format!(
                        "choice question '{}' ({kind}) has no options",
                        question.id
                    ),
                    IssueSeverity::Error,
                );
            }
            let mut seen = BTreeSet::new();
            for option in &question.options {
                if !seen.insert(option.id.as_str()) {
                    push(
                        issues,
                        "SCH004",
                        format!(
                            "question '{}' has duplicate option id '{}'",
                            question.id, option.id
                        ),
                        IssueSeverity::Error,
                    );
                }
            }
        }
        Ok(kind) => {
            if !question.options.is_empty() {
                push(
                    issues,
                    "SCH005",
                    format!(
                        "non-choice question '{}' ({kind}) must not carry options",
                        question.id
                    ),
                    IssueSeverity::Error,
                );
            }
        }
        Err(_) => {
            // Unknown kinds render as inline placeholders, so a warning.
            push(
                issues,
                "SCH006",
                format!(
                    "question '{}' has unknown field kind '{}'",
                    question.id, question.field_type
                ),
                IssueSeverity::Warning,
            );
        }
    }
}
