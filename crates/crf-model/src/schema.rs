//! Schema shapes for schema-driven clinical evaluation forms.
//!
//! A form is described by a versioned JSON document: the active (first)
//! version holds an ordered list of sections, each holding an ordered list
//! of questions. These types are plain data; all interpretation lives in
//! `crf-core`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The closed set of field kinds a question can render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Single-line free text input.
    ShortText,
    /// Multi-line free text input.
    LongText,
    /// Radio-style single selection from options.
    SingleChoice,
    /// Checkbox-style multiple selection from options.
    MultiChoice,
    /// Dropdown single selection from options.
    DropdownSingleChoice,
}

impl FieldKind {
    /// Returns true for kinds that require a non-empty option list.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            FieldKind::SingleChoice | FieldKind::MultiChoice | FieldKind::DropdownSingleChoice
        )
    }

    /// Returns the canonical kind token as it appears in schema documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::ShortText => "short-text",
            FieldKind::LongText => "long-text",
            FieldKind::SingleChoice => "single-choice",
            FieldKind::MultiChoice => "multi-choice",
            FieldKind::DropdownSingleChoice => "dropdown-single-choice",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "short-text" => Ok(FieldKind::ShortText),
            "long-text" => Ok(FieldKind::LongText),
            "single-choice" => Ok(FieldKind::SingleChoice),
            "multi-choice" => Ok(FieldKind::MultiChoice),
            "dropdown-single-choice" => Ok(FieldKind::DropdownSingleChoice),
            other => Err(ModelError::UnknownFieldKind(other.to_string())),
        }
    }
}

/// One selectable option of a choice-kind question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    /// The value token stored in form state when this option is selected.
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
}

/// A schema-declared default, either a scalar or a list of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Scalar(String),
    List(Vec<String>),
}

/// Free metadata attached to a question. Only the variable alias is
/// interpreted: it names the question inside visibility conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMetadata {
    #[serde(default)]
    pub variable_name: Option<String>,
}

/// A single form question.
///
/// The field kind is kept as the raw schema string so that a document with
/// an unrecognized kind still deserializes; the renderer surfaces an inline
/// error placeholder for it instead of rejecting the whole section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub default_value: Option<DefaultValue>,
    #[serde(default)]
    pub repeatable: bool,
    /// Visibility condition expression, e.g. `role == 'admin'`.
    #[serde(default)]
    pub visible_if: Option<String>,
    #[serde(default)]
    pub metadata: Option<QuestionMetadata>,
}

impl Question {
    /// Parse the raw kind token into the closed [`FieldKind`] set.
    pub fn kind(&self) -> Result<FieldKind, ModelError> {
        self.field_type.parse()
    }

    /// The variable alias usable in visibility conditions, if declared.
    pub fn variable_name(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|meta| meta.variable_name.as_deref())
    }
}

/// An ordered group of questions.
///
/// Question order matters for default layout tie-breaking only; the
/// interpreter is order-agnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub layout: Option<String>,
    #[serde(default)]
    pub repeatable: bool,
}

/// One version of a form definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormVersion {
    pub version: String,
    pub sections: Vec<Section>,
}

/// A versioned form schema document. Only the first version is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub versions: Vec<FormVersion>,
}

impl FormSchema {
    /// Parse a schema from its JSON document form.
    pub fn from_json(input: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(input)?)
    }

    /// The version this form renders: always the first one.
    pub fn active_version(&self) -> Result<&FormVersion, ModelError> {
        self.versions.first().ok_or(ModelError::EmptySchema)
    }
}
