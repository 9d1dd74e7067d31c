//! Section rendering: assembling questions into a host-agnostic plan.
//!
//! The plan carries everything a host UI needs to draw a section: the
//! field key each control binds to, current visibility, and a control
//! variant per field kind. Unknown kinds become inline error placeholders
//! so one bad question never aborts the rest of the section.

use tracing::warn;

use crf_model::{ChoiceOption, FieldKind, Question, Section};

use crate::naming::{field_key, indexed_key};
use crate::state::FormState;
use crate::visibility::{build_alias_map, evaluate};

/// Concrete control a question renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldControl {
    ShortText,
    LongText,
    SingleChoice { options: Vec<ChoiceOption> },
    MultiChoice { options: Vec<ChoiceOption> },
    Dropdown { options: Vec<ChoiceOption> },
    /// No control exists for this kind; render an inline error instead.
    ErrorPlaceholder { kind: String },
}

/// Render output for one question.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    pub question_id: String,
    pub label: String,
    /// Field key this control binds to in form state.
    pub key: String,
    pub required: bool,
    pub disabled: bool,
    pub visible: bool,
    pub control: FieldControl,
}

/// Render output for one section.
#[derive(Debug, Clone)]
pub struct SectionPlan {
    pub section_id: String,
    pub title: String,
    pub layout: Option<String>,
    pub fields: Vec<FieldPlan>,
}

/// Assemble the render plan for a section against current form values.
///
/// Builds the alias map fresh, evaluates every question's visibility, and
/// derives the bound field key: repeatable questions bind to their `_0`
/// pending slot. For a repeatable section, pass the engine's
/// label-suffixed pending clone; the suffix flows through key derivation
/// on its own.
pub fn render_section<S: FormState + ?Sized>(section: &Section, state: &S) -> SectionPlan {
    let aliases = build_alias_map(section);
    let fields = section
        .questions
        .iter()
        .map(|question| {
            let mut key = field_key(&question.label);
            if question.repeatable {
                key = indexed_key(&key, 0);
            }
            let visible = evaluate(question.visible_if.as_deref(), state.values(), &aliases);
            FieldPlan {
                question_id: question.id.clone(),
                label: question.label.clone(),
                key,
                required: question.required,
                disabled: question.disabled,
                visible,
                control: control_for(question),
            }
        })
        .collect();
    SectionPlan {
        section_id: section.id.clone(),
        title: section.title.clone(),
        layout: section.layout.clone(),
        fields,
    }
}

fn control_for(question: &Question) -> FieldControl {
    match question.kind() {
        Ok(FieldKind::ShortText) => FieldControl::ShortText,
        Ok(FieldKind::LongText) => FieldControl::LongText,
        Ok(FieldKind::SingleChoice) => FieldControl::SingleChoice {
            options: question.options.clone(),
        },
        Ok(FieldKind::MultiChoice) => FieldControl::MultiChoice {
            options: question.options.clone(),
        },
        Ok(FieldKind::DropdownSingleChoice) => FieldControl::Dropdown {
            options: question.options.clone(),
        },
        Err(_) => {
            warn!(
                question = %question.id,
                kind = %question.field_type,
                "no control for field kind, rendering placeholder"
            );
            FieldControl::ErrorPlaceholder {
                kind: question.field_type.clone(),
            }
        }
    }
}
