pub mod error;
pub mod schema;
pub mod validate;
pub mod value;

pub use error::{ModelError, Result};
pub use schema::{
    ChoiceOption, DefaultValue, FieldKind, FormSchema, FormVersion, Question, QuestionMetadata,
    Section,
};
pub use validate::{IssueSeverity, SchemaIssue, SchemaReport, validate_schema};
pub use value::FieldValue;
