use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown field kind: {0}")]
    UnknownFieldKind(String),
    #[error("schema has no versions")]
    EmptySchema,
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
