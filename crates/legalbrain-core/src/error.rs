use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("rule value must not be empty")]
    EmptyValue,

    #[error("severity is required for a severity override")]
    MissingSeverity,

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unsupported pack file type: {0} (upload a PDF or ZIP of PDFs)")]
    UnsupportedPackType(String),
}
