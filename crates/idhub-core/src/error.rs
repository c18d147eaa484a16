/// Core type errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unsupported envelope format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid hub entry encoding: {0}")]
    InvalidEncoding(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
