//! Error types for record operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed stored document: {0}")]
    MalformedDocument(String),
}

/// Result type for record operations
pub type Result<T> = std::result::Result<T, RecordError>;
