//! Service-level error types.

use serde_json::json;
use thiserror::Error;

use knowledge_index::IndexError;

/// Errors surfaced to the invocation layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request failed validation before reaching the engine
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The uri does not have the knowledge://<category>/<name> shape
    #[error("Invalid knowledge uri: {0}")]
    InvalidUri(String),

    /// No resource maps to the uri
    #[error("Knowledge resource not found: {uri}")]
    ResourceNotFound {
        uri: String,
        /// Uris that do resolve, for the error payload.
        valid_uris: Vec<String>,
    },

    /// Indexing or loading failure
    #[error(transparent)]
    Index(#[from] IndexError),
}

impl ServiceError {
    /// JSON payload for the caller's error envelope. Not-found errors
    /// enumerate the valid uris.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::ResourceNotFound { uri, valid_uris } => json!({
                "error": self.to_string(),
                "uri": uri,
                "valid_uris": valid_uris,
            }),
            other => json!({ "error": other.to_string() }),
        }
    }
}
