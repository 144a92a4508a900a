//! Index error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or building the index.
///
/// `Clone` is required: the lifecycle manager fans a failed build out to
/// every caller waiting on the shared build future.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    /// The knowledge root directory does not exist
    #[error("Knowledge directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// No document maps to the requested identifier
    #[error("Resource not found: {identifier}")]
    ResourceNotFound {
        identifier: String,
        /// Identifiers that do exist, for the caller's error payload.
        valid: Vec<String>,
    },

    /// The index build itself failed
    #[error("Index build failed: {0}")]
    Build(String),
}
