//! Error types for mdtrain
//!
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that can occur while building or consuming a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The reference document could not be read
    #[error("Failed to read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file does not exist
    #[error("Dataset not found: {0}")]
    DatasetNotFound(PathBuf),

    /// Neither the explicit path nor PATH yielded the store executable
    #[error("Executable '{program}' not found (explicit path: {explicit})")]
    ExecutableNotFound { program: String, explicit: String },

    /// A dataset line could not be parsed into a record
    #[error("Line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DatasetError {
    /// Per-line data errors can be skipped; everything else aborts the run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DatasetError::MalformedLine { .. })
    }
}

/// Result type alias for mdtrain operations
pub type Result<T> = std::result::Result<T, DatasetError>;
