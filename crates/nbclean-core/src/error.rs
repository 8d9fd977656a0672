//! Error types for notebook cleaning

use thiserror::Error;

/// Error type for notebook reading, cleaning and writing
#[derive(Error, Debug)]
pub enum NotebookError {
    /// I/O error when reading or writing a notebook
    #[error("Failed to access notebook: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON decoding or encoding error
    #[error("Failed to process notebook JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The document does not have the shape the cleaner walks
    #[error("Invalid notebook format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for notebook operations
pub type Result<T> = std::result::Result<T, NotebookError>;

impl NotebookError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidFormat(msg.into())
    }
}
