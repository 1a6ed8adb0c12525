//! Error types for the snippet store
//!
//! Every failure the store can report to its caller is a distinct variant, so
//! the CLI can turn each one into its own message instead of a generic error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by store, storage, and export operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A snippet with this title already exists
    #[error("A snippet titled '{0}' already exists")]
    DuplicateTitle(String),

    /// No snippet with this title exists
    #[error("No snippet titled '{0}' was found")]
    NotFound(String),

    /// The persisted file exists but could not be parsed
    #[error("Snippet data at {path} is corrupt: {message}")]
    CorruptData {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// User supplied a value the operation cannot accept
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed to serialize snippets for writing
    #[error("Failed to serialize snippets: {0}")]
    Serialize(String),

    /// I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        StoreError::CorruptData {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
