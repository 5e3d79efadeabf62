//! Error types for the data-loader crate.
//!
//! The document store distinguishes a missing user from every other
//! failure so callers can surface it as a structured "not found" error
//! instead of a generic crash.

use thiserror::Error;

/// Errors that can occur while loading records or querying the store
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record dump couldn't be decoded
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// The requested user does not exist in the store
    #[error("User with id {id} not found")]
    UserNotFound { id: String },

    /// Two records share the same id
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: String, id: String },
}

impl DataLoadError {
    /// True when the error is the distinguishable "user not found" case
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataLoadError::UserNotFound { .. })
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
