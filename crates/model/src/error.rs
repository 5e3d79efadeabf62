//! Error types for the model lifecycle.

use data_loader::DataLoadError;
use thiserror::Error;

/// Errors raised while training, loading or persisting the model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("No eligible events to train on")]
    NoEligibleEvents,

    #[error("Failed to read or write model artifact: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Failed to encode or decode model artifact: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document store query failed: {0}")]
    Store(#[from] DataLoadError),
}

impl ModelError {
    /// True when the failure came from the document store reporting a missing user
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::Store(err) if err.is_not_found())
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
