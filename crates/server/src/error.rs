//! Error kinds surfaced by the recommendation entry points.
//!
//! Every failure carries an `ErrorKind`, so the CLI and the HTTP layer can
//! map it to a stable tag or status without matching on messages.

use data_loader::DataLoadError;
use model::ModelError;
use std::fmt;
use thiserror::Error;

/// Closed set of failure categories.
///
/// A degenerate corpus never shows up here: TF-IDF fitting recovers from it
/// with a synthetic corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested user does not exist
    NotFound,
    /// A single item could not be scored; the item is skipped and logged
    PerItem,
    /// The model could not be trained
    Training,
    /// Anything else
    System,
}

impl ErrorKind {
    pub fn tag(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::PerItem => "per_item",
            ErrorKind::Training => "training",
            ErrorKind::System => "system",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Error, Debug)]
#[error("{message}")]
pub struct RecommendError {
    kind: ErrorKind,
    message: String,
}

impl RecommendError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl From<DataLoadError> for RecommendError {
    fn from(err: DataLoadError) -> Self {
        let kind = if err.is_not_found() {
            ErrorKind::NotFound
        } else {
            ErrorKind::System
        };
        Self::new(kind, err.to_string())
    }
}

impl From<ModelError> for RecommendError {
    fn from(err: ModelError) -> Self {
        let kind = match &err {
            ModelError::Store(store) if store.is_not_found() => ErrorKind::NotFound,
            ModelError::Store(_) => ErrorKind::System,
            _ => ErrorKind::Training,
        };
        Self::new(kind, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err: RecommendError = DataLoadError::UserNotFound {
            id: "u1".to_string(),
        }
        .into();
        assert!(err.is_not_found());

        let err: RecommendError = ModelError::NoEligibleEvents.into();
        assert_eq!(err.kind(), ErrorKind::Training);
        assert_eq!(err.kind().tag(), "training");
    }
}
