//! Error types for the scoring pipeline.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// No document in the corpus has a usable term
    #[error("Degenerate corpus: no usable terms in {documents} documents")]
    DegenerateCorpus { documents: usize },

    #[error("Invalid hybrid weights: content {content} + collaborative {collaborative} must be 1.0")]
    InvalidWeights { content: f32, collaborative: f32 },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
