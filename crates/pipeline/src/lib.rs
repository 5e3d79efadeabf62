//! Scoring pipeline for event recommendations.
//!
//! This crate provides:
//! - Text normalization and stop words
//! - Feature building for events and users
//! - Content similarity (TF-IDF or set overlap)
//! - Exclusion filters composed in a `FilterPipeline`
//! - The hybrid scorer and its two variants
//!
//! ## Architecture
//! A request moves through these stages:
//! 1. Candidates are built from the active events
//! 2. Filters remove the user's own, already consumed and unprofiled events
//! 3. Content and collaborative scores are attached
//! 4. The hybrid scorer blends, sorts, filters and truncates
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::filters::*;
//! use pipeline::{FilterPipeline, HybridScorer, ScoringVariant};
//!
//! let eligible = FilterPipeline::new()
//!     .add_filter(OwnEventsFilter)
//!     .add_filter(AlreadyConsumedFilter)
//!     .add_filter(ProfiledEventFilter::new(profiled_ids))
//!     .apply(candidates, &context)?;
//!
//! let ranked = HybridScorer::new(ScoringVariant::CreatorRating).rank(scored, Some(10));
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod filter_pipeline;
pub mod filters;
pub mod scorer;
pub mod similarity;
pub mod stopwords;
pub mod text;
pub mod traits;

// Re-export main types
pub use config::EngineConfig;
pub use error::PipelineError;
pub use features::{EventProfile, event_features, user_interests};
pub use filter_pipeline::FilterPipeline;
pub use scorer::{HybridScorer, HybridWeights, ScoringVariant};
pub use similarity::{ContentIndex, ContentSimilarity, SimilarityStrategy};
pub use stopwords::{Language, parse_languages};
pub use text::normalize;
pub use traits::Filter;
