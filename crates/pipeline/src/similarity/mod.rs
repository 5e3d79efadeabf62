//! Content similarity between a user's interests and each event's features.
//!
//! Two strategies sit behind [`ContentSimilarity`]:
//! - **TF-IDF**: term-weighted vectors over the training corpus, scored by
//!   cosine similarity
//! - **Overlap**: the share of the user's interests that the event carries
//!
//! Both are fitted once per training pass over the event profiles, in
//! profile order, and both score every row against one user at a time.

pub mod overlap;
pub mod tfidf;

pub use overlap::OverlapIndex;
pub use tfidf::TfIdfIndex;

use crate::features::EventProfile;
use crate::stopwords::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scores a user's interests against every fitted row
pub trait ContentSimilarity: Send + Sync {
    /// Name of this strategy (for logging)
    fn name(&self) -> &str;

    /// Number of fitted rows
    fn rows(&self) -> usize;

    /// One score in [0, 1] per row, in row order
    fn scores(&self, interests: &[String]) -> Vec<f32>;
}

/// Which strategy a deployment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityStrategy {
    #[default]
    TfIdf,
    Overlap,
}

impl fmt::Display for SimilarityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityStrategy::TfIdf => write!(f, "tfidf"),
            SimilarityStrategy::Overlap => write!(f, "overlap"),
        }
    }
}

impl FromStr for SimilarityStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" => Ok(SimilarityStrategy::TfIdf),
            "overlap" => Ok(SimilarityStrategy::Overlap),
            other => Err(format!("unknown similarity strategy: {other}")),
        }
    }
}

/// A fitted similarity index, in whichever strategy was configured
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum ContentIndex {
    TfIdf(TfIdfIndex),
    Overlap(OverlapIndex),
}

impl ContentIndex {
    /// Fit an index over event profiles; row `i` corresponds to `profiles[i]`
    pub fn fit(
        strategy: SimilarityStrategy,
        profiles: &[EventProfile],
        languages: &[Language],
    ) -> Self {
        match strategy {
            SimilarityStrategy::TfIdf => {
                let documents: Vec<String> = profiles.iter().map(EventProfile::document).collect();
                ContentIndex::TfIdf(TfIdfIndex::fit_or_fallback(&documents, languages))
            }
            SimilarityStrategy::Overlap => ContentIndex::Overlap(OverlapIndex::fit(
                profiles.iter().map(|profile| profile.features.as_slice()),
            )),
        }
    }

    pub fn strategy(&self) -> SimilarityStrategy {
        match self {
            ContentIndex::TfIdf(_) => SimilarityStrategy::TfIdf,
            ContentIndex::Overlap(_) => SimilarityStrategy::Overlap,
        }
    }

    /// True when this index was fitted with `strategy` and `languages`.
    ///
    /// Overlap scoring ignores stop words, so only TF-IDF compares languages.
    pub fn fitted_for(&self, strategy: SimilarityStrategy, languages: &[Language]) -> bool {
        match self {
            ContentIndex::TfIdf(index) => {
                strategy == SimilarityStrategy::TfIdf && index.languages() == languages
            }
            ContentIndex::Overlap(_) => strategy == SimilarityStrategy::Overlap,
        }
    }

    fn inner(&self) -> &dyn ContentSimilarity {
        match self {
            ContentIndex::TfIdf(index) => index,
            ContentIndex::Overlap(index) => index,
        }
    }
}

impl ContentSimilarity for ContentIndex {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn rows(&self) -> usize {
        self.inner().rows()
    }

    fn scores(&self, interests: &[String]) -> Vec<f32> {
        self.inner().scores(interests)
    }
}
