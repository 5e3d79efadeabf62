//! Engine configuration shared by training and inference.

use crate::scorer::HybridWeights;
use crate::similarity::SimilarityStrategy;
use crate::stopwords::Language;
use serde::{Deserialize, Serialize};

/// Upper bound on the events a single training pass will fit
pub const DEFAULT_MAX_TRAINING_EVENTS: usize = 50_000;

/// How the engine fits and scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub strategy: SimilarityStrategy,
    pub languages: Vec<Language>,
    /// Blend weights for store-backed recommendations
    pub weights: HybridWeights,
    pub max_training_events: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: SimilarityStrategy::TfIdf,
            languages: vec![Language::English],
            weights: HybridWeights::CREATOR_RATING,
            max_training_events: DEFAULT_MAX_TRAINING_EVENTS,
        }
    }
}

impl EngineConfig {
    pub fn with_strategy(mut self, strategy: SimilarityStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_languages(mut self, languages: Vec<Language>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_max_training_events(mut self, max: usize) -> Self {
        self.max_training_events = max;
        self
    }

    pub fn with_weights(mut self, weights: HybridWeights) -> Self {
        self.weights = weights;
        self
    }
}
