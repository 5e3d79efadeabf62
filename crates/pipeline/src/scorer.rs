//! Hybrid scoring: blend content and collaborative scores, then rank.
//!
//! Two variants exist and are kept apart on purpose:
//!
//! | Variant        | Content | Collaborative | Non-positive scores |
//! |----------------|---------|---------------|---------------------|
//! | `CreatorRating`| 0.6     | 0.4           | dropped             |
//! | `NeighborVote` | 0.7     | 0.3           | kept                |

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use signals::Candidate;

/// Fixed blend weights; always sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    content: f32,
    collaborative: f32,
}

impl HybridWeights {
    pub const CREATOR_RATING: Self = Self {
        content: 0.6,
        collaborative: 0.4,
    };

    pub const NEIGHBOR_VOTE: Self = Self {
        content: 0.7,
        collaborative: 0.3,
    };

    /// Validated weights: each in [0, 1], summing to 1.0
    pub fn new(content: f32, collaborative: f32) -> Result<Self> {
        let in_range = (0.0..=1.0).contains(&content) && (0.0..=1.0).contains(&collaborative);
        if !in_range || (content + collaborative - 1.0).abs() > 1e-6 {
            return Err(PipelineError::InvalidWeights {
                content,
                collaborative,
            });
        }
        Ok(Self {
            content,
            collaborative,
        })
    }

    pub fn content(&self) -> f32 {
        self.content
    }

    pub fn collaborative(&self) -> f32 {
        self.collaborative
    }

    /// Weighted sum of the two component scores
    pub fn blend(&self, content: f32, collaborative: f32) -> f32 {
        self.content * content + self.collaborative * collaborative
    }
}

/// The two product variants of the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringVariant {
    /// Creator-rating collaborative signal; drops non-positive scores
    CreatorRating,
    /// Neighbor-vote collaborative signal; returns every item
    NeighborVote,
}

impl ScoringVariant {
    pub fn weights(self) -> HybridWeights {
        match self {
            ScoringVariant::CreatorRating => HybridWeights::CREATOR_RATING,
            ScoringVariant::NeighborVote => HybridWeights::NEIGHBOR_VOTE,
        }
    }

    /// Whether ranking keeps items whose hybrid score is zero or below
    pub fn keeps_non_positive(self) -> bool {
        matches!(self, ScoringVariant::NeighborVote)
    }
}

/// Blends component scores into `Candidate::score` and ranks candidates
#[derive(Debug, Clone, Copy)]
pub struct HybridScorer {
    variant: ScoringVariant,
    weights: HybridWeights,
}

impl HybridScorer {
    /// Scorer with the variant's standard weights
    pub fn new(variant: ScoringVariant) -> Self {
        Self {
            variant,
            weights: variant.weights(),
        }
    }

    /// Scorer with explicit weights
    pub fn with_weights(variant: ScoringVariant, weights: HybridWeights) -> Self {
        Self { variant, weights }
    }

    pub fn variant(&self) -> ScoringVariant {
        self.variant
    }

    pub fn weights(&self) -> HybridWeights {
        self.weights
    }

    /// Set the hybrid score of one candidate
    pub fn score(&self, candidate: &mut Candidate) {
        candidate.score = self
            .weights
            .blend(candidate.content_score, candidate.collaborative_score);
    }

    /// Score every candidate, sort descending, apply the variant's
    /// post-filter, and truncate to `limit`.
    ///
    /// Equal scores keep their input order.
    pub fn rank(&self, mut candidates: Vec<Candidate>, limit: Option<usize>) -> Vec<Candidate> {
        for candidate in &mut candidates {
            self.score(candidate);
        }

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

        if !self.variant.keeps_non_positive() {
            candidates.retain(|candidate| candidate.score > 0.0);
        }
        if let Some(limit) = limit {
            candidates.truncate(limit);
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, content: f32, collaborative: f32) -> Candidate {
        let mut candidate = Candidate::new(id, None);
        candidate.content_score = content;
        candidate.collaborative_score = collaborative;
        candidate
    }

    #[test]
    fn test_standard_weights_sum_to_one() {
        for variant in [ScoringVariant::CreatorRating, ScoringVariant::NeighborVote] {
            let weights = variant.weights();
            assert!((weights.content() + weights.collaborative() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_invalid_weights() {
        assert!(HybridWeights::new(0.5, 0.5).is_ok());
        assert!(HybridWeights::new(0.6, 0.6).is_err());
        assert!(HybridWeights::new(1.2, -0.2).is_err());
    }

    #[test]
    fn test_blend_stays_in_unit_range() {
        let weights = HybridWeights::CREATOR_RATING;
        for content in [0.0, 0.25, 1.0] {
            for collaborative in [0.0, 0.5, 1.0] {
                let score = weights.blend(content, collaborative);
                assert!((0.0..=1.0 + 1e-6).contains(&score));
            }
        }
    }

    #[test]
    fn test_creator_rating_ranking() {
        let scorer = HybridScorer::new(ScoringVariant::CreatorRating);
        let ranked = scorer.rank(
            vec![
                candidate("e1", 0.5, 1.0),
                candidate("e2", 1.0, 1.0),
                candidate("e3", 0.0, 0.0),
            ],
            None,
        );

        let ids: Vec<_> = ranked.iter().map(|c| c.event_id.as_str()).collect();
        assert_eq!(ids, vec!["e2", "e1"]);
        assert!((ranked[0].score - 1.0).abs() < 1e-6);
        assert!((ranked[1].score - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_neighbor_vote_keeps_zero_scores() {
        let scorer = HybridScorer::new(ScoringVariant::NeighborVote);
        let ranked = scorer.rank(
            vec![candidate("e1", 0.0, 0.0), candidate("e2", 0.0, 1.0)],
            None,
        );

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].event_id, "e2");
        assert!((ranked[0].score - 0.3).abs() < 1e-6);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn test_limit_and_stable_ties() {
        let scorer = HybridScorer::new(ScoringVariant::CreatorRating);
        let ranked = scorer.rank(
            vec![
                candidate("a", 0.5, 0.5),
                candidate("b", 0.5, 0.5),
                candidate("c", 0.5, 0.5),
            ],
            Some(2),
        );

        let ids: Vec<_> = ranked.iter().map(|c| c.event_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
