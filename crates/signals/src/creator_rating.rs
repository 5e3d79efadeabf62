//! Creator-rating signal.
//!
//! "Events by people who run good events are probably good."
//!
//! ## Algorithm
//! 1. Every event with a positive rating and at least one rating
//!    contributes its rating to its creator's list
//! 2. A creator's rating is the mean of their contributions
//! 3. The global fallback is the mean of every contribution
//!    (3.0 when nothing qualifies)
//! 4. Score = creator rating / 5, or global fallback / 5 for creators
//!    with no qualifying events

use crate::CollaborativeSignal;
use crate::types::Candidate;
use data_loader::{EventRecord, UserId};
use std::collections::HashMap;
use tracing::debug;

/// Top of the rating scale
pub const MAX_RATING: f64 = 5.0;

/// Global average used when no event carries a qualifying rating
pub const DEFAULT_GLOBAL_RATING: f64 = 3.0;

/// Per-creator rating averages with a global fallback
#[derive(Debug, Clone)]
pub struct CreatorRatings {
    creator_averages: HashMap<UserId, f64>,
    global_average: f64,
}

impl CreatorRatings {
    /// Aggregate ratings over a set of events.
    ///
    /// Events without a resolvable creator contribute nothing.
    pub fn from_events(events: &[EventRecord]) -> Self {
        let mut per_creator: HashMap<UserId, (f64, u32)> = HashMap::new();
        let mut total = 0.0;
        let mut count = 0u32;

        for event in events {
            let Some(creator_id) = event.creator_id() else {
                continue;
            };
            if !event.has_rating() {
                continue;
            }
            let rating = event.rating_value();
            let entry = per_creator.entry(creator_id.to_string()).or_insert((0.0, 0));
            entry.0 += rating;
            entry.1 += 1;
            total += rating;
            count += 1;
        }

        let global_average = if count > 0 {
            total / count as f64
        } else {
            DEFAULT_GLOBAL_RATING
        };

        let creator_averages: HashMap<UserId, f64> = per_creator
            .into_iter()
            .map(|(creator, (sum, n))| (creator, sum / n as f64))
            .collect();

        debug!(
            "Aggregated ratings for {} creators (global average {:.2})",
            creator_averages.len(),
            global_average
        );

        Self {
            creator_averages,
            global_average,
        }
    }

    /// Average rating of a creator's events, or the global average
    pub fn rating_for(&self, creator_id: Option<&str>) -> f64 {
        creator_id
            .and_then(|id| self.creator_averages.get(id))
            .copied()
            .unwrap_or(self.global_average)
    }

    /// Mean of every qualifying rating
    pub fn global_average(&self) -> f64 {
        self.global_average
    }

    /// Number of creators with at least one qualifying rating
    pub fn rated_creators(&self) -> usize {
        self.creator_averages.len()
    }
}

impl CollaborativeSignal for CreatorRatings {
    fn name(&self) -> &str {
        "CreatorRatings"
    }

    fn score(&self, candidate: &Candidate) -> f32 {
        (self.rating_for(candidate.creator_id.as_deref()) / MAX_RATING) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_events() -> Vec<EventRecord> {
        vec![
            EventRecord::new("e1").with_creator("c1").with_rating(5.0, 2.0),
            EventRecord::new("e2").with_creator("c1").with_rating(4.0, 1.0),
            EventRecord::new("e3").with_creator("c2").with_rating(3.0, 10.0),
            // Unrated or uncounted events contribute nothing
            EventRecord::new("e4").with_creator("c3").with_rating(0.0, 0.0),
            EventRecord::new("e5").with_creator("c3").with_rating(4.0, 0.0),
            // No creator, no contribution
            EventRecord::new("e6").with_rating(1.0, 5.0),
        ]
    }

    #[test]
    fn test_creator_averages() {
        let ratings = CreatorRatings::from_events(&create_test_events());

        assert_eq!(ratings.rated_creators(), 2);
        assert!((ratings.rating_for(Some("c1")) - 4.5).abs() < 1e-9);
        assert!((ratings.rating_for(Some("c2")) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_global_fallback() {
        let ratings = CreatorRatings::from_events(&create_test_events());

        // (5 + 4 + 3) / 3
        assert!((ratings.global_average() - 4.0).abs() < 1e-9);
        assert!((ratings.rating_for(Some("c3")) - 4.0).abs() < 1e-9);
        assert!((ratings.rating_for(None) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_corpus_defaults() {
        let ratings = CreatorRatings::from_events(&[]);
        assert_eq!(ratings.global_average(), DEFAULT_GLOBAL_RATING);

        let candidate = Candidate::new("e1", Some("c1".to_string()));
        assert!((ratings.score(&candidate) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_score_is_normalized() {
        let ratings = CreatorRatings::from_events(&create_test_events());
        let candidate = Candidate::new("e1", Some("c1".to_string()));
        assert!((ratings.score(&candidate) - 0.9).abs() < 1e-6);
    }
}
