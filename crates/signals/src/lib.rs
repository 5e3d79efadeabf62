//! # Signals Crate
//!
//! Collaborative signals for event recommendations: the secondary score
//! blended with content similarity.
//!
//! ## Components
//!
//! ### Creator Ratings
//! Quality prior based on who runs the event:
//! - Average rating of each creator's active, rated events
//! - Falls back to the global average for unrated creators
//!
//! ### Neighbor Votes
//! Collaborative filtering over registrations:
//! - Finds the 3 users whose registrations overlap most with yours
//! - Each of them votes for the events you haven't registered for
//!
//! ## Example Usage
//!
//! ```ignore
//! use signals::{CollaborativeSignal, CreatorRatings, NeighborVotes, UserContext};
//!
//! let ratings = CreatorRatings::from_events(&events);
//! let votes = NeighborVotes::compute(&UserContext::from_record(&user), &all_users);
//!
//! let boost = ratings.score(&candidate);
//! ```

pub mod creator_rating;
pub mod neighbor_vote;
pub mod types;

pub use creator_rating::CreatorRatings;
pub use neighbor_vote::{NeighborVotes, jaccard_similarity};
pub use types::{Candidate, UserContext};

/// A source of collaborative scores in [0, 1].
///
/// Implementations are built once per request (or per training pass) and
/// then queried for each candidate.
pub trait CollaborativeSignal: Send + Sync {
    /// Name of this signal (for logging)
    fn name(&self) -> &str;

    /// Score a candidate
    fn score(&self, candidate: &Candidate) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::EventRecord;

    #[test]
    fn test_signals_are_object_safe() {
        let events = vec![EventRecord::new("e1").with_creator("c1").with_rating(4.0, 1.0)];
        let signals: Vec<Box<dyn CollaborativeSignal>> = vec![
            Box::new(CreatorRatings::from_events(&events)),
            Box::new(NeighborVotes::default()),
        ];

        let candidate = Candidate::new("e1", Some("c1".to_string()));
        assert!((signals[0].score(&candidate) - 0.8).abs() < 1e-6);
        assert_eq!(signals[1].score(&candidate), 0.0);
        assert_eq!(signals[1].name(), "NeighborVotes");
    }
}
