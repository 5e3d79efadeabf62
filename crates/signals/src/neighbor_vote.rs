//! Neighbor-vote signal.
//!
//! "People who registered for what you registered for also registered for..."
//!
//! ## Algorithm
//! 1. Compare the querying user's registered events with every other
//!    user's registered events (Jaccard coefficient)
//! 2. Keep the top K users by coefficient, dropping any at 0
//! 3. Each neighbor votes once for every event they registered for that
//!    the querying user has not
//! 4. Score = votes / K, so an event every neighbor voted for scores 1.0

use crate::CollaborativeSignal;
use crate::types::{Candidate, UserContext};
use data_loader::{EventId, UserId, UserRecord};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Number of neighbors consulted
pub const DEFAULT_NEIGHBORS: usize = 3;

/// Jaccard coefficient of two sets: |A ∩ B| / |A ∪ B|, 0 when both are empty
pub fn jaccard_similarity<T>(a: &HashSet<T>, b: &HashSet<T>) -> f32
where
    T: Eq + std::hash::Hash,
{
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|item| large.contains(*item)).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f32 / union as f32
    }
}

/// Votes cast by the querying user's nearest neighbors
#[derive(Debug, Clone, Default)]
pub struct NeighborVotes {
    neighbors: Vec<(UserId, f32)>,
    votes: HashMap<EventId, u32>,
    k: usize,
}

impl NeighborVotes {
    /// Collect votes from the `DEFAULT_NEIGHBORS` most similar users
    pub fn compute(context: &UserContext, users: &[UserRecord]) -> Self {
        Self::with_k(context, users, DEFAULT_NEIGHBORS)
    }

    /// Collect votes from the `k` most similar users.
    ///
    /// The querying user is skipped if present in `users`. Ties keep the
    /// order of `users`.
    #[instrument(skip(context, users), fields(user_id = %context.user_id, users = users.len()))]
    pub fn with_k(context: &UserContext, users: &[UserRecord], k: usize) -> Self {
        let mine = &context.registered_events;
        let mine_str: HashSet<&str> = mine.iter().map(String::as_str).collect();

        let mut similarities: Vec<(usize, f32, HashSet<&str>)> = users
            .par_iter()
            .enumerate()
            .filter(|(_, user)| user.id != context.user_id)
            .map(|(pos, user)| {
                let theirs: HashSet<&str> =
                    user.registered_events.iter().map(String::as_str).collect();
                (pos, jaccard_similarity(&mine_str, &theirs), theirs)
            })
            .collect();

        // Stable by position so equal coefficients keep input order
        similarities.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let mut neighbors = Vec::new();
        let mut votes: HashMap<EventId, u32> = HashMap::new();

        for (pos, similarity, theirs) in similarities.into_iter().take(k) {
            if similarity <= 0.0 {
                continue;
            }
            neighbors.push((users[pos].id.clone(), similarity));
            for event_id in theirs {
                if !mine.contains(event_id) {
                    *votes.entry(event_id.to_string()).or_insert(0) += 1;
                }
            }
        }

        debug!(
            "Found {} neighbors casting votes for {} events",
            neighbors.len(),
            votes.len()
        );

        Self { neighbors, votes, k }
    }

    /// Neighbors with their coefficients, most similar first
    pub fn neighbors(&self) -> &[(UserId, f32)] {
        &self.neighbors
    }

    /// Raw vote count for an event
    pub fn votes_for(&self, event_id: &str) -> u32 {
        self.votes.get(event_id).copied().unwrap_or(0)
    }

    /// Votes normalized by the neighbor budget
    pub fn score_for(&self, event_id: &str) -> f32 {
        if self.k == 0 {
            return 0.0;
        }
        self.votes_for(event_id) as f32 / self.k as f32
    }
}

impl CollaborativeSignal for NeighborVotes {
    fn name(&self) -> &str {
        "NeighborVotes"
    }

    fn score(&self, candidate: &Candidate) -> f32 {
        self.score_for(&candidate.event_id)
    }
}
