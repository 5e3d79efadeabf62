//! Shared types for candidate scoring.

use data_loader::{EventId, UserId, UserRecord};
use std::collections::HashSet;

/// Everything about the querying user that exclusion and collaborative
/// scoring need, gathered once per request.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: UserId,
    /// Events the user visited or registered for
    pub consumed_events: HashSet<EventId>,
    /// Events the user registered for (the neighbor-vote signal compares these)
    pub registered_events: HashSet<EventId>,
}

impl UserContext {
    /// Create an empty context for a user
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// Build the context from a user record
    pub fn from_record(user: &UserRecord) -> Self {
        Self {
            user_id: user.id.clone(),
            consumed_events: user.consumed_events().cloned().collect(),
            registered_events: user.registered_events.iter().cloned().collect(),
        }
    }

    /// True when the user already visited or registered for the event
    pub fn has_consumed(&self, event_id: &str) -> bool {
        self.consumed_events.contains(event_id)
    }
}

/// An event moving through exclusion and scoring
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub event_id: EventId,
    pub creator_id: Option<UserId>,
    /// Similarity between the user's interests and the event's features
    pub content_score: f32,
    /// Signal derived from other users or from creator ratings
    pub collaborative_score: f32,
    /// Weighted blend used for ranking
    pub score: f32,
}

impl Candidate {
    /// Create an unscored candidate
    pub fn new(event_id: impl Into<EventId>, creator_id: Option<UserId>) -> Self {
        Self {
            event_id: event_id.into(),
            creator_id,
            content_score: 0.0,
            collaborative_score: 0.0,
            score: 0.0,
        }
    }
}
