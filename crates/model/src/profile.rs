//! Cached per-user profiles.

use chrono::{DateTime, Utc};
use data_loader::{EventId, UserRecord};
use pipeline::user_interests;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user's interests and history as of the moment the profile was built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Normalized interest tokens, never empty
    pub interests: Vec<String>,
    /// Events the user had visited or registered for
    pub consumed_events: BTreeSet<EventId>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn build(user: &UserRecord) -> Self {
        Self {
            interests: user_interests(user),
            consumed_events: user.consumed_events().cloned().collect(),
            created_at: Utc::now(),
        }
    }

    pub fn has_consumed(&self, event_id: &str) -> bool {
        self.consumed_events.contains(event_id)
    }
}
