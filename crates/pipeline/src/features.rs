//! Feature building for events and users.
//!
//! An event's features are its tags, its categories and its name, each
//! normalized into one token. A user's features are their interest tags.
//! Neither is ever empty: fallback tokens stand in for missing data so that
//! every profile can still be compared against every other.

use crate::text::normalize_all;
use data_loader::{EventId, EventRecord, TagField, UserId, UserRecord};
use serde::{Deserialize, Serialize};

/// Substituted when an event has no usable tags, categories or name
pub const EVENT_FALLBACK: [&str; 3] = ["event", "activity", "meetup"];

/// Substituted when a user has no usable interest tags
pub const USER_FALLBACK: [&str; 3] = ["meetup", "social", "activity"];

/// Trained representation of one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProfile {
    pub event_id: EventId,
    pub creator_id: UserId,
    /// Normalized tokens, never empty
    pub features: Vec<String>,
}

impl EventProfile {
    /// Build a profile, or `None` when the event has no resolvable creator
    pub fn from_record(event: &EventRecord) -> Option<Self> {
        let creator_id = event.creator_id()?;
        Some(Self {
            event_id: event.id.clone(),
            creator_id: creator_id.to_string(),
            features: event_features(event),
        })
    }

    /// Features joined into one document for the vector-space strategy
    pub fn document(&self) -> String {
        self.features.join(" ")
    }
}

/// Normalized tags, then categories, then name
pub fn event_features(event: &EventRecord) -> Vec<String> {
    let tags = event
        .tag_field()
        .map(TagField::split_pieces)
        .unwrap_or_default();
    let categories = event
        .category
        .as_ref()
        .map(TagField::whole_pieces)
        .unwrap_or_default();
    let name = event.name.as_deref();

    let features = normalize_all(tags.into_iter().chain(categories).chain(name));
    or_fallback(features, &EVENT_FALLBACK)
}

/// Normalized interest tags
pub fn user_interests(user: &UserRecord) -> Vec<String> {
    let interests = user
        .interested_tags
        .as_ref()
        .map(TagField::split_pieces)
        .unwrap_or_default();

    or_fallback(normalize_all(interests), &USER_FALLBACK)
}

fn or_fallback(features: Vec<String>, fallback: &[&str]) -> Vec<String> {
    if features.is_empty() {
        fallback.iter().map(|token| token.to_string()).collect()
    } else {
        features
    }
}
