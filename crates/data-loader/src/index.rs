//! DataIndex building from record dumps.
//!
//! Loads `users.json` and `events.json` from a directory, builds the
//! primary indices and validates that ids are unique.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// File holding the user documents
pub const USERS_FILE: &str = "users.json";

/// File holding the event documents
pub const EVENTS_FILE: &str = "events.json";

impl DataIndex {
    /// Load the record dumps from a directory.
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Validate id uniqueness
    /// 3. Build the indices
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading record dumps from {:?}", data_dir);

        let users_path = data_dir.join(USERS_FILE);
        let events_path = data_dir.join(EVENTS_FILE);

        let (users, events) = rayon::join(
            || parser::parse_users(&users_path),
            || parser::parse_events(&events_path),
        );
        let users = users?;
        let events = events?;

        validate_unique("user", users.iter().map(|u| u.id.as_str()))?;
        validate_unique("event", events.iter().map(|e| e.id.as_str()))?;

        let index = Self::from_records(users, events);
        let (user_count, event_count) = index.counts();
        info!("Loaded {} users, {} events", user_count, event_count);
        Ok(index)
    }

    /// Build an index from already-decoded records
    pub fn from_records(users: Vec<UserRecord>, events: Vec<EventRecord>) -> Self {
        let mut index = DataIndex::new();
        for user in users {
            index.insert_user(user);
        }
        for event in events {
            index.insert_event(event);
        }
        index
    }
}

/// Reject dumps where two documents share an id
fn validate_unique<'a>(entity: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataLoadError::DuplicateId {
                entity: entity.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
