//! The document store seam.
//!
//! The recommendation engine only needs two read-only queries. Anything
//! that can answer them (the in-memory [`DataIndex`], a database client,
//! a test double) can back the engine.

use crate::error::{DataLoadError, Result};
use crate::types::{DataIndex, EventRecord, UserRecord};

/// Read-only queries the engine issues against the document store
pub trait DocumentStore: Send + Sync {
    /// Fetch a user by id.
    ///
    /// A missing user is reported as [`DataLoadError::UserNotFound`].
    fn find_user(&self, user_id: &str) -> Result<UserRecord>;

    /// Fetch every active event, optionally excluding one creator's events.
    ///
    /// Events come back in a stable order.
    fn active_events(&self, exclude_creator: Option<&str>) -> Result<Vec<EventRecord>>;
}

impl DocumentStore for DataIndex {
    fn find_user(&self, user_id: &str) -> Result<UserRecord> {
        self.get_user(user_id)
            .cloned()
            .ok_or_else(|| DataLoadError::UserNotFound {
                id: user_id.to_string(),
            })
    }

    fn active_events(&self, exclude_creator: Option<&str>) -> Result<Vec<EventRecord>> {
        Ok(self
            .events()
            .iter()
            .filter(|event| event.is_active)
            .filter(|event| match exclude_creator {
                Some(creator) => event.creator_id() != Some(creator),
                None => true,
            })
            .cloned()
            .collect())
    }
}
