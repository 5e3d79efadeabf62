//! Filter to keep only events the trained model knows about.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::EventId;
use signals::{Candidate, UserContext};
use std::collections::HashSet;

/// Removes candidates with no row in the trained model.
///
/// Events created after the last training pass, or skipped by it for
/// lacking a creator, have no content representation to score.
pub struct ProfiledEventFilter {
    profiled: HashSet<EventId>,
}

impl ProfiledEventFilter {
    pub fn new(profiled: HashSet<EventId>) -> Self {
        Self { profiled }
    }
}

impl Filter for ProfiledEventFilter {
    fn name(&self) -> &str {
        "ProfiledEventFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| self.profiled.contains(&candidate.event_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiled_filter() {
        let profiled: HashSet<EventId> = ["e1", "e3"].iter().map(|s| s.to_string()).collect();
        let filter = ProfiledEventFilter::new(profiled);

        let candidates = vec![
            Candidate::new("e1", None),
            Candidate::new("e2", None),
            Candidate::new("e3", None),
        ];
        let filtered = filter.apply(candidates, &UserContext::new("u1")).unwrap();

        let ids: Vec<_> = filtered.iter().map(|c| c.event_id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e3"]);
    }
}
