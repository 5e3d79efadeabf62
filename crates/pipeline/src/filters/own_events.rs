//! Filter to remove the user's own events.

use crate::traits::Filter;
use anyhow::Result;
use signals::{Candidate, UserContext};

pub struct OwnEventsFilter;

impl Filter for OwnEventsFilter {
    fn name(&self) -> &str {
        "OwnEventsFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| candidate.creator_id.as_deref() != Some(context.user_id.as_str()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_events_filter() {
        let context = UserContext::new("u1");
        let candidates = vec![
            Candidate::new("e1", Some("u1".to_string())),
            Candidate::new("e2", Some("u2".to_string())),
            Candidate::new("e3", None),
        ];

        let filtered = OwnEventsFilter.apply(candidates, &context).unwrap();

        let ids: Vec<_> = filtered.iter().map(|c| c.event_id.as_str()).collect();
        assert_eq!(ids, vec!["e2", "e3"]);
    }
}
