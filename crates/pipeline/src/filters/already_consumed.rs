//! Filter to remove events the user already visited or registered for.

use crate::traits::Filter;
use anyhow::Result;
use signals::{Candidate, UserContext};

/// Removes candidates in the user's visited or registered set
pub struct AlreadyConsumedFilter;

impl Filter for AlreadyConsumedFilter {
    fn name(&self) -> &str {
        "AlreadyConsumedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| !context.has_consumed(&candidate.event_id))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_consumed_filter() {
        let mut context = UserContext::new("u1");
        context.consumed_events.insert("e100".to_string());
        context.consumed_events.insert("e200".to_string());

        let candidates = vec![
            Candidate::new("e100", None),
            Candidate::new("e101", None),
            Candidate::new("e200", None),
            Candidate::new("e300", None),
        ];

        let filtered = AlreadyConsumedFilter.apply(candidates, &context).unwrap();

        let ids: Vec<_> = filtered.iter().map(|c| c.event_id.as_str()).collect();
        assert_eq!(ids, vec!["e101", "e300"]);
    }
}
