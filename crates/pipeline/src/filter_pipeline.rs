//! Chains exclusion filters.

use crate::traits::Filter;
use anyhow::Result;
use signals::{Candidate, UserContext};
use tracing::debug;

/// Applies filters in the order they were added.
///
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(OwnEventsFilter)
///     .add_filter(AlreadyConsumedFilter)
///     .add_filter(ProfiledEventFilter::new(profiled_ids));
///
/// let eligible = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Append a filter (builder style)
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter in sequence, stopping at the first error
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, context)?;
            debug!(
                "{}: {} -> {} candidates",
                filter.name(),
                before,
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
