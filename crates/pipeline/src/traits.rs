//! Core trait for candidate exclusion.
//!
//! Exclusion rules (own events, consumed events, events missing from the
//! trained model) are separate filters composed in a `FilterPipeline`.

use anyhow::Result;
use signals::{Candidate, UserContext};

/// Removes ineligible candidates.
///
/// Filters take ownership of the candidates and return the survivors in
/// their original order.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - The querying user's history
    ///
    /// # Returns
    /// * `Ok(Vec<Candidate>)` - The filtered candidates
    /// * `Err` - If filtering fails
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &UserContext,
    ) -> Result<Vec<Candidate>>;
}
