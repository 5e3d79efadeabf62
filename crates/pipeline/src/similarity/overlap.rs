//! Asymmetric set overlap: |interests ∩ features| / |interests|.
//!
//! Extra features on an event never lower its score; only the share of the
//! user's interests it covers matters.

use super::ContentSimilarity;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One feature set per fitted row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverlapIndex {
    rows: Vec<HashSet<String>>,
}

impl OverlapIndex {
    pub fn fit<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|features| features.iter().cloned().collect())
                .collect(),
        }
    }
}

/// Share of `interests` found in `features`; 0 when either is empty
pub fn overlap_coefficient(interests: &HashSet<&str>, features: &HashSet<String>) -> f32 {
    if interests.is_empty() || features.is_empty() {
        return 0.0;
    }
    let shared = interests
        .iter()
        .filter(|interest| features.contains(**interest))
        .count();
    shared as f32 / interests.len() as f32
}

impl ContentSimilarity for OverlapIndex {
    fn name(&self) -> &str {
        "Overlap"
    }

    fn rows(&self) -> usize {
        self.rows.len()
    }

    fn scores(&self, interests: &[String]) -> Vec<f32> {
        let interests: HashSet<&str> = interests.iter().map(String::as_str).collect();
        self.rows
            .par_iter()
            .map(|features| overlap_coefficient(&interests, features))
            .collect()
    }
}
