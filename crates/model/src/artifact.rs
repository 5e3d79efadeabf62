//! The trained model artifact.
//!
//! One artifact holds everything inference needs: the event profiles, the
//! fitted content index whose rows line up with those profiles, the cached
//! user profiles and the time of the last training pass. Artifacts are
//! immutable once published; writers build a new one and swap it in.

use crate::profile::UserProfile;
use crate::trainer::TrainingOutcome;
use chrono::{DateTime, Utc};
use data_loader::{EventId, UserId};
use pipeline::{ContentIndex, ContentSimilarity, EngineConfig, EventProfile, SimilarityStrategy};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Where the model is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelState {
    /// Nothing has been persisted yet
    Uninitialized,
    /// An artifact exists but has no usable index, or was fitted under
    /// another strategy or stop-word set
    Stale,
    /// The index is fitted for the current configuration and aligned with
    /// the event profiles
    Trained,
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelState::Uninitialized => write!(f, "uninitialized"),
            ModelState::Stale => write!(f, "stale"),
            ModelState::Trained => write!(f, "trained"),
        }
    }
}

/// Summary of the current model, for status endpoints and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub state: ModelState,
    pub strategy: Option<SimilarityStrategy>,
    pub event_rows: usize,
    pub user_profiles: usize,
    pub last_trained: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Profiles in index row order
    event_profiles: Vec<EventProfile>,
    #[serde(skip)]
    row_index: HashMap<EventId, usize>,
    user_profiles: HashMap<UserId, UserProfile>,
    content_index: Option<ContentIndex>,
    last_trained: Option<DateTime<Utc>>,
}

impl ModelArtifact {
    /// The empty skeleton used before any training pass
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild the event id to row lookup; call after deserializing
    pub fn reindex(&mut self) {
        self.row_index = self
            .event_profiles
            .iter()
            .enumerate()
            .map(|(row, profile)| (profile.event_id.clone(), row))
            .collect();
    }

    /// True when the index has rows and every row has a profile
    pub fn is_trained(&self) -> bool {
        match &self.content_index {
            Some(index) => index.rows() > 0 && index.rows() == self.event_profiles.len(),
            None => false,
        }
    }

    /// True when trained and fitted with the configured strategy and languages
    pub fn is_current(&self, config: &EngineConfig) -> bool {
        self.is_trained()
            && self
                .content_index
                .as_ref()
                .is_some_and(|index| index.fitted_for(config.strategy, &config.languages))
    }

    /// Replace the event profiles and index together, keeping user profiles
    pub fn with_training(&self, outcome: TrainingOutcome) -> Self {
        let mut artifact = Self {
            event_profiles: outcome.event_profiles,
            row_index: HashMap::new(),
            user_profiles: self.user_profiles.clone(),
            content_index: Some(outcome.content_index),
            last_trained: Some(outcome.trained_at),
        };
        artifact.reindex();
        artifact
    }

    /// Copy of this artifact with one user profile inserted or replaced
    pub fn with_user_profile(&self, user_id: &str, profile: UserProfile) -> Self {
        let mut artifact = self.clone();
        artifact.user_profiles.insert(user_id.to_string(), profile);
        artifact
    }

    pub fn row_of(&self, event_id: &str) -> Option<usize> {
        self.row_index.get(event_id).copied()
    }

    pub fn event_profile(&self, event_id: &str) -> Option<&EventProfile> {
        self.row_of(event_id).map(|row| &self.event_profiles[row])
    }

    pub fn event_profiles(&self) -> &[EventProfile] {
        &self.event_profiles
    }

    /// Ids of every event with a row in the index
    pub fn profiled_events(&self) -> HashSet<EventId> {
        self.row_index.keys().cloned().collect()
    }

    pub fn user_profile(&self, user_id: &str) -> Option<&UserProfile> {
        self.user_profiles.get(user_id)
    }

    pub fn content_index(&self) -> Option<&ContentIndex> {
        self.content_index.as_ref()
    }

    /// Content score of every row for the given interests, or `None` untrained
    pub fn content_scores(&self, interests: &[String]) -> Option<Vec<f32>> {
        if !self.is_trained() {
            return None;
        }
        self.content_index.as_ref().map(|index| index.scores(interests))
    }

    pub fn last_trained(&self) -> Option<DateTime<Utc>> {
        self.last_trained
    }

    pub fn user_profile_count(&self) -> usize {
        self.user_profiles.len()
    }

    /// Status under `config`, as seen by a manager that knows whether
    /// anything was persisted
    pub fn status(&self, persisted: bool, config: &EngineConfig) -> ModelStatus {
        let state = if self.is_current(config) {
            ModelState::Trained
        } else if persisted || self.is_trained() {
            ModelState::Stale
        } else {
            ModelState::Uninitialized
        };

        ModelStatus {
            state,
            strategy: self.content_index.as_ref().map(ContentIndex::strategy),
            event_rows: self.event_profiles.len(),
            user_profiles: self.user_profiles.len(),
            last_trained: self.last_trained,
        }
    }
}
