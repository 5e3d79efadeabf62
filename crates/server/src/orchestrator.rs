//! # Recommendation Orchestrator
//!
//! End-to-end entry point for the creator-rating variant:
//! 1. Resolve the user
//! 2. Make sure a trained model exists
//! 3. Load or create the user's cached profile
//! 4. Fetch active events and exclude ineligible ones
//! 5. Attach content and creator-rating scores
//! 6. Blend, sort, drop non-positive scores and truncate
//!
//! A missing user is reported as an error. Any other failure while building
//! the list is logged and yields an empty list.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use data_loader::{DocumentStore, EventId, EventRecord, TagField, UserRecord};
use model::{ModelArtifact, ModelManager, ModelStatus};
use pipeline::filters::{AlreadyConsumedFilter, OwnEventsFilter, ProfiledEventFilter};
use pipeline::{FilterPipeline, HybridScorer, ScoringVariant};
use signals::{Candidate, CollaborativeSignal, CreatorRatings, UserContext};

use crate::error::{ErrorKind, RecommendError, Result};

/// One ranked event with its display fields and score breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecommendation {
    pub event_id: EventId,
    pub event_name: String,
    pub event_description: String,
    pub event_category: TagField,
    pub event_tags: TagField,
    /// Creator's average rating on a 0-5 scale
    pub creator_rating: f64,
    pub content_score: f32,
    pub collab_score: f32,
    pub hybrid_score: f32,
}

impl EventRecommendation {
    fn from_scored(event: &EventRecord, candidate: &Candidate, creator_rating: f64) -> Self {
        let empty = || TagField::Delimited(String::new());
        Self {
            event_id: candidate.event_id.clone(),
            event_name: event.name.clone().unwrap_or_else(|| "No name".to_string()),
            event_description: event.description.clone().unwrap_or_default(),
            event_category: event.category.clone().unwrap_or_else(empty),
            event_tags: event.tag_field().cloned().unwrap_or_else(empty),
            creator_rating,
            content_score: candidate.content_score,
            collab_score: candidate.collaborative_score,
            hybrid_score: candidate.score,
        }
    }
}

/// A user's recommendations as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecommendations {
    pub user_id: String,
    pub username: String,
    pub recommendations: Vec<EventRecommendation>,
    pub status: String,
}

/// Result of an explicit retrain, reported as data rather than an error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrainOutcome {
    pub status: String,
    pub message: String,
}

impl RetrainOutcome {
    pub fn from_result(result: &Result<ModelStatus>) -> Self {
        match result {
            Ok(_) => Self {
                status: "success".to_string(),
                message: "Model retrained successfully".to_string(),
            },
            Err(err) => Self {
                status: "error".to_string(),
                message: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Coordinates the model, the store and the scoring pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    store: Arc<dyn DocumentStore>,
    model: Arc<ModelManager>,
    scorer: HybridScorer,
}

impl RecommendationOrchestrator {
    pub fn new(model: Arc<ModelManager>) -> Self {
        Self {
            store: model.store().clone(),
            scorer: HybridScorer::with_weights(
                ScoringVariant::CreatorRating,
                model.config().weights,
            ),
            model,
        }
    }

    pub fn model(&self) -> &Arc<ModelManager> {
        &self.model
    }

    /// Look up a user, reporting a missing one as `ErrorKind::NotFound`
    pub fn find_user(&self, user_id: &str) -> Result<UserRecord> {
        Ok(self.store.find_user(user_id)?)
    }

    /// Main entry point: the top `limit` events for a user.
    ///
    /// Only a missing user is an error; a failed training pass or store
    /// query is logged and returns an empty list.
    #[instrument(skip(self))]
    pub fn get_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<EventRecommendation>> {
        let user = self.find_user(user_id)?;
        self.recommend_or_empty(&user, limit)
    }

    /// Resolve a user and wrap their recommendations with the user's name
    pub fn recommend_user(&self, user_id: &str, limit: usize) -> Result<UserRecommendations> {
        let user = self.find_user(user_id)?;
        info!("User found: {}", user.display_name());

        let recommendations = self.recommend_or_empty(&user, limit)?;
        Ok(UserRecommendations {
            user_id: user.id.clone(),
            username: user.display_name().to_string(),
            recommendations,
            status: "success".to_string(),
        })
    }

    /// Rebuild the model; failures are returned to the caller
    pub fn retrain(&self) -> Result<ModelStatus> {
        Ok(self.model.retrain()?)
    }

    fn recommend_or_empty(
        &self,
        user: &UserRecord,
        limit: usize,
    ) -> Result<Vec<EventRecommendation>> {
        match self.recommend_for(user, limit) {
            Ok(recommendations) => Ok(recommendations),
            Err(err) if err.is_not_found() => Err(err),
            Err(err) => {
                warn!("Recommendation failed for user {} ({}): {}", user.id, err.kind(), err);
                Ok(Vec::new())
            }
        }
    }

    /// Build the ranked list for a resolved user, propagating every failure
    pub fn recommend_for(
        &self,
        user: &UserRecord,
        limit: usize,
    ) -> Result<Vec<EventRecommendation>> {
        let start_time = Instant::now();

        let artifact = self.model.ensure_trained()?;
        let profile = self.model.ensure_user_profile(user);

        let mut context = UserContext::from_record(user);
        context
            .consumed_events
            .extend(profile.consumed_events.iter().cloned());

        let events = self.store.active_events(None)?;
        let ratings = CreatorRatings::from_events(&events);

        let content = artifact.content_scores(&profile.interests).ok_or_else(|| {
            RecommendError::new(ErrorKind::Training, "Model has no usable content index")
        })?;

        let candidates: Vec<Candidate> = events
            .iter()
            .map(|event| Candidate::new(event.id.clone(), event.creator_id().map(String::from)))
            .collect();

        let eligible = FilterPipeline::new()
            .add_filter(OwnEventsFilter)
            .add_filter(AlreadyConsumedFilter)
            .add_filter(ProfiledEventFilter::new(artifact.profiled_events()))
            .apply(candidates, &context)
            .map_err(|err| RecommendError::new(ErrorKind::System, err.to_string()))?;
        debug!("{} of {} events eligible", eligible.len(), events.len());

        let scored = self.score_candidates(eligible, &artifact, &content, &ratings);
        let ranked = self.scorer.rank(scored, Some(limit));

        let by_id: HashMap<&str, &EventRecord> =
            events.iter().map(|event| (event.id.as_str(), event)).collect();
        let recommendations: Vec<EventRecommendation> = ranked
            .iter()
            .filter_map(|candidate| {
                let event = by_id.get(candidate.event_id.as_str())?;
                let rating = ratings.rating_for(candidate.creator_id.as_deref());
                Some(EventRecommendation::from_scored(event, candidate, rating))
            })
            .collect();

        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user.id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Attach content and creator-rating scores; events that cannot be
    /// scored are logged and skipped
    fn score_candidates(
        &self,
        candidates: Vec<Candidate>,
        artifact: &ModelArtifact,
        content: &[f32],
        ratings: &CreatorRatings,
    ) -> Vec<Candidate> {
        candidates
            .into_par_iter()
            .filter_map(|candidate| {
                match self.score_candidate(candidate, artifact, content, ratings) {
                    Ok(candidate) => Some(candidate),
                    Err(err) => {
                        warn!("Skipping event ({}): {}", err.kind(), err);
                        None
                    }
                }
            })
            .collect()
    }

    fn score_candidate(
        &self,
        mut candidate: Candidate,
        artifact: &ModelArtifact,
        content: &[f32],
        ratings: &CreatorRatings,
    ) -> Result<Candidate> {
        let score = artifact
            .row_of(&candidate.event_id)
            .and_then(|row| content.get(row))
            .ok_or_else(|| {
                RecommendError::new(
                    ErrorKind::PerItem,
                    format!("event {} has no row in the content index", candidate.event_id),
                )
            })?;

        if let Some(profile) = artifact.event_profile(&candidate.event_id) {
            candidate.creator_id = Some(profile.creator_id.clone());
        }
        candidate.content_score = *score;
        candidate.collaborative_score = ratings.score(&candidate);
        Ok(candidate)
    }
}
