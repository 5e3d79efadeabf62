//! Neighbor-vote recommendations over a caller-supplied payload.
//!
//! The caller sends the current user, every other user and the events to
//! rank. Each event is returned as it was sent, with a `score` field added,
//! sorted by score. Zero scores are kept.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use data_loader::{EventRecord, TagField, UserRecord};
use pipeline::similarity::overlap::overlap_coefficient;
use pipeline::text::normalize_all;
use pipeline::{HybridScorer, ScoringVariant};
use signals::{Candidate, CollaborativeSignal, NeighborVotes, UserContext};

use crate::error::{ErrorKind, RecommendError, Result};

/// Request body of the neighbor-vote endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborVoteRequest {
    pub current_user: UserRecord,
    #[serde(default)]
    pub all_users: Vec<UserRecord>,
    #[serde(default)]
    pub events: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy)]
pub struct NeighborVoteRecommender {
    scorer: HybridScorer,
}

impl Default for NeighborVoteRecommender {
    fn default() -> Self {
        Self {
            scorer: HybridScorer::new(ScoringVariant::NeighborVote),
        }
    }
}

impl NeighborVoteRecommender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score every event in the request and return them sorted descending
    pub fn recommend(&self, request: NeighborVoteRequest) -> Vec<Map<String, Value>> {
        let NeighborVoteRequest {
            current_user,
            all_users,
            events,
        } = request;

        let context = UserContext::from_record(&current_user);
        let votes = NeighborVotes::compute(&context, &all_users);
        debug!(
            "User {} has {} neighbors",
            current_user.id,
            votes.neighbors().len()
        );

        let interests = normalized_pieces(current_user.interested_tags.as_ref());
        let interests: HashSet<&str> = interests.iter().map(String::as_str).collect();

        let mut scored: Vec<(Map<String, Value>, f32)> = events
            .into_iter()
            .map(|event| {
                let score = self
                    .score_event(&event, &interests, &votes)
                    .unwrap_or_else(|err| {
                        warn!("Scoring event as 0 ({}): {}", err.kind(), err);
                        0.0
                    });
                (event, score)
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .map(|(mut event, score)| {
                event.insert("score".to_string(), Value::from(score));
                event
            })
            .collect()
    }

    /// Fails with `ErrorKind::PerItem` when the event cannot be read
    fn score_event(
        &self,
        event: &Map<String, Value>,
        interests: &HashSet<&str>,
        votes: &NeighborVotes,
    ) -> Result<f32> {
        let record: EventRecord =
            serde_json::from_value(Value::Object(event.clone())).map_err(|err| {
                RecommendError::new(ErrorKind::PerItem, format!("unreadable event: {err}"))
            })?;

        let features: HashSet<String> = normalized_pieces(record.tag_field())
            .into_iter()
            .collect();

        let creator_id = record.creator_id().map(String::from);
        let mut candidate = Candidate::new(record.id, creator_id);
        candidate.content_score = overlap_coefficient(interests, &features);
        candidate.collaborative_score = votes.score(&candidate);
        self.scorer.score(&mut candidate);
        Ok(candidate.score)
    }
}

fn normalized_pieces(field: Option<&TagField>) -> Vec<String> {
    normalize_all(field.map(TagField::split_pieces).unwrap_or_default())
}
