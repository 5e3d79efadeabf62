//! Recommendation endpoints.
//!
//! - `POST /recommend` ranks a caller-supplied payload by neighbor votes
//! - `GET /recommendations/{user_id}` ranks the store's events for a stored user
//!
//! Scoring is CPU-bound and may train the model, so both run on the
//! blocking pool.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tokio::task;

use crate::api_error::{ApiError, ApiResult};
use crate::neighbor::NeighborVoteRequest;
use crate::orchestrator::UserRecommendations;
use crate::state::AppState;

pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

/// POST /recommend
///
/// A body that is not a valid request is answered with a `BAD_REQUEST`
/// error body.
async fn neighbor_vote(
    State(state): State<AppState>,
    payload: Result<Json<NeighborVoteRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<Map<String, Value>>>> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let recommender = *state.neighbor();
    let ranked = task::spawn_blocking(move || recommender.recommend(request)).await?;
    Ok(Json(ranked))
}

/// GET /recommendations/{user_id}?limit=
async fn user_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<UserRecommendations>> {
    let orchestrator = state.orchestrator().clone();
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let response =
        task::spawn_blocking(move || orchestrator.recommend_user(&user_id, limit)).await??;
    Ok(Json(response))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/recommend", post(neighbor_vote))
        .route("/recommendations/{user_id}", get(user_recommendations))
}
