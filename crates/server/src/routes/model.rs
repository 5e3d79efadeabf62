//! Model lifecycle endpoints.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tokio::task;

use model::ModelStatus;

use crate::api_error::ApiResult;
use crate::orchestrator::RetrainOutcome;
use crate::state::AppState;

/// POST /retrain
///
/// A failed training pass is reported in the body with a 503 status.
async fn retrain(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<RetrainOutcome>)> {
    let orchestrator = state.orchestrator().clone();
    let result = task::spawn_blocking(move || orchestrator.retrain()).await?;

    let outcome = RetrainOutcome::from_result(&result);
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    Ok((status, Json(outcome)))
}

/// GET /model
async fn model_status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.model().status())
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/retrain", post(retrain))
        .route("/model", get(model_status))
}
