//! Route definitions for the HTTP API.

pub mod health;
pub mod model;
pub mod recommend;

use axum::Router;

use crate::state::AppState;

/// Build the complete router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(recommend::routes())
        .merge(model::routes())
        .with_state(state)
}
