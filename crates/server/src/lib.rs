//! Server crate for the event recommendation engine.
//!
//! This crate contains the two recommendation entry points and the HTTP
//! surface over them:
//! - `RecommendationOrchestrator`: creator-rating recommendations over the
//!   document store and the trained model
//! - `NeighborVoteRecommender`: neighbor-vote ranking of a request payload

pub mod api_error;
pub mod config;
pub mod error;
pub mod neighbor;
pub mod orchestrator;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ErrorKind, RecommendError};
pub use neighbor::{NeighborVoteRecommender, NeighborVoteRequest};
pub use orchestrator::{
    EventRecommendation, RecommendationOrchestrator, RetrainOutcome, UserRecommendations,
};
pub use state::AppState;
