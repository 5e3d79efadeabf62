//! Application state shared across handlers.

use std::sync::Arc;

use model::ModelManager;

use crate::neighbor::NeighborVoteRecommender;
use crate::orchestrator::RecommendationOrchestrator;

/// Cloneable handle extracted in handlers with `State<AppState>`
#[derive(Clone)]
pub struct AppState {
    orchestrator: RecommendationOrchestrator,
    neighbor: NeighborVoteRecommender,
}

impl AppState {
    pub fn new(model: Arc<ModelManager>) -> Self {
        Self {
            orchestrator: RecommendationOrchestrator::new(model),
            neighbor: NeighborVoteRecommender::new(),
        }
    }

    pub fn orchestrator(&self) -> &RecommendationOrchestrator {
        &self.orchestrator
    }

    pub fn neighbor(&self) -> &NeighborVoteRecommender {
        &self.neighbor
    }

    pub fn model(&self) -> &Arc<ModelManager> {
        self.orchestrator.model()
    }
}
