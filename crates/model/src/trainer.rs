//! A single training pass: event records in, profiles and fitted index out.

use crate::error::{ModelError, Result};
use chrono::{DateTime, Utc};
use data_loader::EventRecord;
use pipeline::{ContentIndex, ContentSimilarity, EngineConfig, EventProfile};
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Output of a training pass, ready to be published in an artifact
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub event_profiles: Vec<EventProfile>,
    pub content_index: ContentIndex,
    pub trained_at: DateTime<Utc>,
}

/// Build event profiles and fit the content index.
///
/// Events without a resolvable creator are skipped. At most
/// `config.max_training_events` events are fitted.
#[instrument(skip_all, fields(events = events.len(), strategy = %config.strategy))]
pub fn train(events: &[EventRecord], config: &EngineConfig) -> Result<TrainingOutcome> {
    let start = Instant::now();

    let events = if events.len() > config.max_training_events {
        warn!(
            "Training corpus of {} events exceeds cap, fitting first {}",
            events.len(),
            config.max_training_events
        );
        &events[..config.max_training_events]
    } else {
        events
    };

    let event_profiles: Vec<EventProfile> = events
        .par_iter()
        .filter_map(EventProfile::from_record)
        .collect();

    let skipped = events.len() - event_profiles.len();
    if skipped > 0 {
        debug!("Skipped {} events without a creator", skipped);
    }

    if event_profiles.is_empty() {
        return Err(ModelError::NoEligibleEvents);
    }

    let content_index = ContentIndex::fit(config.strategy, &event_profiles, &config.languages);

    info!(
        "Model trained with {} events ({} rows) in {:.2?}",
        event_profiles.len(),
        content_index.rows(),
        start.elapsed()
    );

    Ok(TrainingOutcome {
        event_profiles,
        content_index,
        trained_at: Utc::now(),
    })
}
