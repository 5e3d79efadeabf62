//! Server configuration from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use pipeline::config::DEFAULT_MAX_TRAINING_EVENTS;
use pipeline::{EngineConfig, Language, SimilarityStrategy, parse_languages};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding `users.json` and `events.json`
    pub data_dir: PathBuf,
    pub model_path: PathBuf,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    pub strategy: SimilarityStrategy,
    /// Stop-word languages for TF-IDF fitting
    pub languages: Vec<Language>,
    pub max_training_events: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `RECS_DATA_DIR`: Record dump directory (default: "data")
    /// - `RECS_MODEL_PATH`: Artifact file (default: "recommendation_model.json")
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `RECS_STRATEGY`: "tfidf" or "overlap" (default: "tfidf")
    /// - `RECS_LANGUAGES`: Comma-separated stop-word languages (default: "english")
    /// - `RECS_MAX_TRAINING_EVENTS`: Training corpus cap (default: 50000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", 3000)?;
        let data_dir = lookup("RECS_DATA_DIR").unwrap_or_else(|| "data".to_string());
        let model_path = lookup("RECS_MODEL_PATH")
            .unwrap_or_else(|| "recommendation_model.json".to_string());
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let strategy = parse_or(&lookup, "RECS_STRATEGY", SimilarityStrategy::default())?;
        let languages = match lookup("RECS_LANGUAGES") {
            Some(raw) => parse_languages(&raw).map_err(|reason| ConfigError::InvalidValue {
                name: "RECS_LANGUAGES".to_string(),
                reason,
            })?,
            None => EngineConfig::default().languages,
        };
        let max_training_events =
            parse_or(&lookup, "RECS_MAX_TRAINING_EVENTS", DEFAULT_MAX_TRAINING_EVENTS)?;

        Ok(Self {
            port,
            data_dir: data_dir.into(),
            model_path: model_path.into(),
            log_level,
            strategy,
            languages,
            max_training_events,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::default()
            .with_strategy(self.strategy)
            .with_languages(self.languages.clone())
            .with_max_training_events(self.max_training_events)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: err.to_string(),
        }),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
