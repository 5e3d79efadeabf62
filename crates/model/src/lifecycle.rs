//! Owner of the shared model artifact.
//!
//! `ModelManager` publishes artifacts as `Arc<ModelArtifact>` behind a
//! `RwLock`. Readers clone the `Arc` and never block on training. Writers
//! (training passes and user profile creation) are serialized by a mutex,
//! build a complete new artifact, persist it, then swap it in.

use crate::artifact::{ModelArtifact, ModelState, ModelStatus};
use crate::error::Result;
use crate::persistence;
use crate::profile::UserProfile;
use crate::trainer;
use data_loader::{DocumentStore, UserRecord};
use parking_lot::{Mutex, RwLock};
use pipeline::EngineConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument, warn};

pub struct ModelManager {
    store: Arc<dyn DocumentStore>,
    config: EngineConfig,
    path: PathBuf,
    current: RwLock<Arc<ModelArtifact>>,
    writer: Mutex<()>,
    persisted: AtomicBool,
}

impl ModelManager {
    /// Load the persisted artifact at `path`, or start from an empty skeleton.
    ///
    /// An unreadable artifact is logged and replaced by the skeleton; the
    /// next inference call retrains.
    pub fn load(
        store: Arc<dyn DocumentStore>,
        config: EngineConfig,
        path: impl Into<PathBuf>,
    ) -> Self {
        let path = path.into();
        let (artifact, persisted) = match persistence::load(&path) {
            Ok(Some(artifact)) => {
                info!(
                    "Loaded model from {} ({} events)",
                    path.display(),
                    artifact.event_profiles().len()
                );
                (artifact, true)
            }
            Ok(None) => {
                info!("No model at {}, starting empty", path.display());
                (ModelArtifact::empty(), false)
            }
            Err(err) => {
                warn!("Failed to load model from {}: {}", path.display(), err);
                (ModelArtifact::empty(), false)
            }
        };

        Self {
            store,
            config,
            path,
            current: RwLock::new(Arc::new(artifact)),
            writer: Mutex::new(()),
            persisted: AtomicBool::new(persisted),
        }
    }

    /// The last fully published artifact
    pub fn snapshot(&self) -> Arc<ModelArtifact> {
        self.current.read().clone()
    }

    pub fn state(&self) -> ModelState {
        self.status().state
    }

    pub fn status(&self) -> ModelStatus {
        self.snapshot()
            .status(self.persisted.load(Ordering::Acquire), &self.config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return an artifact trained for the configured strategy and languages,
    /// training first if the current one is not
    pub fn ensure_trained(&self) -> Result<Arc<ModelArtifact>> {
        let snapshot = self.snapshot();
        if snapshot.is_current(&self.config) {
            return Ok(snapshot);
        }

        let _guard = self.writer.lock();
        // Another writer may have trained while we waited
        let snapshot = self.snapshot();
        if snapshot.is_current(&self.config) {
            return Ok(snapshot);
        }

        if snapshot.is_trained() {
            info!(
                "Model was fitted under another configuration, retraining for {}",
                self.config.strategy
            );
        } else {
            info!("Model not trained or empty, training");
        }
        self.train_locked()
    }

    /// Rebuild the event profiles and index unconditionally
    #[instrument(skip(self))]
    pub fn retrain(&self) -> Result<ModelStatus> {
        let _guard = self.writer.lock();
        info!("Starting model retraining");
        self.train_locked()?;
        Ok(self.status())
    }

    /// Return the cached profile for a user, building and persisting it if absent.
    ///
    /// A failed write is logged; the profile is still published in memory.
    pub fn ensure_user_profile(&self, user: &UserRecord) -> UserProfile {
        if let Some(profile) = self.snapshot().user_profile(&user.id) {
            return profile.clone();
        }

        let _guard = self.writer.lock();
        let snapshot = self.snapshot();
        if let Some(profile) = snapshot.user_profile(&user.id) {
            return profile.clone();
        }

        let profile = UserProfile::build(user);
        let artifact = snapshot.with_user_profile(&user.id, profile.clone());
        if let Err(err) = self.persist(&artifact) {
            warn!("Failed to persist profile for user {}: {}", user.id, err);
        }
        self.publish(artifact);
        profile
    }

    // Caller holds the writer lock
    fn train_locked(&self) -> Result<Arc<ModelArtifact>> {
        let events = self.store.active_events(None)?;
        let outcome = trainer::train(&events, &self.config)?;

        let artifact = self.snapshot().with_training(outcome);
        self.persist(&artifact)?;
        Ok(self.publish(artifact))
    }

    fn persist(&self, artifact: &ModelArtifact) -> Result<()> {
        persistence::save(&self.path, artifact)?;
        self.persisted.store(true, Ordering::Release);
        Ok(())
    }

    fn publish(&self, artifact: ModelArtifact) -> Arc<ModelArtifact> {
        let artifact = Arc::new(artifact);
        *self.current.write() = artifact.clone();
        artifact
    }
}
