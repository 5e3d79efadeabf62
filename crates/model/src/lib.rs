//! # Model Crate
//!
//! The trained model and its lifecycle.
//!
//! ## Main Components
//!
//! - **artifact**: `ModelArtifact` (event profiles, fitted index, user profiles, timestamp)
//! - **profile**: Cached `UserProfile`s
//! - **trainer**: One training pass over the active events
//! - **persistence**: Load and atomically replace the artifact file
//! - **lifecycle**: `ModelManager`, the single-writer owner of the shared artifact
//!
//! ## Example Usage
//!
//! ```ignore
//! use model::ModelManager;
//! use pipeline::EngineConfig;
//!
//! let manager = ModelManager::load(store, EngineConfig::default(), "recommendation_model.json");
//! let artifact = manager.ensure_trained()?;
//! let profile = manager.ensure_user_profile(&user);
//! let scores = artifact.content_scores(&profile.interests);
//! ```

pub mod artifact;
pub mod error;
pub mod lifecycle;
pub mod persistence;
pub mod profile;
pub mod trainer;

pub use artifact::{ModelArtifact, ModelState, ModelStatus};
pub use error::{ModelError, Result};
pub use lifecycle::ModelManager;
pub use profile::UserProfile;
pub use trainer::TrainingOutcome;
