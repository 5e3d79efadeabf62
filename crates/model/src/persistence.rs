//! Reading and atomically replacing the artifact file.
//!
//! Writes go to a temporary file in the target directory which is then
//! renamed over the old artifact, so a reader of the file sees either the
//! previous artifact or the new one.

use crate::artifact::ModelArtifact;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Load an artifact, or `None` when no file exists at `path`
pub fn load(path: &Path) -> Result<Option<ModelArtifact>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };

    let mut artifact: ModelArtifact = serde_json::from_reader(BufReader::new(file))?;
    artifact.reindex();
    debug!("Loaded model artifact from {}", path.display());
    Ok(Some(artifact))
}

/// Write an artifact to `path`, replacing any previous one atomically
pub fn save(path: &Path, artifact: &ModelArtifact) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer(&mut writer, artifact)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;

    debug!("Saved model artifact to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::UserProfile;
    use crate::trainer::train;
    use data_loader::{EventRecord, UserRecord};
    use pipeline::EngineConfig;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempdir().unwrap();
        assert!(load(&dir.path().join("model.json")).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");

        let events = vec![
            EventRecord::new("e1").with_creator("c1").with_tags(["music", "jazz"]),
            EventRecord::new("e2").with_creator("c2").with_tags(["food"]),
        ];
        let outcome = train(&events, &EngineConfig::default()).unwrap();
        let artifact = ModelArtifact::empty()
            .with_training(outcome)
            .with_user_profile("u1", UserProfile::build(&UserRecord::new("u1")));

        save(&path, &artifact).unwrap();
        let restored = load(&path).unwrap().unwrap();

        assert!(restored.is_trained());
        assert_eq!(restored.row_of("e2"), Some(1));
        assert_eq!(restored.event_profiles(), artifact.event_profiles());
        assert_eq!(restored.user_profile("u1"), artifact.user_profile("u1"));
        assert_eq!(restored.last_trained(), artifact.last_trained());

        let interests = vec!["jazz".to_string()];
        assert_eq!(
            restored.content_scores(&interests),
            artifact.content_scores(&interests)
        );
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");

        save(&path, &ModelArtifact::empty()).unwrap();
        let events = vec![EventRecord::new("e1").with_creator("c1")];
        let trained =
            ModelArtifact::empty().with_training(train(&events, &EngineConfig::default()).unwrap());
        save(&path, &trained).unwrap();

        assert!(load(&path).unwrap().unwrap().is_trained());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load(&path).is_err());
    }
}
