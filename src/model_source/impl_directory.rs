use crate::error::ModelLoadError;
use crate::model_source::interface::{ModelSource, METADATA_ARTIFACT, TOPOLOGY_ARTIFACT};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads the model artifacts from a local directory.
pub struct ModelSourceDirectory {
    dir: PathBuf,
}

impl ModelSourceDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read(&self, artifact: &str) -> Result<Vec<u8>, ModelLoadError> {
        let path = self.dir.join(artifact);
        std::fs::read(&path).map_err(|e| to_load_error(&path, e))
    }
}

fn to_load_error(path: &Path, error: std::io::Error) -> ModelLoadError {
    match error.kind() {
        ErrorKind::NotFound => ModelLoadError::MissingArtifact(path.display().to_string()),
        _ => ModelLoadError::Fetch {
            artifact: path.display().to_string(),
            reason: error.to_string(),
        },
    }
}

impl ModelSource for ModelSourceDirectory {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn fetch_topology(&self) -> Result<Vec<u8>, ModelLoadError> {
        self.read(TOPOLOGY_ARTIFACT)
    }

    fn fetch_metadata(&self) -> Result<Vec<u8>, ModelLoadError> {
        self.read(METADATA_ARTIFACT)
    }
}
