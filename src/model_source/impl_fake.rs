use crate::error::ModelLoadError;
use crate::model_source::interface::{ModelSource, METADATA_ARTIFACT, TOPOLOGY_ARTIFACT};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory artifacts. `fetches` counts every fetch attempt.
pub struct ModelSourceFake {
    topology: Option<Vec<u8>>,
    metadata: Option<Vec<u8>>,
    pub fetches: Arc<AtomicUsize>,
}

impl ModelSourceFake {
    pub fn new(topology: Option<Vec<u8>>, metadata: Option<Vec<u8>>) -> Self {
        Self {
            topology,
            metadata,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_labels(labels: &[&str]) -> Self {
        let metadata = serde_json::json!({ "labels": labels, "imageSize": 224 });
        Self::new(Some(b"fake".to_vec()), Some(metadata.to_string().into_bytes()))
    }

    fn fetch(&self, artifact: &Option<Vec<u8>>, name: &str) -> Result<Vec<u8>, ModelLoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        artifact
            .clone()
            .ok_or_else(|| ModelLoadError::MissingArtifact(name.to_string()))
    }
}

impl ModelSource for ModelSourceFake {
    fn describe(&self) -> String {
        "fake".to_string()
    }

    fn fetch_topology(&self) -> Result<Vec<u8>, ModelLoadError> {
        self.fetch(&self.topology, TOPOLOGY_ARTIFACT)
    }

    fn fetch_metadata(&self) -> Result<Vec<u8>, ModelLoadError> {
        self.fetch(&self.metadata, METADATA_ARTIFACT)
    }
}
