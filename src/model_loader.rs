use crate::error::ModelLoadError;
use crate::image_classifier::interface::{ClassifierBackend, ImageClassifier};
use crate::model_source::interface::ModelSource;
use crate::model_source::metadata::ModelMetadata;
use image::DynamicImage;
use std::fmt;
use std::sync::Arc;

/// Loaded classifier plus its label list. Immutable once built.
pub struct Model {
    classifier: Box<dyn ImageClassifier>,
    metadata: ModelMetadata,
}

impl Model {
    pub fn labels(&self) -> &[String] {
        &self.metadata.labels
    }

    pub fn image_size(&self) -> u32 {
        self.metadata.image_size
    }

    pub fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        self.classifier.classify(image)
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("labels", &self.metadata.labels)
            .field("image_size", &self.metadata.image_size)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum LoadState {
    Unloaded,
    Loading,
    Ready(Arc<Model>),
    Failed(ModelLoadError),
}

/// Owns the model handle. `load()` fetches at most once per session:
/// a ready model is returned as is, and a failure sticks until `retry()`.
pub struct ModelLoader {
    source: Box<dyn ModelSource>,
    backend: Box<dyn ClassifierBackend>,
    state: LoadState,
}

impl ModelLoader {
    pub fn new(source: Box<dyn ModelSource>, backend: Box<dyn ClassifierBackend>) -> Self {
        Self {
            source,
            backend,
            state: LoadState::Unloaded,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn model(&self) -> Option<Arc<Model>> {
        match &self.state {
            LoadState::Ready(model) => Some(model.clone()),
            _ => None,
        }
    }

    pub fn load(&mut self) -> Result<Arc<Model>, ModelLoadError> {
        match &self.state {
            LoadState::Ready(model) => return Ok(model.clone()),
            LoadState::Failed(error) => return Err(error.clone()),
            LoadState::Unloaded | LoadState::Loading => {}
        }

        tracing::info!(target: "model_loader", source = %self.source.describe(), "Loading model");
        self.state = LoadState::Loading;

        match self.fetch_and_build() {
            Ok(model) => {
                tracing::info!(target: "model_loader", labels = ?model.labels(), "Model ready");
                let model = Arc::new(model);
                self.state = LoadState::Ready(model.clone());
                Ok(model)
            }
            Err(error) => {
                tracing::warn!(target: "model_loader", %error, "Model failed to load");
                self.state = LoadState::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Caller-initiated retry after a failure. No-op when already ready.
    pub fn retry(&mut self) -> Result<Arc<Model>, ModelLoadError> {
        if let LoadState::Failed(_) = self.state {
            self.state = LoadState::Unloaded;
        }
        self.load()
    }

    fn fetch_and_build(&self) -> Result<Model, ModelLoadError> {
        let topology = self.source.fetch_topology()?;
        let metadata = ModelMetadata::parse(&self.source.fetch_metadata()?)?;
        let classifier = self.backend.build(&topology, &metadata)?;

        Ok(Model {
            classifier,
            metadata,
        })
    }
}
