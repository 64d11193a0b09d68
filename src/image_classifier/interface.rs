use crate::error::ModelLoadError;
use crate::model_source::metadata::ModelMetadata;
use image::DynamicImage;

pub trait ImageClassifier: Send + Sync {
    /// Returns one score per label, in label order.
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Turns fetched model artifacts into a runnable classifier.
pub trait ClassifierBackend: Send {
    fn build(
        &self,
        topology: &[u8],
        metadata: &ModelMetadata,
    ) -> Result<Box<dyn ImageClassifier>, ModelLoadError>;
}
