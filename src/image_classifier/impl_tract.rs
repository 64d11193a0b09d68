use crate::error::ModelLoadError;
use crate::image_classifier::interface::{ClassifierBackend, ImageClassifier};
use crate::image_classifier::tract::image::{normalize_scores, to_input_tensor};
use crate::model_source::metadata::ModelMetadata;
use image::DynamicImage;
use std::io::Cursor;
use tract_onnx::prelude::*;

pub struct ImageClassifierTract {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    input_size: u32,
    label_count: usize,
}

impl ImageClassifier for ImageClassifierTract {
    fn classify(
        &self,
        image: &DynamicImage,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let input = to_input_tensor(image, self.input_size)?;
        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs[0].to_array_view::<f32>()?;

        // [1, classes] or [classes]
        let scores: Vec<f32> = output.iter().copied().collect();
        if scores.len() != self.label_count {
            return Err(format!(
                "model produced {} scores for {} labels",
                scores.len(),
                self.label_count
            )
            .into());
        }

        Ok(normalize_scores(scores))
    }
}

/// ONNX backend: the topology artifact is an ONNX graph taking a
/// `[1, 3, imageSize, imageSize]` float input.
pub struct ClassifierBackendTract;

impl ClassifierBackend for ClassifierBackendTract {
    fn build(
        &self,
        topology: &[u8],
        metadata: &ModelMetadata,
    ) -> Result<Box<dyn ImageClassifier>, ModelLoadError> {
        let size = metadata.image_size as usize;

        let model = tract_onnx::onnx()
            .model_for_read(&mut Cursor::new(topology))
            .and_then(|model| {
                model.with_input_fact(
                    0,
                    InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 3, size, size)),
                )
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?;

        tracing::info!(
            target: "image_classifier::tract",
            labels = metadata.labels.len(),
            input_size = metadata.image_size,
            "ONNX model ready"
        );

        Ok(Box::new(ImageClassifierTract {
            model,
            input_size: metadata.image_size,
            label_count: metadata.labels.len(),
        }))
    }
}
