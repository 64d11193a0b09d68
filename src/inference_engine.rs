use crate::error::PipelineError;
use crate::frame::Frame;
use crate::model_loader::ModelLoader;
use crate::prediction::interface::{Prediction, PredictionSet};

pub struct InferenceEngine {
    loader: ModelLoader,
}

impl InferenceEngine {
    pub fn new(loader: ModelLoader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &ModelLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut ModelLoader {
        &mut self.loader
    }

    pub fn is_ready(&self) -> bool {
        self.loader.model().is_some()
    }

    /// One prediction per model label, in label order. The frame is only read.
    pub fn predict(&self, frame: &Frame) -> Result<PredictionSet, PipelineError> {
        let model = self.loader.model().ok_or(PipelineError::ModelNotReady)?;

        if frame.is_empty() {
            return Err(PipelineError::InferenceError(format!(
                "frame has zero size ({}x{})",
                frame.width(),
                frame.height()
            )));
        }

        let scores = model
            .classify(frame.image())
            .map_err(|e| PipelineError::InferenceError(e.to_string()))?;

        if scores.len() != model.labels().len() {
            return Err(PipelineError::InferenceError(format!(
                "expected {} scores, got {}",
                model.labels().len(),
                scores.len()
            )));
        }

        if let Some(bad) = scores.iter().find(|s| !s.is_finite() || **s < 0.0) {
            return Err(PipelineError::InferenceError(format!(
                "invalid score {}",
                bad
            )));
        }

        Ok(model
            .labels()
            .iter()
            .zip(scores)
            .map(|(label, probability)| Prediction::new(label.clone(), probability))
            .collect())
    }
}
