use crate::error::ModelLoadError;
use crate::image_classifier::interface::{ClassifierBackend, ImageClassifier};
use crate::model_source::metadata::ModelMetadata;
use image::DynamicImage;
use rand::distr::{Distribution, Uniform};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub type ScriptedScores = Result<Vec<f32>, String>;

/// Plays back scripted scores; once the script runs out it keeps returning
/// the last entry, or a random distribution when nothing was scripted.
pub struct ImageClassifierFake {
    label_count: usize,
    script: Arc<Mutex<VecDeque<ScriptedScores>>>,
    last: Mutex<Option<ScriptedScores>>,
    calls: Arc<AtomicUsize>,
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(
        &self,
        _image: &DynamicImage,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self.script.lock().map_err(|e| e.to_string())?.pop_front();
        let mut last = self.last.lock().map_err(|e| e.to_string())?;
        if next.is_some() {
            *last = next;
        }

        match last.clone() {
            Some(Ok(scores)) => Ok(scores),
            Some(Err(reason)) => Err(reason.into()),
            None => Ok(random_distribution(self.label_count)?),
        }
    }
}

fn random_distribution(
    label_count: usize,
) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
    let mut rng = rand::rng();
    let weight_dist = Uniform::new(0.0f32, 1.0)?;
    let weights: Vec<f32> = (0..label_count).map(|_| weight_dist.sample(&mut rng)).collect();
    let total: f32 = weights.iter().sum();
    if total <= f32::EPSILON {
        return Ok(vec![1.0 / label_count.max(1) as f32; label_count]);
    }
    Ok(weights.into_iter().map(|w| w / total).collect())
}

/// Builds `ImageClassifierFake`s that share one script and one call counter,
/// so tests can keep feeding scores after the model is loaded.
#[derive(Clone, Default)]
pub struct ClassifierBackendFake {
    pub script: Arc<Mutex<VecDeque<ScriptedScores>>>,
    pub calls: Arc<AtomicUsize>,
    pub builds: Arc<AtomicUsize>,
    reject: Option<String>,
}

impl ClassifierBackendFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            reject: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn push_scores(&self, scores: Vec<f32>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(scores));
        }
    }

    pub fn push_failure(&self, reason: &str) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(reason.to_string()));
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClassifierBackend for ClassifierBackendFake {
    fn build(
        &self,
        _topology: &[u8],
        metadata: &ModelMetadata,
    ) -> Result<Box<dyn ImageClassifier>, ModelLoadError> {
        self.builds.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.reject {
            return Err(ModelLoadError::Backend(reason.clone()));
        }

        Ok(Box::new(ImageClassifierFake {
            label_count: metadata.labels.len(),
            script: self.script.clone(),
            last: Mutex::new(None),
            calls: self.calls.clone(),
        }))
    }
}
