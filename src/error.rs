use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelLoadError {
    #[error("Failed to fetch {artifact}: {reason}")]
    Fetch { artifact: String, reason: String },
    #[error("Model artifact missing: {0}")]
    MissingArtifact(String),
    #[error("Malformed model metadata: {0}")]
    MalformedMetadata(String),
    #[error("Classifier backend rejected the model: {0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    #[error("Camera permission denied")]
    PermissionDenied,
    #[error("No camera device found")]
    NotFound,
    #[error("Camera device is busy: {0}")]
    Busy(String),
    #[error("Failed to capture frame: {0}")]
    Capture(String),
}

/// Errors surfaced by the classification pipeline into the published view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Model failed to load: {0}")]
    ModelLoadFailure(#[from] ModelLoadError),
    #[error("Model is not ready yet")]
    ModelNotReady,
    #[error("Camera unavailable: {0}")]
    CameraUnavailable(#[from] CameraError),
    #[error("Inference failed: {0}")]
    InferenceError(String),
}

#[derive(Error, Debug)]
pub enum FileSourceError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
