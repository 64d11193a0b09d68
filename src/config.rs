use crate::augmentation::AugmentationConfig;
use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Animation-tick interval driving the camera loop.
    pub tick_rate_ms: u64,
    pub capture_width: u32,
    pub capture_height: u32,
    /// Mirror camera frames horizontally, like a front-facing webcam.
    pub camera_mirror: bool,
    pub augmentation: AugmentationConfig,
    /// Resolve and publish the category panel for confident results.
    pub render_panel: bool,
    /// Start loading the model at startup instead of on first use.
    pub preload_model: bool,
    /// Base URL or directory holding `model.onnx` and `metadata.json`.
    pub model_location: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 33,
            capture_width: 480,
            capture_height: 360,
            camera_mirror: true,
            augmentation: AugmentationConfig::default(),
            render_panel: true,
            preload_model: true,
            model_location: "./model".to_string(),
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn model_is_remote(&self) -> bool {
        self.model_location.starts_with("http://") || self.model_location.starts_with("https://")
    }
}
