use crate::category::resolver::CategoryInfo;
use crate::classify_session::mode_controller::Mode;
use crate::prediction::interface::Prediction;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictionSource {
    Camera,
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModelStatus {
    Unloaded,
    Loading,
    Ready,
    Failed,
}

/// Everything the surrounding UI needs for one update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub mode: Mode,
    pub model: ModelStatus,
    pub source: Option<PredictionSource>,
    pub ranked: Vec<Prediction>,
    pub top_confident: Option<Prediction>,
    pub category: Option<CategoryInfo>,
    pub error: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl PredictionView {
    /// A result exists but its top entry is below the confidence threshold.
    pub fn is_inconclusive(&self) -> bool {
        !self.ranked.is_empty() && self.top_confident.is_none()
    }
}

pub trait ViewSink: Send {
    fn publish(
        &mut self,
        view: &PredictionView,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
