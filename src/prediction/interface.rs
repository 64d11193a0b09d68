use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub class_name: String,
    pub probability: f32,
}

impl Prediction {
    pub fn new(class_name: impl Into<String>, probability: f32) -> Self {
        Self {
            class_name: class_name.into(),
            probability,
        }
    }

    /// Probability as a percentage with one decimal, e.g. `82.0%`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.probability * 100.0)
    }
}

/// One prediction per known class, in the model's class-definition order.
pub type PredictionSet = Vec<Prediction>;
