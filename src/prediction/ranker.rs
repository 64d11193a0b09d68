use crate::prediction::interface::Prediction;

/// Below this probability the top result is treated as inconclusive.
pub const CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Sorts by probability descending. The sort is stable, so equal
/// probabilities keep their class-definition order.
pub fn rank(set: &[Prediction]) -> Vec<Prediction> {
    let mut ranked = set.to_vec();
    ranked.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    ranked
}

pub fn top_confident(ranked: &[Prediction]) -> Option<Prediction> {
    ranked
        .first()
        .filter(|top| top.probability >= CONFIDENCE_THRESHOLD)
        .cloned()
}
