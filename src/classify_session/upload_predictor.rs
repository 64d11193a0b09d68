use crate::classify_session::core::{Effect, Origin, State};
use crate::classify_session::mode_controller::Mode;
use crate::error::PipelineError;
use crate::frame::Frame;
use crate::prediction::interface::PredictionSet;
use crate::view_sink::interface::PredictionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadState {
    /// Id of the most recently submitted image.
    pub generation: u64,
    pub in_flight: bool,
}

/// Predicts once for a newly shown image, superseding any earlier upload.
pub fn submit(mut state: State, frame: Frame) -> (State, Vec<Effect>) {
    state.upload.generation += 1;
    state.upload.in_flight = true;
    state.latest = None;
    state.last_error = None;

    let generation = state.upload.generation;
    (
        state,
        vec![Effect::Predict {
            origin: Origin::Upload { generation },
            frame,
        }],
    )
}

pub fn on_prediction(
    mut state: State,
    generation: u64,
    result: Result<PredictionSet, PipelineError>,
) -> (State, Vec<Effect>) {
    if generation != state.upload.generation {
        return (state, vec![]);
    }

    state.upload.in_flight = false;
    if state.mode.mode != Mode::Uploading {
        return (state, vec![]);
    }

    match result {
        Ok(set) => (state.publish(PredictionSource::Upload, set), vec![]),
        Err(error) => (state.fail(error), vec![]),
    }
}
