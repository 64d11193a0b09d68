use crate::classify_session::core::{Effect, Origin, State};
use crate::classify_session::mode_controller::halt_camera;
use crate::error::{CameraError, PipelineError};
use crate::frame::Frame;
use crate::prediction::interface::PredictionSet;
use crate::view_sink::interface::PredictionSource;

/// Where the camera loop is within one cycle. `Capturing` and `Predicting`
/// mean a step is in flight; ticks arriving then are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PumpPhase {
    #[default]
    Stopped,
    AwaitingTick,
    Capturing,
    Predicting,
}

fn next_phase(state: &State) -> PumpPhase {
    if state.mode.is_camera_running() {
        PumpPhase::AwaitingTick
    } else {
        PumpPhase::Stopped
    }
}

pub fn on_tick(mut state: State) -> (State, Vec<Effect>) {
    match state.pump {
        PumpPhase::AwaitingTick if state.mode.is_camera_running() => {
            state.pump = PumpPhase::Capturing;
            let session = state.mode.session;
            (state, vec![Effect::CaptureFrame { session }])
        }
        PumpPhase::AwaitingTick => {
            state.pump = PumpPhase::Stopped;
            (state, vec![])
        }
        PumpPhase::Stopped | PumpPhase::Capturing | PumpPhase::Predicting => (state, vec![]),
    }
}

pub fn on_frame_captured(
    mut state: State,
    session: u64,
    result: Result<Frame, CameraError>,
) -> (State, Vec<Effect>) {
    if !state.mode.is_current_session(session) {
        state.pump = next_phase(&state);
        return (state, vec![]);
    }

    match result {
        Ok(frame) => {
            state.pump = PumpPhase::Predicting;
            (
                state,
                vec![Effect::Predict {
                    origin: Origin::Camera { session },
                    frame,
                }],
            )
        }
        Err(error) => {
            let (mut state, effects) = halt_camera(state);
            state.pump = PumpPhase::Stopped;
            (state.fail(PipelineError::CameraUnavailable(error)), effects)
        }
    }
}

pub fn on_prediction(
    mut state: State,
    session: u64,
    result: Result<PredictionSet, PipelineError>,
) -> (State, Vec<Effect>) {
    if !state.mode.is_current_session(session) {
        state.pump = next_phase(&state);
        return (state, vec![]);
    }

    match result {
        Ok(set) => {
            state.pump = PumpPhase::AwaitingTick;
            (state.publish(PredictionSource::Camera, set), vec![])
        }
        Err(error) => {
            let (mut state, effects) = halt_camera(state);
            state.pump = PumpPhase::Stopped;
            (state.fail(error), effects)
        }
    }
}
