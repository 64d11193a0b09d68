use crate::classify_session::core::{Effect, State};
use crate::classify_session::frame_pump::PumpPhase;
use crate::classify_session::upload_predictor;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_camera::resource::CameraResource;
use crate::error::{CameraError, PipelineError};
use crate::frame::Frame;
use crate::view_sink::interface::PredictionSource;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Mode {
    #[default]
    Idle,
    Uploading,
    CameraRunning,
}

/// A camera acquisition that has been started but not answered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    Pending,
    /// Stopped or superseded while pending; the device is released on arrival.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeState {
    pub mode: Mode,
    pub acquisition: Option<Acquisition>,
    /// Bumped every time the camera starts running.
    pub session: u64,
}

impl ModeState {
    pub fn is_camera_running(&self) -> bool {
        self.mode == Mode::CameraRunning
    }

    pub fn is_current_session(&self, session: u64) -> bool {
        self.is_camera_running() && self.session == session
    }
}

pub fn request_camera(config: &Config, state: State) -> (State, Vec<Effect>) {
    if state.mode.is_camera_running() || state.mode.acquisition == Some(Acquisition::Pending) {
        return (state, vec![]);
    }

    let mut state = match state.require_model() {
        Ok(state) => state,
        Err(rejected) => return rejected,
    };

    let already_in_flight = state.mode.acquisition == Some(Acquisition::Cancelled);
    state.mode.acquisition = Some(Acquisition::Pending);
    state.last_error = None;

    if already_in_flight {
        return (state, vec![]);
    }

    (
        state,
        vec![Effect::AcquireCamera {
            width: config.capture_width,
            height: config.capture_height,
            mirror: config.camera_mirror,
        }],
    )
}

pub fn on_camera_acquired(
    mut state: State,
    result: Result<(), CameraError>,
) -> (State, Vec<Effect>) {
    let acquisition = state.mode.acquisition.take();

    match (acquisition, result) {
        (Some(Acquisition::Pending), Ok(())) => {
            state.mode.mode = Mode::CameraRunning;
            state.mode.session += 1;
            if state.pump == PumpPhase::Stopped {
                state.pump = PumpPhase::AwaitingTick;
            }
            (state.clear_result(PredictionSource::Upload), vec![])
        }
        (_, Ok(())) => (state, vec![Effect::ReleaseCamera]),
        (Some(Acquisition::Pending), Err(error)) => {
            state.mode.mode = Mode::Idle;
            (state.fail(PipelineError::CameraUnavailable(error)), vec![])
        }
        (_, Err(_)) => (state, vec![]),
    }
}

pub fn stop_camera(mut state: State) -> (State, Vec<Effect>) {
    if state.mode.is_camera_running() {
        return halt_camera(state);
    }

    if state.mode.acquisition == Some(Acquisition::Pending) {
        state.mode.acquisition = Some(Acquisition::Cancelled);
    }

    (state, vec![])
}

/// Leaves `CameraRunning` for `Idle` and releases the device. Any capture or
/// predict step still in flight is dropped when it arrives.
pub fn halt_camera(mut state: State) -> (State, Vec<Effect>) {
    state.mode.mode = Mode::Idle;
    if state.pump == PumpPhase::AwaitingTick {
        state.pump = PumpPhase::Stopped;
    }
    (
        state.clear_result(PredictionSource::Camera),
        vec![Effect::ReleaseCamera],
    )
}

pub fn request_upload(state: State, frame: Frame) -> (State, Vec<Effect>) {
    let state = match state.require_model() {
        Ok(state) => state,
        Err(rejected) => return rejected,
    };

    let (mut state, mut effects) = stop_camera(state);
    state.mode.mode = Mode::Uploading;

    let (state, predict) = upload_predictor::submit(state, frame);
    effects.extend(predict);
    (state, effects)
}

/// Owns the camera device between sessions and the live `CameraResource`
/// while one is running.
pub struct CameraSlot {
    device: Option<Box<dyn DeviceCamera>>,
    resource: Option<CameraResource>,
}

impl CameraSlot {
    pub fn new(device: Box<dyn DeviceCamera>) -> Self {
        Self {
            device: Some(device),
            resource: None,
        }
    }

    pub fn is_held(&self) -> bool {
        self.resource.is_some()
    }

    pub fn acquire(&mut self, width: u32, height: u32, mirror: bool) -> Result<(), CameraError> {
        if self.resource.is_some() {
            return Ok(());
        }

        let device = self
            .device
            .take()
            .ok_or_else(|| CameraError::Busy("camera device was not returned".to_string()))?;

        match CameraResource::acquire(device, width, height, mirror) {
            Ok(resource) => {
                self.resource = Some(resource);
                Ok(())
            }
            Err((device, error)) => {
                self.device = Some(device);
                Err(error)
            }
        }
    }

    pub fn release(&mut self) {
        if let Some(resource) = self.resource.take() {
            self.device = resource.release();
        }
    }

    pub fn capture_frame(&mut self) -> Result<Frame, CameraError> {
        self.resource
            .as_mut()
            .ok_or_else(|| CameraError::Capture("camera is not running".to_string()))?
            .capture_frame()
    }
}
