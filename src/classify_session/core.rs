use crate::classify_session::frame_pump::{self, PumpPhase};
use crate::classify_session::mode_controller::{self, ModeState};
use crate::classify_session::upload_predictor::{self, UploadState};
use crate::config::Config;
use crate::error::{CameraError, ModelLoadError, PipelineError};
use crate::frame::Frame;
use crate::prediction::interface::{Prediction, PredictionSet};
use crate::prediction::ranker::rank;
use crate::view_sink::interface::PredictionSource;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoaderPhase {
    #[default]
    Unloaded,
    Loading,
    Ready {
        labels: Vec<String>,
    },
    Failed(ModelLoadError),
}

/// Which request a prediction answers. Results whose origin is no longer
/// current are dropped on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Camera { session: u64 },
    Upload { generation: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub source: PredictionSource,
    pub ranked: Vec<Prediction>,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    pub loader: LoaderPhase,
    pub mode: ModeState,
    pub pump: PumpPhase,
    pub upload: UploadState,
    pub latest: Option<Published>,
    pub revision: u64,
    pub last_error: Option<PipelineError>,
}

impl State {
    pub fn publish(mut self, source: PredictionSource, set: PredictionSet) -> Self {
        self.revision += 1;
        self.latest = Some(Published {
            source,
            ranked: rank(&set),
            revision: self.revision,
        });
        self.last_error = None;
        self
    }

    /// Drops the shown result if it came from `source`.
    pub fn clear_result(mut self, source: PredictionSource) -> Self {
        if self.latest.as_ref().map(|p| p.source) == Some(source) {
            self.latest = None;
        }
        self
    }

    pub fn fail(mut self, error: PipelineError) -> Self {
        self.last_error = Some(error);
        self
    }

    /// `ModelNotReady` or `ModelLoadFailure` unless the model is ready. A
    /// model that was never requested starts loading.
    pub fn require_model(mut self) -> Result<Self, (Self, Vec<Effect>)> {
        if matches!(self.loader, LoaderPhase::Ready { .. }) {
            return Ok(self);
        }

        let (error, effects) = match &self.loader {
            LoaderPhase::Failed(error) => (PipelineError::ModelLoadFailure(error.clone()), vec![]),
            LoaderPhase::Unloaded => (PipelineError::ModelNotReady, vec![Effect::LoadModel]),
            _ => (PipelineError::ModelNotReady, vec![]),
        };

        if self.loader == LoaderPhase::Unloaded {
            self.loader = LoaderPhase::Loading;
        }

        Err((self.fail(error), effects))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    LoadModel,
    RetryModel,
    ModelLoadDone(Result<Vec<String>, ModelLoadError>),
    RequestCamera,
    CameraAcquireDone(Result<(), CameraError>),
    StopCamera,
    RequestUpload(Frame),
    Tick,
    FrameCaptureDone {
        session: u64,
        result: Result<Frame, CameraError>,
    },
    PredictDone {
        origin: Origin,
        result: Result<PredictionSet, PipelineError>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadModel,
    RetryModel,
    AcquireCamera { width: u32, height: u32, mirror: bool },
    ReleaseCamera,
    CaptureFrame { session: u64 },
    Predict { origin: Origin, frame: Frame },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::Predict { origin, frame } => format!("Predict({:?}, {:?})", origin, frame),
            other => format!("{:?}", other),
        }
    }
}

pub fn init(config: &Config) -> (State, Vec<Effect>) {
    if config.preload_model {
        (
            State {
                loader: LoaderPhase::Loading,
                ..State::default()
            },
            vec![Effect::LoadModel],
        )
    } else {
        (State::default(), vec![])
    }
}

pub fn transition(config: &Config, state: State, msg: Msg) -> (State, Vec<Effect>) {
    match msg {
        Msg::LoadModel => load_model(state),
        Msg::RetryModel => retry_model(state),
        Msg::ModelLoadDone(result) => model_load_done(state, result),
        Msg::RequestCamera => mode_controller::request_camera(config, state),
        Msg::CameraAcquireDone(result) => mode_controller::on_camera_acquired(state, result),
        Msg::StopCamera => mode_controller::stop_camera(state),
        Msg::RequestUpload(frame) => mode_controller::request_upload(state, frame),
        Msg::Tick => frame_pump::on_tick(state),
        Msg::FrameCaptureDone { session, result } => {
            frame_pump::on_frame_captured(state, session, result)
        }
        Msg::PredictDone {
            origin: Origin::Camera { session },
            result,
        } => frame_pump::on_prediction(state, session, result),
        Msg::PredictDone {
            origin: Origin::Upload { generation },
            result,
        } => upload_predictor::on_prediction(state, generation, result),
    }
}

fn load_model(mut state: State) -> (State, Vec<Effect>) {
    match state.loader {
        LoaderPhase::Unloaded => {
            state.loader = LoaderPhase::Loading;
            (state, vec![Effect::LoadModel])
        }
        _ => (state, vec![]),
    }
}

fn retry_model(mut state: State) -> (State, Vec<Effect>) {
    match state.loader {
        LoaderPhase::Failed(_) => {
            state.loader = LoaderPhase::Loading;
            state.last_error = None;
            (state, vec![Effect::RetryModel])
        }
        _ => (state, vec![]),
    }
}

fn model_load_done(
    mut state: State,
    result: Result<Vec<String>, ModelLoadError>,
) -> (State, Vec<Effect>) {
    match result {
        Ok(labels) => {
            state.loader = LoaderPhase::Ready { labels };
            if state.last_error == Some(PipelineError::ModelNotReady) {
                state.last_error = None;
            }
            (state, vec![])
        }
        Err(error) => {
            state.loader = LoaderPhase::Failed(error.clone());
            (state.fail(PipelineError::ModelLoadFailure(error)), vec![])
        }
    }
}
