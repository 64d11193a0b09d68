use crate::classify_session::core::{init, transition, Effect, Msg, State};
use crate::classify_session::mode_controller::{CameraSlot, Mode};
use crate::classify_session::render::Render;
use crate::classify_session::run_effect::RunEffect;
use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::frame::Frame;
use crate::inference_engine::InferenceEngine;
use crate::library::state_machine::StateMachine;
use crate::view_sink::interface::ViewSink;

/// The classification pipeline behind one page: model, camera, uploads and
/// the published view. Every public action queues a message and drains the
/// queue before returning.
pub struct ClassifySession {
    machine: StateMachine<State, Msg, Effect>,
}

impl ClassifySession {
    pub fn new(
        config: Config,
        engine: InferenceEngine,
        camera: Box<dyn DeviceCamera>,
        sink: Box<dyn ViewSink>,
    ) -> Self {
        let initial = init(&config);
        let transition_config = config.clone();
        let mut render = Render::new(config.clone(), sink);
        let mut run_effect = RunEffect::new(config, engine, CameraSlot::new(camera));

        let machine = StateMachine::new(
            initial,
            Box::new(move |state: State, msg: Msg| {
                tracing::debug!(target: "classify_session", ?msg, "Handling message");
                transition(&transition_config, state, msg)
            }),
            Box::new(move |state: &State| {
                if let Err(error) = render.render(state) {
                    tracing::warn!(target: "classify_session", %error, "Failed to publish view");
                }
            }),
            Box::new(move |effect: Effect| run_effect.run_effect(effect)),
        );

        Self { machine }
    }

    pub fn start(&mut self) -> usize {
        self.machine.start();
        self.machine.run_until_idle()
    }

    pub fn state(&self) -> &State {
        self.machine.state()
    }

    pub fn mode(&self) -> Mode {
        self.machine.state().mode.mode
    }

    pub fn load_model(&mut self) -> usize {
        self.dispatch(Msg::LoadModel)
    }

    pub fn retry_model(&mut self) -> usize {
        self.dispatch(Msg::RetryModel)
    }

    pub fn request_camera(&mut self) -> usize {
        self.dispatch(Msg::RequestCamera)
    }

    pub fn stop_camera(&mut self) -> usize {
        self.dispatch(Msg::StopCamera)
    }

    pub fn request_upload(&mut self, frame: Frame) -> usize {
        self.dispatch(Msg::RequestUpload(frame))
    }

    /// One scheduler tick for the camera loop.
    pub fn tick(&mut self) -> usize {
        self.dispatch(Msg::Tick)
    }

    /// Queues without draining, for callers that step the queue themselves.
    pub fn send(&mut self, msg: Msg) {
        self.machine.send(msg);
    }

    pub fn step(&mut self) -> bool {
        self.machine.step()
    }

    pub fn run_until_idle(&mut self) -> usize {
        self.machine.run_until_idle()
    }

    fn dispatch(&mut self, msg: Msg) -> usize {
        self.machine.send(msg);
        self.machine.run_until_idle()
    }
}
