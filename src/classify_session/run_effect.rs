use crate::augmentation::augment_with;
use crate::classify_session::core::{Effect, Msg};
use crate::classify_session::mode_controller::CameraSlot;
use crate::config::Config;
use crate::inference_engine::InferenceEngine;
use rand::rngs::StdRng;

pub struct RunEffect {
    config: Config,
    engine: InferenceEngine,
    camera: CameraSlot,
    rng: StdRng,
}

impl RunEffect {
    pub fn new(config: Config, engine: InferenceEngine, camera: CameraSlot) -> Self {
        let rng = config.augmentation.rng();
        Self {
            config,
            engine,
            camera,
            rng,
        }
    }

    pub fn run_effect(&mut self, effect: Effect) -> Option<Msg> {
        tracing::debug!(target: "classify_session", effect = %effect.to_display_string(), "Running effect");

        match effect {
            Effect::LoadModel => {
                let loaded = self.engine.loader_mut().load();
                Some(Msg::ModelLoadDone(loaded.map(|model| model.labels().to_vec())))
            }
            Effect::RetryModel => {
                let loaded = self.engine.loader_mut().retry();
                Some(Msg::ModelLoadDone(loaded.map(|model| model.labels().to_vec())))
            }
            Effect::AcquireCamera {
                width,
                height,
                mirror,
            } => {
                let acquired = self.camera.acquire(width, height, mirror);
                match &acquired {
                    Ok(()) => tracing::info!(target: "classify_session", width, height, "Camera started"),
                    Err(error) => {
                        tracing::warn!(target: "classify_session", %error, "Camera unavailable")
                    }
                }
                Some(Msg::CameraAcquireDone(acquired))
            }
            Effect::ReleaseCamera => {
                self.camera.release();
                tracing::info!(target: "classify_session", "Camera released");
                None
            }
            Effect::CaptureFrame { session } => Some(Msg::FrameCaptureDone {
                session,
                result: self.camera.capture_frame(),
            }),
            Effect::Predict { origin, frame } => {
                let frame = if self.config.augmentation.enabled {
                    augment_with(&frame, &mut self.rng)
                } else {
                    frame
                };

                let result = self.engine.predict(&frame);
                if let Err(error) = &result {
                    tracing::warn!(target: "classify_session", ?origin, %error, "Prediction failed");
                }
                Some(Msg::PredictDone { origin, result })
            }
        }
    }
}
