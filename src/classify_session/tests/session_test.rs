use super::fixture::{scores, Fixture, LABELS};
use crate::classify_session::core::LoaderPhase;
use crate::classify_session::mode_controller::Mode;
use crate::config::Config;
use crate::device_camera::impl_fake::DeviceCameraFake;
use crate::error::{CameraError, PipelineError};
use crate::frame::Frame;
use crate::model_source::impl_fake::ModelSourceFake;
use crate::prediction::interface::Prediction;
use crate::view_sink::interface::{ModelStatus, PredictionSource};

fn bottle() -> Frame {
    Frame::solid(64, 48, [30, 140, 200])
}

#[test]
fn test_start_loads_model_once() {
    let mut fixture = Fixture::new().started();

    assert_eq!(fixture.fetches(), 2);
    assert_eq!(
        fixture.session.state().loader,
        LoaderPhase::Ready {
            labels: LABELS.iter().map(|l| l.to_string()).collect()
        }
    );
    assert_eq!(fixture.last_view().model, ModelStatus::Ready);

    fixture.session.load_model();
    fixture.session.retry_model();
    assert_eq!(fixture.fetches(), 2);
    assert_eq!(fixture.backend.builds.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[test]
fn test_upload_publishes_confident_prediction() {
    let mut fixture = Fixture::new().started();
    fixture
        .backend
        .push_scores(scores(&[("Plastic", 0.82), ("Trash", 0.10), ("Paper", 0.08)]));

    fixture.session.request_upload(bottle());

    let view = fixture.last_view();
    assert_eq!(view.mode, Mode::Uploading);
    assert_eq!(view.source, Some(PredictionSource::Upload));
    assert_eq!(view.ranked.len(), LABELS.len());
    assert_eq!(view.top_confident, Some(Prediction::new("Plastic", 0.82)));
    assert_eq!(view.ranked[1], Prediction::new("Trash", 0.10));

    let category = view.category.expect("category panel");
    assert_eq!(category.title, "Recyclable (Plastic)");
    assert!(category.instruction.starts_with("Rinse the bottle"));
    assert_eq!(fixture.backend.calls(), 1);
}

#[test]
fn test_inconclusive_prediction_has_no_category() {
    let mut fixture = Fixture::new().started();
    fixture
        .backend
        .push_scores(scores(&[("Paper", 0.41), ("Cardboard", 0.39), ("Trash", 0.20)]));

    fixture.session.request_upload(bottle());

    let view = fixture.last_view();
    assert!(view.is_inconclusive());
    assert_eq!(view.top_confident, None);
    assert_eq!(view.category, None);
    assert_eq!(view.ranked[0], Prediction::new("Paper", 0.41));
}

#[test]
fn test_camera_requested_before_ready_then_retried() {
    let config = Config {
        preload_model: false,
        ..Config::default()
    };
    let mut fixture = Fixture::with_config(config).started();
    assert_eq!(fixture.fetches(), 0);

    fixture.session.request_camera();
    assert_eq!(fixture.camera.setups(), 0);
    assert_eq!(fixture.session.mode(), Mode::Idle);
    assert!(fixture
        .sink
        .views()
        .iter()
        .any(|view| view.error == Some(PipelineError::ModelNotReady.to_string())));
    assert!(matches!(
        fixture.session.state().loader,
        LoaderPhase::Ready { .. }
    ));

    fixture.session.request_camera();
    assert_eq!(fixture.camera.setups(), 1);
    assert_eq!(fixture.session.mode(), Mode::CameraRunning);
    assert_eq!(fixture.last_view().error, None);
}

#[test]
fn test_request_camera_twice_sets_up_device_once() {
    let mut fixture = Fixture::new().started();

    fixture.session.request_camera();
    fixture.session.request_camera();

    assert_eq!(fixture.camera.setups(), 1);
    assert_eq!(fixture.session.mode(), Mode::CameraRunning);
}

#[test]
fn test_camera_loop_publishes_each_tick() {
    let mut fixture = Fixture::new().started();
    fixture
        .backend
        .push_scores(scores(&[("Metal", 0.7), ("Glass", 0.3)]));
    fixture.session.request_camera();

    for _ in 0..3 {
        fixture.session.tick();
    }

    assert_eq!(fixture.camera.captures(), 3);
    assert_eq!(fixture.backend.calls(), 3);
    assert_eq!(fixture.session.state().revision, 3);

    let view = fixture.last_view();
    assert_eq!(view.mode, Mode::CameraRunning);
    assert_eq!(view.source, Some(PredictionSource::Camera));
    assert_eq!(view.category.map(|c| c.title), Some("Recyclable (Metal)"));
}

#[test]
fn test_stop_camera_ends_loop_and_releases() {
    let mut fixture = Fixture::new().started();
    fixture.session.request_camera();
    fixture.session.tick();
    let revision = fixture.session.state().revision;

    fixture.session.stop_camera();
    assert_eq!(fixture.camera.stops(), 1);
    assert_eq!(fixture.session.mode(), Mode::Idle);

    let published = fixture.sink.views().len();
    for _ in 0..3 {
        fixture.session.tick();
    }

    assert_eq!(fixture.camera.captures(), 1);
    assert_eq!(fixture.backend.calls(), 1);
    assert_eq!(fixture.session.state().revision, revision);
    assert_eq!(fixture.sink.views().len(), published);
    assert!(fixture.last_view().ranked.is_empty());
}

#[test]
fn test_stop_camera_when_idle_touches_nothing() {
    let mut fixture = Fixture::new().started();
    let published = fixture.sink.views().len();

    fixture.session.stop_camera();

    assert_eq!(fixture.camera.stops(), 0);
    assert_eq!(fixture.sink.views().len(), published);
}

#[test]
fn test_upload_while_camera_running_releases_camera() {
    let mut fixture = Fixture::new().started();
    fixture.session.request_camera();
    fixture.session.tick();
    fixture
        .backend
        .push_scores(scores(&[("Glass", 0.9), ("Plastic", 0.1)]));

    fixture.session.request_upload(bottle());

    assert_eq!(fixture.camera.stops(), 1);
    assert_eq!(fixture.session.mode(), Mode::Uploading);
    let view = fixture.last_view();
    assert_eq!(view.source, Some(PredictionSource::Upload));
    assert_eq!(view.top_confident, Some(Prediction::new("Glass", 0.9)));
}

#[test]
fn test_camera_permission_denied() {
    let mut fixture =
        Fixture::with_camera(DeviceCameraFake::failing(CameraError::PermissionDenied)).started();

    fixture.session.request_camera();

    assert_eq!(fixture.session.mode(), Mode::Idle);
    assert_eq!(fixture.camera.stops(), 0);
    assert_eq!(
        fixture.last_view().error,
        Some("Camera unavailable: Camera permission denied".to_string())
    );

    fixture.session.request_camera();
    assert_eq!(fixture.camera.setups(), 2);
}

#[test]
fn test_inference_failure_in_camera_loop() {
    let mut fixture = Fixture::new().started();
    fixture.backend.push_failure("runtime rejected input");
    fixture.session.request_camera();

    fixture.session.tick();
    fixture.session.tick();

    assert_eq!(fixture.backend.calls(), 1);
    assert_eq!(fixture.camera.stops(), 1);
    assert_eq!(fixture.session.mode(), Mode::Idle);
    assert!(matches!(
        fixture.session.state().last_error,
        Some(PipelineError::InferenceError(_))
    ));
}

#[test]
fn test_model_failure_is_not_retried_automatically() {
    let source = ModelSourceFake::new(None, Some(br#"{"labels":["Plastic"]}"#.to_vec()));
    let mut fixture = Fixture::with_source(source).started();
    assert_eq!(fixture.fetches(), 1);
    assert_eq!(fixture.last_view().model, ModelStatus::Failed);

    fixture.session.request_upload(bottle());
    fixture.session.request_camera();
    assert_eq!(fixture.fetches(), 1);
    assert_eq!(fixture.camera.setups(), 0);
    assert!(matches!(
        fixture.session.state().last_error,
        Some(PipelineError::ModelLoadFailure(_))
    ));

    fixture.session.retry_model();
    assert_eq!(fixture.fetches(), 2);
    assert_eq!(fixture.last_view().model, ModelStatus::Failed);
}

#[test]
fn test_augmented_upload_still_predicts() {
    let mut config = Config::default();
    config.augmentation.enabled = true;
    config.augmentation.seed = Some(11);
    let mut fixture = Fixture::with_config(config).started();
    fixture
        .backend
        .push_scores(scores(&[("Battery", 0.95), ("Metal", 0.05)]));

    fixture.session.request_upload(bottle());

    let view = fixture.last_view();
    assert_eq!(view.top_confident, Some(Prediction::new("Battery", 0.95)));
    assert_eq!(view.category.map(|c| c.style_tag), Some("red"));
}

#[test]
fn test_zero_size_upload_reports_error() {
    let mut fixture = Fixture::new().started();

    fixture.session.request_upload(Frame::solid(0, 0, [0, 0, 0]));

    assert_eq!(fixture.backend.calls(), 0);
    assert_eq!(fixture.session.mode(), Mode::Uploading);
    assert!(matches!(
        fixture.session.state().last_error,
        Some(PipelineError::InferenceError(_))
    ));
}
