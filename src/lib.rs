pub mod augmentation;
pub mod category;
pub mod classify_session;
pub mod config;
pub mod device_camera;
pub mod error;
pub mod file_source;
pub mod frame;
pub mod image_classifier;
pub mod inference_engine;
pub mod library;
pub mod model_loader;
pub mod model_source;
pub mod prediction;
pub mod view_sink;
