pub mod core;
pub mod frame_pump;
pub mod main;
pub mod mode_controller;
pub mod render;
pub mod run_effect;
pub mod upload_predictor;

#[cfg(test)]
mod tests;
