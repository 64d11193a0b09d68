use crate::error::CameraError;
use crate::frame::Frame;

/// A capture device. Permission refusal and a missing device are reported as
/// distinct `CameraError`s.
pub trait DeviceCamera: Send {
    fn setup(&mut self, width: u32, height: u32) -> Result<(), CameraError>;
    fn play(&mut self) -> Result<(), CameraError>;
    fn capture_frame(&mut self) -> Result<Frame, CameraError>;
    fn stop(&mut self) -> Result<(), CameraError>;
}
