use crate::device_camera::interface::DeviceCamera;
use crate::error::CameraError;
use crate::frame::Frame;

/// A set-up, playing camera. Dropping it stops the device.
pub struct CameraResource {
    device: Option<Box<dyn DeviceCamera>>,
    mirror: bool,
}

impl CameraResource {
    /// Sets up and starts the device. On failure the device is handed back
    /// together with the error; a device that was set up but failed to play
    /// is stopped first.
    pub fn acquire(
        mut device: Box<dyn DeviceCamera>,
        width: u32,
        height: u32,
        mirror: bool,
    ) -> Result<Self, (Box<dyn DeviceCamera>, CameraError)> {
        if let Err(error) = device.setup(width, height) {
            return Err((device, error));
        }

        if let Err(error) = device.play() {
            let _ = device.stop();
            return Err((device, error));
        }

        Ok(Self {
            device: Some(device),
            mirror,
        })
    }

    pub fn capture_frame(&mut self) -> Result<Frame, CameraError> {
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| CameraError::Capture("camera already released".to_string()))?;

        let frame = device.capture_frame()?;
        if self.mirror {
            Ok(Frame::new(frame.into_image().fliph()))
        } else {
            Ok(frame)
        }
    }

    /// Stops the device and returns it for the next acquisition.
    pub fn release(mut self) -> Option<Box<dyn DeviceCamera>> {
        let mut device = self.device.take()?;
        if let Err(error) = device.stop() {
            tracing::warn!(target: "camera", %error, "Failed to stop camera");
        }
        Some(device)
    }
}

impl Drop for CameraResource {
    fn drop(&mut self) {
        if let Some(mut device) = self.device.take() {
            if let Err(error) = device.stop() {
                tracing::warn!(target: "camera", %error, "Failed to stop camera during shutdown");
            }
        }
    }
}
