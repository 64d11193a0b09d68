use crate::device_camera::interface::DeviceCamera;
use crate::error::CameraError;
use crate::frame::Frame;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct CameraCounters {
    setups: Arc<AtomicUsize>,
    stops: Arc<AtomicUsize>,
    captures: Arc<AtomicUsize>,
}

impl CameraCounters {
    pub fn setups(&self) -> usize {
        self.setups.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    pub fn captures(&self) -> usize {
        self.captures.load(Ordering::SeqCst)
    }
}

pub struct DeviceCameraFake {
    counters: CameraCounters,
    failure: Option<CameraError>,
    size: (u32, u32),
    streaming: bool,
}

impl DeviceCameraFake {
    pub fn new() -> Self {
        Self {
            counters: CameraCounters::default(),
            failure: None,
            size: (0, 0),
            streaming: false,
        }
    }

    /// A camera whose setup always fails with `failure`.
    pub fn failing(failure: CameraError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    pub fn counters(&self) -> CameraCounters {
        self.counters.clone()
    }
}

impl Default for DeviceCameraFake {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn setup(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        tracing::debug!(target: "camera::fake", width, height, "Setting up camera");
        self.counters.setups.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        self.size = (width, height);
        Ok(())
    }

    fn play(&mut self) -> Result<(), CameraError> {
        self.streaming = true;
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<Frame, CameraError> {
        if !self.streaming {
            return Err(CameraError::Capture("camera is not playing".to_string()));
        }
        let n = self.counters.captures.fetch_add(1, Ordering::SeqCst);
        let shade = (n % 256) as u8;
        Ok(Frame::solid(self.size.0, self.size.1, [shade, 128, 255 - shade]))
    }

    fn stop(&mut self) -> Result<(), CameraError> {
        tracing::debug!(target: "camera::fake", "Stopping camera");
        self.counters.stops.fetch_add(1, Ordering::SeqCst);
        self.streaming = false;
        Ok(())
    }
}
