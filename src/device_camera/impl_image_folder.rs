use crate::device_camera::interface::DeviceCamera;
use crate::error::CameraError;
use crate::frame::Frame;
use image::imageops::FilterType;
use std::io::ErrorKind;
use std::path::PathBuf;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "webp"];

/// Replays the images of a directory, in file-name order, as camera frames.
pub struct DeviceCameraImageFolder {
    dir: PathBuf,
    files: Vec<PathBuf>,
    cursor: usize,
    size: (u32, u32),
    playing: bool,
}

impl DeviceCameraImageFolder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Vec::new(),
            cursor: 0,
            size: (0, 0),
            playing: false,
        }
    }

    fn scan(&self) -> Result<Vec<PathBuf>, CameraError> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CameraError::NotFound,
            ErrorKind::PermissionDenied => CameraError::PermissionDenied,
            _ => CameraError::Busy(e.to_string()),
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        Ok(files)
    }
}

impl DeviceCamera for DeviceCameraImageFolder {
    fn setup(&mut self, width: u32, height: u32) -> Result<(), CameraError> {
        let files = self.scan()?;
        if files.is_empty() {
            return Err(CameraError::NotFound);
        }

        tracing::info!(
            target: "camera::image_folder",
            dir = %self.dir.display(),
            frames = files.len(),
            "Camera set up"
        );

        self.files = files;
        self.cursor = 0;
        self.size = (width, height);
        Ok(())
    }

    fn play(&mut self) -> Result<(), CameraError> {
        self.playing = true;
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<Frame, CameraError> {
        if !self.playing || self.files.is_empty() {
            return Err(CameraError::Capture("camera is not playing".to_string()));
        }

        let path = &self.files[self.cursor % self.files.len()];
        self.cursor = self.cursor.wrapping_add(1);

        let image = image::open(path)
            .map_err(|e| CameraError::Capture(format!("{}: {}", path.display(), e)))?;
        let (width, height) = self.size;
        Ok(Frame::new(image.resize_exact(width, height, FilterType::Triangle)))
    }

    fn stop(&mut self) -> Result<(), CameraError> {
        self.playing = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_missing_directory_is_not_found() {
        let mut camera = DeviceCameraImageFolder::new("/definitely/not/here");
        assert_eq!(camera.setup(480, 360), Err(CameraError::NotFound));
    }

    #[test]
    fn test_empty_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut camera = DeviceCameraImageFolder::new(dir.path());
        assert_eq!(camera.setup(480, 360), Err(CameraError::NotFound));
    }

    #[test]
    fn test_replays_frames_at_capture_size() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(20, 10, Rgb([255, 0, 0]))
            .save(dir.path().join("a.png"))
            .unwrap();
        RgbImage::from_pixel(20, 10, Rgb([0, 0, 255]))
            .save(dir.path().join("b.png"))
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"skip me").unwrap();

        let mut camera = DeviceCameraImageFolder::new(dir.path());
        camera.setup(8, 6).unwrap();
        camera.play().unwrap();

        let first = camera.capture_frame().unwrap();
        let second = camera.capture_frame().unwrap();
        let third = camera.capture_frame().unwrap();

        assert_eq!(first.dimensions(), (8, 6));
        assert_eq!(first.image().to_rgb8().get_pixel(0, 0)[0], 255);
        assert_eq!(second.image().to_rgb8().get_pixel(0, 0)[2], 255);
        assert_eq!(third, first);
    }

    #[test]
    fn test_capture_before_play_fails() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]))
            .save(dir.path().join("a.png"))
            .unwrap();

        let mut camera = DeviceCameraImageFolder::new(dir.path());
        camera.setup(4, 4).unwrap();
        assert!(matches!(camera.capture_frame(), Err(CameraError::Capture(_))));
    }
}
