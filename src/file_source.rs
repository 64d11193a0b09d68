use crate::error::FileSourceError;
use crate::frame::Frame;
use std::path::Path;

/// Reads a user-selected image file into a frame. Nothing is written.
pub fn read_image(path: &Path) -> Result<Frame, FileSourceError> {
    let bytes = std::fs::read(path).map_err(|source| FileSourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let image = image::load_from_memory(&bytes).map_err(|e| FileSourceError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(Frame::new(image))
}
