use image::{imageops, DynamicImage};
use tract_onnx::prelude::*;

/// Center-crops to a square, then scales to `size` x `size`.
pub fn crop_and_resize(image: &DynamicImage, size: u32) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    let side = w.min(h);
    let cropped = if w != h {
        image.crop_imm((w - side) / 2, (h - side) / 2, side, side)
    } else {
        image.clone()
    };
    cropped.resize_exact(size, size, imageops::FilterType::Triangle)
}

fn image_to_tensor(
    image: &DynamicImage,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    let mut tensor = Tensor::zero::<f32>(&[1, 3, height, width])?;
    let slice = tensor.as_slice_mut::<f32>()?;

    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..3 {
            let index = c * height * width + y as usize * width + x as usize;
            slice[index] = pixel[c] as f32 / 255.0;
        }
    }

    Ok(tensor)
}

pub fn to_input_tensor(
    image: &DynamicImage,
    size: u32,
) -> Result<Tensor, Box<dyn std::error::Error + Send + Sync>> {
    image_to_tensor(&crop_and_resize(image, size))
}

/// Softmax unless the scores already look like a distribution.
pub fn normalize_scores(scores: Vec<f32>) -> Vec<f32> {
    let total: f32 = scores.iter().sum();
    let is_distribution = scores.iter().all(|s| *s >= 0.0) && (total - 1.0).abs() < 1e-3;
    if is_distribution || scores.is_empty() {
        return scores;
    }

    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
