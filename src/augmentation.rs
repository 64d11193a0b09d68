use crate::frame::Frame;
use image::{imageops, DynamicImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

pub const FLIP_PROBABILITY: f64 = 0.5;

/// Brightness and contrast factors are drawn from `1.0 ± JITTER_BAND`.
pub const JITTER_BAND: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct AugmentationConfig {
    pub enabled: bool,
    pub seed: Option<u64>,
}

impl AugmentationConfig {
    /// Seeded generator when a seed is configured, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

pub fn augment(frame: Frame, enabled: bool, seed: Option<u64>) -> Frame {
    if !enabled {
        return frame;
    }

    let mut rng = AugmentationConfig { enabled, seed }.rng();
    augment_with(&frame, &mut rng)
}

/// Random horizontal flip plus brightness/contrast jitter. The output has the
/// same dimensions as the input.
pub fn augment_with<R: Rng + ?Sized>(frame: &Frame, rng: &mut R) -> Frame {
    let flip = rng.random_bool(FLIP_PROBABILITY);
    let brightness = rng.random_range(1.0 - JITTER_BAND..=1.0 + JITTER_BAND);
    let contrast = rng.random_range(1.0 - JITTER_BAND..=1.0 + JITTER_BAND);

    let mut rgba = frame.image().to_rgba8();

    if flip {
        imageops::flip_horizontal_in_place(&mut rgba);
    }

    for pixel in rgba.pixels_mut() {
        // alpha untouched
        for channel in pixel.0.iter_mut().take(3) {
            *channel = jitter(*channel, brightness, contrast);
        }
    }

    Frame::new(DynamicImage::ImageRgba8(rgba))
}

fn jitter(value: u8, brightness: f32, contrast: f32) -> u8 {
    let contrasted = (value as f32 - 128.0) * contrast + 128.0;
    (contrasted * brightness).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn black_white_frame() -> Frame {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 255, 255]));
        Frame::new(DynamicImage::ImageRgb8(img))
    }

    #[test]
    fn test_disabled_returns_frame_unchanged() {
        let frame = Frame::solid(4, 3, [12, 34, 56]);
        let output = augment(frame.clone(), false, Some(7));
        assert_eq!(output, frame);
    }

    #[test]
    fn test_same_seed_same_output() {
        let frame = black_white_frame();
        let a = augment(frame.clone(), true, Some(42));
        let b = augment(frame, true, Some(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_dimensions_preserved() {
        let frame = Frame::solid(480, 360, [100, 150, 200]);
        let output = augment(frame, true, Some(1));
        assert_eq!(output.dimensions(), (480, 360));
    }

    #[test]
    fn test_jitter_stays_within_band() {
        let frame = Frame::solid(8, 8, [200, 200, 200]);
        for seed in 0..32 {
            let output = augment(frame.clone(), true, Some(seed)).into_image().to_rgb8();
            for pixel in output.pixels() {
                // (200 - 128) * [0.9, 1.1] + 128, then * [0.9, 1.1]
                let low = ((72.0 * 0.9 + 128.0) * 0.9f32).floor() as u8;
                let high = ((72.0 * 1.1 + 128.0) * 1.1f32).ceil().min(255.0) as u8;
                assert!(pixel[0] >= low && pixel[0] <= high, "seed {}: {}", seed, pixel[0]);
            }
        }
    }

    #[test]
    fn test_flip_happens_for_some_seeds_only() {
        let frame = black_white_frame();
        let mut flipped = 0;
        let mut kept = 0;

        for seed in 0..64 {
            let output = augment(frame.clone(), true, Some(seed)).into_image().to_rgb8();
            if output.get_pixel(0, 0)[0] > 128 {
                flipped += 1;
            } else {
                kept += 1;
            }
        }

        assert!(flipped > 0);
        assert!(kept > 0);
    }

    #[test]
    fn test_jitter_clamps() {
        assert_eq!(jitter(255, 1.1, 1.1), 255);
        assert_eq!(jitter(0, 0.9, 1.1), 0);
        assert_eq!(jitter(128, 1.0, 1.0), 128);
    }
}
