//! Image loading for the evaluation pipeline.
//!
//! Detectors receive images as 8-bit RGB regardless of the on-disk codec, so
//! everything funnels through a single load-and-convert function.

use crate::core::errors::{EvalError, EvalResult};
use image::{DynamicImage, RgbImage};
use std::path::Path;

/// Converts a DynamicImage to an RgbImage (8-bit RGB).
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// Handles any format supported by the image crate. The returned image is
/// 8-bit, channel order RGB, shape (height, width, 3).
///
/// # Errors
///
/// Returns an `EvalError::ImageRead` naming the path if the file cannot be
/// opened or decoded.
pub fn load_image(path: &Path) -> EvalResult<RgbImage> {
    let img = image::open(path).map_err(|e| EvalError::image_read(path, e))?;
    Ok(dynamic_to_rgb(img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::TempDir;

    #[test]
    fn load_image_round_trips_dimensions_and_pixels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.png");
        let img = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn load_image_fails_for_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_image(&dir.path().join("absent.jpg")).unwrap_err();
        assert!(matches!(err, EvalError::ImageRead { .. }));
    }
}
