//! The detector capability contract.
//!
//! The detector is an opaque collaborator: participants implement [`Detector`]
//! for their model and the harness only ever calls `predict` on whole
//! batches. Construction happens inside the evaluation driver so setup cost
//! is excluded from runtime measurement.

use crate::core::errors::EvalResult;
use image::RgbImage;

/// Two-class score row for one image: `[live, spoof]`.
///
/// The harness records index 1, the spoof-class probability.
pub type SpoofScore = [f32; 2];

/// A pluggable anti-spoofing detector.
pub trait Detector {
    /// Scores a batch of images.
    ///
    /// Images are 8-bit RGB. The returned vector must contain exactly one
    /// score row per input image, in input order; the driver rejects any
    /// length mismatch.
    fn predict(&mut self, images: &[RgbImage]) -> EvalResult<Vec<SpoofScore>>;
}

/// Trivial reference detector scoring by mean pixel intensity.
///
/// Exists so both entry points run end-to-end without a model runtime;
/// participants replace it with their own [`Detector`] implementation.
#[derive(Debug, Default)]
pub struct MeanIntensityDetector;

impl MeanIntensityDetector {
    /// Creates the reference detector.
    pub fn new() -> Self {
        Self
    }
}

impl Detector for MeanIntensityDetector {
    fn predict(&mut self, images: &[RgbImage]) -> EvalResult<Vec<SpoofScore>> {
        Ok(images
            .iter()
            .map(|img| {
                let pixels = img.as_raw();
                if pixels.is_empty() {
                    return [0.5, 0.5];
                }
                let sum: u64 = pixels.iter().map(|&v| v as u64).sum();
                let spoof = sum as f32 / (pixels.len() as f32 * 255.0);
                [1.0 - spoof, spoof]
            })
            .collect())
    }
}
