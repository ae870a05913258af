//! Local image source: decode directly from a fixed root, no scratch files.

use crate::core::errors::EvalResult;
use crate::source::ImageSource;
use crate::utils::load_image;
use image::RgbImage;
use std::path::PathBuf;
use tracing::error;

/// Reads images straight from a local directory.
///
/// Used by the local smoke-test mode. There is nothing to clean up, so
/// `release` is a no-op; the batching and identity invariants are otherwise
/// identical to the remote source.
#[derive(Debug)]
pub struct LocalImageSource {
    root: PathBuf,
}

impl LocalImageSource {
    /// Creates a source resolving identifiers against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageSource for LocalImageSource {
    fn fetch(&mut self, id: &str) -> EvalResult<RgbImage> {
        let path = self.root.join(id);
        load_image(&path).inspect_err(|_| error!("failed to read image: {}", path.display()))
    }

    fn release(&mut self, _ids: &[String]) {}
}
