//! The batched fetch iterator and manifest parsing.
//!
//! This is the core of the harness: a lazy, finite, non-restartable iterator
//! that covers the manifest exactly once, in order, yielding fixed-size
//! batches of decoded images (the final batch may be short). It is generic
//! over [`ImageSource`], so the remote download-to-scratch flavor and the
//! local direct-read flavor share one batching implementation.
//!
//! Invariants:
//! - concatenating the id sequences of every yielded batch reproduces the
//!   manifest exactly;
//! - `ids.len() == images.len()` in every batch, with `ids[i]` corresponding
//!   to `images[i]`;
//! - scratch files backing a batch are released before the batch is yielded,
//!   best-effort; a failed flush releases whatever it had accumulated;
//! - a fetch failure surfaces as `Some(Err(..))` and ends the stream; no
//!   partial batch spanning the failure point is produced.

use crate::core::errors::{EvalError, EvalResult};
use crate::source::ImageSource;
use image::RgbImage;
use std::path::Path;

/// A flushed batch: parallel id and image sequences of equal length.
#[derive(Debug)]
pub struct ImageBatch {
    /// Manifest identifiers, in manifest order.
    pub ids: Vec<String>,
    /// Decoded RGB images; `images[i]` belongs to `ids[i]`.
    pub images: Vec<RgbImage>,
}

impl ImageBatch {
    /// Number of items in the batch.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch holds no items.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Parses a manifest blob: UTF-8 text, one identifier per line, lines
/// trimmed, blank lines dropped, no header.
pub fn parse_manifest(bytes: &[u8]) -> EvalResult<Vec<String>> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| EvalError::manifest(format!("manifest is not valid UTF-8: {e}")))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Reads and parses a manifest from a local file.
pub fn read_manifest_file(path: &Path) -> EvalResult<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| EvalError::io(path, e))?;
    parse_manifest(&bytes)
}

/// Lazy batching iterator over a manifest.
///
/// Each `next()` call fetches up to `batch_size` items from the source in
/// manifest order and flushes them as one [`ImageBatch`]. An item fetch
/// failure is fatal: it is returned as `Some(Err(..))` and the stream yields
/// `None` from then on, so a run never continues past a missing item.
#[derive(Debug)]
pub struct BatchStream<Src> {
    manifest: std::vec::IntoIter<String>,
    source: Src,
    batch_size: usize,
    failed: bool,
}

impl<Src: ImageSource> BatchStream<Src> {
    /// Creates a stream over `manifest` with the given batch size.
    ///
    /// A batch size of zero is treated as one.
    pub fn new(manifest: Vec<String>, source: Src, batch_size: usize) -> Self {
        Self {
            manifest: manifest.into_iter(),
            source,
            batch_size: batch_size.max(1),
            failed: false,
        }
    }
}

impl<Src: ImageSource> Iterator for BatchStream<Src> {
    type Item = EvalResult<ImageBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut ids = Vec::new();
        let mut images = Vec::new();

        while ids.len() < self.batch_size {
            let Some(id) = self.manifest.next() else {
                break;
            };
            match self.source.fetch(&id) {
                Ok(image) => {
                    ids.push(id);
                    images.push(image);
                }
                Err(e) => {
                    self.failed = true;
                    // The failed item may have left a scratch file behind
                    // (downloaded but not decoded), so it is released too.
                    ids.push(id);
                    self.source.release(&ids);
                    return Some(Err(e));
                }
            }
        }

        if ids.is_empty() {
            return None;
        }

        self.source.release(&ids);
        Some(Ok(ImageBatch { ids, images }))
    }
}
