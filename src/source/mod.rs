//! Image acquisition behind the batched fetch iterator.
//!
//! The remote and local flavors of the evaluation differ only in how a single
//! item is acquired and whether its backing file needs cleanup afterwards;
//! the batching logic itself is identical. This trait is that seam: the
//! iterator in [`crate::fetch`] is generic over an `ImageSource`.

pub mod local;
pub mod remote;

pub use local::LocalImageSource;
pub use remote::RemoteImageSource;

use crate::core::errors::EvalResult;
use image::RgbImage;

/// Acquires images by manifest identifier and releases their backing scratch
/// files once a batch has been flushed.
pub trait ImageSource {
    /// Acquires and decodes the item with the given identifier.
    ///
    /// Failure is fatal to the run: downstream scoring expects a result for
    /// every manifest id, so a missing item must abort loudly rather than
    /// silently under-report.
    fn fetch(&mut self, id: &str) -> EvalResult<RgbImage>;

    /// Best-effort release of the scratch files backing a flushed batch.
    ///
    /// Must attempt every file and never fail: leftover scratch files cost
    /// disk, not correctness. Implementations log individual failures and
    /// swallow them.
    fn release(&mut self, ids: &[String]);
}
