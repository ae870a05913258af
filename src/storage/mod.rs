//! Blob store client used for manifest fetch, image download, and result
//! upload.
//!
//! The rest of the harness is strictly synchronous, so the trait exposes a
//! blocking surface; the S3 implementation owns its own runtime and hides the
//! async SDK behind it.

pub mod fs;
pub mod s3;

pub use fs::FsBlobStore;
pub use s3::S3BlobStore;

use crate::core::errors::EvalResult;
use crate::fetch::parse_manifest;
use std::path::Path;
use tracing::info;

/// Blocking object-storage capability: read, download, upload.
pub trait BlobStore {
    /// Reads the object at `key` into memory.
    fn get_object(&self, key: &str) -> EvalResult<Vec<u8>>;

    /// Downloads the object at `key` to a local file.
    fn download_to(&self, key: &str, path: &Path) -> EvalResult<()>;

    /// Uploads the local file at `path` to `key`.
    fn put_object(&self, key: &str, path: &Path) -> EvalResult<()>;
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    fn get_object(&self, key: &str) -> EvalResult<Vec<u8>> {
        (**self).get_object(key)
    }

    fn download_to(&self, key: &str, path: &Path) -> EvalResult<()> {
        (**self).download_to(key, path)
    }

    fn put_object(&self, key: &str, path: &Path) -> EvalResult<()> {
        (**self).put_object(key, path)
    }
}

/// Fetches and parses the manifest blob.
///
/// Failure here is fatal: no work is possible without the manifest.
pub fn fetch_manifest<S: BlobStore>(store: &S, key: &str) -> EvalResult<Vec<String>> {
    let bytes = store.get_object(key)?;
    let manifest = parse_manifest(&bytes)?;
    info!("got image list, {} images", manifest.len());
    Ok(manifest)
}
