//! Remote image source: download to scratch, decode, delete on release.

use crate::core::errors::EvalResult;
use crate::source::ImageSource;
use crate::storage::BlobStore;
use crate::utils::load_image;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Fetches images from a blob store via a local scratch directory.
///
/// Each item is downloaded to `scratch_dir/<final path segment of the id>`,
/// decoded to RGB, and left on disk until the batch containing it is flushed;
/// `release` then deletes the scratch files best-effort.
#[derive(Debug)]
pub struct RemoteImageSource<S> {
    store: S,
    image_prefix: String,
    scratch_dir: PathBuf,
}

impl<S: BlobStore> RemoteImageSource<S> {
    /// Creates a source reading `image_prefix + id` from `store` through the
    /// given scratch directory.
    pub fn new(store: S, image_prefix: impl Into<String>, scratch_dir: PathBuf) -> Self {
        Self {
            store,
            image_prefix: image_prefix.into(),
            scratch_dir,
        }
    }

    /// Scratch path an identifier maps to: its final `/` segment under the
    /// scratch directory.
    pub fn scratch_path(&self, id: &str) -> PathBuf {
        let name = id.rsplit('/').next().unwrap_or(id);
        self.scratch_dir.join(name)
    }
}

impl<S: BlobStore> ImageSource for RemoteImageSource<S> {
    fn fetch(&mut self, id: &str) -> EvalResult<RgbImage> {
        let key = format!("{}{}", self.image_prefix, id);
        let local = self.scratch_path(id);

        if let Err(e) = self.store.download_to(&key, &local) {
            error!("failed to download image: {key}");
            return Err(e);
        }
        debug!("downloaded {key} to {}", local.display());

        load_image(&local).inspect_err(|_| error!("failed to decode image: {}", local.display()))
    }

    fn release(&mut self, ids: &[String]) {
        for id in ids {
            let path = self.scratch_path(id);
            remove_scratch_file(&path);
        }
    }
}

fn remove_scratch_file(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        warn!("failed to delete scratch file {}: {e}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::EvalError;
    use crate::storage::FsBlobStore;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn store_with_image(root: &Path, key: &str) -> FsBlobStore {
        let path = root.join(key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])).save(&path).unwrap();
        FsBlobStore::new(root)
    }

    #[test]
    fn fetch_downloads_and_decodes_by_final_path_segment() {
        let root = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let store = store_with_image(root.path(), "test_data/subject/a.png");

        let mut source = RemoteImageSource::new(&store, "test_data/", scratch.path().to_path_buf());
        let img = source.fetch("subject/a.png").unwrap();

        assert_eq!(img.dimensions(), (2, 2));
        assert!(scratch.path().join("a.png").exists());
    }

    #[test]
    fn fetch_fails_when_object_is_missing() {
        let root = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let store = FsBlobStore::new(root.path());

        let mut source = RemoteImageSource::new(&store, "test_data/", scratch.path().to_path_buf());
        let err = source.fetch("absent.png").unwrap_err();
        assert!(matches!(err, EvalError::Storage { .. }));
    }

    #[test]
    fn release_deletes_scratch_files() {
        let root = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let store = store_with_image(root.path(), "test_data/a.png");

        let mut source = RemoteImageSource::new(&store, "test_data/", scratch.path().to_path_buf());
        source.fetch("a.png").unwrap();
        assert!(scratch.path().join("a.png").exists());

        source.release(&["a.png".to_string()]);
        assert!(!scratch.path().join("a.png").exists());
    }

    #[test]
    fn release_of_missing_files_is_silent() {
        let root = TempDir::new().unwrap();
        let scratch = TempDir::new().unwrap();
        let store = FsBlobStore::new(root.path());

        let mut source = RemoteImageSource::new(&store, "test_data/", scratch.path().to_path_buf());
        // Nothing was fetched; release must not fail.
        source.release(&["never-downloaded.png".to_string()]);
    }
}
