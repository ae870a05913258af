//! Directory-backed blob store.
//!
//! Maps object keys to paths under a root directory. Used by the local test
//! mode and by the test suite; the batching and upload code paths are
//! identical to the remote store.

use crate::core::errors::{EvalError, EvalResult};
use crate::storage::BlobStore;
use std::path::{Path, PathBuf};

/// Blob store over a local directory; keys become relative paths.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves a key to its backing path.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl BlobStore for FsBlobStore {
    fn get_object(&self, key: &str) -> EvalResult<Vec<u8>> {
        let path = self.path_for(key);
        std::fs::read(&path).map_err(|e| EvalError::storage("get", key, e))
    }

    fn download_to(&self, key: &str, path: &Path) -> EvalResult<()> {
        let source = self.path_for(key);
        std::fs::copy(&source, path)
            .map(|_| ())
            .map_err(|e| EvalError::storage("download", key, e))
    }

    fn put_object(&self, key: &str, path: &Path) -> EvalResult<()> {
        let target = self.path_for(key);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| EvalError::io(parent, e))?;
        }
        std::fs::copy(path, &target)
            .map(|_| ())
            .map_err(|e| EvalError::storage("upload", key, e))
    }
}
