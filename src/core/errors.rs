//! Error types for the evaluation harness.
//!
//! A single crate-wide error enum with contextual variants for each failure
//! class the harness distinguishes: configuration, storage, image decode,
//! manifest parsing, detector failures, and local I/O. Constructor helpers
//! keep call sites short.
//!
//! Every failure here is fatal to the run. The one non-fatal failure class in
//! the system, scratch-file cleanup, never produces an `EvalError` at all; it
//! is logged and swallowed at the call site.

use std::path::Path;
use thiserror::Error;

/// Convenient result alias for harness operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors produced by the evaluation harness.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Invalid or missing configuration, including the job-name environment
    /// variable.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },

    /// A blob store operation failed.
    #[error("storage operation '{operation}' failed for key '{key}'")]
    Storage {
        /// The operation that failed (`get`, `download`, `upload`).
        operation: &'static str,
        /// The object key involved.
        key: String,
        /// The underlying storage error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An image file could not be opened or decoded.
    #[error("failed to read image '{path}'")]
    ImageRead {
        /// Path of the offending image file.
        path: String,
        /// The underlying decode error.
        #[source]
        source: image::ImageError,
    },

    /// The manifest blob could not be parsed.
    #[error("malformed manifest: {message}")]
    Manifest {
        /// Description of the parse problem.
        message: String,
    },

    /// Detector construction or prediction failed, or the detector broke its
    /// one-score-per-image contract.
    #[error("detector failure: {message}")]
    Detector {
        /// Description of the detector problem.
        message: String,
    },

    /// A local filesystem operation failed.
    #[error("I/O failure at '{path}'")]
    Io {
        /// Path involved in the failed operation.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Result map serialization or ground-truth deserialization failed.
    #[error("JSON serialization failed")]
    Serialize(#[from] serde_json::Error),
}

impl EvalError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        EvalError::Config {
            message: message.into(),
        }
    }

    /// Creates a storage error with the failed operation and object key.
    pub fn storage(
        operation: &'static str,
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        EvalError::Storage {
            operation,
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Creates an image read error for the given path.
    pub fn image_read(path: &Path, source: image::ImageError) -> Self {
        EvalError::ImageRead {
            path: path.display().to_string(),
            source,
        }
    }

    /// Creates a manifest parse error.
    pub fn manifest(message: impl Into<String>) -> Self {
        EvalError::Manifest {
            message: message.into(),
        }
    }

    /// Creates a detector error.
    pub fn detector(message: impl Into<String>) -> Self {
        EvalError::Detector {
            message: message.into(),
        }
    }

    /// Creates an I/O error for the given path.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        EvalError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_carries_operation_and_key() {
        let err = EvalError::storage(
            "get",
            "files/manifest.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        let message = err.to_string();
        assert!(message.contains("'get'"));
        assert!(message.contains("files/manifest.txt"));
    }

    #[test]
    fn image_read_error_names_the_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = EvalError::image_read(Path::new("/tmp/a.jpg"), image::ImageError::IoError(io));
        assert!(err.to_string().contains("/tmp/a.jpg"));
    }
}
