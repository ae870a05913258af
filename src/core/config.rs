//! Configuration for remote evaluation and local smoke testing.
//!
//! Bucket names, key prefixes, and batch sizes live in explicit configuration
//! structs passed into the iterator and uploader at construction, with
//! documented defaults and builder-style setters. No module-level constants
//! beyond the defaults themselves.

use crate::core::errors::{EvalError, EvalResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the job name for a remote evaluation run.
pub const JOB_NAME_ENV: &str = "SPOOF_EVAL_JOB_NAME";

/// Default batch size for remote full-corpus evaluation.
pub const DEFAULT_REMOTE_BATCH_SIZE: usize = 2048;

/// Default batch size for local smoke testing.
pub const DEFAULT_LOCAL_BATCH_SIZE: usize = 1024;

/// Configuration for a remote evaluation run against the challenge workspace
/// bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Workspace bucket holding the manifest, the test images, and the
    /// uploaded results.
    pub bucket: String,
    /// Key of the manifest blob (newline-delimited image identifiers).
    pub manifest_key: String,
    /// Key prefix prepended to each manifest identifier to address the
    /// corresponding image object.
    pub image_prefix: String,
    /// Key prefix under which the result blob is uploaded.
    pub upload_prefix: String,
    /// Local scratch directory for downloaded images and the result file.
    pub scratch_dir: PathBuf,
    /// Number of images per batch handed to the detector.
    pub batch_size: usize,
    /// AWS region of the workspace bucket.
    pub region: Option<String>,
    /// Endpoint override for S3-compatible stores.
    pub endpoint_url: Option<String>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            bucket: "spoof-eval-workspace".to_string(),
            manifest_key: "files/challenge_test_list.txt".to_string(),
            image_prefix: "test_data/".to_string(),
            upload_prefix: "test_output/".to_string(),
            scratch_dir: std::env::temp_dir(),
            batch_size: DEFAULT_REMOTE_BATCH_SIZE,
            region: Some("us-west-2".to_string()),
            endpoint_url: None,
        }
    }
}

impl EvalConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the workspace bucket.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Sets the manifest key.
    pub fn with_manifest_key(mut self, key: impl Into<String>) -> Self {
        self.manifest_key = key.into();
        self
    }

    /// Sets the image key prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_prefix = prefix.into();
        self
    }

    /// Sets the upload key prefix.
    pub fn with_upload_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.upload_prefix = prefix.into();
        self
    }

    /// Sets the scratch directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Sets the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the AWS region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets an endpoint override for S3-compatible stores.
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }
}

/// Configuration for a local smoke-test run, reading everything from the
/// local filesystem instead of the blob store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    /// Root directory the manifest identifiers are resolved against.
    pub image_root: PathBuf,
    /// Path of the local manifest file.
    pub manifest_path: PathBuf,
    /// Path of the ground-truth label mapping (JSON object, id -> label).
    pub label_path: PathBuf,
    /// Number of images per batch handed to the detector.
    pub batch_size: usize,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            image_root: PathBuf::from("test_data"),
            manifest_path: PathBuf::from("test_data/test_example.txt"),
            label_path: PathBuf::from("test_data/test_example_label.json"),
            batch_size: DEFAULT_LOCAL_BATCH_SIZE,
        }
    }
}

impl LocalConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the image root directory.
    pub fn with_image_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.image_root = root.into();
        self
    }

    /// Sets the manifest path.
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Sets the ground-truth label path.
    pub fn with_label_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.label_path = path.into();
        self
    }

    /// Sets the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// Reads the job name from the environment.
///
/// The job name keys the uploaded result blob, so a run without one is
/// useless; this fails immediately at startup when the variable is absent.
pub fn job_name_from_env() -> EvalResult<String> {
    std::env::var(JOB_NAME_ENV).map_err(|_| {
        EvalError::config(format!(
            "environment variable {JOB_NAME_ENV} must be set to the evaluation job name"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_remote_batch_size() {
        let config = EvalConfig::default();
        assert_eq!(config.batch_size, DEFAULT_REMOTE_BATCH_SIZE);
        assert!(config.image_prefix.ends_with('/'));
        assert!(config.upload_prefix.ends_with('/'));
    }

    #[test]
    fn builder_setters_override_defaults() {
        let config = EvalConfig::new()
            .with_bucket("my-bucket")
            .with_batch_size(16)
            .with_endpoint_url("http://localhost:9000");
        assert_eq!(config.bucket, "my-bucket");
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn local_config_defaults_to_local_batch_size() {
        let config = LocalConfig::default();
        assert_eq!(config.batch_size, DEFAULT_LOCAL_BATCH_SIZE);
    }
}
