//! Result map serialization, upload, and local verification.

use crate::core::errors::{EvalError, EvalResult};
use crate::storage::BlobStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Per-image outcome: spoof probability and, when runtime capture is on, the
/// per-image share of the batch's prediction wall-clock in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Spoof-class probability in [0, 1].
    pub prob: f32,
    /// Prediction time in seconds; omitted from the blob when not captured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<f64>,
}

/// Final mapping of manifest id to outcome, serialized exactly once at job
/// completion.
pub type ResultMap = BTreeMap<String, ResultRecord>;

/// Serializes the result map and uploads it as a single blob.
///
/// Must be called exactly once, after all batches are processed; the scorer
/// expects one complete file and partial uploads are meaningless.
#[derive(Debug)]
pub struct ResultUploader<S> {
    store: S,
    upload_prefix: String,
    scratch_dir: PathBuf,
}

impl<S: BlobStore> ResultUploader<S> {
    /// Creates an uploader writing to `upload_prefix` in `store`, keeping the
    /// local copy under `scratch_dir`.
    pub fn new(store: S, upload_prefix: impl Into<String>, scratch_dir: PathBuf) -> Self {
        Self {
            store,
            upload_prefix: upload_prefix.into(),
            scratch_dir,
        }
    }

    /// Serializes `results` as a JSON object, stores a local copy, and
    /// uploads it under `<upload_prefix><job_name>.bin`.
    ///
    /// An empty map still uploads an empty object `{}`.
    pub fn upload(&self, results: &ResultMap, job_name: &str) -> EvalResult<()> {
        let filename = format!("{job_name}.bin");
        let local_path = self.scratch_dir.join(&filename);

        let data = serde_json::to_vec(results)?;
        std::fs::write(&local_path, &data).map_err(|e| EvalError::io(&local_path, e))?;

        let key = format!("{}{}", self.upload_prefix, filename);
        self.store.put_object(&key, &local_path)?;
        info!("output uploaded to {key}");
        Ok(())
    }
}

/// Cross-checks results against a local ground-truth mapping.
///
/// The ground truth is a JSON object of id to label. Every ground-truth id
/// must appear in the results; the per-id label and predicted probability are
/// logged for human inspection, not gated on.
pub fn verify_local_output(results: &ResultMap, label_path: &Path) -> EvalResult<()> {
    let bytes = std::fs::read(label_path).map_err(|e| EvalError::io(label_path, e))?;
    let ground_truth: BTreeMap<String, serde_json::Value> = serde_json::from_slice(&bytes)?;

    for (id, label) in &ground_truth {
        let record = results
            .get(id)
            .ok_or_else(|| EvalError::detector(format!("the detector produced no output for image {id}")))?;
        info!("image {id}: gt={label} prob={}", record.prob);
    }

    info!("done");
    Ok(())
}
