//! # Spoof Eval
//!
//! Evaluation harness for the face anti-spoofing challenge. The harness
//! fetches a manifest of test images from object storage, streams them in
//! fixed-size batches to a participant-supplied detector, collects one
//! probability per image, and uploads the complete result map for scoring.
//!
//! ## Components
//!
//! * [`core`] - Error types and configuration
//! * [`storage`] - Blob store client (S3 and directory-backed)
//! * [`source`] - Image acquisition: remote download-and-decode or local read
//! * [`fetch`] - The batched fetch iterator and manifest parsing
//! * [`detector`] - The detector capability contract
//! * [`report`] - Result map serialization, upload, and local verification
//! * [`runner`] - The evaluation driver
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spoof_eval::prelude::*;
//! use spoof_eval::detector::MeanIntensityDetector;
//! use spoof_eval::source::RemoteImageSource;
//! use spoof_eval::storage::{S3BlobStore, fetch_manifest};
//!
//! # fn main() -> EvalResult<()> {
//! let config = EvalConfig::default().with_batch_size(2048);
//! let store = S3BlobStore::connect(&config.bucket, config.region.clone(), None)?;
//! let manifest = fetch_manifest(&store, &config.manifest_key)?;
//!
//! let source = RemoteImageSource::new(
//!     &store,
//!     &config.image_prefix,
//!     config.scratch_dir.clone(),
//! );
//! let batches = BatchStream::new(manifest, source, config.batch_size);
//! let results = evaluate(|| Ok(MeanIntensityDetector::new()), batches, false)?;
//!
//! let uploader = ResultUploader::new(&store, &config.upload_prefix, config.scratch_dir.clone());
//! uploader.upload(&results, "my-job")?;
//! # Ok(())
//! # }
//! ```
//!
//! The evaluation loop is strictly single-threaded and fail-fast: any download,
//! decode, or prediction failure is logged with the offending item or batch and
//! aborts the run. Only scratch-file cleanup is best-effort.

pub mod core;
pub mod detector;
pub mod fetch;
pub mod report;
pub mod runner;
pub mod source;
pub mod storage;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Brings the essentials into scope with a single use statement:
///
/// ```rust
/// use spoof_eval::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::{EvalConfig, LocalConfig};
    pub use crate::core::{EvalError, EvalResult};
    pub use crate::detector::{Detector, SpoofScore};
    pub use crate::fetch::{BatchStream, ImageBatch};
    pub use crate::report::{ResultMap, ResultRecord, ResultUploader};
    pub use crate::runner::evaluate;
    pub use crate::utils::load_image;
}
