//! Remote full-corpus evaluation entry point.
//!
//! Fetches the manifest from the workspace bucket, streams the test images in
//! batches to the detector, and uploads the result map under the job name
//! taken from the environment. This is the entry point run by the evaluation
//! system; participants swap in their own [`Detector`] implementation where
//! the reference detector is constructed below.
//!
//! # Usage
//!
//! ```bash
//! SPOOF_EVAL_JOB_NAME=my-job run_evaluation [OPTIONS]
//! ```

use clap::Parser;
use spoof_eval::core::config::job_name_from_env;
use spoof_eval::detector::MeanIntensityDetector;
use spoof_eval::prelude::*;
use spoof_eval::source::RemoteImageSource;
use spoof_eval::storage::{S3BlobStore, fetch_manifest};
use std::path::PathBuf;
use tracing::info;

/// Command-line arguments for the remote evaluation run.
#[derive(Parser)]
#[command(name = "run_evaluation")]
#[command(about = "Runs the anti-spoofing detector over the remote test corpus and uploads results")]
struct Args {
    /// Workspace bucket holding manifest, images, and results
    #[arg(long)]
    bucket: Option<String>,

    /// Key of the manifest blob
    #[arg(long)]
    manifest_key: Option<String>,

    /// Key prefix of the test images
    #[arg(long)]
    image_prefix: Option<String>,

    /// Key prefix for the uploaded result blob
    #[arg(long)]
    upload_prefix: Option<String>,

    /// Local scratch directory for downloaded images
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Number of images per detector batch
    #[arg(long)]
    batch_size: Option<usize>,

    /// AWS region of the workspace bucket
    #[arg(long)]
    region: Option<String>,

    /// Endpoint override for S3-compatible stores
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Record per-image prediction runtime in the result blob
    #[arg(long)]
    record_runtime: bool,
}

impl Args {
    fn into_config(self) -> EvalConfig {
        let mut config = EvalConfig::default();
        if let Some(bucket) = self.bucket {
            config = config.with_bucket(bucket);
        }
        if let Some(key) = self.manifest_key {
            config = config.with_manifest_key(key);
        }
        if let Some(prefix) = self.image_prefix {
            config = config.with_image_prefix(prefix);
        }
        if let Some(prefix) = self.upload_prefix {
            config = config.with_upload_prefix(prefix);
        }
        if let Some(dir) = self.scratch_dir {
            config = config.with_scratch_dir(dir);
        }
        if let Some(size) = self.batch_size {
            config = config.with_batch_size(size);
        }
        if let Some(region) = self.region {
            config = config.with_region(region);
        }
        if let Some(url) = self.endpoint_url {
            config = config.with_endpoint_url(url);
        }
        config
    }
}

fn main() -> EvalResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let record_runtime = args.record_runtime;
    let job_name = job_name_from_env()?;
    let config = args.into_config();
    info!("evaluation job: {job_name}");
    info!("batch size: {}", config.batch_size);

    let store = S3BlobStore::connect(
        &config.bucket,
        config.region.clone(),
        config.endpoint_url.clone(),
    )?;
    let manifest = fetch_manifest(&store, &config.manifest_key)?;

    let source = RemoteImageSource::new(&store, &config.image_prefix, config.scratch_dir.clone());
    let batches = BatchStream::new(manifest, source, config.batch_size);

    let results = evaluate(|| Ok(MeanIntensityDetector::new()), batches, record_runtime)?;

    info!("uploading evaluation output");
    let uploader = ResultUploader::new(&store, &config.upload_prefix, config.scratch_dir.clone());
    uploader.upload(&results, &job_name)
}
