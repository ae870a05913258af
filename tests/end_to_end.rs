//! End-to-end evaluation run against a directory-backed workspace.
//!
//! Exercises the same wiring as the remote entry point — manifest fetch,
//! batched download-and-decode, detector scoring, result upload — with the
//! blob store swapped for a local directory.

use image::{Rgb, RgbImage};
use spoof_eval::detector::MeanIntensityDetector;
use spoof_eval::prelude::*;
use spoof_eval::source::RemoteImageSource;
use spoof_eval::storage::{BlobStore, FsBlobStore, fetch_manifest};
use std::path::Path;
use tempfile::TempDir;

fn write_image(root: &Path, key: &str, shade: u8) {
    let path = root.join(key);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_pixel(2, 2, Rgb([shade, shade, shade]))
        .save(&path)
        .unwrap();
}

#[test]
fn full_run_uploads_one_result_per_manifest_id_and_cleans_scratch() {
    let workspace = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();

    std::fs::create_dir_all(workspace.path().join("files")).unwrap();
    std::fs::write(
        workspace.path().join("files/list.txt"),
        "a.png\nb.png\n\nsub/c.png\n",
    )
    .unwrap();
    write_image(workspace.path(), "test_data/a.png", 0);
    write_image(workspace.path(), "test_data/b.png", 128);
    write_image(workspace.path(), "test_data/sub/c.png", 255);

    let store = FsBlobStore::new(workspace.path());
    let manifest = fetch_manifest(&store, "files/list.txt").unwrap();
    assert_eq!(manifest, vec!["a.png", "b.png", "sub/c.png"]);

    let source = RemoteImageSource::new(&store, "test_data/", scratch.path().to_path_buf());
    let batches = BatchStream::new(manifest, source, 2);
    let results = evaluate(|| Ok(MeanIntensityDetector::new()), batches, false).unwrap();

    let keys: Vec<_> = results.keys().cloned().collect();
    assert_eq!(keys, vec!["a.png", "b.png", "sub/c.png"]);
    assert_eq!(results["a.png"].prob, 0.0);
    assert_eq!(results["sub/c.png"].prob, 1.0);

    // Every batch's scratch files were released on flush.
    let leftovers: Vec<_> = std::fs::read_dir(scratch.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "scratch not cleaned: {leftovers:?}");

    let uploader = ResultUploader::new(&store, "test_output/", scratch.path().to_path_buf());
    uploader.upload(&results, "e2e-job").unwrap();

    let uploaded = store.get_object("test_output/e2e-job.bin").unwrap();
    let value: serde_json::Value = serde_json::from_slice(&uploaded).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 3);
    assert_eq!(value["sub/c.png"]["prob"], 1.0);
}

#[test]
fn missing_object_aborts_the_run_and_still_cleans_scratch() {
    let workspace = TempDir::new().unwrap();
    let scratch = TempDir::new().unwrap();

    std::fs::create_dir_all(workspace.path().join("files")).unwrap();
    std::fs::write(workspace.path().join("files/list.txt"), "a.png\nmissing.png\n").unwrap();
    write_image(workspace.path(), "test_data/a.png", 10);

    let store = FsBlobStore::new(workspace.path());
    let manifest = fetch_manifest(&store, "files/list.txt").unwrap();
    let source = RemoteImageSource::new(&store, "test_data/", scratch.path().to_path_buf());
    let batches = BatchStream::new(manifest, source, 8);

    let err = evaluate(|| Ok(MeanIntensityDetector::new()), batches, false).unwrap_err();
    assert!(err.to_string().contains("missing.png"));

    // The aborted flush released the items it had already downloaded.
    assert!(!scratch.path().join("a.png").exists());
}
