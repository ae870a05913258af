//! The evaluation driver.
//!
//! Constructs the detector, drains the batch stream, records one probability
//! per image by index alignment, and returns the complete result map. No
//! retry anywhere: a failed batch aborts the run after a log line naming its
//! identifiers.

use crate::core::errors::{EvalError, EvalResult};
use crate::detector::Detector;
use crate::fetch::ImageBatch;
use crate::report::{ResultMap, ResultRecord};
use std::time::Instant;
use tracing::{error, info};

/// Runs the detector over every batch and collects the result map.
///
/// The detector is built inside this function (via `build_detector`) so that
/// setup cost is visible in the logs but excluded from per-batch runtime.
/// When `capture_runtime` is set, each record carries the batch's prediction
/// wall-clock divided evenly across its images.
///
/// Errors from detector construction, the batch stream, or prediction are
/// logged and propagated; the caller decides nothing, the run is over.
pub fn evaluate<D, F, I>(
    build_detector: F,
    batches: I,
    capture_runtime: bool,
) -> EvalResult<ResultMap>
where
    D: Detector,
    F: FnOnce() -> EvalResult<D>,
    I: IntoIterator<Item = EvalResult<ImageBatch>>,
{
    info!("initializing detector");
    let mut detector = build_detector().inspect_err(|e| error!("detector construction failed: {e}"))?;
    info!("detector initialized");

    let mut results = ResultMap::new();
    let mut finished = 0usize;

    info!("starting runtime evaluation");
    for batch in batches {
        let batch = batch?;

        let started = Instant::now();
        let scores = detector
            .predict(&batch.images)
            .inspect_err(|_| error!("batch failed, image ids: {:?}", batch.ids))?;
        let elapsed = started.elapsed().as_secs_f64();

        if scores.len() != batch.len() {
            error!("batch failed, image ids: {:?}", batch.ids);
            return Err(EvalError::detector(format!(
                "expected {} scores, detector returned {}",
                batch.len(),
                scores.len()
            )));
        }

        let per_image_runtime = if capture_runtime {
            Some(elapsed / batch.len() as f64)
        } else {
            None
        };

        for (id, score) in batch.ids.iter().zip(&scores) {
            results.insert(
                id.clone(),
                ResultRecord {
                    prob: score[1],
                    runtime: per_image_runtime,
                },
            );
        }

        finished += batch.len();
        info!("finished {finished} images");
    }

    info!("all images finished");
    Ok(results)
}
