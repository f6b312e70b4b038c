//! The detached processing run.
//!
//! One run submits every not-yet-done image of a task to the detection
//! gateway, at most [`PipelineConfig::max_in_flight`] submissions in
//! flight at a time. Failed submissions never cancel their siblings:
//! the run drains all outcomes, persists what succeeded and only then
//! decides the final task status.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{error, info, warn};

use ftrack_detect::DetectionGateway;
use ftrack_models::{aggregate_statistics, Face, ImageRecord, TaskId, TaskStatus};
use ftrack_store::TaskStore;

use crate::config::PipelineConfig;
use crate::enrich::faces_for_image;
use crate::error::{TaskError, TaskResult};

struct ImageOutcome {
    image_id: i64,
    faces: TaskResult<Vec<Face>>,
}

/// Execute one processing run for a task.
///
/// Any failure flips the task to `error` status before the error is
/// returned; a clean run concludes with recomputed statistics and
/// status `completed`.
pub async fn run(
    store: Arc<dyn TaskStore>,
    detector: Arc<dyn DetectionGateway>,
    config: PipelineConfig,
    task_id: TaskId,
) -> TaskResult<()> {
    match process(&store, &detector, &config, task_id).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(task_id, error = %e, "Processing run failed");
            if let Err(status_err) = store.set_task_status(task_id, TaskStatus::Error).await {
                error!(task_id, error = %status_err, "Failed to record error status");
            }
            Err(e)
        }
    }
}

async fn process(
    store: &Arc<dyn TaskStore>,
    detector: &Arc<dyn DetectionGateway>,
    config: &PipelineConfig,
    task_id: TaskId,
) -> TaskResult<()> {
    let task = store.load_task(task_id).await?;
    if task.status == TaskStatus::Completed {
        info!(task_id, "Task already completed, nothing to process");
        return Ok(());
    }

    let images = store.load_images(task_id).await?;
    let pending: Vec<ImageRecord> = images.into_iter().filter(|img| !img.done).collect();

    if !pending.is_empty() {
        submit_pending(store, detector, config, task_id, pending).await?;
    }

    conclude(store, task_id).await
}

/// Fan the pending images out to the detection gateway and fan the
/// outcomes back in. Partial results are persisted even when some
/// submissions fail; the first failure is returned after the drain.
async fn submit_pending(
    store: &Arc<dyn TaskStore>,
    detector: &Arc<dyn DetectionGateway>,
    config: &PipelineConfig,
    task_id: TaskId,
    pending: Vec<ImageRecord>,
) -> TaskResult<()> {
    // One token per run, shared by all submissions
    let token = detector.login().await?;

    let semaphore = Arc::new(Semaphore::new(config.max_in_flight));
    let (tx, mut rx) = mpsc::channel::<ImageOutcome>(pending.len());

    info!(
        task_id,
        pending = pending.len(),
        max_in_flight = config.max_in_flight,
        "Submitting images for detection"
    );

    for image in pending {
        let store = Arc::clone(store);
        let detector = Arc::clone(detector);
        let semaphore = Arc::clone(&semaphore);
        let token = token.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let image_id = image.id;
            let faces = submit_image(&*store, &*detector, &semaphore, &token, &image).await;
            // The receiver outlives every sender; a send can only fail
            // if the collector itself was dropped
            let _ = tx.send(ImageOutcome { image_id, faces }).await;
        });
    }
    drop(tx);

    let mut faces = Vec::new();
    let mut done_image_ids = Vec::new();
    let mut first_failure = None;

    while let Some(outcome) = rx.recv().await {
        match outcome.faces {
            Ok(found) => {
                faces.extend(found);
                done_image_ids.push(outcome.image_id);
            }
            Err(e) => {
                warn!(
                    task_id,
                    image_id = outcome.image_id,
                    error = %e,
                    "Image submission failed"
                );
                first_failure.get_or_insert(e);
            }
        }
    }

    // Persist what succeeded regardless of failures elsewhere
    store.save_detections(&faces, &done_image_ids).await?;

    match first_failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

async fn submit_image(
    store: &dyn TaskStore,
    detector: &dyn DetectionGateway,
    semaphore: &Arc<Semaphore>,
    token: &str,
    image: &ImageRecord,
) -> TaskResult<Vec<Face>> {
    let _permit = semaphore
        .acquire()
        .await
        .map_err(|_| TaskError::invalid_state("Detection limiter closed"))?;

    let bytes = store.read_image(image).await?;
    let detected = detector.detect(token, &bytes).await?;
    Ok(faces_for_image(image.id, &detected))
}

/// Recompute statistics over everything stored for the task and mark it
/// completed.
async fn conclude(store: &Arc<dyn TaskStore>, task_id: TaskId) -> TaskResult<()> {
    let images = store.load_images(task_id).await?;
    let image_ids: Vec<i64> = images.iter().map(|img| img.id).collect();
    let faces_by_image = store.load_faces(&image_ids).await?;

    let stats = aggregate_statistics(faces_by_image.values().flatten());
    store.save_statistics(task_id, &stats).await?;

    info!(task_id, faces = stats.faces_total, "Task completed");
    Ok(())
}
