//! Task lifecycle service.

use std::sync::Arc;

use tracing::{info, warn};

use ftrack_detect::DetectionGateway;
use ftrack_models::{ImageRecord, Task, TaskId, TaskStatus};
use ftrack_store::TaskStore;

use crate::config::PipelineConfig;
use crate::error::{TaskError, TaskResult};
use crate::processor;

/// Entry point for all task operations.
///
/// Owns the status gates of the lifecycle: which operations a task
/// accepts in its current status, and when a processing run may start.
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    detector: Arc<dyn DetectionGateway>,
    config: PipelineConfig,
}

impl TaskService {
    pub fn new(
        store: Arc<dyn TaskStore>,
        detector: Arc<dyn DetectionGateway>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            detector,
            config,
        }
    }

    /// Create an empty task.
    pub async fn create_task(&self) -> TaskResult<TaskId> {
        Ok(self.store.create_task().await?)
    }

    /// Load a task with its images and their faces nested in.
    pub async fn get_task(&self, task_id: TaskId) -> TaskResult<Task> {
        let mut task = self.store.load_task(task_id).await?;

        let mut images = self.store.load_images(task_id).await?;
        let image_ids: Vec<i64> = images.iter().map(|img| img.id).collect();
        let mut faces_by_image = self.store.load_faces(&image_ids).await?;

        for image in &mut images {
            if let Some(faces) = faces_by_image.remove(&image.id) {
                image.faces = faces;
            }
        }
        task.images = images;

        Ok(task)
    }

    /// Delete a task with everything attached to it.
    ///
    /// Refused while a processing run may be underway.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskResult<()> {
        let task = self.store.load_task(task_id).await?;
        if !task.status.can_delete() {
            return Err(TaskError::invalid_state(format!(
                "Task {task_id} is {} and cannot be deleted",
                task.status
            )));
        }

        self.store.delete_task(task_id).await?;
        Ok(())
    }

    /// Attach an uploaded image to a task.
    ///
    /// Only tasks that have not started processing accept images.
    pub async fn add_image(
        &self,
        task_id: TaskId,
        name: &str,
        bytes: &[u8],
    ) -> TaskResult<ImageRecord> {
        let task = self.store.load_task(task_id).await?;
        if !task.status.can_accept_images() {
            return Err(TaskError::invalid_state(format!(
                "Task {task_id} is {} and no longer accepts images",
                task.status
            )));
        }

        Ok(self.store.store_image(task_id, name, bytes).await?)
    }

    /// Kick off a processing run for the task.
    ///
    /// Returns as soon as the run is launched; results land in the
    /// store and are visible through [`Self::get_task`]. Re-triggering
    /// a completed task is acknowledged without touching it. The
    /// `in_progress` transition is a single atomic store claim, so of
    /// two concurrent triggers exactly one launches a run and the
    /// other is refused.
    pub async fn start_processing(&self, task_id: TaskId) -> TaskResult<()> {
        match self.store.claim_for_processing(task_id).await? {
            TaskStatus::Completed => {
                info!(task_id, "Task already completed, processing skipped");
                return Ok(());
            }
            TaskStatus::InProgress => {
                return Err(TaskError::invalid_state(format!(
                    "Task {task_id} is already being processed"
                )));
            }
            TaskStatus::New | TaskStatus::Error => {}
        }

        let store = Arc::clone(&self.store);
        let detector = Arc::clone(&self.detector);
        let config = self.config.clone();

        tokio::spawn(async move {
            if let Err(e) = processor::run(store, detector, config, task_id).await {
                warn!(task_id, error = %e, "Detached processing run ended with error");
            }
        });

        info!(task_id, "Processing run launched");
        Ok(())
    }
}
