//! The store gateway trait consumed by the processing pipeline.

use std::collections::HashMap;

use async_trait::async_trait;

use ftrack_models::{Face, ImageRecord, Statistics, Task, TaskId, TaskStatus};

use crate::error::StoreResult;

/// Persistence operations for tasks, images and faces.
///
/// Implementations own record storage and the image bytes backing each
/// record. The pipeline holds this trait behind an `Arc` and never sees
/// the storage technology.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Create an empty task with status `new` and zeroed statistics.
    async fn create_task(&self) -> StoreResult<TaskId>;

    /// Load a task row (status + statistics, no nested images).
    async fn load_task(&self, task_id: TaskId) -> StoreResult<Task>;

    /// Load all image records of a task, without faces.
    async fn load_images(&self, task_id: TaskId) -> StoreResult<Vec<ImageRecord>>;

    /// Load faces grouped by owning image id.
    async fn load_faces(&self, image_ids: &[i64]) -> StoreResult<HashMap<i64, Vec<Face>>>;

    /// Delete a task together with its images, faces and stored files.
    ///
    /// File removal is best-effort: a disk failure is logged and the
    /// record deletion still counts as success.
    async fn delete_task(&self, task_id: TaskId) -> StoreResult<()>;

    /// Validate, persist and register an uploaded image.
    ///
    /// Fails with `Conflict` when the task already has an image of the
    /// same name (state untouched), and with `InvalidImage` when the
    /// bytes do not decode as an image.
    async fn store_image(
        &self,
        task_id: TaskId,
        name: &str,
        bytes: &[u8],
    ) -> StoreResult<ImageRecord>;

    /// Read back the stored bytes of an image for submission to detection.
    async fn read_image(&self, image: &ImageRecord) -> StoreResult<Vec<u8>>;

    /// Persist a task status transition.
    async fn set_task_status(&self, task_id: TaskId, status: TaskStatus) -> StoreResult<()>;

    /// Atomically claim a task for processing, returning its prior status.
    ///
    /// Only `new` and `error` tasks transition to `in_progress`;
    /// `completed` and `in_progress` are left untouched and the returned
    /// status tells the caller which. The check and the write happen
    /// under a single lock acquisition, so of two concurrent claims
    /// exactly one observes a claimable status.
    async fn claim_for_processing(&self, task_id: TaskId) -> StoreResult<TaskStatus>;

    /// Persist accumulated faces and flip the done flag on the given images.
    ///
    /// Best-effort: a done-flag update that hits a missing image is
    /// logged and skipped rather than failing the batch.
    async fn save_detections(&self, faces: &[Face], done_image_ids: &[i64]) -> StoreResult<()>;

    /// Persist recomputed statistics together with status `completed`.
    async fn save_statistics(&self, task_id: TaskId, stats: &Statistics) -> StoreResult<()>;
}
