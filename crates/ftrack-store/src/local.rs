//! In-process store implementation.
//!
//! Records live in memory behind a single `RwLock`; image bytes live on
//! disk in the sharded [`ImageVault`]. A relational backend would slot in
//! behind the same [`TaskStore`] trait.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use ftrack_models::{Face, ImageRecord, Statistics, Task, TaskId, TaskStatus};

use crate::error::{StoreError, StoreResult};
use crate::gateway::TaskStore;
use crate::vault::ImageVault;

#[derive(Debug, Clone)]
struct TaskRow {
    status: TaskStatus,
    statistics: Statistics,
}

#[derive(Debug, Clone)]
struct ImageRow {
    id: i64,
    task_id: TaskId,
    name: String,
    file_name: String,
    done: bool,
}

#[derive(Debug, Default)]
struct State {
    next_task_id: i64,
    next_image_id: i64,
    next_face_id: i64,
    tasks: BTreeMap<TaskId, TaskRow>,
    images: BTreeMap<i64, ImageRow>,
    faces: BTreeMap<i64, Face>,
}

impl State {
    fn task(&self, task_id: TaskId) -> StoreResult<&TaskRow> {
        self.tasks
            .get(&task_id)
            .ok_or_else(|| StoreError::not_found(format!("task {task_id}")))
    }

    fn task_mut(&mut self, task_id: TaskId) -> StoreResult<&mut TaskRow> {
        self.tasks
            .get_mut(&task_id)
            .ok_or_else(|| StoreError::not_found(format!("task {task_id}")))
    }
}

/// In-memory record store with on-disk image files.
pub struct LocalStore {
    state: RwLock<State>,
    vault: ImageVault,
}

impl LocalStore {
    /// Create a store writing image files under the given directory.
    pub fn new(image_root: impl Into<PathBuf>) -> Self {
        Self {
            state: RwLock::new(State::default()),
            vault: ImageVault::new(image_root),
        }
    }
}

#[async_trait]
impl TaskStore for LocalStore {
    async fn create_task(&self) -> StoreResult<TaskId> {
        let mut state = self.state.write().await;
        state.next_task_id += 1;
        let task_id = state.next_task_id;

        state.tasks.insert(
            task_id,
            TaskRow {
                status: TaskStatus::New,
                statistics: Statistics::default(),
            },
        );

        info!(task_id, "Created task");
        Ok(task_id)
    }

    async fn load_task(&self, task_id: TaskId) -> StoreResult<Task> {
        let state = self.state.read().await;
        let row = state.task(task_id)?;

        Ok(Task {
            id: task_id,
            status: row.status,
            statistics: row.statistics,
            images: Vec::new(),
        })
    }

    async fn load_images(&self, task_id: TaskId) -> StoreResult<Vec<ImageRecord>> {
        let state = self.state.read().await;
        state.task(task_id)?;

        Ok(state
            .images
            .values()
            .filter(|img| img.task_id == task_id)
            .map(|img| ImageRecord {
                id: img.id,
                task_id: img.task_id,
                name: img.name.clone(),
                file_name: img.file_name.clone(),
                done: img.done,
                faces: Vec::new(),
            })
            .collect())
    }

    async fn load_faces(&self, image_ids: &[i64]) -> StoreResult<HashMap<i64, Vec<Face>>> {
        let state = self.state.read().await;

        let mut by_image: HashMap<i64, Vec<Face>> = HashMap::new();
        for face in state.faces.values() {
            if image_ids.contains(&face.image_id) {
                by_image.entry(face.image_id).or_default().push(face.clone());
            }
        }

        Ok(by_image)
    }

    async fn delete_task(&self, task_id: TaskId) -> StoreResult<()> {
        {
            let mut state = self.state.write().await;
            state
                .tasks
                .remove(&task_id)
                .ok_or_else(|| StoreError::not_found(format!("task {task_id}")))?;

            let image_ids: Vec<i64> = state
                .images
                .values()
                .filter(|img| img.task_id == task_id)
                .map(|img| img.id)
                .collect();

            state.images.retain(|_, img| img.task_id != task_id);
            state.faces.retain(|_, face| !image_ids.contains(&face.image_id));
        }

        // Disk cleanup must not undo a successful record deletion
        if let Err(e) = self.vault.remove_task_dir(task_id).await {
            warn!(task_id, error = %e, "Failed to remove task image folder");
        }

        info!(task_id, "Deleted task");
        Ok(())
    }

    async fn store_image(
        &self,
        task_id: TaskId,
        name: &str,
        bytes: &[u8],
    ) -> StoreResult<ImageRecord> {
        image::load_from_memory(bytes)
            .map_err(|e| StoreError::invalid_image(e.to_string()))?;

        let mut state = self.state.write().await;
        state.task(task_id)?;

        let duplicate = state
            .images
            .values()
            .any(|img| img.task_id == task_id && img.name == name);
        if duplicate {
            return Err(StoreError::conflict(format!(
                "task {task_id} already has an image named {name}"
            )));
        }

        let file_name = ImageVault::unique_file_name(name);
        self.vault.write(task_id, &file_name, bytes).await?;

        state.next_image_id += 1;
        let image_id = state.next_image_id;
        state.images.insert(
            image_id,
            ImageRow {
                id: image_id,
                task_id,
                name: name.to_string(),
                file_name: file_name.clone(),
                done: false,
            },
        );

        info!(task_id, image_id, name, "Stored task image");
        Ok(ImageRecord {
            id: image_id,
            task_id,
            name: name.to_string(),
            file_name,
            done: false,
            faces: Vec::new(),
        })
    }

    async fn read_image(&self, image: &ImageRecord) -> StoreResult<Vec<u8>> {
        Ok(self.vault.read(image.task_id, &image.file_name).await?)
    }

    async fn set_task_status(&self, task_id: TaskId, status: TaskStatus) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.task_mut(task_id)?.status = status;
        Ok(())
    }

    async fn claim_for_processing(&self, task_id: TaskId) -> StoreResult<TaskStatus> {
        let mut state = self.state.write().await;
        let row = state.task_mut(task_id)?;

        let prior = row.status;
        if matches!(prior, TaskStatus::New | TaskStatus::Error) {
            row.status = TaskStatus::InProgress;
        }
        Ok(prior)
    }

    async fn save_detections(&self, faces: &[Face], done_image_ids: &[i64]) -> StoreResult<()> {
        let mut state = self.state.write().await;

        for face in faces {
            state.next_face_id += 1;
            let face_id = state.next_face_id;
            let mut stored = face.clone();
            stored.id = face_id;
            state.faces.insert(face_id, stored);
        }

        for image_id in done_image_ids {
            match state.images.get_mut(image_id) {
                Some(img) => img.done = true,
                // Best-effort: a vanished image must not fail the batch
                None => warn!(image_id, "Done-flag update hit a missing image"),
            }
        }

        Ok(())
    }

    async fn save_statistics(&self, task_id: TaskId, stats: &Statistics) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let row = state.task_mut(task_id)?;
        row.statistics = *stats;
        row.status = TaskStatus::Completed;
        Ok(())
    }
}
