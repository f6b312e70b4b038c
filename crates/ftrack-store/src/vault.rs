//! Sharded on-disk storage for uploaded images.
//!
//! Layout: `<root>/<task_id % 30000>/<task_id>/<file_name>`. The modulus
//! bounds the number of sibling folders at the first level no matter how
//! many tasks accumulate.

use std::path::PathBuf;

use ftrack_models::TaskId;

/// Maximum number of first-level shard folders.
const FOLDER_FAN_OUT: i64 = 30_000;

/// File storage for task images.
#[derive(Debug, Clone)]
pub struct ImageVault {
    root: PathBuf,
}

impl ImageVault {
    /// Create a vault rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding all images of one task.
    pub fn task_dir(&self, task_id: TaskId) -> PathBuf {
        let shard = task_id % FOLDER_FAN_OUT;
        self.root.join(shard.to_string()).join(task_id.to_string())
    }

    /// Derive a collision-free file name from an uploaded name.
    ///
    /// Appends a nanosecond timestamp before the extension, matching the
    /// vault's expectation that names never repeat within a task folder.
    pub fn unique_file_name(name: &str) -> String {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();

        match name.rsplit_once('.') {
            Some((stem, ext)) => format!("{stem}_{nanos}.{ext}"),
            None => format!("{name}_{nanos}"),
        }
    }

    /// Write image bytes under the task's folder, creating it as needed.
    pub async fn write(
        &self,
        task_id: TaskId,
        file_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<PathBuf> {
        let dir = self.task_dir(task_id);
        tokio::fs::create_dir_all(&dir).await?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Read image bytes back from the task's folder.
    pub async fn read(&self, task_id: TaskId, file_name: &str) -> std::io::Result<Vec<u8>> {
        let path = self.task_dir(task_id).join(file_name);
        tokio::fs::read(&path).await
    }

    /// Remove the task's folder with everything in it.
    pub async fn remove_task_dir(&self, task_id: TaskId) -> std::io::Result<()> {
        let dir = self.task_dir(task_id);
        match tokio::fs::remove_dir_all(&dir).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
