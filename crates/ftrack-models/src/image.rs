//! Image records attached to tasks.

use serde::{Deserialize, Serialize};

use crate::face::Face;
use crate::task::TaskId;

/// A single image attached to a task.
///
/// `done` marks that the image has been submitted to detection in some
/// run and must not be resubmitted; it flips exactly once, after a
/// successful detect call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub task_id: TaskId,
    /// Client-supplied name, unique within the task (case-sensitive)
    pub name: String,
    /// Uniquified on-disk file name
    pub file_name: String,
    pub done: bool,
    /// Faces detected on this image; populated by the full-state load
    #[serde(default)]
    pub faces: Vec<Face>,
}
