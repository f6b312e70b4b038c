//! Task models and the status lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::image::ImageRecord;

/// Identifier of a task, assigned sequentially by the store.
pub type TaskId = i64;

/// Task processing status.
///
/// Lifecycle: `new -> in_progress -> {completed, error}`. `completed` is
/// terminal; an `error` task may be re-triggered by hand and will resubmit
/// only images whose done flag is still false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Freshly created, images may still be attached
    #[default]
    New,
    /// A processing run has been started
    InProgress,
    /// All images processed and statistics persisted
    Completed,
    /// The last processing run failed
    Error,
}

impl TaskStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::New => "new",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Error => "error",
        }
    }

    /// Whether images may still be attached in this status.
    pub fn can_accept_images(&self) -> bool {
        matches!(self, TaskStatus::New)
    }

    /// Whether the task may be deleted in this status.
    ///
    /// Deletion is refused mid-flight; every other status, including
    /// `error`, is deletable.
    pub fn can_delete(&self) -> bool {
        !matches!(self, TaskStatus::InProgress)
    }

    /// Check if this is a terminal state for automatic processing.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated face statistics, stored denormalized on the task.
///
/// Recomputed wholesale when a task completes; never updated
/// incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Statistics {
    /// Total number of detected faces across all images
    pub faces_total: u32,
    /// Faces with gender "male"
    pub faces_male: u32,
    /// Faces with gender "female"
    pub faces_female: u32,
    /// Average male age (0 when no male faces)
    pub age_male_avg: u32,
    /// Average female age (0 when no female faces)
    pub age_female_avg: u32,
}

/// A unit of work: a batch of images to run through face detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub status: TaskStatus,
    pub statistics: Statistics,
    /// Nested images with their faces; populated by the full-state load
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}
