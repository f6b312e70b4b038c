//! Pipeline error types.

use ftrack_detect::DetectError;
use ftrack_store::StoreError;
use thiserror::Error;

pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Detection error: {0}")]
    Detection(#[from] DetectError),

    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for TaskError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => TaskError::NotFound(msg),
            StoreError::Conflict(msg) => TaskError::Conflict(msg),
            StoreError::InvalidImage(msg) => TaskError::InvalidImage(msg),
            other => TaskError::Store(other),
        }
    }
}

impl TaskError {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
