//! Shared data models for the FaceTrack backend.
//!
//! This crate provides Serde-serializable types for:
//! - Tasks and their status lifecycle
//! - Images attached to tasks
//! - Detected faces and bounding boxes
//! - Aggregated task statistics

pub mod face;
pub mod image;
pub mod stats;
pub mod task;

// Re-export common types
pub use face::{BoundingBox, Face, GENDER_FEMALE, GENDER_MALE};
pub use image::ImageRecord;
pub use stats::aggregate_statistics;
pub use task::{Statistics, Task, TaskId, TaskStatus};
