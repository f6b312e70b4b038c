//! Persistence boundary for the FaceTrack backend.
//!
//! The [`TaskStore`] trait is the narrow gateway the pipeline consumes:
//! task/image/face records plus the image bytes needed for detection.
//! [`LocalStore`] is the bundled implementation — records in memory,
//! image files in a sharded on-disk vault.

pub mod error;
pub mod gateway;
pub mod local;
pub mod vault;

pub use error::{StoreError, StoreResult};
pub use gateway::TaskStore;
pub use local::LocalStore;
pub use vault::ImageVault;
