//! Client for the Face Cloud detection service.
//!
//! The service takes a raw JPEG and returns the faces it found, each with
//! demographics (gender plus an age estimate). Access requires a bearer
//! token obtained through a login call; the processing pipeline fetches
//! one token per run and reuses it across all submissions.

pub mod client;
pub mod error;
pub mod gateway;
pub mod types;

pub use client::{FaceCloudClient, FaceCloudConfig};
pub use error::{DetectError, DetectResult};
pub use gateway::DetectionGateway;
pub use types::{AgeEstimate, DetectedFace, Demographics, FaceBox};
