//! The detection gateway trait consumed by the processing pipeline.

use async_trait::async_trait;

use crate::error::DetectResult;
use crate::types::DetectedFace;

/// Face detection backend.
///
/// The pipeline holds this behind an `Arc` so tests can swap the HTTP
/// client for a scripted stand-in.
#[async_trait]
pub trait DetectionGateway: Send + Sync {
    /// Obtain an access token for subsequent detect calls.
    async fn login(&self) -> DetectResult<String>;

    /// Submit one JPEG and return the faces found in it.
    async fn detect(&self, token: &str, image: &[u8]) -> DetectResult<Vec<DetectedFace>>;
}
