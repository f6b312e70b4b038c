//! Detected face models.

use serde::{Deserialize, Serialize};

/// Gender bucket counted toward the male average.
pub const GENDER_MALE: &str = "male";

/// Gender bucket counted toward the female average.
pub const GENDER_FEMALE: &str = "female";

/// Pixel-unit bounding box of a detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BoundingBox {
    pub height: i32,
    pub width: i32,
    pub x: i32,
    pub y: i32,
}

/// One detected face within an image. Immutable once created.
///
/// `gender` is stored verbatim as reported by the detection service.
/// Values other than "male"/"female" count toward the face total but
/// toward neither age average.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    pub id: i64,
    pub image_id: i64,
    pub gender: String,
    /// Estimated age, rounded from the service's continuous mean
    pub age: u32,
    pub bbox: BoundingBox,
}
