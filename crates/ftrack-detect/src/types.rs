//! Wire types of the Face Cloud API.

use serde::{Deserialize, Serialize};

/// Credentials sent to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Envelope returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
    #[serde(default)]
    pub status_code: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub access_token: String,
}

/// Envelope returned by the detect endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub data: Vec<DetectedFace>,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub status_code: i32,
}

/// One face found in a submitted image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedFace {
    pub demographics: Demographics,
    pub bbox: FaceBox,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    pub gender: String,
    pub age: AgeEstimate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeEstimate {
    pub mean: f64,
    pub variance: f64,
}

/// Face location in image coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FaceBox {
    pub height: i32,
    pub width: i32,
    pub x: i32,
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_response_deserializes() {
        let body = r#"{
            "data": [{
                "demographics": {
                    "gender": "male",
                    "age": {"mean": 32.7, "variance": 4.1}
                },
                "bbox": {"height": 120, "width": 90, "x": 14, "y": 22}
            }],
            "rotation": 0,
            "status_code": 200
        }"#;

        let response: DetectResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.data.len(), 1);
        let face = &response.data[0];
        assert_eq!(face.demographics.gender, "male");
        assert_eq!(face.demographics.age.mean, 32.7);
        assert_eq!(face.bbox.width, 90);
    }

    #[test]
    fn test_detect_response_tolerates_missing_data() {
        let response: DetectResponse = serde_json::from_str(r#"{"status_code": 200}"#).unwrap();
        assert!(response.data.is_empty());
    }
}
