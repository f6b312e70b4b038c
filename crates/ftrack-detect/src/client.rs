//! Face Cloud HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{DetectError, DetectResult};
use crate::gateway::DetectionGateway;
use crate::types::{DetectResponse, DetectedFace, LoginRequest, LoginResponse};

/// Configuration for the Face Cloud client.
#[derive(Debug, Clone)]
pub struct FaceCloudConfig {
    /// Base URL of the Face Cloud API
    pub base_url: String,
    /// Login email
    pub email: String,
    /// Login password
    pub password: String,
    /// Request timeout
    pub timeout: Duration,
}

impl FaceCloudConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("FACE_CLOUD_API_URL")
                .unwrap_or_else(|_| "https://backend.facecloud.tevian.ru/api/v1".to_string()),
            email: std::env::var("FACE_CLOUD_API_USER").unwrap_or_default(),
            password: std::env::var("FACE_CLOUD_API_PASS").unwrap_or_default(),
            timeout: Duration::from_secs(
                std::env::var("FACE_CLOUD_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}

/// HTTP client for the Face Cloud detection service.
pub struct FaceCloudClient {
    http: Client,
    config: FaceCloudConfig,
}

impl FaceCloudClient {
    /// Create a new Face Cloud client.
    pub fn new(config: FaceCloudConfig) -> DetectResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DetectError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> DetectResult<Self> {
        Self::new(FaceCloudConfig::from_env())
    }
}

#[async_trait]
impl DetectionGateway for FaceCloudClient {
    async fn login(&self) -> DetectResult<String> {
        let url = format!("{}/login", self.config.base_url);

        debug!("Requesting Face Cloud token from {}", url);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                email: self.config.email.clone(),
                password: self.config.password.clone(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DetectError::LoginFailed(format!(
                "Face Cloud returned {}: {}",
                status, body
            )));
        }

        let login: LoginResponse = response.json().await?;
        Ok(login.data.access_token)
    }

    async fn detect(&self, token: &str, image: &[u8]) -> DetectResult<Vec<DetectedFace>> {
        let url = format!("{}/detect?demographics=true", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(image.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DetectError::RequestFailed(format!(
                "Face Cloud returned {}: {}",
                status, body
            )));
        }

        let detect: DetectResponse = response.json().await?;
        Ok(detect.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String) -> FaceCloudConfig {
        FaceCloudConfig {
            base_url,
            email: "svc@example.com".to_string(),
            password: "secret".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(serde_json::json!({
                "email": "svc@example.com",
                "password": "secret",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"access_token": "tok-123"},
                "status_code": 200,
            })))
            .mount(&server)
            .await;

        let client = FaceCloudClient::new(config(server.uri())).unwrap();
        assert_eq!(client.login().await.unwrap(), "tok-123");
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
            .mount(&server)
            .await;

        let client = FaceCloudClient::new(config(server.uri())).unwrap();
        let err = client.login().await.unwrap_err();
        assert!(matches!(err, DetectError::LoginFailed(_)));
        assert!(err.to_string().contains("bad credentials"));
    }

    #[tokio::test]
    async fn test_detect_sends_jpeg_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/detect"))
            .and(query_param("demographics", "true"))
            .and(header("authorization", "Bearer tok-123"))
            .and(header("content-type", "image/jpeg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "demographics": {
                        "gender": "female",
                        "age": {"mean": 28.4, "variance": 3.0}
                    },
                    "bbox": {"height": 100, "width": 80, "x": 5, "y": 9}
                }],
                "rotation": 0,
                "status_code": 200,
            })))
            .mount(&server)
            .await;

        let client = FaceCloudClient::new(config(server.uri())).unwrap();
        let faces = client.detect("tok-123", b"jpeg bytes").await.unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].demographics.gender, "female");
    }

    #[tokio::test]
    async fn test_detect_error_status_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/detect"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = FaceCloudClient::new(config(server.uri())).unwrap();
        let err = client.detect("tok-123", b"jpeg bytes").await.unwrap_err();
        assert!(matches!(err, DetectError::RequestFailed(_)));
    }
}
