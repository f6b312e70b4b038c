//! Pipeline configuration.

/// Tuning knobs for the processing run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of detection submissions in flight per run
    pub max_in_flight: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { max_in_flight: 10 }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            max_in_flight: std::env::var("FACETRACK_MAX_IN_FLIGHT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(10),
        }
    }
}
