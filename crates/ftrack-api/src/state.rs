//! Application state.

use std::sync::Arc;

use ftrack_detect::FaceCloudClient;
use ftrack_pipeline::{PipelineConfig, TaskService};
use ftrack_store::LocalStore;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub service: Arc<TaskService>,
}

impl AppState {
    /// Create application state with the bundled store and the real
    /// detection client.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = Arc::new(LocalStore::new(config.data_dir.clone()));
        let detector = Arc::new(FaceCloudClient::from_env()?);
        let service = Arc::new(TaskService::new(
            store,
            detector,
            PipelineConfig::from_env(),
        ));

        Ok(Self { config, service })
    }

    /// Create application state around an existing service.
    pub fn with_service(config: ApiConfig, service: Arc<TaskService>) -> Self {
        Self { config, service }
    }
}
