//! HTTP surface of the FaceTrack backend.
//!
//! Task routes live under `/api/tasks` behind basic auth; `/health` is
//! open. Handlers translate between the HTTP world and the
//! [`TaskService`](ftrack_pipeline::TaskService) lifecycle operations.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
