//! Task lifecycle and face detection pipeline.
//!
//! [`TaskService`] is the entry point the HTTP layer talks to. It owns
//! lifecycle decisions (which operations a task in a given status
//! accepts) and launches the detached processing run implemented in
//! [`processor`]: bounded fan-out of image submissions to the detection
//! gateway, fan-in over a channel, best-effort persistence of partial
//! results, and final statistics aggregation.

pub mod config;
pub mod enrich;
pub mod error;
pub mod processor;
pub mod service;

pub use config::PipelineConfig;
pub use error::{TaskError, TaskResult};
pub use service::TaskService;
