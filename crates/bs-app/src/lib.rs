//! Shared application service layer for bulk gear simulation.
//!
//! This crate gives front ends a single interface for managing the bag of
//! items, running bulk simulations with live progress, and querying cached
//! results.

pub mod backend;
pub mod bag_service;
pub mod config;
pub mod error;
pub mod query;
pub mod run_service;
pub mod run_worker;

// Re-export key types for convenience
pub use backend::{BulkSimBackend, ReplayBackend};
pub use bag_service::{BAG_INTRO_TEXT, BulkBag};
pub use config::{BulkConfig, ITERATIONS_ENV, load_config};
pub use error::{AppError, AppResult};
pub use query::{RunSummary, get_run_summary, list_runs, load_run};
pub use run_service::{
    BulkRunRequest, BulkRunResponse, RunOptions, run_bulk, run_bulk_with_events,
};
pub use run_worker::{RunWorker, WorkerMessage};
