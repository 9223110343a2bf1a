//! bs-results: ranked bulk results, their display and the run store.

pub mod hash;
pub mod ranking;
pub mod store;
pub mod types;

pub use hash::compute_run_id;
pub use ranking::{
    DeltaSign, NO_CHANGES_MESSAGE, RankedEntryView, RankedItemLine, format_dps, format_dps_delta,
    rank_entry, rank_results, results_visible,
};
pub use store::RunStore;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
