//! Progress tracking for bulk simulation runs.
//!
//! The engine reports [`ProgressSnapshot`]s; [`BulkProgressController`] turns
//! them into [`StatusView`]s, estimates refining rounds in fast mode and
//! hands over the final [`bs_results::RankedResultSet`] when the run ends.

pub mod controller;
pub mod snapshot;
pub mod state;
pub mod view;

pub use controller::{BulkEvent, BulkProgressController, ProgressUpdate};
pub use snapshot::ProgressSnapshot;
pub use state::{
    FAST_MODE_FINAL_POOL, ProgressStep, RunState, advance, estimate_total_rounds,
    seconds_remaining,
};
pub use view::{CALCULATING_LABEL, StatusView};
