use std::time::Instant;

use bs_results::RankedResultSet;

use crate::snapshot::ProgressSnapshot;
use crate::state::{RunState, advance};
use crate::view::StatusView;

/// Events published while a bulk run is in flight, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkEvent {
    Started { run_id: String, fast_mode: bool },
    Progress(StatusView),
    /// Always the last event of a run.
    Completed(RankedResultSet),
}

/// What the controller produced for one snapshot.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub view: StatusView,
    pub completed: Option<RankedResultSet>,
}

impl ProgressUpdate {
    pub fn is_final(&self) -> bool {
        self.completed.is_some()
    }

    /// Progress first, then completion if this snapshot ended the run.
    pub fn into_events(self) -> Vec<BulkEvent> {
        let mut events = vec![BulkEvent::Progress(self.view)];
        if let Some(result) = self.completed {
            events.push(BulkEvent::Completed(result));
        }
        events
    }
}

/// Holds the [`RunState`] of the current run between snapshots.
///
/// Calls must be serialized by the caller; the controller does no locking.
#[derive(Debug, Clone)]
pub struct BulkProgressController {
    fast_mode: bool,
    state: Option<RunState>,
}

impl BulkProgressController {
    pub fn new(fast_mode: bool) -> Self {
        Self {
            fast_mode,
            state: None,
        }
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    /// Start timing a new run, dropping whatever state a previous run left.
    pub fn begin_run(&mut self, now: Instant) {
        self.state = Some(RunState::start(now));
    }

    /// Fold in one snapshot. A snapshot arriving with no run in progress
    /// starts one at `now`.
    pub fn on_snapshot(&mut self, snapshot: ProgressSnapshot, now: Instant) -> ProgressUpdate {
        let state = self.state.take().unwrap_or_else(|| RunState::start(now));
        let step = advance(state, snapshot, now, self.fast_mode);

        if step.completed.is_none() {
            self.state = Some(step.state);
        } else {
            tracing::debug!("bulk run finished, progress state reset");
        }

        ProgressUpdate {
            view: step.view,
            completed: step.completed,
        }
    }

    pub fn state(&self) -> Option<&RunState> {
        self.state.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }
}
