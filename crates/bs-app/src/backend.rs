//! Simulation backend seam.

use std::path::Path;
use std::time::Duration;

use bs_bag::{BulkSettings, ItemDatabase};
use bs_progress::ProgressSnapshot;

use crate::error::{AppError, AppResult};

/// Something that can run a bulk simulation and report progress.
///
/// Implementations call `progress` for every snapshot, in order, and should
/// deliver exactly one snapshot carrying the final result, as the last one.
pub trait BulkSimBackend {
    fn run_bulk_sim(
        &mut self,
        settings: &BulkSettings,
        database: &ItemDatabase,
        progress: &mut dyn FnMut(ProgressSnapshot),
    ) -> AppResult<()>;
}

/// Replays a recorded run, one JSON snapshot per line.
#[derive(Debug, Clone, Default)]
pub struct ReplayBackend {
    snapshots: Vec<ProgressSnapshot>,
    delay: Duration,
}

impl ReplayBackend {
    pub fn new(snapshots: Vec<ProgressSnapshot>) -> Self {
        Self {
            snapshots,
            delay: Duration::ZERO,
        }
    }

    /// Parse a snapshot log. Blank lines are skipped.
    pub fn from_jsonl_str(content: &str) -> AppResult<Self> {
        let mut snapshots = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let snapshot: ProgressSnapshot = serde_json::from_str(line).map_err(|e| {
                AppError::InvalidInput(format!("replay log line {}: {}", index + 1, e))
            })?;
            snapshots.push(snapshot);
        }
        Ok(Self::new(snapshots))
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_jsonl_str(&content)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl BulkSimBackend for ReplayBackend {
    fn run_bulk_sim(
        &mut self,
        settings: &BulkSettings,
        database: &ItemDatabase,
        progress: &mut dyn FnMut(ProgressSnapshot),
    ) -> AppResult<()> {
        tracing::info!(
            snapshots = self.snapshots.len(),
            items = settings.items.len(),
            db_items = database.items.len(),
            "replaying bulk run"
        );
        for snapshot in &self.snapshots {
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            progress(snapshot.clone());
        }
        Ok(())
    }
}
