//! Query helpers for stored and freshly produced result sets.

use bs_results::{RankedResultSet, RunManifest, RunStore};

use crate::error::{AppError, AppResult};

/// Headline numbers of a ranked result set.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub result_count: usize,
    pub baseline_dps: f64,
    pub best_dps: f64,
    /// Best DPS minus the equipped gear's DPS.
    pub best_delta: f64,
    /// Combinations that beat the equipped gear.
    pub improving_count: usize,
}

pub fn get_run_summary(results: &RankedResultSet) -> AppResult<RunSummary> {
    let best = results
        .results
        .first()
        .ok_or_else(|| AppError::InvalidInput("No results in run".to_string()))?;

    let baseline_dps = results.baseline.dps_average;
    let improving_count = results
        .results
        .iter()
        .filter(|r| r.dps_average > baseline_dps)
        .count();

    Ok(RunSummary {
        result_count: results.results.len(),
        baseline_dps,
        best_dps: best.dps_average,
        best_delta: best.dps_average - baseline_dps,
        improving_count,
    })
}

/// List all cached runs, oldest first.
pub fn list_runs(store: &RunStore) -> AppResult<Vec<RunManifest>> {
    Ok(store.list_runs()?)
}

/// Load a cached run's manifest and results.
pub fn load_run(store: &RunStore, run_id: &str) -> AppResult<(RunManifest, RankedResultSet)> {
    let manifest = store.load_manifest(run_id)?;
    let results = store.load_results(run_id)?;
    Ok((manifest, results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bs_results::BulkComboResult;

    fn combo(dps: f64) -> BulkComboResult {
        BulkComboResult {
            items_added: vec![],
            dps_average: dps,
        }
    }

    #[test]
    fn summary_counts_improvements() {
        let set = RankedResultSet {
            results: vec![combo(1100.0), combo(1050.0), combo(1000.0), combo(990.0)],
            baseline: combo(1000.0),
        };
        let summary = get_run_summary(&set).unwrap();
        assert_eq!(summary.result_count, 4);
        assert_eq!(summary.improving_count, 2);
        assert!((summary.best_delta - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_results_rejected() {
        let set = RankedResultSet {
            results: vec![],
            baseline: combo(1000.0),
        };
        assert!(matches!(
            get_run_summary(&set),
            Err(AppError::InvalidInput(_))
        ));
    }
}
