use bs_results::RankedResultSet;
use serde::{Deserialize, Serialize};

/// One progress report from the simulation engine.
///
/// Counts are signed so that whatever the engine sends can be represented;
/// consumers clamp them for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub completed_iterations: i64,
    #[serde(default)]
    pub total_iterations: i64,
    #[serde(default)]
    pub completed_sims: i64,
    #[serde(default)]
    pub total_sims: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_result: Option<RankedResultSet>,
}

impl ProgressSnapshot {
    pub fn new(
        completed_iterations: i64,
        total_iterations: i64,
        completed_sims: i64,
        total_sims: i64,
    ) -> Self {
        Self {
            completed_iterations,
            total_iterations,
            completed_sims,
            total_sims,
            final_result: None,
        }
    }

    pub fn with_final_result(mut self, result: RankedResultSet) -> Self {
        self.final_result = Some(result);
        self
    }

    pub fn is_final(&self) -> bool {
        self.final_result.is_some()
    }
}
