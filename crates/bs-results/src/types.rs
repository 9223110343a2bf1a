//! Result data types.

use bs_core::ItemSpecWithSlot;
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// One simulated gear combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkComboResult {
    /// Items swapped in relative to the equipped gear. Empty for the equipped gear itself.
    #[serde(default)]
    pub items_added: Vec<ItemSpecWithSlot>,
    pub dps_average: f64,
}

impl BulkComboResult {
    pub fn is_baseline(&self) -> bool {
        self.items_added.is_empty()
    }
}

/// Final output of a bulk run, best combination first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResultSet {
    pub results: Vec<BulkComboResult>,
    /// The currently equipped gear, simulated with the same settings.
    pub baseline: BulkComboResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub timestamp: String,
    pub item_count: usize,
    pub combinations: bool,
    pub fast_mode: bool,
    pub iterations_per_combo: u32,
    pub result_count: usize,
}

impl RunManifest {
    pub fn new(run_id: RunId, settings: &bs_bag::BulkSettings, results: &RankedResultSet) -> Self {
        Self {
            run_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            item_count: settings.items.len(),
            combinations: settings.combinations,
            fast_mode: settings.fast_mode,
            iterations_per_combo: settings.iterations_per_combo,
            result_count: results.results.len(),
        }
    }
}
