//! Content-based hashing for run IDs.

use bs_bag::{BulkSettings, ItemDatabase};
use sha2::{Digest, Sha256};

pub fn compute_run_id(settings: &BulkSettings, db: &ItemDatabase) -> String {
    let mut hasher = Sha256::new();

    let settings_json = serde_json::to_string(settings).unwrap_or_default();
    hasher.update(settings_json.as_bytes());

    let db_json = serde_json::to_string(db).unwrap_or_default();
    hasher.update(db_json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
