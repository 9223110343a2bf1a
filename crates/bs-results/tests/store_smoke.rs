use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use bs_core::{ItemSlot, ItemSpec, ItemSpecWithSlot};
use bs_results::*;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("{}_{}", prefix, nanos));
    dir
}

fn manifest(run_id: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        timestamp: timestamp.to_string(),
        item_count: 2,
        combinations: true,
        fast_mode: false,
        iterations_per_combo: 1000,
        result_count: 2,
    }
}

fn results() -> RankedResultSet {
    RankedResultSet {
        results: vec![
            BulkComboResult {
                items_added: vec![ItemSpecWithSlot {
                    item: ItemSpec::new(40432),
                    slot: ItemSlot::Trinket1,
                }],
                dps_average: 5120.25,
            },
            BulkComboResult {
                items_added: vec![],
                dps_average: 5000.0,
            },
        ],
        baseline: BulkComboResult {
            items_added: vec![],
            dps_average: 5000.0,
        },
    }
}

#[test]
fn save_and_load_run() {
    let store = RunStore::new(unique_temp_dir("bs_results_store")).unwrap();

    store
        .save_run(&manifest("run_abc", "2026-10-18T12:00:00+00:00"), &results())
        .unwrap();

    assert!(store.has_run("run_abc"));
    assert_eq!(store.load_manifest("run_abc").unwrap().result_count, 2);
    assert_eq!(store.load_results("run_abc").unwrap(), results());
}

#[test]
fn missing_run_is_reported() {
    let store = RunStore::new(unique_temp_dir("bs_results_missing")).unwrap();

    assert!(!store.has_run("nope"));
    assert!(matches!(
        store.load_results("nope"),
        Err(ResultsError::RunNotFound { .. })
    ));
}

#[test]
fn list_runs_sorted_by_timestamp() {
    let store = RunStore::new(unique_temp_dir("bs_results_list")).unwrap();

    store
        .save_run(&manifest("later", "2026-10-18T14:00:00+00:00"), &results())
        .unwrap();
    store
        .save_run(&manifest("earlier", "2026-10-18T09:00:00+00:00"), &results())
        .unwrap();

    let ids: Vec<String> = store
        .list_runs()
        .unwrap()
        .into_iter()
        .map(|m| m.run_id)
        .collect();
    assert_eq!(ids, vec!["earlier".to_string(), "later".to_string()]);

    store.delete_run("earlier").unwrap();
    assert_eq!(store.list_runs().unwrap().len(), 1);
}

#[test]
fn store_for_bag_lives_next_to_export() {
    let bag_dir = unique_temp_dir("bs_results_bag");
    fs::create_dir_all(&bag_dir).unwrap();
    let bag_path = bag_dir.join("bags.json");

    let store = RunStore::for_bag(&bag_path).unwrap();
    assert_eq!(store.root_dir(), bag_dir.join(".bulksim").join("runs"));
    assert!(store.root_dir().exists());
}
