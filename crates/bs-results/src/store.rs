//! Run storage API.

use crate::types::{RankedResultSet, RunManifest};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store living next to a bag export: `<bag dir>/.bulksim/runs`.
    pub fn for_bag(bag_path: &Path) -> ResultsResult<Self> {
        let bag_dir = bag_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "bag path has no parent directory".to_string(),
            })?;
        let runs_dir = bag_dir.join(".bulksim").join("runs");
        Self::new(runs_dir)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        let dir = self.run_dir(run_id);
        dir.join("manifest.json").exists() && dir.join("results.json").exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, results: &RankedResultSet) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        let results_json = serde_json::to_string_pretty(results)?;
        fs::write(run_dir.join("results.json"), results_json)?;

        // Manifest last: has_run() keys off both files.
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join("manifest.json"), manifest_json)?;

        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id).join("manifest.json");

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    pub fn load_results(&self, run_id: &str) -> ResultsResult<RankedResultSet> {
        let results_path = self.run_dir(run_id).join("results.json");

        if !results_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(results_path)?;
        let results = serde_json::from_str(&content)?;
        Ok(results)
    }

    /// All stored runs, oldest first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}
