//! Run defaults, loaded from an optional YAML file and the environment.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Overrides `iterations_per_combo` when set.
pub const ITERATIONS_ENV: &str = "BULKSIM_ITERATIONS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkConfig {
    pub iterations_per_combo: u32,
    pub combinations: bool,
    pub fast_mode: bool,
    pub use_cache: bool,
    /// Pause between replayed snapshots.
    pub replay_delay_ms: u64,
    /// Run store location. Defaults to a `.bulksim` directory next to the bag.
    pub store_dir: Option<PathBuf>,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            iterations_per_combo: 1000,
            combinations: true,
            fast_mode: false,
            use_cache: true,
            replay_delay_ms: 0,
            store_dir: None,
        }
    }
}

impl BulkConfig {
    /// Apply an iteration override as read from [`ITERATIONS_ENV`].
    pub fn with_iterations_override(mut self, value: Option<&str>) -> AppResult<Self> {
        if let Some(raw) = value {
            let iterations: u32 = raw.trim().parse().map_err(|_| {
                AppError::Config(format!(
                    "{} must be a positive integer, got '{}'",
                    ITERATIONS_ENV, raw
                ))
            })?;
            if iterations == 0 {
                return Err(AppError::Config(format!(
                    "{} must be positive",
                    ITERATIONS_ENV
                )));
            }
            self.iterations_per_combo = iterations;
        }
        Ok(self)
    }
}

/// Load configuration from `path` (or defaults), then apply the environment.
pub fn load_config(path: Option<&Path>) -> AppResult<BulkConfig> {
    let config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?
        }
        None => BulkConfig::default(),
    };

    let env_value = std::env::var(ITERATIONS_ENV).ok();
    let config = config.with_iterations_override(env_value.as_deref())?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
