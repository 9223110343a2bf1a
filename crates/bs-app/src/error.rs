//! Error types for the bs-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the lower crates
/// and gives the CLI a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bag error: {0}")]
    Bag(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Bag index {index} out of range ({len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Simulation finished without a final result")]
    MissingFinalResult,

    #[error("Backend error: {message}")]
    Backend { message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for bs-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<bs_bag::BagError> for AppError {
    fn from(err: bs_bag::BagError) -> Self {
        match err {
            bs_bag::BagError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Bag(other.to_string()),
        }
    }
}

impl From<bs_bag::ValidationError> for AppError {
    fn from(err: bs_bag::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<bs_results::ResultsError> for AppError {
    fn from(err: bs_results::ResultsError) -> Self {
        match err {
            bs_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
