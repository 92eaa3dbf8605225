use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading a roster file
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid roster JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Failures while persisting the answer cache
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Top-level error for the command line driver
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl AppError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 2,
            AppError::Roster(_) => 3,
            AppError::Cache(_) => 4,
            AppError::Logging(_) => 5,
        }
    }
}
