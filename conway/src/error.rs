// error.rs - Error type shared by every part of the simulator

use thiserror::Error;

/// Errors raised by grid construction, parsing, configuration and the worker pool.
///
/// Expected negative outcomes (no pattern found, grid died out, trial cap
/// reached) are reported as values and never show up here.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimension { width: usize, height: usize },

    #[error("unknown pattern class selector {0} (expected 1, 2 or 3)")]
    UnknownPatternClass(u8),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to start worker runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("worker task failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for LifeError {
    fn from(err: tokio::task::JoinError) -> Self {
        LifeError::Worker(err.to_string())
    }
}

pub type LifeResult<T> = Result<T, LifeError>;
