use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Translation cache at {} is corrupt: {reason}", path.display())]
    CacheCorrupt { path: PathBuf, reason: String },

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Segment count mismatch: expected {expected}, got {got}")]
    SegmentMismatch { expected: usize, got: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ScoutError>;

/// Why a translation batch was thrown away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchFailure {
    Upstream(String),
    SegmentMismatch { expected: usize, got: usize },
}

impl std::fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchFailure::Upstream(reason) => write!(f, "upstream failure: {}", reason),
            BatchFailure::SegmentMismatch { expected, got } => {
                write!(f, "segment count mismatch: expected {}, got {}", expected, got)
            }
        }
    }
}

impl From<ScoutError> for BatchFailure {
    fn from(err: ScoutError) -> Self {
        match err {
            ScoutError::SegmentMismatch { expected, got } => {
                BatchFailure::SegmentMismatch { expected, got }
            }
            other => BatchFailure::Upstream(other.to_string()),
        }
    }
}
