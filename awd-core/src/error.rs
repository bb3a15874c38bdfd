/// Error types for the wildfire core library
use thiserror::Error;

/// Fatal error raised while loading the observation dataset.
///
/// There is no degraded mode for a dashboard without data, so callers
/// surface this and abort startup.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// The dataset source could not be reached
    #[error("dataset source unreachable: {0}")]
    Unreachable(String),

    /// A required CSV column is missing from the header row
    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A row could not be normalized
    #[error("malformed dataset row at line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    /// Failed to parse CSV data
    #[error("failed to parse dataset CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to read a local dataset file
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The source parsed but held no observations
    #[error("dataset contains no observations")]
    Empty,

    /// The observation store rejected the data
    #[error("failed to build observation store: {0}")]
    Store(String),
}

/// A region code outside the seven known state/territory codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown region code '{0}'")]
pub struct UnknownRegion(pub String);

/// Type alias for Results using DataLoadError
pub type Result<T> = std::result::Result<T, DataLoadError>;
