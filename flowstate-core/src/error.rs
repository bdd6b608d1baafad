//! Error types for flowstate-core

use thiserror::Error;

/// Main error type for the flowstate-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A string that is not a `YYYY-MM-DD` calendar date
    #[error("invalid date key: {0}")]
    InvalidDateKey(String),

    /// No task at the given position for that day
    #[error("no task #{index} on {date}")]
    TaskNotFound { date: String, index: usize },

    /// Topic text was empty after trimming
    #[error("topic text must not be empty")]
    EmptyTopic,
}

/// Result type alias for flowstate-core
pub type Result<T> = std::result::Result<T, Error>;
