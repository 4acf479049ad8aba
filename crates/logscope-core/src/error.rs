//! Error types for Logscope

use thiserror::Error;

/// Main error type for log reading and analysis
#[derive(Error, Debug)]
pub enum LogError {
    /// Log source name did not match a known file
    #[error("Unknown log source: {0} (expected 'app' or 'errors')")]
    UnknownSource(String),

    /// Reading the log file failed for a reason other than absence
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Logscope operations
pub type Result<T> = std::result::Result<T, LogError>;
