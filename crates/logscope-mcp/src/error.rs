//! Error types for the log analytics tools

use logscope_core::LogError;
use thiserror::Error;

/// Errors that can occur while dispatching a tool call
#[derive(Error, Debug)]
pub enum ToolError {
    /// Arguments failed schema validation; nothing was read
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading or analysing the logs failed
    #[error("Log error: {0}")]
    Log(#[from] LogError),

    /// Report could not be rendered as JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    /// Whether the caller broke the argument contract
    pub fn is_invalid_arguments(&self) -> bool {
        matches!(self, ToolError::InvalidArguments(_))
    }
}

/// Result type for tool operations
pub type ToolResult<T> = Result<T, ToolError>;
