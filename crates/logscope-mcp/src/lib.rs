//! Logscope Log Analytics MCP Server
//!
//! An MCP (Model Context Protocol) server that lets an assistant query and
//! analyse the task API's JSON-lines logs.
//!
//! ## Tools
//!
//! | Tool | Reads | Returns |
//! |------|-------|---------|
//! | `query_logs` | `app.log` or `errors.log` | newest matching entries |
//! | `analyze_errors` | `errors.log` | top modules/endpoints, recent messages |
//! | `get_slow_requests` | `app.log` | slowest requests above a threshold |
//! | `get_endpoint_stats` | `app.log` | per-endpoint count, latency, error rate |
//!
//! ## Usage
//!
//! ```bash
//! # Start the MCP server
//! cargo run -p logscope-mcp -- --log-dir /srv/api/logs
//!
//! # Or with logging
//! RUST_LOG=debug cargo run -p logscope-mcp
//! ```
//!
//! Every call re-reads the log files; nothing is cached between calls.

pub mod args;
pub mod error;
pub mod tools;

use std::fmt::Display;

use args::{
    parse_args, AnalyzeErrorsArgs, EndpointStatsArgs, OutputFormat, QueryLogsArgs,
    SlowRequestsArgs,
};
use error::ToolResult;
use logscope_core::analysis;
use logscope_core::{filter_records, read_log, FilterCriteria, LogConfig, LogSource};
use rmcp::model::{CallToolResult, Content};
use rmcp::Error as McpError;
use serde::Serialize;
use serde_json::{Map, Value};

pub use error::ToolError;
pub use tools::{tool_definitions, ToolDefinition};

/// Dispatches tool calls to the log pipeline
#[derive(Debug, Clone)]
pub struct LogAnalytics {
    config: LogConfig,
}

impl LogAnalytics {
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Run a tool by name.
    ///
    /// Unknown names produce a labelled text result rather than an error.
    /// Argument violations are rejected before any file is read.
    pub fn call_tool(&self, name: &str, arguments: Option<&Map<String, Value>>) -> ToolResult<String> {
        tracing::info!(tool = %name, "Tool call");

        match name {
            tools::QUERY_LOGS => self.query_logs(&parse_args(name, arguments)?),
            tools::ANALYZE_ERRORS => self.analyze_errors(&parse_args(name, arguments)?),
            tools::GET_SLOW_REQUESTS => self.get_slow_requests(&parse_args(name, arguments)?),
            tools::GET_ENDPOINT_STATS => self.get_endpoint_stats(&parse_args(name, arguments)?),
            _ => {
                tracing::warn!(tool = %name, "Unknown tool requested");
                Ok(format!("Unknown tool: {}", name))
            }
        }
    }

    // =========================================================================
    // Tools
    // =========================================================================

    /// Newest entries of a log file matching every given filter
    pub fn query_logs(&self, args: &QueryLogsArgs) -> ToolResult<String> {
        let source = args.source()?;
        let criteria = args.criteria()?;
        let limit = args.limit()?;

        let records = read_log(&self.config, source, self.config.tail_lines)?;
        let read = records.len();
        let records = filter_records(records, &criteria);

        tracing::debug!(source = %source, read, matched = records.len(), limit, "Queried logs");
        render(&analysis::list_recent(records, limit), args.format())
    }

    /// Summary of errors within a window
    pub fn analyze_errors(&self, args: &AnalyzeErrorsArgs) -> ToolResult<String> {
        let since_minutes = args.since_minutes()?;

        let records = read_log(&self.config, LogSource::Errors, self.config.tail_lines)?;
        let records = filter_records(records, &FilterCriteria::new().with_since_minutes(since_minutes));

        render(&analysis::summarize_errors(&records, since_minutes), args.format())
    }

    /// Slowest requests in the recent tail of `app.log`
    pub fn get_slow_requests(&self, args: &SlowRequestsArgs) -> ToolResult<String> {
        let threshold_ms = args.threshold_ms()?;
        let limit = args.limit()?;

        let records = read_log(&self.config, LogSource::App, self.config.tail_lines)?;

        render(&analysis::rank_slow_requests(records, threshold_ms, limit), args.format())
    }

    /// Per-endpoint statistics within a window
    pub fn get_endpoint_stats(&self, args: &EndpointStatsArgs) -> ToolResult<String> {
        let since_minutes = args.since_minutes()?;

        let records = read_log(&self.config, LogSource::App, self.config.stats_tail_lines)?;
        let records = filter_records(records, &FilterCriteria::new().with_since_minutes(since_minutes));

        render(&analysis::endpoint_stats(&records, since_minutes), args.format())
    }
}

/// Map a tool outcome onto the MCP reply.
///
/// Argument violations are protocol errors (`invalid_params`); any other
/// failure is an error-flagged text result the caller can read.
pub fn call_tool_result(outcome: ToolResult<String>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(ToolError::InvalidArguments(message)) => Err(McpError::invalid_params(message, None)),
        Err(e) => {
            tracing::error!(error = %e, "Tool call failed");
            Ok(CallToolResult::error(vec![Content::text(format!("Error: {}", e))]))
        }
    }
}

fn render<R: Display + Serialize>(report: &R, format: OutputFormat) -> ToolResult<String> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
