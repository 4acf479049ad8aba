//! Typed tool arguments.
//!
//! Arguments arrive as a JSON object. Deserialization checks types and enum
//! membership; the accessors then apply defaults and range checks. JSON
//! `null` is treated the same as an absent key, and unknown keys are ignored.

use logscope_core::analysis::{
    DEFAULT_QUERY_LIMIT, DEFAULT_SINCE_MINUTES, DEFAULT_SLOW_LIMIT, DEFAULT_SLOW_THRESHOLD_MS,
};
use logscope_core::{FilterCriteria, LogLevel, LogSource};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ToolError, ToolResult};

/// How a report is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON of the report structure
    Json,
}

/// Arguments for `query_logs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryLogsArgs {
    /// Required: which file to read
    pub log_type: Option<LogSource>,
    pub level: Option<LogLevel>,
    pub endpoint: Option<String>,
    pub module: Option<String>,
    pub min_duration_ms: Option<f64>,
    pub since_minutes: Option<f64>,
    pub limit: Option<f64>,
    pub format: Option<OutputFormat>,
}

impl QueryLogsArgs {
    pub fn new(log_type: LogSource) -> Self {
        Self {
            log_type: Some(log_type),
            ..Default::default()
        }
    }

    pub fn source(&self) -> ToolResult<LogSource> {
        self.log_type.ok_or_else(|| {
            ToolError::InvalidArguments("missing required argument: log_type".into())
        })
    }

    /// Filter criteria built from the optional predicates.
    pub fn criteria(&self) -> ToolResult<FilterCriteria> {
        let mut criteria = FilterCriteria::new();
        if let Some(level) = self.level {
            criteria = criteria.with_level(level.as_str());
        }
        if let Some(module) = &self.module {
            criteria = criteria.with_module(module.clone());
        }
        if let Some(endpoint) = &self.endpoint {
            criteria = criteria.with_endpoint(endpoint.clone());
        }
        if let Some(floor) = self.min_duration_ms {
            criteria = criteria.with_min_duration_ms(finite(floor, "min_duration_ms")?);
        }
        if let Some(minutes) = self.since_minutes {
            criteria = criteria.with_since_minutes(non_negative(minutes, "since_minutes")?);
        }
        Ok(criteria)
    }

    pub fn limit(&self) -> ToolResult<usize> {
        count(self.limit, "limit", DEFAULT_QUERY_LIMIT)
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Arguments for `analyze_errors`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeErrorsArgs {
    pub since_minutes: Option<f64>,
    pub format: Option<OutputFormat>,
}

impl AnalyzeErrorsArgs {
    pub fn since_minutes(&self) -> ToolResult<f64> {
        minutes(self.since_minutes)
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Arguments for `get_slow_requests`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlowRequestsArgs {
    pub threshold_ms: Option<f64>,
    pub limit: Option<f64>,
    pub format: Option<OutputFormat>,
}

impl SlowRequestsArgs {
    pub fn threshold_ms(&self) -> ToolResult<f64> {
        finite(
            self.threshold_ms.unwrap_or(DEFAULT_SLOW_THRESHOLD_MS),
            "threshold_ms",
        )
    }

    pub fn limit(&self) -> ToolResult<usize> {
        count(self.limit, "limit", DEFAULT_SLOW_LIMIT)
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Arguments for `get_endpoint_stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointStatsArgs {
    pub since_minutes: Option<f64>,
    pub format: Option<OutputFormat>,
}

impl EndpointStatsArgs {
    pub fn since_minutes(&self) -> ToolResult<f64> {
        minutes(self.since_minutes)
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Deserialize a tool's argument object. A missing object is an empty one.
pub fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Option<&Map<String, Value>>) -> ToolResult<T> {
    let object = arguments.cloned().unwrap_or_default();
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ToolError::InvalidArguments(format!("{}: {}", tool, e)))
}

fn finite(value: f64, name: &str) -> ToolResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ToolError::InvalidArguments(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

fn non_negative(value: f64, name: &str) -> ToolResult<f64> {
    let value = finite(value, name)?;
    if value < 0.0 {
        return Err(ToolError::InvalidArguments(format!(
            "{} must not be negative, got {}",
            name, value
        )));
    }
    Ok(value)
}

fn minutes(value: Option<f64>) -> ToolResult<f64> {
    non_negative(value.unwrap_or(DEFAULT_SINCE_MINUTES), "since_minutes")
}

/// A whole count; fractional values are floored.
fn count(value: Option<f64>, name: &str, default: usize) -> ToolResult<usize> {
    match value {
        None => Ok(default),
        Some(v) => Ok(non_negative(v, name)?.floor() as usize),
    }
}
