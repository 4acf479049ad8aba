//! Structured log records.
//!
//! One JSON object per line, as written by the API service's JSON formatter:
//!
//! ```text
//! {"timestamp": "2026-01-21T14:30:45.123456", "level": "INFO", "logger": "api",
//!  "message": "GET /tasks", "module": "main", "function": "list_tasks", "line": 88,
//!  "endpoint": "/tasks", "method": "GET", "status_code": 200, "duration_ms": 12.4}
//! ```
//!
//! Every recognised field is optional. Fields the service adds ad hoc
//! (`user_id`, `task_id`, ...) are kept in [`LogRecord::extra`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Placeholder used when grouping records that carry no endpoint.
pub const UNKNOWN: &str = "unknown";

/// Placeholder used when displaying a missing field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Naive layouts accepted in addition to RFC 3339. Naive values are UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The standard levels the producer emits.
///
/// Records keep their level as a free-form string; this type is for
/// validating caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown level: {}. Valid: DEBUG, INFO, WARNING, ERROR, CRITICAL",
                    s
                )
            })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parsed log line.
///
/// Records are never mutated after parsing; filters and aggregators only
/// move them between collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// ISO 8601 timestamp as written by the producer
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<String>,

    /// DEBUG, INFO, WARNING, ERROR or CRITICAL (other values pass through)
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<String>,

    /// Logger name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logger: Option<String>,

    /// Emitting module
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Emitting function
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Source line of the log call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Request path, present on records describing a served request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// HTTP method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,

    /// Request latency in milliseconds, kept as written (`1500` vs `1500.0`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<Number>,

    /// Formatted stack trace
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,

    /// Unrecognised keys, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogRecord {
    /// Decode one line. Surrounding whitespace (including `\r\n`) is ignored.
    pub fn from_json_line(line: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(line)
    }

    /// Duration as a float, if present.
    pub fn duration(&self) -> Option<f64> {
        self.duration_ms.as_ref().and_then(Number::as_f64)
    }

    /// Duration, with a missing value counting as zero.
    pub fn duration_or_zero(&self) -> f64 {
        self.duration().unwrap_or(0.0)
    }

    /// Duration as the producer wrote it, `0` when missing.
    pub fn duration_label(&self) -> String {
        self.duration_ms
            .as_ref()
            .map_or_else(|| "0".to_string(), Number::to_string)
    }

    /// Set the duration from a float. Non-finite values clear it.
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Number::from_f64(duration_ms);
        self
    }

    /// Endpoint, or `default` when the record has none.
    pub fn endpoint_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.endpoint.as_deref().unwrap_or(default)
    }

    pub fn module_or_unknown(&self) -> &str {
        self.module.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn timestamp_or_na(&self) -> &str {
        self.timestamp.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// True for `ERROR` and `CRITICAL` (exact, case-sensitive match).
    pub fn is_error(&self) -> bool {
        matches!(self.level.as_deref(), Some("ERROR") | Some("CRITICAL"))
    }

    /// The timestamp as an instant, if present and in a recognised layout.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }
}

/// Accept any JSON value for a free-form text field: strings as-is, `null`
/// as absent, anything else as its JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 with an offset, naive date-times (`T` or space
/// separated, optional fractional seconds) read as UTC, and bare dates
/// (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
