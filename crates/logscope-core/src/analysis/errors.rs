//! Error summary: where errors come from and what they say.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{top_counts, CountEntry, TOP_K};
use crate::record::{LogRecord, NOT_AVAILABLE};

/// Text shown when the window holds no errors.
pub const NO_ERRORS_MESSAGE: &str = "No errors found in the specified time range.";

/// Timestamp and message of one recent error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentError {
    pub timestamp: String,
    pub message: String,
}

/// Frequency tables over a window of error records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSummary {
    pub since_minutes: f64,
    pub total: usize,
    pub top_modules: Vec<CountEntry>,
    pub top_endpoints: Vec<CountEntry>,
    /// Newest last
    pub recent: Vec<RecentError>,
}

impl ErrorSummary {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Summarize already-windowed error records.
pub fn summarize_errors(records: &[LogRecord], since_minutes: f64) -> ErrorSummary {
    let top_modules = top_counts(records.iter().map(|r| r.module_or_unknown()), TOP_K);
    let top_endpoints = top_counts(records.iter().map(|r| r.endpoint_or(NOT_AVAILABLE)), TOP_K);

    let recent = records[records.len().saturating_sub(TOP_K)..]
        .iter()
        .map(|r| RecentError {
            timestamp: r.timestamp_or_na().to_string(),
            message: r.message_or_empty().to_string(),
        })
        .collect();

    ErrorSummary {
        since_minutes,
        total: records.len(),
        top_modules,
        top_endpoints,
        recent,
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(NO_ERRORS_MESSAGE);
        }

        writeln!(f, "📊 Error Analysis (last {} minutes)", self.since_minutes)?;
        writeln!(f)?;
        writeln!(f, "Total Errors: {}", self.total)?;
        writeln!(f)?;

        writeln!(f, "Top Modules with Errors:")?;
        for entry in &self.top_modules {
            writeln!(f, "  • {}: {} errors", entry.name, entry.count)?;
        }

        writeln!(f)?;
        writeln!(f, "Top Endpoints with Errors:")?;
        for entry in &self.top_endpoints {
            writeln!(f, "  • {}: {} errors", entry.name, entry.count)?;
        }

        writeln!(f)?;
        writeln!(f, "Recent Error Messages:")?;
        for error in &self.recent {
            writeln!(f, "  • [{}] {}", error.timestamp, error.message)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(module: Option<&str>, endpoint: Option<&str>, message: &str) -> LogRecord {
        LogRecord {
            level: Some("ERROR".into()),
            module: module.map(String::from),
            endpoint: endpoint.map(String::from),
            message: Some(message.into()),
            timestamp: Some("2026-01-21T12:00:00".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_window_reports_no_errors() {
        let summary = summarize_errors(&[], 60.0);
        assert!(summary.is_empty());
        assert_eq!(summary.to_string(), NO_ERRORS_MESSAGE);
    }

    #[test]
    fn test_groups_modules_and_endpoints() {
        let records = vec![
            error(Some("auth"), Some("/login"), "bad password"),
            error(Some("tasks"), None, "db timeout"),
            error(Some("auth"), Some("/login"), "locked out"),
            error(None, Some("/tasks"), "boom"),
        ];

        let summary = summarize_errors(&records, 60.0);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.top_modules[0], CountEntry { name: "auth".into(), count: 2 });
        assert_eq!(summary.top_modules[1].name, "tasks");
        assert_eq!(summary.top_modules[2].name, "unknown");

        let endpoints: Vec<_> = summary.top_endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(endpoints, vec!["/login", "N/A", "/tasks"]);
    }

    #[test]
    fn test_keeps_five_most_recent_messages() {
        let records: Vec<_> = (0..8)
            .map(|i| error(Some("m"), None, &format!("error {}", i)))
            .collect();

        let summary = summarize_errors(&records, 60.0);
        let messages: Vec<_> = summary.recent.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["error 3", "error 4", "error 5", "error 6", "error 7"]);
    }

    #[test]
    fn test_top_tables_capped_at_five() {
        let modules = ["a", "b", "c", "d", "e", "f", "g"];
        let records: Vec<_> = modules.iter().map(|&m| error(Some(m), None, "x")).collect();

        let summary = summarize_errors(&records, 60.0);
        let names: Vec<_> = summary.top_modules.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_render() {
        let records = vec![error(Some("auth"), Some("/login"), "bad password")];
        let text = summarize_errors(&records, 30.0).to_string();

        assert_eq!(
            text,
            "📊 Error Analysis (last 30 minutes)\n\n\
             Total Errors: 1\n\n\
             Top Modules with Errors:\n\
             \x20 • auth: 1 errors\n\n\
             Top Endpoints with Errors:\n\
             \x20 • /login: 1 errors\n\n\
             Recent Error Messages:\n\
             \x20 • [2026-01-21T12:00:00] bad password\n"
        );
    }
}
