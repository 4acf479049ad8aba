//! Raw listing of the most recent matching records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::LogRecord;

/// Characters of a stack trace shown per entry.
pub const EXCEPTION_PREVIEW_CHARS: usize = 200;

/// The newest records of a query, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogListing {
    pub entries: Vec<LogRecord>,
}

/// Keep the last `limit` records.
pub fn list_recent(mut records: Vec<LogRecord>, limit: usize) -> LogListing {
    let start = records.len().saturating_sub(limit);
    let entries = records.split_off(start);
    LogListing { entries }
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

impl fmt::Display for LogListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found {} log entries:", self.entries.len())?;
        writeln!(f)?;

        for entry in &self.entries {
            writeln!(
                f,
                "[{}] {}: {}",
                entry.timestamp_or_na(),
                entry.level.as_deref().unwrap_or("INFO"),
                entry.message_or_empty()
            )?;

            if let Some(endpoint) = entry.endpoint.as_deref().filter(|e| !e.is_empty()) {
                writeln!(f, "  Endpoint: {}", endpoint)?;
            }
            if entry.duration_or_zero() != 0.0 {
                writeln!(f, "  Duration: {}ms", entry.duration_label())?;
            }
            if let Some(exception) = entry.exception.as_deref().filter(|e| !e.is_empty()) {
                writeln!(f, "  Exception: {}...", preview(exception, EXCEPTION_PREVIEW_CHARS))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(text: &str) -> LogRecord {
        LogRecord {
            message: Some(text.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_recent_keeps_tail() {
        let records = vec![message("one"), message("two"), message("three")];
        let listing = list_recent(records, 2);
        let messages: Vec<_> = listing.entries.iter().map(|r| r.message_or_empty()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_list_recent_zero_and_oversized_limits() {
        assert!(list_recent(vec![message("one")], 0).entries.is_empty());
        assert_eq!(list_recent(vec![message("one")], 50).entries.len(), 1);
    }

    #[test]
    fn test_render_entry() {
        let record = LogRecord {
            timestamp: Some("2026-01-21T14:30:45".into()),
            level: Some("WARNING".into()),
            message: Some("Slow query".into()),
            endpoint: Some("/tasks".into()),
            ..Default::default()
        }
        .with_duration_ms(1532.5);

        let text = list_recent(vec![record], 50).to_string();
        assert_eq!(
            text,
            "Found 1 log entries:\n\n\
             [2026-01-21T14:30:45] WARNING: Slow query\n\
             \x20 Endpoint: /tasks\n\
             \x20 Duration: 1532.5ms\n\n"
        );
    }

    #[test]
    fn test_render_defaults_and_zero_duration() {
        let record = LogRecord {
            endpoint: Some(String::new()),
            ..Default::default()
        }
        .with_duration_ms(0.0);

        let text = list_recent(vec![record], 50).to_string();
        assert_eq!(text, "Found 1 log entries:\n\n[N/A] INFO: \n\n");
    }

    #[test]
    fn test_exception_is_truncated_by_characters() {
        let record = LogRecord {
            exception: Some("é".repeat(300)),
            ..Default::default()
        };

        let text = list_recent(vec![record], 50).to_string();
        let line = text
            .lines()
            .find(|l| l.starts_with("  Exception: "))
            .unwrap();
        let shown = line
            .trim_start_matches("  Exception: ")
            .trim_end_matches("...");
        assert_eq!(shown.chars().count(), EXCEPTION_PREVIEW_CHARS);
    }

    #[test]
    fn test_duration_rendered_as_written() {
        let int = LogRecord::from_json_line(br#"{"duration_ms": 1500}"#).unwrap();
        let float = LogRecord::from_json_line(br#"{"duration_ms": 1500.0}"#).unwrap();

        let text = list_recent(vec![int, float], 50).to_string();
        assert!(text.contains("  Duration: 1500ms\n"), "{}", text);
        assert!(text.contains("  Duration: 1500.0ms\n"), "{}", text);
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(list_recent(Vec::new(), 50).to_string(), "Found 0 log entries:\n\n");
    }
}
