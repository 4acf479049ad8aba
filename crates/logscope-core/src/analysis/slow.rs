//! Slowest requests above a latency threshold.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{LogRecord, NOT_AVAILABLE};

/// Requests at or above `threshold_ms`, slowest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlowRequests {
    pub threshold_ms: f64,
    pub requests: Vec<LogRecord>,
}

impl SlowRequests {
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Keep records with `duration_ms >= threshold_ms`, sort by duration
/// descending (ties keep file order) and truncate to `limit`.
pub fn rank_slow_requests(records: Vec<LogRecord>, threshold_ms: f64, limit: usize) -> SlowRequests {
    let mut requests: Vec<LogRecord> = records
        .into_iter()
        .filter(|r| r.duration_or_zero() >= threshold_ms)
        .collect();

    requests.sort_by(|a, b| b.duration_or_zero().total_cmp(&a.duration_or_zero()));
    requests.truncate(limit);

    SlowRequests {
        threshold_ms,
        requests,
    }
}

impl fmt::Display for SlowRequests {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "No requests slower than {}ms found.", self.threshold_ms);
        }

        writeln!(f, "🐌 Slow Requests (>{}ms):", self.threshold_ms)?;
        writeln!(f)?;

        for request in &self.requests {
            writeln!(
                f,
                "• {} - {}ms",
                request.endpoint_or(NOT_AVAILABLE),
                request.duration_label()
            )?;
            writeln!(f, "  Time: {}", request.timestamp_or_na())?;
            writeln!(f, "  Method: {}", request.method.as_deref().unwrap_or(NOT_AVAILABLE))?;
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(endpoint: &str, duration_ms: Option<f64>) -> LogRecord {
        let record = LogRecord {
            endpoint: Some(endpoint.into()),
            ..Default::default()
        };
        match duration_ms {
            Some(ms) => record.with_duration_ms(ms),
            None => record,
        }
    }

    fn endpoints(report: &SlowRequests) -> Vec<&str> {
        report
            .requests
            .iter()
            .map(|r| r.endpoint_or(NOT_AVAILABLE))
            .collect()
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let records = vec![
            timed("/a", Some(1200.0)),
            timed("/b", Some(3000.0)),
            timed("/c", Some(1200.0)),
            timed("/d", Some(999.0)),
            timed("/e", None),
            timed("/f", Some(1000.0)),
        ];

        let report = rank_slow_requests(records, 1000.0, 20);
        assert_eq!(endpoints(&report), vec!["/b", "/a", "/c", "/f"]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let records: Vec<_> = (0..30)
            .map(|i| timed(&format!("/{}", i), Some(1000.0 + i as f64)))
            .collect();

        let report = rank_slow_requests(records, 1000.0, 3);
        assert_eq!(endpoints(&report), vec!["/29", "/28", "/27"]);
    }

    #[test]
    fn test_none_found_message() {
        let report = rank_slow_requests(vec![timed("/a", Some(10.0))], 5000.0, 20);
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "No requests slower than 5000ms found.");
    }

    #[test]
    fn test_render() {
        let mut record = timed("/tasks", Some(2500.0));
        record.method = Some("POST".into());
        record.timestamp = Some("2026-01-21T12:00:00".into());

        let anonymous = LogRecord::default().with_duration_ms(1500.5);

        let text = rank_slow_requests(vec![record, anonymous], 1000.0, 20).to_string();

        assert_eq!(
            text,
            "🐌 Slow Requests (>1000ms):\n\n\
             • /tasks - 2500.0ms\n\
             \x20 Time: 2026-01-21T12:00:00\n\
             \x20 Method: POST\n\n\
             • N/A - 1500.5ms\n\
             \x20 Time: N/A\n\
             \x20 Method: N/A\n\n"
        );
    }
}
