//! Per-endpoint request statistics.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{LogRecord, UNKNOWN};

/// Endpoints shown in a report, busiest first.
pub const MAX_REPORTED_ENDPOINTS: usize = 10;

/// Counters for one endpoint within one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointStats {
    pub endpoint: String,
    /// Records grouped under this endpoint
    pub count: usize,
    /// Sum of `duration_ms` over records that carry one
    pub total_duration_ms: f64,
    /// Records that carry a `duration_ms`
    pub timed_count: usize,
    pub max_duration_ms: Option<f64>,
    /// Records at ERROR or CRITICAL
    pub error_count: usize,
}

impl EndpointStats {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            count: 0,
            total_duration_ms: 0.0,
            timed_count: 0,
            max_duration_ms: None,
            error_count: 0,
        }
    }

    /// Fold one record into the counters.
    pub fn record(&mut self, record: &LogRecord) {
        self.count += 1;

        if let Some(duration) = record.duration() {
            self.total_duration_ms += duration;
            self.timed_count += 1;
            self.max_duration_ms = Some(match self.max_duration_ms {
                Some(max) => max.max(duration),
                None => duration,
            });
        }

        if record.is_error() {
            self.error_count += 1;
        }
    }

    /// Mean over every record in the group, untimed ones counting as 0;
    /// 0 for an empty group.
    pub fn average_duration_ms(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_duration_ms / self.count as f64
    }

    /// Percentage of records at ERROR or CRITICAL; 0 for an empty group.
    pub fn error_rate(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.error_count as f64 / self.count as f64 * 100.0
    }
}

/// Busiest endpoints within a time window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointReport {
    pub since_minutes: f64,
    /// Distinct endpoints seen, including those not reported
    pub total_endpoints: usize,
    /// At most [`MAX_REPORTED_ENDPOINTS`], by request count descending
    pub endpoints: Vec<EndpointStats>,
}

/// Group already-windowed records by endpoint.
///
/// Records without an endpoint group under `"unknown"`. Groups with equal
/// counts keep first-seen order.
pub fn endpoint_stats(records: &[LogRecord], since_minutes: f64) -> EndpointReport {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<EndpointStats> = Vec::new();

    for record in records {
        let endpoint = record.endpoint_or(UNKNOWN);
        let slot = *index.entry(endpoint).or_insert_with(|| {
            groups.push(EndpointStats::new(endpoint));
            groups.len() - 1
        });
        groups[slot].record(record);
    }

    let total_endpoints = groups.len();
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(MAX_REPORTED_ENDPOINTS);

    EndpointReport {
        since_minutes,
        total_endpoints,
        endpoints: groups,
    }
}

impl fmt::Display for EndpointReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📈 Endpoint Statistics (last {} minutes):", self.since_minutes)?;
        writeln!(f)?;

        for stats in &self.endpoints {
            writeln!(f, "• {}", stats.endpoint)?;
            writeln!(f, "  Requests: {}", stats.count)?;
            if let Some(max) = stats.max_duration_ms {
                writeln!(f, "  Avg Duration: {:.2}ms", stats.average_duration_ms())?;
                writeln!(f, "  Max Duration: {:.2}ms", max)?;
            }
            writeln!(f, "  Error Rate: {:.1}%", stats.error_rate())?;
            writeln!(f)?;
        }

        Ok(())
    }
}
