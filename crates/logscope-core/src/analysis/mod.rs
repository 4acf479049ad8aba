//! Analytical views over filtered records.
//!
//! Each view is a pure function from records to a report. Reports serialize
//! with serde for structured callers and implement `Display` for the
//! conversational text rendering.

mod endpoints;
mod errors;
mod listing;
mod slow;

pub use endpoints::{endpoint_stats, EndpointReport, EndpointStats, MAX_REPORTED_ENDPOINTS};
pub use errors::{summarize_errors, ErrorSummary, RecentError, NO_ERRORS_MESSAGE};
pub use listing::{list_recent, LogListing, EXCEPTION_PREVIEW_CHARS};
pub use slow::{rank_slow_requests, SlowRequests};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Entries returned by a raw query when no limit is given.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Window for error summaries and endpoint statistics.
pub const DEFAULT_SINCE_MINUTES: f64 = 60.0;

/// Slow-request threshold.
pub const DEFAULT_SLOW_THRESHOLD_MS: f64 = 1000.0;

/// Slow requests reported when no limit is given.
pub const DEFAULT_SLOW_LIMIT: usize = 20;

/// Rows in each error-summary frequency table.
pub const TOP_K: usize = 5;

/// A value and how many records carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

/// Count occurrences and return the `k` most frequent.
///
/// Equal counts keep the order in which values were first seen.
pub fn top_counts<'a>(values: impl IntoIterator<Item = &'a str>, k: usize) -> Vec<CountEntry> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<CountEntry> = Vec::new();

    for value in values {
        match index.get(value) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(value, counts.len());
                counts.push(CountEntry {
                    name: value.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(k);
    counts
}
