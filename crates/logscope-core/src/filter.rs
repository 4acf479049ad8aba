//! Conjunctive record filters.
//!
//! Every criterion is an independent per-record predicate, so the order in
//! which they are checked never changes the result.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::record::LogRecord;

/// Optional predicates over records. Absent criteria impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Level must equal this exactly
    pub level: Option<String>,
    /// Module must equal this exactly
    pub module: Option<String>,
    /// Endpoint must contain this (case-sensitive); missing endpoint never matches a non-empty needle
    pub endpoint: Option<String>,
    /// Duration floor in milliseconds; missing duration counts as 0
    pub min_duration_ms: Option<f64>,
    /// Keep records strictly newer than `now - since_minutes`
    pub since_minutes: Option<f64>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_min_duration_ms(mut self, min_duration_ms: f64) -> Self {
        self.min_duration_ms = Some(min_duration_ms);
        self
    }

    pub fn with_since_minutes(mut self, since_minutes: f64) -> Self {
        self.since_minutes = Some(since_minutes);
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.module.is_none()
            && self.endpoint.is_none()
            && self.min_duration_ms.is_none()
            && self.since_minutes.is_none()
    }

    /// The time-window cutoff relative to `now`, if a window is set.
    ///
    /// A window reaching past chrono's range starts at the earliest
    /// representable instant.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.since_minutes.map(|minutes| {
            // `as` saturates, so huge windows land on i64::MAX and fail below
            let millis = (minutes * 60_000.0).round() as i64;
            Duration::try_milliseconds(millis)
                .and_then(|window| now.checked_sub_signed(window))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        })
    }

    /// Whether `record` passes every criterion, evaluated at `now`.
    pub fn matches(&self, record: &LogRecord, now: DateTime<Utc>) -> bool {
        self.matches_with_cutoff(record, self.cutoff(now))
    }

    fn matches_with_cutoff(&self, record: &LogRecord, cutoff: Option<DateTime<Utc>>) -> bool {
        if let Some(level) = &self.level {
            if record.level.as_deref() != Some(level.as_str()) {
                return false;
            }
        }

        if let Some(module) = &self.module {
            if record.module.as_deref() != Some(module.as_str()) {
                return false;
            }
        }

        if let Some(needle) = &self.endpoint {
            if !record.endpoint_or("").contains(needle.as_str()) {
                return false;
            }
        }

        if let Some(floor) = self.min_duration_ms {
            if record.duration_or_zero() < floor {
                return false;
            }
        }

        if let Some(cutoff) = cutoff {
            // Fails closed: no parseable timestamp, no match
            match record.parsed_timestamp() {
                Some(ts) if ts > cutoff => {}
                _ => return false,
            }
        }

        true
    }
}

/// Keep the records matching `criteria`, evaluated against the current time.
pub fn filter_records(records: Vec<LogRecord>, criteria: &FilterCriteria) -> Vec<LogRecord> {
    filter_records_at(records, criteria, Utc::now())
}

/// Keep the records matching `criteria`, evaluated against `now`.
pub fn filter_records_at(
    records: Vec<LogRecord>,
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<LogRecord> {
    if criteria.is_empty() {
        return records;
    }

    let cutoff = criteria.cutoff(now);
    records
        .into_iter()
        .filter(|record| criteria.matches_with_cutoff(record, cutoff))
        .collect()
}
