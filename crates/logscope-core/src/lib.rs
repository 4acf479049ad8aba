//! Logscope Core Library
//!
//! Tail, filter and aggregate the JSON-lines logs written by the task API.
//!
//! ## Overview
//!
//! Data flows one way, and nothing is kept between calls:
//!
//! ```text
//! app.log / errors.log ──► reader ──► filter ──► analysis ──► report
//! ```
//!
//! - **reader**: last N lines of a file, one [`LogRecord`] per decodable line
//! - **filter**: conjunctive [`FilterCriteria`] (level, module, endpoint
//!   substring, duration floor, time window)
//! - **analysis**: raw listing, error summary, slow requests, endpoint stats
//!
//! ## Quick Start
//!
//! ```ignore
//! use logscope_core::{analysis, filter_records, read_log, FilterCriteria, LogConfig, LogSource};
//!
//! let config = LogConfig::resolve(None);
//! let records = read_log(&config, LogSource::App, config.stats_tail_lines)?;
//! let windowed = filter_records(records, &FilterCriteria::new().with_since_minutes(60.0));
//! println!("{}", analysis::endpoint_stats(&windowed, 60.0));
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod filter;
pub mod reader;
pub mod record;

// Re-exports
pub use config::{LogConfig, LogSource};
pub use error::{LogError, Result};
pub use filter::{filter_records, filter_records_at, FilterCriteria};
pub use reader::{read_log, read_tail};
pub use record::{LogLevel, LogRecord};
