//! Log directory resolution and read bounds.
//!
//! The log directory is resolved once at startup from an ordered list of
//! candidates and then passed around explicitly as part of [`LogConfig`].

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Environment variable naming the preferred log directory.
pub const LOG_DIR_ENV: &str = "LOGSCOPE_LOG_DIR";

/// Lines read from the tail of a log file for most views.
pub const DEFAULT_TAIL_LINES: usize = 1000;

/// Deeper tail used by endpoint statistics.
pub const DEFAULT_STATS_TAIL_LINES: usize = 2000;

/// Which log file to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSource {
    /// `app.log`, every level
    App,
    /// `errors.log`, ERROR and CRITICAL only
    Errors,
}

impl LogSource {
    pub fn file_name(&self) -> &'static str {
        match self {
            LogSource::App => "app.log",
            LogSource::Errors => "errors.log",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogSource::App => "app",
            LogSource::Errors => "errors",
        }
    }
}

impl FromStr for LogSource {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "app" => Ok(LogSource::App),
            "errors" => Ok(LogSource::Errors),
            other => Err(LogError::UnknownSource(other.to_string())),
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved configuration shared by every query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Directory holding `app.log` and `errors.log`
    pub log_dir: PathBuf,
    /// Tail size for listings, error summaries and slow requests
    pub tail_lines: usize,
    /// Tail size for endpoint statistics
    pub stats_tail_lines: usize,
}

impl LogConfig {
    /// Use `log_dir` as-is with default tail sizes.
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            tail_lines: DEFAULT_TAIL_LINES,
            stats_tail_lines: DEFAULT_STATS_TAIL_LINES,
        }
    }

    /// Resolve the log directory from `preferred`, then the environment,
    /// then the fallback chain.
    pub fn resolve(preferred: Option<PathBuf>) -> Self {
        let preferred = preferred.or_else(|| env::var_os(LOG_DIR_ENV).map(PathBuf::from));
        Self::new(resolve_log_dir(preferred))
    }

    /// Full path of a source's file.
    pub fn path_for(&self, source: LogSource) -> PathBuf {
        self.log_dir.join(source.file_name())
    }
}

/// Candidate log directories, most preferred first.
///
/// `preferred` replaces the deployment default (`~/staging/logs`) when
/// given; `./logs` and the system temp dir always follow.
pub fn candidate_dirs(preferred: Option<PathBuf>) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(3);
    match preferred {
        Some(dir) => candidates.push(dir),
        None => {
            if let Some(home) = dirs::home_dir() {
                candidates.push(home.join("staging").join("logs"));
            }
        }
    }
    candidates.push(PathBuf::from("./logs"));
    candidates.push(env::temp_dir());
    candidates
}

/// Pick the first candidate that is an existing directory.
///
/// Falls back to the system temp dir when none exist.
pub fn resolve_log_dir(preferred: Option<PathBuf>) -> PathBuf {
    let candidates = candidate_dirs(preferred);
    let chosen = first_existing_dir(&candidates).unwrap_or_else(env::temp_dir);

    tracing::info!(log_dir = %chosen.display(), "Resolved log directory");
    chosen
}

fn first_existing_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|dir| is_dir(dir))
        .cloned()
}

fn is_dir(path: &Path) -> bool {
    path.metadata().map(|m| m.is_dir()).unwrap_or(false)
}
