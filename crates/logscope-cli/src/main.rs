//! Logscope CLI
//!
//! Runs the log analytics tools from a shell. Output matches what the MCP
//! server returns for the same arguments.
//!
//! ## Usage
//!
//! ```bash
//! # Newest 20 errors touching /tasks in the last half hour
//! logscope query --log-type app --level ERROR --endpoint /tasks --since-minutes 30 --limit 20
//!
//! # Error summary for the last hour
//! logscope errors
//!
//! # Requests slower than 2s
//! logscope slow --threshold-ms 2000
//!
//! # Per-endpoint statistics as JSON
//! logscope --json endpoints --since-minutes 15
//!
//! # Print the tool schemas
//! logscope tools
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use logscope_core::config::LOG_DIR_ENV;
use logscope_core::{LogConfig, LogLevel, LogSource};
use logscope_mcp::args::{
    AnalyzeErrorsArgs, EndpointStatsArgs, OutputFormat, QueryLogsArgs, SlowRequestsArgs,
};
use logscope_mcp::{tool_definitions, LogAnalytics};

/// Logscope - JSON-lines log analytics
#[derive(Parser)]
#[command(name = "logscope")]
#[command(version = "0.1.0")]
#[command(about = "Query and analyse JSON-lines application logs")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding app.log and errors.log (default: ~/staging/logs, then ./logs, then the temp dir)
    #[arg(short, long, global = true, env = LOG_DIR_ENV)]
    log_dir: Option<PathBuf>,

    /// Print the structured report as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List recent entries matching filters
    Query {
        /// Which log to read: app or errors
        #[arg(long)]
        log_type: LogSource,

        /// Exact level: DEBUG, INFO, WARNING, ERROR or CRITICAL
        #[arg(long)]
        level: Option<LogLevel>,

        /// Endpoint substring (case-sensitive)
        #[arg(long)]
        endpoint: Option<String>,

        /// Exact module name
        #[arg(long)]
        module: Option<String>,

        /// Minimum request duration in milliseconds
        #[arg(long)]
        min_duration_ms: Option<f64>,

        /// Only entries from the last N minutes
        #[arg(long)]
        since_minutes: Option<f64>,

        /// Maximum entries to show [default: 50]
        #[arg(long)]
        limit: Option<f64>,
    },

    /// Summarize recent errors
    Errors {
        /// Window in minutes [default: 60]
        #[arg(long)]
        since_minutes: Option<f64>,
    },

    /// Rank requests slower than a threshold
    Slow {
        /// Threshold in milliseconds [default: 1000]
        #[arg(long)]
        threshold_ms: Option<f64>,

        /// Maximum requests to show [default: 20]
        #[arg(long)]
        limit: Option<f64>,
    },

    /// Per-endpoint request statistics
    Endpoints {
        /// Window in minutes [default: 60]
        #[arg(long)]
        since_minutes: Option<f64>,
    },

    /// Print tool definitions as JSON
    Tools,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print a report, ending with exactly one newline
fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let format = Some(if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    });
    let analytics = LogAnalytics::new(LogConfig::resolve(cli.log_dir));

    let text = match cli.command {
        Commands::Query {
            log_type,
            level,
            endpoint,
            module,
            min_duration_ms,
            since_minutes,
            limit,
        } => analytics.query_logs(&QueryLogsArgs {
            log_type: Some(log_type),
            level,
            endpoint,
            module,
            min_duration_ms,
            since_minutes,
            limit,
            format,
        })?,

        Commands::Errors { since_minutes } => {
            analytics.analyze_errors(&AnalyzeErrorsArgs {
                since_minutes,
                format,
            })?
        }

        Commands::Slow {
            threshold_ms,
            limit,
        } => analytics.get_slow_requests(&SlowRequestsArgs {
            threshold_ms,
            limit,
            format,
        })?,

        Commands::Endpoints { since_minutes } => {
            analytics.get_endpoint_stats(&EndpointStatsArgs {
                since_minutes,
                format,
            })?
        }

        Commands::Tools => serde_json::to_string_pretty(&tool_definitions())?,
    };

    emit(&text);
    Ok(())
}
