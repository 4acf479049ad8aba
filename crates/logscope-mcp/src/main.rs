//! Logscope Log Analytics MCP Server
//!
//! Start with: `cargo run -p logscope-mcp`
//! Or with logging: `RUST_LOG=debug cargo run -p logscope-mcp`

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use logscope_core::config::LOG_DIR_ENV;
use logscope_core::LogConfig;
use logscope_mcp::{call_tool_result, tool_definitions, LogAnalytics};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler, ServiceExt};
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

/// Log analytics over MCP stdio
#[derive(Parser)]
#[command(name = "logscope-mcp")]
#[command(version = "0.1.0")]
#[command(about = "MCP server for querying and analysing JSON-lines application logs")]
struct Cli {
    /// Directory holding app.log and errors.log (default: ~/staging/logs, then ./logs, then the temp dir)
    #[arg(long, env = LOG_DIR_ENV)]
    log_dir: Option<PathBuf>,
}

/// MCP Server handler
#[derive(Clone)]
struct LogAnalyticsServer {
    analytics: Arc<LogAnalytics>,
}

impl LogAnalyticsServer {
    fn new(config: LogConfig) -> Self {
        Self {
            analytics: Arc::new(LogAnalytics::new(config)),
        }
    }
}

impl ServerHandler for LogAnalyticsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Log analytics MCP server: query, summarize and rank the task API's JSON-lines logs.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = tool_definitions()
            .into_iter()
            .map(|def| {
                let schema = def.input_schema();
                Tool::new(def.name, def.description, Arc::new(schema))
            })
            .collect();

        Ok(ListToolsResult {
            next_cursor: None,
            tools,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let analytics = self.analytics.clone();
        let name = request.name.to_string();
        let arguments = request.arguments;

        // File reads are blocking; keep them off the transport's worker
        let outcome = tokio::task::spawn_blocking(move || analytics.call_tool(&name, arguments.as_ref()))
            .await
            .map_err(|e| McpError::internal_error(format!("Tool task failed: {}", e), None))?;

        call_tool_result(outcome)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to stderr (not stdout, as stdout is for MCP communication)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    tracing::info!("Starting Logscope Log Analytics MCP Server");

    let config = LogConfig::resolve(cli.log_dir);
    let server = LogAnalyticsServer::new(config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Serve via stdio
    let service = server.serve(transport).await?;

    // Wait for shutdown
    service.waiting().await?;

    Ok(())
}
