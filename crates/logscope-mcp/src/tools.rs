//! Tool names and their JSON argument schemas.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const QUERY_LOGS: &str = "query_logs";
pub const ANALYZE_ERRORS: &str = "analyze_errors";
pub const GET_SLOW_REQUESTS: &str = "get_slow_requests";
pub const GET_ENDPOINT_STATS: &str = "get_endpoint_stats";

/// Tool definitions for MCP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    /// The schema as a JSON object, as MCP expects it.
    pub fn input_schema(&self) -> Map<String, Value> {
        match &self.parameters {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        }
    }
}

fn format_property() -> Value {
    json!({
        "type": "string",
        "enum": ["text", "json"],
        "description": "Output format: 'text' for a readable summary, 'json' for the structured report",
        "default": "text"
    })
}

/// Get all tool definitions for MCP registration
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: QUERY_LOGS.into(),
            description: "Query application logs with filters. Returns recent log entries matching criteria.".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "log_type": {
                        "type": "string",
                        "enum": ["app", "errors"],
                        "description": "Type of logs to query: 'app' for all logs, 'errors' for errors only"
                    },
                    "level": {
                        "type": "string",
                        "enum": ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"],
                        "description": "Filter by log level"
                    },
                    "endpoint": {
                        "type": "string",
                        "description": "Filter by endpoint path (partial match, case-sensitive)"
                    },
                    "module": {
                        "type": "string",
                        "description": "Filter by module name"
                    },
                    "min_duration_ms": {
                        "type": "number",
                        "description": "Filter requests at least this slow (in milliseconds)"
                    },
                    "since_minutes": {
                        "type": "number",
                        "description": "Only show logs from the last N minutes"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of log entries to return",
                        "default": 50
                    },
                    "format": format_property()
                },
                "required": ["log_type"]
            }),
        },
        ToolDefinition {
            name: ANALYZE_ERRORS.into(),
            description: "Analyze error logs and provide summary statistics".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "since_minutes": {
                        "type": "number",
                        "description": "Analyze errors from the last N minutes",
                        "default": 60
                    },
                    "format": format_property()
                }
            }),
        },
        ToolDefinition {
            name: GET_SLOW_REQUESTS.into(),
            description: "Find slow API requests above a duration threshold".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "threshold_ms": {
                        "type": "number",
                        "description": "Duration threshold in milliseconds",
                        "default": 1000
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of results",
                        "default": 20
                    },
                    "format": format_property()
                }
            }),
        },
        ToolDefinition {
            name: GET_ENDPOINT_STATS.into(),
            description: "Get statistics for API endpoints (request count, avg duration, error rate)".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "since_minutes": {
                        "type": "number",
                        "description": "Analyze from the last N minutes",
                        "default": 60
                    },
                    "format": format_property()
                }
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names() {
        let names: Vec<_> = tool_definitions().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![QUERY_LOGS, ANALYZE_ERRORS, GET_SLOW_REQUESTS, GET_ENDPOINT_STATS]
        );
    }

    #[test]
    fn test_query_logs_requires_log_type() {
        let tools = tool_definitions();
        let query = tools.iter().find(|t| t.name == QUERY_LOGS).unwrap();

        assert_eq!(query.parameters["required"], json!(["log_type"]));
        assert_eq!(query.parameters["properties"]["log_type"]["enum"], json!(["app", "errors"]));
        assert_eq!(query.parameters["properties"]["limit"]["default"], json!(50));
    }

    #[test]
    fn test_defaults_are_declared() {
        let tools = tool_definitions();
        let schema = |name: &str| tools.iter().find(|t| t.name == name).unwrap().input_schema();

        assert_eq!(schema(ANALYZE_ERRORS)["properties"]["since_minutes"]["default"], json!(60));
        assert_eq!(schema(GET_SLOW_REQUESTS)["properties"]["threshold_ms"]["default"], json!(1000));
        assert_eq!(schema(GET_SLOW_REQUESTS)["properties"]["limit"]["default"], json!(20));
        assert_eq!(schema(GET_ENDPOINT_STATS)["properties"]["since_minutes"]["default"], json!(60));
        assert!(schema(ANALYZE_ERRORS).get("required").is_none());
    }
}
