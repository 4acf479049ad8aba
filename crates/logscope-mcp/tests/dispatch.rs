//! Dispatch Integration Tests
//!
//! Every advertised tool must be callable through `call_tool`, and the
//! argument contract must hold at the boundary.

use logscope_core::LogConfig;
use logscope_mcp::{tool_definitions, LogAnalytics};
use serde_json::{json, Map, Value};
use tempfile::TempDir;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

/// Minimal valid arguments for a tool, derived from its schema's required list
fn minimal_arguments(schema: &Value) -> Map<String, Value> {
    let mut args = Map::new();
    if let Some(required) = schema["required"].as_array() {
        for field in required {
            let name = field.as_str().unwrap();
            let first_choice = schema["properties"][name]["enum"][0].clone();
            args.insert(name.to_string(), first_choice);
        }
    }
    args
}

#[test]
fn test_every_advertised_tool_dispatches() {
    let temp = TempDir::new().unwrap();
    let analytics = LogAnalytics::new(LogConfig::new(temp.path()));

    for tool in tool_definitions() {
        let args = minimal_arguments(&tool.parameters);
        let text = analytics
            .call_tool(&tool.name, Some(&args))
            .unwrap_or_else(|e| panic!("{} failed: {}", tool.name, e));
        assert!(!text.starts_with("Unknown tool"), "{} not dispatched", tool.name);
    }
}

#[test]
fn test_schema_violations_are_rejected() {
    let temp = TempDir::new().unwrap();
    let analytics = LogAnalytics::new(LogConfig::new(temp.path()));

    let cases = [
        ("query_logs", json!({})),
        ("query_logs", json!({"log_type": "access"})),
        ("query_logs", json!({"log_type": "app", "level": "TRACE"})),
        ("query_logs", json!({"log_type": "app", "limit": -5})),
        ("analyze_errors", json!({"since_minutes": "an hour"})),
        ("get_slow_requests", json!({"threshold_ms": [1000]})),
        ("get_endpoint_stats", json!({"format": "xml"})),
    ];

    for (tool, args) in cases {
        let err = analytics
            .call_tool(tool, Some(&object(args.clone())))
            .expect_err(&format!("{} accepted {}", tool, args));
        assert!(err.is_invalid_arguments(), "{} with {}: {}", tool, args, err);
    }
}

#[test]
fn test_huge_window_is_answered() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("errors.log"),
        "{\"timestamp\": \"2020-05-01T08:00:00\", \"level\": \"ERROR\", \"module\": \"db\", \"message\": \"timeout\"}\n",
    )
    .unwrap();
    std::fs::write(
        temp.path().join("app.log"),
        "{\"timestamp\": \"2020-05-01T08:00:00\", \"level\": \"INFO\", \"endpoint\": \"/tasks\", \"duration_ms\": 40}\n",
    )
    .unwrap();
    let analytics = LogAnalytics::new(LogConfig::new(temp.path()));
    let window = object(json!({"since_minutes": 1e12}));

    let errors = analytics.call_tool("analyze_errors", Some(&window)).unwrap();
    assert!(errors.contains("Total Errors: 1"), "{}", errors);

    let stats = analytics.call_tool("get_endpoint_stats", Some(&window)).unwrap();
    assert!(stats.contains("/tasks"), "{}", stats);

    let mut query = window.clone();
    query.insert("log_type".into(), json!("app"));
    let listing = analytics.call_tool("query_logs", Some(&query)).unwrap();
    assert!(listing.starts_with("Found 1 log entries:"), "{}", listing);
}

#[test]
fn test_numeric_timestamp_listed_but_not_windowed() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("app.log"),
        "{\"timestamp\": 1768999999, \"level\": \"ERROR\", \"message\": \"kept\"}\n",
    )
    .unwrap();
    let analytics = LogAnalytics::new(LogConfig::new(temp.path()));

    let listing = analytics
        .call_tool("query_logs", Some(&object(json!({"log_type": "app"}))))
        .unwrap();
    assert!(listing.contains("[1768999999] ERROR: kept"), "{}", listing);

    let windowed = analytics
        .call_tool(
            "query_logs",
            Some(&object(json!({"log_type": "app", "since_minutes": 60}))),
        )
        .unwrap();
    assert!(windowed.starts_with("Found 0 log entries:"), "{}", windowed);
}

#[test]
fn test_unreadable_log_surfaces_as_error() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("errors.log")).unwrap();
    let analytics = LogAnalytics::new(LogConfig::new(temp.path()));

    let err = analytics.call_tool("analyze_errors", None).unwrap_err();
    assert!(!err.is_invalid_arguments());
}
