//! Headless mode end to end: engine in, NDJSON out

use std::sync::Arc;

use ipinfo_app::config::{MemoryStore, Settings};
use ipinfo_app::Engine;
use ipinfo_core::{Configuration, FieldGroup, FieldSelection};
use ipinfo_panel::run_headless_with;
use ipinfo_probe::test_utils::ScriptedRunner;
use serde_json::Value;

const BODY: &str = r#"{
    "ip": "203.0.113.7",
    "isp": "ExampleNet",
    "organization": null,
    "city": "Bandung",
    "state_prov": "West Java",
    "country_name": "Indonesia"
}"#;

fn record(enabled: bool) -> Configuration {
    Configuration::new(
        enabled,
        FieldSelection::new()
            .with_group(FieldGroup::Isp, ["ip", "isp", "organization"])
            .with_group(FieldGroup::Loc, ["city"]),
        "secret-token",
    )
}

async fn run(
    record: Option<Configuration>,
    runner: ScriptedRunner,
) -> (Vec<Value>, Engine<ScriptedRunner>) {
    let mut engine = Engine::with_runner(
        Arc::new(MemoryStore::new(record)),
        runner,
        Settings::default(),
    );

    let mut out = Vec::new();
    run_headless_with(&mut engine, &mut out)
        .await
        .expect("headless run succeeds");
    engine.shutdown();

    let lines = String::from_utf8(out)
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();
    (lines, engine)
}

fn tags(lines: &[Value]) -> Vec<&str> {
    lines
        .iter()
        .map(|line| line["event"].as_str().unwrap_or_default())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_data_cycle_event_order() {
    let (lines, _) = run(Some(record(true)), ScriptedRunner::online(BODY)).await;

    assert_eq!(
        tags(&lines),
        vec![
            "loading",
            "status",
            "row_loading",
            "row_loading",
            "row_loading",
            "row_loading",
            "row_settled",
            "row_settled",
            "row_settled",
            "row_settled",
            "result",
        ]
    );
    assert_eq!(lines[1]["status"], "connected");
    assert_eq!(lines[1]["label"], "Connected");
}

#[tokio::test(start_paused = true)]
async fn test_result_lists_projected_fields() {
    let (lines, _) = run(Some(record(true)), ScriptedRunner::online(BODY)).await;

    let result = lines.last().expect("result line");
    assert_eq!(result["event"], "result");
    assert_eq!(result["kind"], "data");
    assert_eq!(result["generation"], 1);

    let fields: Vec<(&str, &str)> = result["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .map(|f| (f["key"].as_str().unwrap(), f["value"].as_str().unwrap()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("ip", "203.0.113.7"),
            ("isp", "ExampleNet"),
            ("organization", "-"),
            ("city", "Bandung West Java"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_token_never_reaches_output() {
    let (lines, engine) = run(Some(record(true)), ScriptedRunner::online(BODY)).await;

    let output = lines
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    assert!(!output.contains("secret-token"));

    // ...but it was sent to the provider
    let lookup = &engine.runner().calls()[1];
    assert!(lookup.args.iter().any(|arg| arg.contains("apiKey=secret-token")));
}

#[tokio::test(start_paused = true)]
async fn test_offline_reports_disconnected_only() {
    let (lines, engine) = run(Some(record(true)), ScriptedRunner::offline()).await;

    assert_eq!(tags(&lines), vec!["loading", "status", "result"]);
    assert_eq!(lines[1]["status"], "disconnected");
    assert_eq!(lines[2]["kind"], "offline");
    assert_eq!(lines[2]["fields"], Value::Array(Vec::new()));
    // No lookup after a failed probe
    assert_eq!(engine.runner().call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_reports_message() {
    let body = r#"{"message":"You have exceeded the limit of 1000 requests per day"}"#;
    let (lines, _) = run(Some(record(true)), ScriptedRunner::online(body)).await;

    assert_eq!(tags(&lines), vec!["loading", "status", "message", "result"]);
    assert_eq!(lines[1]["status"], "disconnected");
    assert_eq!(lines[2]["kind"], "error");
    assert!(lines[2]["text"]
        .as_str()
        .is_some_and(|text| text.contains("Please replace your TOKEN")));
}

#[tokio::test(start_paused = true)]
async fn test_disabled_never_runs_curl() {
    let (lines, engine) = run(Some(record(false)), ScriptedRunner::new()).await;

    assert_eq!(tags(&lines), vec!["loading", "status", "result"]);
    assert_eq!(lines[2]["kind"], "disabled");
    assert_eq!(engine.runner().call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_missing_record_is_empty_panel() {
    let (lines, _) = run(None, ScriptedRunner::new()).await;

    assert_eq!(tags(&lines), vec!["loading", "result"]);
    assert_eq!(lines[1]["kind"], "empty");
    assert_eq!(lines[1]["status"], Value::Null);
}
