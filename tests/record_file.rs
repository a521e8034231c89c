//! Configuration record on disk through to headless output

use std::sync::Arc;

use ipinfo_app::config::{write_default_record, Settings, UciFileStore};
use ipinfo_app::Engine;
use ipinfo_panel::run_headless_with;
use ipinfo_probe::test_utils::ScriptedRunner;
use serde_json::Value;
use tempfile::tempdir;

const BODY: &str = r#"{"ip":"198.51.100.20","country_name":"Indonesia","country_emoji":"🇮🇩"}"#;

async fn run_with_record(path: &std::path::Path, runner: ScriptedRunner) -> Vec<Value> {
    let mut settings = Settings::default();
    settings.watcher.enabled = false;
    let mut engine = Engine::with_runner(Arc::new(UciFileStore::new(path)), runner, settings);

    let mut out = Vec::new();
    run_headless_with(&mut engine, &mut out)
        .await
        .expect("headless run succeeds");
    engine.shutdown();

    String::from_utf8(out)
        .expect("utf-8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_uci_record_drives_the_panel() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ipinfo");
    std::fs::write(
        &path,
        "config ipinfo 'config'\n\
         \toption enable '1'\n\
         \toption token 'abc123'\n\
         \tlist isp 'ip'\n\
         \tlist co 'country_name'\n",
    )
    .unwrap();

    let lines = run_with_record(&path, ScriptedRunner::online(BODY)).await;

    let result = lines.last().expect("result line");
    assert_eq!(result["kind"], "data");
    assert_eq!(result["status"], "connected");
    let values: Vec<&str> = result["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["198.51.100.20", "Indonesia 🇮🇩"]);
}

#[tokio::test(start_paused = true)]
async fn test_default_record_is_disabled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ipinfo");
    assert!(write_default_record(&path).unwrap());

    let lines = run_with_record(&path, ScriptedRunner::new()).await;

    let result = lines.last().expect("result line");
    assert_eq!(result["kind"], "disabled");
    assert_eq!(result["status"], "disconnected");
}

#[tokio::test(start_paused = true)]
async fn test_missing_file_is_empty_panel() {
    let dir = tempdir().unwrap();

    let lines = run_with_record(&dir.path().join("absent"), ScriptedRunner::new()).await;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["kind"], "empty");
}

#[tokio::test(start_paused = true)]
async fn test_invalid_enable_flag_reports_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ipinfo");
    std::fs::write(&path, "config ipinfo\n\toption enable 'maybe'\n").unwrap();

    let lines = run_with_record(&path, ScriptedRunner::new()).await;

    let message = lines
        .iter()
        .find(|line| line["event"] == "message")
        .expect("message line");
    assert_eq!(message["kind"], "error");
    assert!(message["text"]
        .as_str()
        .is_some_and(|text| text.starts_with("Configuration error")));
}
