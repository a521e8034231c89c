use super::*;
use crate::test_utils::{data_state, sample_configuration, state_with_result, TestTerminal};
use crate::theme::icons::IconSet;
use chrono::{Local, TimeZone};
use ipinfo_app::config::IconMode;
use ipinfo_app::i18n::Locale;
use ipinfo_core::{Configuration, FetchError, FieldSelection, PipelineResult};

fn icons() -> IconSet {
    IconSet::new(IconMode::Unicode)
}

fn line_texts(state: &ipinfo_app::state::AppState) -> Vec<String> {
    PanelTable::new(state, icons())
        .lines()
        .iter()
        .map(|line| line.to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────
// PanelTable
// ─────────────────────────────────────────────────────────────

#[test]
fn test_panel_lines_status_then_rows() {
    let state = data_state();
    let lines = line_texts(&state);

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Internet Status"));
    assert!(lines[0].contains("Connected"));
    assert!(lines[1].starts_with("Public IP"));
    assert!(lines[2].starts_with("ISP"));
    assert!(lines[3].starts_with("City"));
}

#[test]
fn test_labels_are_aligned() {
    let mut state = data_state();
    crate::test_utils::settle_all(&mut state);
    let lines = line_texts(&state);

    let value_column = |line: &str, value: &str| line.find(value).expect("value present");
    assert_eq!(
        value_column(&lines[1], "203.0.113.7"),
        value_column(&lines[2], "ExampleNet")
    );
}

#[test]
fn test_loading_rows_show_spinner_frame() {
    let mut state = data_state();
    state.animation_frame = 1;
    let lines = line_texts(&state);

    assert!(lines[1].contains("⠙ Please wait..."));
}

#[test]
fn test_empty_panel_is_single_blank_row() {
    let state = state_with_result(&PipelineResult::Missing);
    let lines = line_texts(&state);

    assert_eq!(lines, vec![String::new()]);
}

#[test]
fn test_no_data_row() {
    let config = Configuration::new(true, FieldSelection::new(), "token");
    let state = state_with_result(&PipelineResult::Fetched {
        configuration: config,
        payload: crate::test_utils::sample_payload(),
    });
    let lines = line_texts(&state);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Connected"));
    assert_eq!(lines[1], "No data available, please check the settings.");
}

#[test]
fn test_upstream_error_row() {
    let state = state_with_result(&PipelineResult::Failed {
        configuration: sample_configuration(),
        error: FetchError::malformed("expected value at line 1"),
    });
    let lines = line_texts(&state);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Disconnected"));
    assert!(lines[1].contains("unreadable response"));
}

#[test]
fn test_disabled_panel_has_only_status_row() {
    let state = state_with_result(&PipelineResult::Disabled(Configuration::disabled()));
    let lines = line_texts(&state);

    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Disconnected"));
}

#[test]
fn test_panel_table_renders_title() {
    let state = data_state();
    let mut term = TestTerminal::new();
    term.render_widget(PanelTable::new(&state, icons()), term.area());

    assert!(term.line_contains(0, "IP Information"));
}

// ─────────────────────────────────────────────────────────────
// Header
// ─────────────────────────────────────────────────────────────

#[test]
fn test_header_shows_app_name_and_locale() {
    let mut term = TestTerminal::new();
    let area = ratatui::layout::Rect::new(0, 0, 80, 3);
    term.render_widget(MainHeader::new(Locale::Id, icons()), area);

    assert!(term.line_contains(1, APP_NAME));
    assert!(term.line_contains(1, "id"));
    assert!(!term.line_contains(1, "↻"));
}

#[test]
fn test_header_loading_indicator() {
    let mut term = TestTerminal::new();
    let area = ratatui::layout::Rect::new(0, 0, 80, 3);
    term.render_widget(MainHeader::new(Locale::En, icons()).loading(true), area);

    assert!(term.line_contains(1, "↻"));
}

// ─────────────────────────────────────────────────────────────
// Footer
// ─────────────────────────────────────────────────────────────

#[test]
fn test_footer_without_timestamp() {
    let hints = &Locale::En.texts().hints;
    let mut term = TestTerminal::new();
    let area = ratatui::layout::Rect::new(0, 0, 80, 1);
    term.render_widget(Footer::new(hints, icons()), area);

    assert!(term.line_contains(0, "[r] reload"));
    assert!(term.line_contains(0, "[q] quit"));
    assert!(!term.line_contains(0, "Updated"));
}

#[test]
fn test_footer_formats_timestamp() {
    let hints = &Locale::En.texts().hints;
    let at = Local
        .with_ymd_and_hms(2024, 5, 1, 9, 30, 15)
        .single()
        .expect("valid local time");
    let mut term = TestTerminal::new();
    let area = ratatui::layout::Rect::new(0, 0, 80, 1);
    term.render_widget(Footer::new(hints, icons()).last_loaded(Some(at)), area);

    assert!(term.line_contains(0, "Updated 09:30:15"));
}
