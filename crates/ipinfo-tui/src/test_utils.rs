//! Test utilities for TUI rendering verification
//!
//! Widgets and full screens are rendered into ratatui's `TestBackend`
//! and asserted on as plain text.

use ipinfo_app::panel::Panel;
use ipinfo_app::state::AppState;
use ipinfo_core::{Configuration, FieldGroup, FieldSelection, GeolocationPayload, PipelineResult};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

/// Standard test terminal size (matches common terminal dimensions)
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Compact terminal for testing narrow layouts
pub const COMPACT_WIDTH: u16 = 40;
pub const COMPACT_HEIGHT: u16 = 12;

/// Test utility wrapper around ratatui's TestBackend terminal.
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a new test terminal with standard dimensions (80x24)
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn compact() -> Self {
        Self::with_size(COMPACT_WIDTH, COMPACT_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame (e.g. `render::view`)
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Check if a specific line contains text
    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// Row index of the first line containing `text`
    pub fn find_line(&self, text: &str) -> Option<u16> {
        let buffer = self.buffer();
        (0..buffer.area.height).find(|y| get_line_content(buffer, *y).contains(text))
    }

    /// Get all content as a string (for debugging)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

/// Geolocation payload used across render tests
pub fn sample_payload() -> GeolocationPayload {
    match serde_json::json!({
        "ip": "203.0.113.7",
        "isp": "ExampleNet",
        "organization": "Example Org",
        "city": "Bandung",
        "state_prov": "West Java",
        "country_name": "Indonesia",
        "country_emoji": "🇮🇩"
    }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("literal is an object"),
    }
}

/// Enabled configuration selecting IP, ISP and city
pub fn sample_configuration() -> Configuration {
    Configuration::new(
        true,
        FieldSelection::new()
            .with_group(FieldGroup::Isp, ["ip", "isp"])
            .with_group(FieldGroup::Loc, ["city"]),
        "token",
    )
}

/// State whose current render cycle finished with `result`
pub fn state_with_result(result: &PipelineResult) -> AppState {
    let mut state = AppState::new();
    let generation = state.begin_load();
    let panel = Panel::from_result(result, state.texts(), generation);
    state.finish_load(panel);
    state
}

/// State showing a data panel for the sample payload
pub fn data_state() -> AppState {
    state_with_result(&PipelineResult::Fetched {
        configuration: sample_configuration(),
        payload: sample_payload(),
    })
}

/// Settle every row of the current panel
pub fn settle_all(state: &mut AppState) {
    if let Some(panel) = state.panel.as_mut() {
        for index in 0..panel.rows().len() {
            panel.settle(index);
        }
    }
}
