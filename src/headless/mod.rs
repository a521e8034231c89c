//! Headless mode - NDJSON event output instead of the TUI
//!
//! Runs a single render cycle and writes one JSON object per line to stdout,
//! so scripts (and router cron jobs) can consume the panel without parsing
//! ANSI escape codes.
//!
//! # Example Output
//!
//! ```json
//! {"event":"loading","generation":1,"timestamp":1704700001000}
//! {"event":"status","generation":1,"status":"connected","label":"Connected","timestamp":1704700002000}
//! {"event":"row_loading","generation":1,"index":0,"label":"Public IP","timestamp":1704700002000}
//! {"event":"row_settled","generation":1,"index":0,"key":"ip","label":"Public IP","value":"203.0.113.7","timestamp":1704700003000}
//! {"event":"result","generation":1,"kind":"data","status":"connected","fields":[...],"timestamp":1704700003000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use ipinfo_app::panel::Panel;
use ipinfo_app::{ConnectionStatus, EngineEvent};
use serde::Serialize;
use tracing::error;

/// One settled field in the final `result` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultField {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// A render cycle started
    Loading { generation: u64, timestamp: i64 },

    /// Status row of the panel
    Status {
        generation: u64,
        status: ConnectionStatus,
        label: String,
        timestamp: i64,
    },

    /// A data row was inserted in its loading state
    RowLoading {
        generation: u64,
        index: usize,
        label: String,
        timestamp: i64,
    },

    /// A data row revealed its value
    RowSettled {
        generation: u64,
        index: usize,
        key: String,
        label: String,
        value: String,
        timestamp: i64,
    },

    /// Full-width message row (rate limit, upstream or config error, no data)
    Message {
        generation: u64,
        kind: &'static str,
        text: String,
        timestamp: i64,
    },

    /// Final panel once every row has settled
    Result {
        generation: u64,
        kind: &'static str,
        status: Option<ConnectionStatus>,
        fields: Vec<ResultField>,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.write_to(&mut stdout) {
            error!("Failed to write headless event to stdout: {}", e);
        }
    }

    /// Write this event as one NDJSON line and flush
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }

    /// Final `result` event for a settled panel
    pub fn result(panel: &Panel) -> Self {
        let fields = panel
            .rows()
            .iter()
            .map(|row| ResultField {
                key: row.key.clone(),
                label: row.label.clone(),
                value: row.settled_text().unwrap_or_default().to_string(),
            })
            .collect();

        Self::Result {
            generation: panel.generation(),
            kind: panel.view().kind(),
            status: panel.status(),
            fields,
            timestamp: Self::now(),
        }
    }

    /// Translate an engine event into the lines it produces
    ///
    /// `PanelSettled` and `Shutdown` produce nothing here; the runner builds
    /// the `result` line from the settled panel itself.
    pub fn from_engine(event: &EngineEvent) -> Vec<Self> {
        let timestamp = Self::now();
        match event {
            EngineEvent::LoadStarted { generation } => vec![Self::Loading {
                generation: *generation,
                timestamp,
            }],

            EngineEvent::PanelReady {
                generation,
                kind,
                status,
                status_label,
                message,
                rows,
            } => {
                let mut events = Vec::with_capacity(rows.len() + 2);
                if let (Some(status), Some(label)) = (status, status_label) {
                    events.push(Self::Status {
                        generation: *generation,
                        status: *status,
                        label: label.clone(),
                        timestamp,
                    });
                }
                if let Some(text) = message {
                    events.push(Self::Message {
                        generation: *generation,
                        kind: *kind,
                        text: text.clone(),
                        timestamp,
                    });
                }
                events.extend(rows.iter().enumerate().map(|(index, label)| Self::RowLoading {
                    generation: *generation,
                    index,
                    label: label.clone(),
                    timestamp,
                }));
                events
            }

            EngineEvent::RowSettled {
                generation,
                index,
                key,
                label,
                value,
            } => vec![Self::RowSettled {
                generation: *generation,
                index: *index,
                key: key.clone(),
                label: label.clone(),
                value: value.clone(),
                timestamp,
            }],

            EngineEvent::PanelSettled { .. } | EngineEvent::Shutdown => Vec::new(),
        }
    }
}
