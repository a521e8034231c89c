//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use crate::panel::ConnectionStatus;

/// Domain events emitted by the Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A render cycle started; the previous panel is gone
    LoadStarted { generation: u64 },

    /// The pipeline finished and the panel for `generation` was built
    PanelReady {
        generation: u64,
        /// Panel body kind (`data`, `offline`, `error`, ...)
        kind: &'static str,
        status: Option<ConnectionStatus>,
        /// Localized status text, when a status row is shown
        status_label: Option<String>,
        /// Message row text for non-data panels
        message: Option<String>,
        /// Labels of the data rows, all still loading
        rows: Vec<String>,
    },

    /// A data row revealed its value
    RowSettled {
        generation: u64,
        index: usize,
        key: String,
        label: String,
        value: String,
    },

    /// Every row of the current panel is settled
    PanelSettled { generation: u64 },

    /// The engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Event type label, used for logging and serialization
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::LoadStarted { .. } => "load_started",
            EngineEvent::PanelReady { .. } => "panel_ready",
            EngineEvent::RowSettled { .. } => "row_settled",
            EngineEvent::PanelSettled { .. } => "panel_settled",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels() {
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            EngineEvent::LoadStarted { generation: 1 }.event_type(),
            "load_started"
        );
        assert_eq!(
            EngineEvent::PanelSettled { generation: 1 }.event_type(),
            "panel_settled"
        );
    }
}
