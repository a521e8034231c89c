//! Message types for the application (TEA pattern)

use ipinfo_core::PipelineResult;

use crate::input_key::InputKey;

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from the frontend
    Key(InputKey),

    /// Tick event for spinner animation
    Tick,

    /// Quit immediately (q, Esc, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Render Cycle
    // ─────────────────────────────────────────────────────────
    /// Start a new render cycle: re-read the record and re-run the pipeline
    Reload,

    /// The acquisition task for `generation` finished
    PipelineCompleted {
        generation: u64,
        result: Box<PipelineResult>,
    },

    /// The configuration record for `generation` could not be loaded
    ConfigLoadFailed { generation: u64, error: String },

    /// Reveal timer for one data row fired
    RowSettled { generation: u64, index: usize },

    // ─────────────────────────────────────────────────────────
    // Config Watcher
    // ─────────────────────────────────────────────────────────
    /// The configuration record changed on disk
    ConfigChanged,

    /// File watcher failure
    WatcherError { message: String },
}
