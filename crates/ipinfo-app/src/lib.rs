//! ipinfo-app - Application state and orchestration for the IP information panel
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the panel:
//! the acquisition pipeline, field projection, the presentation state machine,
//! configuration loading, the Engine shared by the TUI and headless runners,
//! and the config record watcher.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod i18n;
pub mod input_key;
pub mod message;
pub mod panel;
pub mod pipeline;
pub mod process;
pub mod projection;
pub mod signals;
pub mod state;
pub mod watcher;

// Re-export primary types
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use i18n::{Locale, Texts};
pub use input_key::InputKey;
pub use message::Message;
pub use panel::{ConnectionStatus, DataRow, Panel, PanelView, RowPhase};
pub use state::{AppPhase, AppState};
