//! ipinfo-tui - Terminal UI for the IP information panel
//!
//! Drives an [`Engine`](ipinfo_app::Engine) from ipinfo-app and adds terminal
//! rendering, event polling, and the panel widgets.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

// Re-export main entry point
pub use runner::run;
