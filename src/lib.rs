//! IP information panel
//!
//! Router status panel showing internet connectivity and public IP
//! geolocation, as a terminal UI or as NDJSON in headless mode.

pub mod headless;

// Re-export main entry points
pub use headless::runner::{run_headless, run_headless_with};
pub use ipinfo_tui::run;
