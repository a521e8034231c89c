//! # ipinfo-probe - External Command Execution
//!
//! Runs the `curl` invocations behind the panel's reachability probe and
//! geolocation lookup.
//!
//! Depends on [`ipinfo_core`] for error handling.
//!
//! ## Public API
//!
//! ### Process Execution
//! - [`ProcessRunner`] - Run a command with an optional timeout, capture stdout
//! - [`SystemRunner`] - `tokio::process` implementation
//! - [`CommandOutput`] - Exit code plus captured stdout
//!
//! ### Commands
//! - [`Invocation`] - Prepared reachability or geolocation command
//! - [`locate()`] - Resolve a program such as `curl` on `PATH`

pub mod commands;
pub mod process;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use commands::{geolocation_url, locate, Invocation, CURL, TOKEN_PARAM};
pub use process::{CommandOutput, ProcessRunner, SystemRunner, TIMEOUT_EXIT_CODE};
