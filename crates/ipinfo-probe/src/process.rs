//! External process execution
//!
//! The pipeline performs all network I/O by running `curl` through a
//! [`ProcessRunner`]. A nonzero exit is data, not an error: the only failure
//! surfaced as `Err` is a process that could not be started at all.

use std::process::Stdio;
use std::time::Duration;

use ipinfo_core::prelude::*;
use tokio::process::Command;

/// Exit code reported when a command is killed for exceeding its timeout
///
/// Matches the convention of coreutils `timeout(1)`.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Exit code reported when the process was terminated by a signal
pub const SIGNALED_EXIT_CODE: i32 = -1;

/// Captured result of one command execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
}

impl CommandOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
        }
    }

    /// Output of a command that was killed by the runner's timeout
    pub fn timed_out() -> Self {
        Self::new(TIMEOUT_EXIT_CODE, String::new())
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs an external command and captures its standard output
#[trait_variant::make(ProcessRunner: Send)]
pub trait LocalProcessRunner {
    /// Run `command` with `args`, killing it after `timeout` if one is given
    ///
    /// Returns `Err` only when the process cannot be spawned.
    async fn run(
        &self,
        command: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<CommandOutput>;
}

/// [`ProcessRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<CommandOutput> {
        let started = std::time::Instant::now();

        let pending = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output();

        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, pending).await {
                Ok(result) => result,
                Err(_) => {
                    // Dropping the future kills the child (kill_on_drop)
                    warn!("{} timed out after {:?}", command, limit);
                    return Ok(CommandOutput::timed_out());
                }
            },
            None => pending.await,
        };

        let output = result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::command_not_found(command)
            } else {
                Error::process_spawn(command, e.to_string())
            }
        })?;

        let exit_code = output.status.code().unwrap_or(SIGNALED_EXIT_CODE);
        debug!(
            "{} exited with {} after {:?} ({} bytes)",
            command,
            exit_code,
            started.elapsed(),
            output.stdout.len()
        );

        Ok(CommandOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
