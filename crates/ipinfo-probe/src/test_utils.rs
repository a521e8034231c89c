//! Test utilities for process execution
//!
//! Provides a [`ScriptedRunner`] that replays canned outputs instead of
//! spawning real processes, and records every invocation it receives.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use ipinfo_core::prelude::*;

use crate::process::{CommandOutput, ProcessRunner};

/// One recorded call to [`ScriptedRunner::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub command: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

/// Canned reply for the next invocation
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Output(CommandOutput),
    SpawnFailure(String),
}

/// A [`ProcessRunner`] that answers from a queue of scripted replies
///
/// Replies are consumed in order. Running out of replies is reported as a
/// spawn failure so a test never hangs.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    replies: Mutex<VecDeque<ScriptedReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with the given exit code and stdout
    pub fn reply(self, exit_code: i32, stdout: impl Into<String>) -> Self {
        self.push(ScriptedReply::Output(CommandOutput::new(exit_code, stdout)))
    }

    /// Queue a failure to spawn
    pub fn spawn_failure(self, reason: impl Into<String>) -> Self {
        self.push(ScriptedReply::SpawnFailure(reason.into()))
    }

    /// Probe succeeds and the geolocation call prints `body`
    pub fn online(body: impl Into<String>) -> Self {
        Self::new().reply(0, "").reply(0, body)
    }

    /// Probe fails with curl's "could not resolve host" exit code
    pub fn offline() -> Self {
        Self::new().reply(6, "")
    }

    fn push(self, reply: ScriptedReply) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    /// Every invocation received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl ProcessRunner for ScriptedRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                command: command.to_string(),
                args: args.to_vec(),
                timeout,
            });
        }

        let next = self.replies.lock().ok().and_then(|mut r| r.pop_front());
        match next {
            Some(ScriptedReply::Output(output)) => Ok(output),
            Some(ScriptedReply::SpawnFailure(reason)) => Err(Error::process_spawn(command, reason)),
            None => Err(Error::process_spawn(command, "no scripted reply left")),
        }
    }
}
