//! Action handlers: spawn the background tasks requested by update()
//!
//! Two kinds of work leave the update loop:
//! - one acquisition task per render cycle (record load + pipeline)
//! - one reveal timer per loading data row
//!
//! Both report back through the message channel, tagged with the
//! generation that requested them.

use std::sync::Arc;
use std::time::Duration;

use ipinfo_probe::ProcessRunner;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::{ConfigStore, Settings};
use crate::handler::UpdateAction;
use crate::message::Message;
use crate::pipeline;

/// Everything a spawned acquisition needs, shareable across tasks
pub struct ActionContext<R> {
    pub store: Arc<dyn ConfigStore>,
    pub runner: Arc<R>,
    pub settings: Arc<Settings>,
}

impl<R> ActionContext<R> {
    pub fn new(store: Arc<dyn ConfigStore>, runner: R, settings: Settings) -> Self {
        Self {
            store,
            runner: Arc::new(runner),
            settings: Arc::new(settings),
        }
    }
}

// Manual impl: a derive would require `R: Clone`
impl<R> Clone for ActionContext<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            runner: Arc::clone(&self.runner),
            settings: Arc::clone(&self.settings),
        }
    }
}

/// Handles of the tasks spawned for the current render cycle
#[derive(Debug, Default)]
pub struct PendingTasks {
    acquisition: Option<JoinHandle<()>>,
    reveals: Vec<JoinHandle<()>>,
}

impl PendingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks that have not finished yet
    pub fn active(&self) -> usize {
        let acquisition = self
            .acquisition
            .as_ref()
            .is_some_and(|handle| !handle.is_finished());
        let reveals = self.reveals.iter().filter(|h| !h.is_finished()).count();
        usize::from(acquisition) + reveals
    }

    /// Abort every tracked task; returns how many were still running
    pub fn abort_all(&mut self) -> usize {
        let mut aborted = 0;
        for handle in self.acquisition.take().into_iter().chain(self.reveals.drain(..)) {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            debug!("Aborted {} pending task(s)", aborted);
        }
        aborted
    }
}

/// Execute an action by spawning background tasks
pub fn handle_action<R>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    tasks: &mut PendingTasks,
    context: &ActionContext<R>,
) where
    R: ProcessRunner + Sync + 'static,
{
    match action {
        UpdateAction::StartLoad { generation } => {
            // A reload supersedes whatever the previous cycle left running
            tasks.abort_all();
            tasks.acquisition = Some(spawn_acquisition(generation, msg_tx, context.clone()));
        }

        UpdateAction::ScheduleReveals {
            generation,
            rows,
            delay,
        } => {
            debug!(
                "Scheduling {} reveal(s) for generation {} after {:?}",
                rows, generation, delay
            );
            tasks.reveals.retain(|handle| !handle.is_finished());
            for index in 0..rows {
                tasks
                    .reveals
                    .push(spawn_reveal(generation, index, delay, msg_tx.clone()));
            }
        }

        UpdateAction::CancelPending => {
            tasks.abort_all();
        }
    }
}

/// Load the record, run the pipeline, report the outcome
fn spawn_acquisition<R>(
    generation: u64,
    msg_tx: mpsc::Sender<Message>,
    context: ActionContext<R>,
) -> JoinHandle<()>
where
    R: ProcessRunner + Sync + 'static,
{
    tokio::spawn(async move {
        let message = match context.store.load() {
            Ok(config) => {
                let result =
                    pipeline::acquire(config, context.runner.as_ref(), &context.settings).await;
                Message::PipelineCompleted {
                    generation,
                    result: Box::new(result),
                }
            }
            Err(e) => {
                warn!("Failed to load configuration record: {}", e);
                Message::ConfigLoadFailed {
                    generation,
                    error: e.to_string(),
                }
            }
        };

        if msg_tx.send(message).await.is_err() {
            debug!("Message channel closed before generation {} completed", generation);
        }
    })
}

fn spawn_reveal(
    generation: u64,
    index: usize,
    delay: Duration,
    msg_tx: mpsc::Sender<Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = msg_tx.send(Message::RowSettled { generation, index }).await;
    })
}
