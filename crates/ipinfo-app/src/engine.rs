//! Engine - shared orchestration state for TUI and headless runners
//!
//! Owns the message channel, the pending task handles, the config watcher
//! and the event broadcaster. Frontends feed messages in and either render
//! `engine.state` (TUI) or subscribe to [`EngineEvent`]s (headless).

use std::sync::Arc;

use ipinfo_probe::{ProcessRunner, SystemRunner};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::actions::{ActionContext, PendingTasks};
use crate::config::{ConfigStore, Settings};
use crate::engine_event::EngineEvent;
use crate::i18n::Locale;
use crate::message::Message;
use crate::panel::{PanelView, RowPhase};
use crate::process;
use crate::signals;
use crate::state::AppState;
use crate::watcher::ConfigWatcher;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StateSnapshot {
    generation: u64,
    /// Panel of the current generation is installed
    ready: bool,
    /// Settled flag per data row
    settled: Vec<bool>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        let panel = state
            .panel
            .as_ref()
            .filter(|panel| panel.generation() == state.generation);

        Self {
            generation: state.generation,
            ready: panel.is_some(),
            settled: panel
                .map(|panel| panel.rows().iter().map(|row| !row.is_loading()).collect())
                .unwrap_or_default(),
        }
    }

    fn all_settled(&self) -> bool {
        self.ready && self.settled.iter().all(|settled| *settled)
    }
}

/// Orchestration engine for the IP information panel.
///
/// Generic over the process runner so tests can script curl.
pub struct Engine<R = SystemRunner> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, watcher, frontends).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Acquisition and reveal tasks of the current render cycle
    tasks: PendingTasks,

    context: ActionContext<R>,

    /// Config record watcher. None if disabled or failed to start.
    config_watcher: Option<ConfigWatcher>,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<SystemRunner> {
    /// Create an engine that runs real curl commands.
    ///
    /// Also spawns the signal handler and, when enabled, the config watcher.
    pub fn new(store: Arc<dyn ConfigStore>, settings: Settings) -> Self {
        let mut engine = Self::with_runner(store, SystemRunner::new(), settings);
        signals::spawn_signal_handler(engine.msg_tx.clone());
        engine.watch_config();
        engine
    }
}

impl<R> Engine<R>
where
    R: ProcessRunner + Sync + 'static,
{
    /// Create an engine around an explicit runner (no signal handler, no watcher)
    pub fn with_runner(store: Arc<dyn ConfigStore>, runner: R, settings: Settings) -> Self {
        let state = AppState::with_settings(settings.clone());
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            tasks: PendingTasks::new(),
            context: ActionContext::new(store, runner, settings),
            config_watcher: None,
            event_tx,
        }
    }

    /// Override the display language chosen in settings
    pub fn set_locale(&mut self, locale: Locale) {
        self.state.locale = locale;
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn runner(&self) -> &R {
        &self.context.runner
    }

    /// Start the config watcher if the settings and store allow it.
    ///
    /// Returns whether a watcher is running afterwards.
    pub fn watch_config(&mut self) -> bool {
        if self.config_watcher.is_some() {
            return true;
        }
        if !self.state.settings.watcher.enabled {
            debug!("Config watcher disabled in settings");
            return false;
        }
        let Some(location) = self.context.store.location() else {
            debug!("Config store has no backing file, not watching");
            return false;
        };

        let mut watcher = ConfigWatcher::from_settings(location, &self.state.settings.watcher);
        if let Err(e) = watcher.start(self.msg_tx.clone()) {
            warn!("Failed to start config watcher: {}", e);
            return false;
        }

        info!("Watching configuration record {}", watcher.path().display());
        self.config_watcher = Some(watcher);
        true
    }

    /// Kick off the first render cycle
    pub fn start(&mut self) {
        self.process_message(Message::Reload);
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle.
    ///
    /// Emits EngineEvents based on state changes detected by comparing
    /// before/after snapshots.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &mut self.tasks,
            &self.context,
        );

        let post = StateSnapshot::capture(&self.state);

        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Number of background tasks still running
    pub fn pending_tasks(&self) -> usize {
        self.tasks.active()
    }

    /// Stop the watcher and cancel every pending task
    pub fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        if let Some(ref mut watcher) = self.config_watcher {
            watcher.stop();
        }
        self.config_watcher = None;

        let aborted = self.tasks.abort_all();
        info!("Engine shut down ({} task(s) cancelled)", aborted);
    }

    /// Compare pre/post snapshots and broadcast what changed
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if post.generation != pre.generation {
            self.emit(EngineEvent::LoadStarted {
                generation: post.generation,
            });
        }

        let fresh_panel = post.ready && (!pre.ready || pre.generation != post.generation);

        if fresh_panel {
            self.emit_panel_ready(post.generation);
        } else if post.ready {
            for (index, settled) in post.settled.iter().enumerate() {
                let was_settled = pre.settled.get(index).copied().unwrap_or(false);
                if *settled && !was_settled {
                    self.emit_row_settled(post.generation, index);
                }
            }
        }

        if post.all_settled() && (fresh_panel || !pre.all_settled()) {
            self.emit(EngineEvent::PanelSettled {
                generation: post.generation,
            });
        }
    }

    fn emit_panel_ready(&self, generation: u64) {
        let Some(panel) = self.state.panel.as_ref() else {
            return;
        };
        let texts = self.state.texts();

        let message = match panel.view() {
            PanelView::Error { message } | PanelView::NoData { message } => Some(message.clone()),
            _ => None,
        };

        self.emit(EngineEvent::PanelReady {
            generation,
            kind: panel.view().kind(),
            status: panel.status(),
            status_label: panel.status().map(|s| s.label(texts).to_string()),
            message,
            rows: panel.rows().iter().map(|row| row.label.clone()).collect(),
        });
    }

    fn emit_row_settled(&self, generation: u64, index: usize) {
        let Some(row) = self
            .state
            .panel
            .as_ref()
            .and_then(|panel| panel.rows().get(index))
        else {
            return;
        };
        let RowPhase::Settled(value) = &row.phase else {
            return;
        };

        self.emit(EngineEvent::RowSettled {
            generation,
            index,
            key: row.key.clone(),
            label: row.label.clone(),
            value: value.clone(),
        });
    }

    /// send() returns Err only if there are no receivers, which is fine
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}
