//! Main update function - handles state transitions (TEA pattern)

use ipinfo_core::PipelineResult;
use tracing::{debug, info, trace, warn};

use crate::message::Message;
use crate::panel::Panel;
use crate::state::AppState;

use super::{keys::handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.quit();
            UpdateResult::action(UpdateAction::CancelPending)
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.tick();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Render Cycle
        // ─────────────────────────────────────────────────────────
        Message::Reload => start_load(state),

        Message::ConfigChanged => {
            info!("Configuration record changed, reloading");
            start_load(state)
        }

        Message::PipelineCompleted { generation, result } => {
            handle_pipeline_completed(state, generation, &result)
        }

        Message::ConfigLoadFailed { generation, error } => {
            if !state.is_current(generation) {
                debug!("Ignoring config failure from stale generation {}", generation);
                return UpdateResult::none();
            }
            warn!("Configuration record could not be loaded: {}", error);
            let panel = Panel::config_failure(&error, state.texts(), generation);
            state.finish_load(panel);
            UpdateResult::none()
        }

        Message::RowSettled { generation, index } => {
            if !state.is_current(generation) {
                debug!("Ignoring reveal from stale generation {}", generation);
                return UpdateResult::none();
            }
            if let Some(panel) = state.panel.as_mut() {
                if panel.settle(index).is_none() {
                    debug!("Row {} already settled or out of range", index);
                }
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Config Watcher
        // ─────────────────────────────────────────────────────────
        Message::WatcherError { message } => {
            warn!("Config watcher error: {}", message);
            state.watcher_error = Some(message);
            UpdateResult::none()
        }
    }
}

fn start_load(state: &mut AppState) -> UpdateResult {
    if state.should_quit() {
        return UpdateResult::none();
    }
    let generation = state.begin_load();
    debug!("Starting render cycle {}", generation);
    UpdateResult::action(UpdateAction::StartLoad { generation })
}

fn handle_pipeline_completed(
    state: &mut AppState,
    generation: u64,
    result: &PipelineResult,
) -> UpdateResult {
    if !state.is_current(generation) {
        debug!("Ignoring pipeline result from stale generation {}", generation);
        return UpdateResult::none();
    }

    trace!(
        result = %serde_json::to_string(result).unwrap_or_default(),
        "Pipeline finished for generation {} ({})",
        generation,
        result.kind()
    );

    let panel = Panel::from_result(result, state.texts(), generation);
    let rows = panel.pending_rows();
    state.finish_load(panel);

    if rows == 0 {
        return UpdateResult::none();
    }

    UpdateResult::action(UpdateAction::ScheduleReveals {
        generation,
        rows,
        delay: state.settings.ui.reveal_delay(),
    })
}
