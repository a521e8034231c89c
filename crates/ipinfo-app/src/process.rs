//! Message processing: run update() and dispatch the resulting actions

use ipinfo_probe::ProcessRunner;
use tokio::sync::mpsc;

use crate::actions::{handle_action, ActionContext, PendingTasks};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
///
/// Follow-up messages are processed in the same call, so a key press that
/// maps to `Reload` starts the load before this returns.
pub fn process_message<R>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    tasks: &mut PendingTasks,
    context: &ActionContext<R>,
) where
    R: ProcessRunner + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), tasks, context);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
