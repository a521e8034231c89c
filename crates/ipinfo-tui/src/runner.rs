//! Main TUI runner - entry point and event loop

use ipinfo_app::Engine;
use ipinfo_core::prelude::*;

use crate::{event, render, terminal};

/// Run the TUI around a prepared engine until the user quits
pub async fn run(mut engine: Engine) -> Result<()> {
    let mut term = terminal::init();

    engine.start();
    info!("TUI started");

    let result = run_loop(&mut term, &mut engine).await;

    engine.shutdown();
    terminal::restore();

    result
}

/// Main event loop
async fn run_loop(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Pipeline results, reveal timers, watcher and signal messages
        engine.drain_pending_messages();

        terminal
            .draw(|frame| render::view(frame, &engine.state))
            .map_err(|e| Error::terminal(e.to_string()))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }

        // poll() blocks this worker; let tasks queued on it make progress
        tokio::task::yield_now().await;
    }

    Ok(())
}
