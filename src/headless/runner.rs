//! Headless mode runner - one render cycle without the TUI

use std::io::{self, Write};
use std::sync::Arc;

use ipinfo_app::config::{ConfigStore, Settings};
use ipinfo_app::i18n::Locale;
use ipinfo_app::{Engine, EngineEvent};
use ipinfo_core::prelude::*;
use ipinfo_probe::ProcessRunner;
use tokio::sync::broadcast::{self, error::TryRecvError};

use super::HeadlessEvent;

/// Run in headless mode - output NDJSON events instead of the TUI
pub async fn run_headless(
    store: Arc<dyn ConfigStore>,
    mut settings: Settings,
    locale: Option<Locale>,
) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("IP information panel starting in HEADLESS mode");
    info!("═══════════════════════════════════════════════════════");

    // A single cycle has nothing to reload
    settings.watcher.enabled = false;

    let mut engine = Engine::new(store, settings);
    if let Some(locale) = locale {
        engine.set_locale(locale);
    }

    let mut stdout = io::stdout();
    let result = run_headless_with(&mut engine, &mut stdout).await;

    if let Err(ref e) = result {
        HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
    }

    engine.shutdown();
    info!("Headless mode exiting");
    result
}

/// Drive `engine` through one render cycle, writing events to `out`
///
/// Returns once every row of the panel has settled, or earlier on quit.
pub async fn run_headless_with<R, W>(engine: &mut Engine<R>, out: &mut W) -> Result<()>
where
    R: ProcessRunner + Sync + 'static,
    W: Write,
{
    let mut events = engine.subscribe();
    engine.start();

    loop {
        if forward_events(engine, &mut events, out)? {
            return Ok(());
        }

        if engine.should_quit() {
            info!("Quit requested before the panel settled");
            return Ok(());
        }

        match engine.msg_rx.recv().await {
            Some(msg) => engine.process_message(msg),
            None => {
                info!("Message channel closed");
                return Ok(());
            }
        }
    }
}

/// Write pending engine events; true once the panel has settled
fn forward_events<R, W>(
    engine: &Engine<R>,
    events: &mut broadcast::Receiver<EngineEvent>,
    out: &mut W,
) -> Result<bool>
where
    R: ProcessRunner + Sync + 'static,
    W: Write,
{
    loop {
        let event = match events.try_recv() {
            Ok(event) => event,
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} event(s) dropped", skipped);
                continue;
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(false),
        };

        for line in HeadlessEvent::from_engine(&event) {
            line.write_to(out)?;
        }

        if let EngineEvent::PanelSettled { generation } = event {
            if let Some(panel) = engine.state.panel.as_ref() {
                debug!("Panel generation {} settled", generation);
                HeadlessEvent::result(panel).write_to(out)?;
            }
            return Ok(true);
        }
    }
}
