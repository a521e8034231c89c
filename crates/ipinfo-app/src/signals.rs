//! OS signals: SIGHUP re-renders the panel, SIGINT/SIGTERM quit
//!
//! Router init systems send SIGHUP after the configuration record is
//! committed, so a hangup is treated like pressing `r`.

use ipinfo_core::prelude::*;
use tokio::sync::mpsc;

use crate::message::Message;

/// Signals the panel reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelSignal {
    Hangup,
    Interrupt,
    Terminate,
}

impl PanelSignal {
    fn message(self) -> Message {
        match self {
            PanelSignal::Hangup => Message::Reload,
            PanelSignal::Interrupt | PanelSignal::Terminate => Message::Quit,
        }
    }

    fn ends_listening(self) -> bool {
        !matches!(self, PanelSignal::Hangup)
    }
}

/// Spawn a task that turns OS signals into reload and quit messages
pub fn spawn_signal_handler(tx: mpsc::Sender<Message>) {
    tokio::spawn(async move {
        let mut listener = match SignalListener::install() {
            Ok(listener) => listener,
            Err(e) => {
                error!("Signal handler error: {}", e);
                return;
            }
        };

        loop {
            let signal = match listener.next().await {
                Ok(signal) => signal,
                Err(e) => {
                    error!("Signal handler error: {}", e);
                    return;
                }
            };

            info!("Received {:?}", signal);
            if tx.send(signal.message()).await.is_err() || signal.ends_listening() {
                return;
            }
        }
    });
}

#[cfg(unix)]
struct SignalListener {
    hangup: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalListener {
    fn install() -> Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        let install = |kind: SignalKind, name: &str| {
            signal(kind)
                .map_err(|e| Error::terminal(format!("Failed to create {} handler: {}", name, e)))
        };

        Ok(Self {
            hangup: install(SignalKind::hangup(), "SIGHUP")?,
            interrupt: install(SignalKind::interrupt(), "SIGINT")?,
            terminate: install(SignalKind::terminate(), "SIGTERM")?,
        })
    }

    async fn next(&mut self) -> Result<PanelSignal> {
        Ok(tokio::select! {
            _ = self.hangup.recv() => PanelSignal::Hangup,
            _ = self.interrupt.recv() => PanelSignal::Interrupt,
            _ = self.terminate.recv() => PanelSignal::Terminate,
        })
    }
}

// Only Ctrl+C elsewhere
#[cfg(not(unix))]
struct SignalListener;

#[cfg(not(unix))]
impl SignalListener {
    fn install() -> Result<Self> {
        Ok(Self)
    }

    async fn next(&mut self) -> Result<PanelSignal> {
        tokio::signal::ctrl_c()
            .await
            .map_err(|e| Error::terminal(format!("Failed to listen for Ctrl+C: {}", e)))?;
        Ok(PanelSignal::Interrupt)
    }
}
