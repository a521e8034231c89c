//! Application state (Model in TEA pattern)

use chrono::{DateTime, Local};

use crate::config::Settings;
use crate::i18n::{Locale, Texts};
use crate::panel::Panel;

/// Lifecycle of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Acquisition pipeline running for the current generation
    #[default]
    Loading,
    /// Panel built for the current generation
    Ready,
    Quitting,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,

    pub settings: Settings,

    /// Display language, from settings unless overridden on the command line
    pub locale: Locale,

    /// Render cycle counter; bumped on every reload
    pub generation: u64,

    /// Panel of the current generation, once its pipeline has completed
    pub panel: Option<Panel>,

    /// Spinner animation frame
    pub animation_frame: u64,

    pub last_loaded_at: Option<DateTime<Local>>,

    /// Last config watcher failure, shown in the footer
    pub watcher_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: AppPhase::default(),
            locale: settings.ui.locale,
            settings,
            generation: 0,
            panel: None,
            animation_frame: 0,
            last_loaded_at: None,
            watcher_error: None,
        }
    }

    pub fn texts(&self) -> &'static Texts {
        self.locale.texts()
    }

    /// Enter a new render cycle and return its generation
    ///
    /// The previous panel is discarded; it must not receive late reveals.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.panel = None;
        self.phase = AppPhase::Loading;
        self.generation
    }

    /// Install the panel for the current generation
    pub fn finish_load(&mut self, panel: Panel) {
        self.panel = Some(panel);
        self.phase = AppPhase::Ready;
        self.last_loaded_at = Some(Local::now());
    }

    /// Whether a message tagged with `generation` belongs to the current cycle
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation && self.phase != AppPhase::Quitting
    }

    pub fn is_loading(&self) -> bool {
        self.phase == AppPhase::Loading
    }

    pub fn tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
