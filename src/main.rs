//! ipinfo - router status panel for connectivity and public IP geolocation
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use ipinfo_app::config::{
    default_settings_path, init_settings_file, load_settings, write_default_record, ConfigStore,
    UciFileStore, DEFAULT_RECORD_PATH,
};
use ipinfo_app::i18n::Locale;
use ipinfo_app::Engine;
use ipinfo_core::prelude::*;
use ipinfo_panel::headless::HeadlessEvent;
use ipinfo_probe::CURL;

/// ipinfo - internet status and public IP information for the router
#[derive(Parser, Debug)]
#[command(name = "ipinfo")]
#[command(about = "Internet status and public IP information panel", long_about = None)]
struct Args {
    /// Path to the configuration record
    #[arg(long, value_name = "PATH", default_value = DEFAULT_RECORD_PATH)]
    config: PathBuf,

    /// Path to the settings file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Run in headless mode (JSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Display language (en or id), overrides the settings file
    #[arg(long, value_name = "CODE")]
    locale: Option<Locale>,

    /// Write default settings and configuration record, then exit
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings_path = args.settings.unwrap_or_else(default_settings_path);

    if args.init {
        return init_files(&settings_path, &args.config);
    }

    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the TUI owns stdout)
    ipinfo_core::logging::init()?;

    let settings = load_settings(&settings_path);

    // Without curl every probe fails and the panel reads as disconnected
    if let Err(e) = ipinfo_probe::locate(CURL) {
        warn!("{}; the panel will report no connection", e);
        if args.headless {
            HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
        }
    }
    let store: Arc<dyn ConfigStore> = Arc::new(UciFileStore::new(&args.config));
    info!("Configuration record: {}", args.config.display());

    if args.headless {
        return ipinfo_panel::run_headless(store, settings, args.locale).await;
    }

    let mut engine = Engine::new(store, settings);
    if let Some(locale) = args.locale {
        engine.set_locale(locale);
    }
    ipinfo_panel::run(engine).await
}

/// Create whichever of the two files is missing and report what happened
fn init_files(settings_path: &Path, record_path: &Path) -> Result<()> {
    if init_settings_file(settings_path)? {
        eprintln!("✅ Created settings: {}", settings_path.display());
    } else {
        eprintln!("Settings already exist: {}", settings_path.display());
    }

    if write_default_record(record_path)? {
        eprintln!("✅ Created configuration record: {}", record_path.display());
        eprintln!("   The panel is disabled until 'enable' is set and a token is added.");
    } else {
        eprintln!(
            "Configuration record already exists: {}",
            record_path.display()
        );
    }

    Ok(())
}
