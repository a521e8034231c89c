//! Settings file loading and first-run setup

use std::path::{Path, PathBuf};

use ipinfo_core::prelude::*;

use super::types::Settings;

const APP_DIR: &str = "ipinfo-panel";
const CONFIG_FILENAME: &str = "config.toml";

/// Default location of the settings file
///
/// `<config_dir>/ipinfo-panel/config.toml`, falling back to the working
/// directory when the platform has no config directory.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILENAME)
}

/// Load settings from `path`, falling back to defaults
///
/// A missing file is normal. An unreadable or unparsable file is logged and
/// ignored so a typo never keeps the panel from starting.
pub fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No settings file at {:?}, using defaults", path);
        return Settings::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", path, e);
            Settings::default()
        }
    }
}

/// Write a commented default settings file if none exists
///
/// Returns `true` when a file was created.
pub fn init_settings_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    std::fs::write(path, generate_default_settings())
        .with_context(|| format!("Failed to write {:?}", path))?;
    info!("Created default settings at {:?}", path);
    Ok(true)
}

fn generate_default_settings() -> &'static str {
    r#"# IP information panel settings

[probe]
url = "https://www.google.com"   # Host requested to decide whether we are online
timeout_secs = 5

[geolocation]
endpoint = "https://api.ipgeolocation.io/ipgeo"

[ui]
locale = "en"            # "en" or "id"
reveal_delay_ms = 1000   # Delay before each row shows its value
icons = "unicode"        # "unicode" or "nerd_fonts"

[watcher]
enabled = true           # Reload when the configuration record changes
debounce_ms = 500
"#
}
