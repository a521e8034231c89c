//! Configuration types for the IP information panel
//!
//! Defines:
//! - `Settings` - Application settings (`config.toml`)
//! - Related sub-types and enums

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

/// Application settings (`<config_dir>/ipinfo-panel/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub probe: ProbeSettings,

    #[serde(default)]
    pub geolocation: GeolocationSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub watcher: WatcherSettings,
}

/// Reachability probe settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProbeSettings {
    /// Well-known host requested to decide whether the router is online
    #[serde(default = "default_probe_url")]
    pub url: String,

    /// Probe timeout in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProbeSettings {
    /// Probe timeout, never below one second (curl's `-m` granularity)
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            url: default_probe_url(),
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

/// Geolocation provider settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeolocationSettings {
    /// Lookup endpoint; the token is appended as the `apiKey` query parameter
    #[serde(default = "default_geolocation_endpoint")]
    pub endpoint: String,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self {
            endpoint: default_geolocation_endpoint(),
        }
    }
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UiSettings {
    #[serde(default)]
    pub locale: Locale,

    /// Delay before a loading row reveals its value
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,

    /// Icon mode: "unicode" (default) or "nerd_fonts"
    #[serde(default)]
    pub icons: IconMode,
}

impl UiSettings {
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            reveal_delay_ms: default_reveal_delay_ms(),
            icons: IconMode::default(),
        }
    }
}

/// Config record watcher settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WatcherSettings {
    /// Reload the panel when the configuration record changes on disk
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Debounce duration in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_probe_url() -> String {
    "https://www.google.com".to_string()
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_geolocation_endpoint() -> String {
    "https://api.ipgeolocation.io/ipgeo".to_string()
}

fn default_reveal_delay_ms() -> u64 {
    1000
}

fn default_debounce_ms() -> u64 {
    crate::watcher::DEFAULT_DEBOUNCE_MS
}

fn default_true() -> bool {
    true
}

/// Icon rendering mode for the TUI.
///
/// Controls whether icons use safe Unicode characters (default) or Nerd Font
/// glyphs (requires a Nerd Font installed in the terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconMode {
    /// Safe Unicode characters that work in all terminals
    #[default]
    Unicode,
    /// Nerd Font glyphs
    NerdFonts,
}

impl std::fmt::Display for IconMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IconMode::Unicode => write!(f, "unicode"),
            IconMode::NerdFonts => write!(f, "nerd_fonts"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.probe.url, "https://www.google.com");
        assert_eq!(settings.probe.timeout(), Duration::from_secs(5));
        assert_eq!(settings.geolocation.endpoint, "https://api.ipgeolocation.io/ipgeo");
        assert_eq!(settings.ui.reveal_delay(), Duration::from_millis(1000));
        assert_eq!(settings.ui.locale, Locale::En);
        assert_eq!(settings.ui.icons, IconMode::Unicode);
        assert!(settings.watcher.enabled);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[ui]
locale = "id"
"#,
        )
        .unwrap();
        assert_eq!(settings.ui.locale, Locale::Id);
        assert_eq!(settings.ui.reveal_delay_ms, 1000);
        assert_eq!(settings.probe.timeout_secs, 5);
    }

    #[test]
    fn test_zero_probe_timeout_is_raised_to_one_second() {
        let settings: Settings = toml::from_str("[probe]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(settings.probe.timeout_secs, 0);
        assert_eq!(settings.probe.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_icon_mode_parses_snake_case() {
        let settings: Settings = toml::from_str("[ui]\nicons = \"nerd_fonts\"\n").unwrap();
        assert_eq!(settings.ui.icons, IconMode::NerdFonts);
        assert_eq!(IconMode::NerdFonts.to_string(), "nerd_fonts");
    }
}
