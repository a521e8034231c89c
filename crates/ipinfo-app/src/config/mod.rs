//! Configuration for the IP information panel
//!
//! Two layers:
//! - the panel record (`/etc/config/ipinfo`), read through [`ConfigStore`]
//! - application settings (`<config_dir>/ipinfo-panel/config.toml`)

pub mod settings;
pub mod store;
pub mod types;

pub use settings::{default_settings_path, init_settings_file, load_settings};
pub use store::{
    configuration_from_section, parse_flag, parse_uci, render_record, write_default_record,
    ConfigStore, MemoryStore, UciFileStore, UciSection, DEFAULT_RECORD_PATH, SECTION_TYPE,
};
pub use types::*;

#[cfg(test)]
pub use store::MockConfigStore;
