//! Persisted configuration record
//!
//! The record lives in a UCI file (OpenWrt's `/etc/config/<package>` format):
//!
//! ```text
//! config ipinfo 'config'
//!     option enable '1'
//!     option token 'abc123'
//!     list isp 'ip'
//!     list co 'country_name'
//! ```
//!
//! The first `ipinfo` section is read; a file without one falls back to its
//! first section of any type. The stringly-typed `enable` flag
//! is validated here so nothing downstream sees `"0"`/`"1"`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};

use ipinfo_core::prelude::*;
use ipinfo_core::{Configuration, FieldGroup, FieldSelection};
use regex::Regex;

/// Default record location on a router
pub const DEFAULT_RECORD_PATH: &str = "/etc/config/ipinfo";

/// UCI section type holding the record
pub const SECTION_TYPE: &str = "ipinfo";

/// Read-only access to the panel's configuration record
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore: Send + Sync {
    /// Load the record; `Ok(None)` when no record exists
    fn load(&self) -> Result<Option<Configuration>>;

    /// File backing this store, if any (used by the watcher)
    fn location(&self) -> Option<PathBuf>;
}

// ─────────────────────────────────────────────────────────────────────────────
// UCI file store
// ─────────────────────────────────────────────────────────────────────────────

/// [`ConfigStore`] reading a UCI file from disk on every load
#[derive(Debug, Clone)]
pub struct UciFileStore {
    path: PathBuf,
}

impl UciFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for UciFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_RECORD_PATH)
    }
}

impl ConfigStore for UciFileStore {
    fn load(&self) -> Result<Option<Configuration>> {
        if !self.path.exists() {
            debug!("No configuration record at {:?}", self.path);
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        let sections = parse_uci(&content, &self.path)?;

        let section = sections
            .iter()
            .find(|s| s.section_type == SECTION_TYPE)
            .or_else(|| {
                let first = sections.first()?;
                debug!(
                    "{:?} has no '{}' section, reading '{}'",
                    self.path, SECTION_TYPE, first.section_type
                );
                Some(first)
            });

        match section {
            Some(section) => configuration_from_section(section).map(Some),
            None => {
                debug!("{:?} has no sections", self.path);
                Ok(None)
            }
        }
    }

    fn location(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// [`ConfigStore`] holding the record in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    record: RwLock<Option<Configuration>>,
}

impl MemoryStore {
    pub fn new(record: Option<Configuration>) -> Self {
        Self {
            record: RwLock::new(record),
        }
    }

    /// Replace the stored record
    pub fn set(&self, record: Option<Configuration>) {
        if let Ok(mut guard) = self.record.write() {
            *guard = record;
        }
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Option<Configuration>> {
        self.record
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| Error::config("configuration lock poisoned"))
    }

    fn location(&self) -> Option<PathBuf> {
        None
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UCI parsing
// ─────────────────────────────────────────────────────────────────────────────

/// One `config` block of a UCI file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UciSection {
    pub section_type: String,
    pub name: Option<String>,
    pub options: BTreeMap<String, String>,
    pub lists: BTreeMap<String, Vec<String>>,
}

impl UciSection {
    /// Values of `key` whether written as `list` entries or a single `option`
    pub fn values(&self, key: &str) -> Option<Vec<String>> {
        if let Some(list) = self.lists.get(key) {
            return Some(list.clone());
        }
        self.options.get(key).map(|v| vec![v.clone()])
    }
}

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(config|option|list)\s+([A-Za-z0-9_]+)(?:\s+(.*))?$")
        .expect("Invalid UCI directive regex")
});

/// Parse UCI text into its sections
///
/// `path` is used only for error messages.
pub fn parse_uci(content: &str, path: &Path) -> Result<Vec<UciSection>> {
    let mut sections: Vec<UciSection> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let caps = DIRECTIVE.captures(line).ok_or_else(|| {
            Error::config_syntax(path, line_no, format!("unrecognized line '{}'", line))
        })?;
        let keyword = &caps[1];
        let ident = caps[2].to_string();
        let rest = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        let value = parse_value(rest).map_err(|msg| Error::config_syntax(path, line_no, msg))?;

        if keyword == "config" {
            sections.push(UciSection {
                section_type: ident,
                name: value,
                ..Default::default()
            });
            continue;
        }

        let section = sections.last_mut().ok_or_else(|| {
            Error::config_syntax(
                path,
                line_no,
                format!("'{}' outside of a config section", keyword),
            )
        })?;
        let value = value.ok_or_else(|| {
            Error::config_syntax(path, line_no, format!("{} '{}' has no value", keyword, ident))
        })?;

        if keyword == "option" {
            section.options.insert(ident, value);
        } else {
            section.lists.entry(ident).or_default().push(value);
        }
    }

    Ok(sections)
}

/// Parse the value part of a directive: `'quoted'`, `"quoted"` or `bare`
fn parse_value(rest: &str) -> std::result::Result<Option<String>, String> {
    let rest = rest.trim();
    if rest.is_empty() || rest.starts_with('#') {
        return Ok(None);
    }

    let first = rest.chars().next().unwrap_or_default();
    if first == '\'' || first == '"' {
        let body = &rest[1..];
        let end = body
            .find(first)
            .ok_or_else(|| "unterminated quote".to_string())?;
        let trailing = body[end + 1..].trim();
        if !trailing.is_empty() && !trailing.starts_with('#') {
            return Err(format!("unexpected text after value: '{}'", trailing));
        }
        return Ok(Some(body[..end].to_string()));
    }

    let mut words = rest.split_whitespace();
    let word = words.next().unwrap_or_default().to_string();
    match words.next() {
        Some(extra) if !extra.starts_with('#') => {
            Err(format!("unexpected text after value: '{}'", extra))
        }
        _ => Ok(Some(word)),
    }
}

/// Interpret a boolean UCI flag
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enabled" => Some(true),
        "0" | "false" | "no" | "off" | "disabled" => Some(false),
        _ => None,
    }
}

/// Validate a parsed section into a [`Configuration`]
pub fn configuration_from_section(section: &UciSection) -> Result<Configuration> {
    let enabled = match section.options.get("enable") {
        None => false,
        Some(raw) => parse_flag(raw).ok_or_else(|| {
            Error::config_invalid(format!("enable must be 0 or 1, got '{}'", raw))
        })?,
    };

    let mut field_groups = FieldSelection::new();
    for group in FieldGroup::ALL {
        if let Some(keys) = section.values(group.key()) {
            field_groups.set(group, keys);
        }
    }

    let token = section.options.get("token").cloned().unwrap_or_default();

    Ok(Configuration::new(enabled, field_groups, token))
}

/// Render a configuration as a UCI section
pub fn render_record(config: &Configuration) -> String {
    let mut out = format!("config {} 'config'\n", SECTION_TYPE);
    out.push_str(&format!(
        "\toption enable '{}'\n",
        if config.enabled { "1" } else { "0" }
    ));
    out.push_str(&format!("\toption token '{}'\n", config.token));
    for (group, keys) in config.field_groups.iter() {
        for key in keys {
            out.push_str(&format!("\tlist {} '{}'\n", group.key(), key));
        }
    }
    out
}

/// Write a default record (disabled, every group with its default keys)
///
/// Returns `false` without touching anything when the file already exists.
pub fn write_default_record(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    let record = Configuration::new(false, FieldSelection::all_defaults(), "");
    std::fs::write(path, render_record(&record))
        .with_context(|| format!("Failed to write {:?}", path))?;
    info!("Created default configuration record at {:?}", path);
    Ok(true)
}
