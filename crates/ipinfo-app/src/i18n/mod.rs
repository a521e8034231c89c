//! Localized strings for the panel
//!
//! Every user-visible string lives in a [`Texts`] table. Tables are plain
//! `const` structs, so a missing translation is a compile error.

use serde::{Deserialize, Serialize};

mod en;
mod id;
pub mod keys;

pub use keys::*;

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// Bahasa Indonesia
    Id,
}

impl Locale {
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Id]
    }

    /// Name of the language in the language itself
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Id => "Bahasa Indonesia",
        }
    }

    /// BCP 47 language code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        match code.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            "id" | "id-id" | "in" => Some(Locale::Id),
            _ => None,
        }
    }

    /// The string table for this locale
    pub fn texts(&self) -> &'static Texts {
        match self {
            Locale::En => &en::TEXTS,
            Locale::Id => &id::TEXTS,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::from_code(s).ok_or_else(|| {
            let supported: Vec<String> = Locale::all()
                .iter()
                .map(|locale| format!("{} ({})", locale.code(), locale.display_name()))
                .collect();
            format!(
                "unsupported locale '{}', expected one of: {}",
                s,
                supported.join(", ")
            )
        })
    }
}
