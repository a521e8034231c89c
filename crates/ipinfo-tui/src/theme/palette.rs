//! Color palette.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const CARD_BG: Color = Color::Black;

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_RED: Color = Color::Red;

// --- Connectivity (router web UI colors) ---
pub const CONNECTED: Color = Color::Rgb(0x8b, 0xc3, 0x4a); // #8bc34a
pub const DISCONNECTED: Color = Color::Rgb(0xf4, 0x43, 0x36); // #f44336
