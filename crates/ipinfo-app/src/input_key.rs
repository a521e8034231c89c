//! Abstract input key event, independent of terminal library.
//!
//! Converted from crossterm key events at the TUI boundary so the engine can
//! be driven without a terminal (headless mode, tests).

/// Abstract input key event, independent of terminal library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl modifier (Ctrl+c, Ctrl+r, ...)
    CharCtrl(char),
    Enter,
    Esc,
    /// Function key (F1-F12)
    F(u8),
}
