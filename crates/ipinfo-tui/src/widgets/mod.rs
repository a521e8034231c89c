//! Custom widgets for the panel UI

mod footer;
mod header;
mod panel_table;

#[cfg(test)]
mod tests;

pub use footer::Footer;
pub use header::{MainHeader, APP_NAME};
pub use panel_table::PanelTable;
