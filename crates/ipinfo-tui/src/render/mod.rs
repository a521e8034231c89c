//! Main render/view function (View in TEA pattern)


use ipinfo_app::state::AppState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::layout;
use crate::theme::{icons::IconSet, palette};
use crate::widgets;

/// Render the complete UI (View function in TEA)
///
/// Pure: reads the state, never modifies it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);
    let icons = IconSet::new(state.settings.ui.icons);

    frame.render_widget(
        widgets::MainHeader::new(state.locale, icons).loading(state.is_loading()),
        areas.header,
    );

    frame.render_widget(widgets::PanelTable::new(state, icons), areas.body);

    frame.render_widget(
        widgets::Footer::new(&state.texts().hints, icons)
            .last_loaded(state.last_loaded_at)
            .watcher_error(state.watcher_error.as_deref()),
        areas.footer,
    );
}
