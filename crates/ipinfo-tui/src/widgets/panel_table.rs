//! The panel body: status row plus data or message rows
//!
//! Two columns, label and value. The label column is as wide as the
//! longest label on screen.

use ipinfo_app::panel::{DataRow, Panel, PanelView, RowPhase};
use ipinfo_app::state::AppState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{icons::IconSet, palette, styles};

/// Gap between label and value columns
const COLUMN_GAP: usize = 2;

/// Bordered panel showing the current render cycle
pub struct PanelTable<'a> {
    state: &'a AppState,
    icons: IconSet,
}

impl<'a> PanelTable<'a> {
    pub fn new(state: &'a AppState, icons: IconSet) -> Self {
        Self { state, icons }
    }

    /// Lines of the panel body, without the surrounding block
    pub fn lines(&self) -> Vec<Line<'static>> {
        match self.state.panel.as_ref() {
            Some(panel) if !self.state.is_loading() => self.panel_lines(panel),
            _ => vec![self.checking_line()],
        }
    }

    fn checking_line(&self) -> Line<'static> {
        let texts = self.state.texts();
        Line::from(vec![
            Span::styled(
                self.icons.spinner(self.state.animation_frame),
                styles::accent_bold(),
            ),
            Span::raw(" "),
            Span::styled(texts.panel.checking, styles::text_secondary()),
        ])
    }

    fn panel_lines(&self, panel: &Panel) -> Vec<Line<'static>> {
        let texts = self.state.texts();
        let label_width = self.label_width(panel);
        let mut lines = Vec::new();

        if let Some(status) = panel.status() {
            lines.push(Line::from(vec![
                label_span(texts.panel.status_label, label_width),
                Span::styled(format!("{} ", self.icons.dot()), styles::connection_status(status)),
                Span::styled(status.label(texts), styles::connection_status(status)),
            ]));
        }

        match panel.view() {
            // A lone blank row
            PanelView::Empty => lines.push(Line::from("")),
            PanelView::Error { message } => lines.push(Line::from(vec![
                Span::styled(format!("{} ", self.icons.alert()), styles::status_red()),
                Span::styled(message.clone(), styles::status_red()),
            ])),
            PanelView::NoData { message } => {
                lines.push(Line::styled(message.clone(), styles::text_secondary()))
            }
            PanelView::Disabled | PanelView::Offline => {}
            PanelView::Data(rows) => {
                lines.extend(rows.iter().map(|row| self.data_line(row, label_width)))
            }
        }

        lines
    }

    fn data_line(&self, row: &DataRow, label_width: usize) -> Line<'static> {
        let value = match &row.phase {
            RowPhase::Loading => vec![
                Span::styled(
                    self.icons.spinner(self.state.animation_frame),
                    styles::accent(),
                ),
                Span::raw(" "),
                Span::styled(self.state.texts().panel.loading, styles::text_muted()),
            ],
            RowPhase::Settled(text) => vec![Span::styled(text.clone(), styles::text_primary())],
        };

        let mut spans = vec![label_span(&row.label, label_width)];
        spans.extend(value);
        Line::from(spans)
    }

    fn label_width(&self, panel: &Panel) -> usize {
        let status_label = self.state.texts().panel.status_label;
        panel
            .rows()
            .iter()
            .map(|row| row.label.width())
            .chain(std::iter::once(status_label.width()))
            .max()
            .unwrap_or(0)
    }
}

fn label_span(label: &str, width: usize) -> Span<'static> {
    let padding = width.saturating_sub(label.width()) + COLUMN_GAP;
    Span::styled(format!("{}{}", label, " ".repeat(padding)), styles::label())
}

impl Widget for PanelTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            " {} {} ",
            self.icons.globe(),
            self.state.texts().panel.title
        );
        let block = styles::glass_block(true)
            .title(Span::styled(title, styles::accent_bold()))
            .style(Style::default().bg(palette::CARD_BG));

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
