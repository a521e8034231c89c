//! Footer line: key hints, last refresh time, watcher errors

use chrono::{DateTime, Local};
use ipinfo_app::i18n::HintTexts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{icons::IconSet, styles};

pub struct Footer<'a> {
    hints: &'a HintTexts,
    last_loaded: Option<DateTime<Local>>,
    watcher_error: Option<&'a str>,
    icons: IconSet,
}

impl<'a> Footer<'a> {
    pub fn new(hints: &'a HintTexts, icons: IconSet) -> Self {
        Self {
            hints,
            last_loaded: None,
            watcher_error: None,
            icons,
        }
    }

    pub fn last_loaded(mut self, at: Option<DateTime<Local>>) -> Self {
        self.last_loaded = at;
        self
    }

    pub fn watcher_error(mut self, error: Option<&'a str>) -> Self {
        self.watcher_error = error;
        self
    }

    fn line(&self) -> Line<'a> {
        let mut spans = vec![
            Span::styled("[r]", styles::keybinding()),
            Span::styled(format!(" {}  ", self.hints.reload), styles::text_muted()),
            Span::styled("[q]", styles::keybinding()),
            Span::styled(format!(" {}", self.hints.quit), styles::text_muted()),
        ];

        if let Some(at) = self.last_loaded {
            spans.push(Span::styled(
                format!("  {} {}", self.hints.last_loaded, at.format("%H:%M:%S")),
                styles::text_secondary(),
            ));
        }

        if let Some(error) = self.watcher_error {
            spans.push(Span::styled(
                format!("  {} {}", self.icons.alert(), error),
                styles::status_red(),
            ));
        }

        Line::from(spans)
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let line = self.line();
        buf.set_line(area.x + 1, area.y, &line, area.width.saturating_sub(1));
    }
}
