//! Header bar
//!
//! App title on the left, refresh indicator and language on the right.

use ipinfo_app::i18n::Locale;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{icons::IconSet, palette, styles};

/// Application name shown in the header
pub const APP_NAME: &str = "ipinfo";

pub struct MainHeader {
    locale: Locale,
    loading: bool,
    icons: IconSet,
}

impl MainHeader {
    pub fn new(locale: Locale, icons: IconSet) -> Self {
        Self {
            locale,
            loading: false,
            icons,
        }
    }

    /// Show the refresh indicator while a render cycle is in flight
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for MainHeader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let left = vec![
            Span::styled(format!("{} ", self.icons.globe()), styles::accent()),
            Span::styled(APP_NAME, styles::accent_bold()),
        ];
        buf.set_line(inner.x, inner.y, &Line::from(left), inner.width);

        let mut right = Vec::new();
        if self.loading {
            right.push(Span::styled(
                format!("{} ", self.icons.refresh()),
                Style::default().fg(palette::STATUS_YELLOW),
            ));
        }
        right.push(Span::styled(
            self.locale.code(),
            styles::text_muted(),
        ));

        let right = Line::from(right);
        let right_width = right.width() as u16;
        if right_width + APP_NAME.width() as u16 + 3 <= inner.width {
            buf.set_line(
                inner.x + inner.width - right_width,
                inner.y,
                &right,
                right_width,
            );
        }
    }
}
