//! Screen layout

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Header height including borders
pub const HEADER_HEIGHT: u16 = 3;

/// Footer height (single hint line)
pub const FOOTER_HEIGHT: u16 = 1;

/// Areas of the single panel screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Split the terminal into header, panel body and footer
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    ScreenAreas {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_heights() {
        let areas = create(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.header.height, HEADER_HEIGHT);
        assert_eq!(areas.footer.height, FOOTER_HEIGHT);
        assert_eq!(areas.body.height, 24 - HEADER_HEIGHT - FOOTER_HEIGHT);
        assert_eq!(areas.footer.y, 23);
    }

    #[test]
    fn test_layout_compact_terminal() {
        let areas = create(Rect::new(0, 0, 40, 8));
        assert_eq!(areas.header.height, HEADER_HEIGHT);
        assert!(areas.body.height >= 3);
    }
}
