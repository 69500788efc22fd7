//! Header and common widget rendering
//!
//! The title banner and the key-hint navigation bar.

use crate::components::keybindings::NavBarItem;
use crate::theme::{Colors, Styles, UiText};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header renderer containing the banner lines
pub struct HeaderRenderer {
    header_lines: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            header_lines: Self::create_header(),
        }
    }

    /// Number of rows the header needs
    pub fn height(&self) -> u16 {
        self.header_lines.len() as u16 + 2
    }

    /// Render the banner
    pub fn render_header(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let header = Paragraph::new(self.header_lines.clone())
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Styles::border_inactive()),
            )
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn create_header() -> Vec<Line<'static>> {
        vec![
            Line::from(""),
            Line::from(vec![Span::styled(UiText::TITLE, Styles::title())]),
            Line::from(vec![Span::styled(
                "Describe your engine, pick a framework, get a starter archive",
                Styles::text_secondary(),
            )]),
        ]
    }
}

/// Render the navigation bar
pub fn render_nav_bar(f: &mut Frame, area: Rect, items: &[NavBarItem]) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  |  ", Styles::nav_hint()));
        }
        spans.push(Span::styled(
            item.key_display.clone(),
            Style::default().fg(Colors::PRIMARY),
        ));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
    }

    let nav = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(nav, area);
}
