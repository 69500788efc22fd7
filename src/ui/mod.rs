//! User interface rendering module
//!
//! - `header` - Title banner and navigation bar
//! - `form` - The request form, generate button and message region

mod form;
mod header;

use crate::app::FormState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::{ControlKind, KeybindingContext};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub use form::FORM_HEIGHT;
pub use header::{render_nav_bar, HeaderRenderer};

/// Widest the form is drawn, in columns
const MAX_FORM_WIDTH: u16 = 80;

/// UI renderer for the application
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI for the current form state
    pub fn render(&self, f: &mut Frame, state: &FormState, keybinding_ctx: &KeybindingContext) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.header.height()),
                Constraint::Min(FORM_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);

        self.header.render_header(f, chunks[0]);
        form::render_form(f, centered_column(chunks[1], MAX_FORM_WIDTH), state);

        let kind = ControlKind::for_focus(state.focus, state.help_visible);
        render_nav_bar(f, chunks[2], &keybinding_ctx.get_nav_items(kind));

        if state.help_visible {
            let focused = ControlKind::for_focus(state.focus, false);
            HelpOverlay::new(focused, keybinding_ctx).render(f, area);
        }
    }
}

/// Horizontally centered column no wider than `max_width`
fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SubmitStatus;
    use crate::request::FieldUpdate;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_renders_labels_and_button() {
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();
        let state = FormState::new();
        let renderer = UiRenderer::new();
        let ctx = KeybindingContext::new();
        terminal.draw(|f| renderer.render(f, &state, &ctx)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Engine Name"));
        assert!(text.contains("Framework"));
        assert!(text.contains("Generate Engine Template"));
    }

    #[test]
    fn test_loading_shows_generating() {
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();
        let mut state = FormState::new();
        state.apply(FieldUpdate::EngineName("demo".into()));
        state.apply(FieldUpdate::Version("1".into()));
        state.apply(FieldUpdate::Author("me".into()));
        state.begin_submit().unwrap();
        assert_eq!(state.status(), &SubmitStatus::Loading);

        let renderer = UiRenderer::new();
        let ctx = KeybindingContext::new();
        terminal.draw(|f| renderer.render(f, &state, &ctx)).unwrap();
        assert!(buffer_text(&terminal).contains("Generating..."));
    }

    #[test]
    fn test_help_overlay_renders() {
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).unwrap();
        let mut state = FormState::new();
        state.help_visible = true;
        let renderer = UiRenderer::new();
        let ctx = KeybindingContext::new();
        terminal.draw(|f| renderer.render(f, &state, &ctx)).unwrap();
        assert!(buffer_text(&terminal).contains("Help"));
    }
}
