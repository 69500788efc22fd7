//! Form rendering
//!
//! One bordered box per field, the checkbox and framework selector side by
//! side, the generate button and the message region.

use crate::app::{FormFocus, FormState, SubmitStatus};
use crate::request::FieldId;
use crate::theme::{Styles, Theme, UiText};
use crate::types::Framework;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use strum::IntoEnumIterator;

const CURSOR: &str = "▏";

/// Rows the form needs
pub const FORM_HEIGHT: u16 = 3 * 7;

/// Render the whole form into `area`
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // engine name
            Constraint::Length(3), // version
            Constraint::Length(3), // author
            Constraint::Length(3), // description
            Constraint::Length(3), // checkbox + framework
            Constraint::Length(3), // button
            Constraint::Min(3),    // message
        ])
        .split(area);

    render_text_field(f, rows[0], state, FormFocus::EngineName);
    render_text_field(f, rows[1], state, FormFocus::Version);
    render_text_field(f, rows[2], state, FormFocus::Author);
    render_text_field(f, rows[3], state, FormFocus::Description);

    let options = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[4]);
    render_checkbox(f, options[0], state);
    render_framework(f, options[1], state);

    render_button(f, rows[5], state);
    render_message(f, rows[6], state.status());
}

fn field_block(state: &FormState, focus: FormFocus, field: FieldId) -> Block<'static> {
    let focused = state.focus == focus && !state.help_visible;
    let mut title = format!(" {}", field.label());
    if field.is_required() {
        title.push_str(UiText::REQUIRED_MARK);
    }
    title.push(' ');

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            if focused { Styles::focused() } else { Styles::text_secondary() },
        ))
        .border_style(if focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        });

    if let Some(hint) = state.field_error(field) {
        block = block.title_bottom(Line::styled(format!(" {} ", hint), Styles::field_hint()));
    }
    block
}

fn render_text_field(f: &mut Frame, area: Rect, state: &FormState, focus: FormFocus) {
    let Some(field) = focus.field() else {
        return;
    };
    let value = state.request().text(field).unwrap_or_default();
    let focused = state.focus == focus && !state.help_visible;

    let mut spans = Vec::new();
    if value.is_empty() && !focused {
        spans.push(Span::styled(field.placeholder(), Styles::text_muted()));
    } else {
        spans.push(Span::styled(value.to_string(), Styles::text()));
    }
    if focused {
        spans.push(Span::styled(CURSOR, Styles::focused()));
    }

    let widget = Paragraph::new(Line::from(spans)).block(field_block(state, focus, field));
    f.render_widget(widget, area);
}

fn render_checkbox(f: &mut Frame, area: Rect, state: &FormState) {
    let mark = if state.request().include_examples { "[x]" } else { "[ ]" };
    let widget = Paragraph::new(Line::from(vec![
        Span::styled(mark, Styles::focused()),
        Span::styled(" Include", Styles::text()),
    ]))
    .block(field_block(state, FormFocus::IncludeExamples, FieldId::IncludeExamples));
    f.render_widget(widget, area);
}

fn render_framework(f: &mut Frame, area: Rect, state: &FormState) {
    let selected = state.request().framework;
    let mut spans = Vec::new();
    for (i, framework) in Framework::iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Styles::text_muted()));
        }
        let style = if framework == selected {
            Styles::button_active()
        } else {
            Styles::text_secondary()
        };
        spans.push(Span::styled(format!(" {} ", framework.label()), style));
    }

    let widget = Paragraph::new(Line::from(spans))
        .block(field_block(state, FormFocus::Framework, FieldId::Framework));
    f.render_widget(widget, area);
}

fn render_button(f: &mut Frame, area: Rect, state: &FormState) {
    let (label, style) = if state.is_loading() {
        (UiText::BTN_GENERATING, Styles::button_disabled())
    } else if state.focus == FormFocus::Submit && !state.help_visible {
        (UiText::BTN_GENERATE, Styles::button_active())
    } else {
        (UiText::BTN_GENERATE, Styles::button_inactive())
    };

    let widget = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
    // Vertically center the single line in the 3-row slot
    let inner = Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height));
    f.render_widget(widget, inner);
}

/// Render the single message region
fn render_message(f: &mut Frame, area: Rect, status: &SubmitStatus) {
    let text = match status {
        SubmitStatus::Loading => "Generating engine template...".to_string(),
        SubmitStatus::Idle => String::new(),
        SubmitStatus::Success(msg) | SubmitStatus::Error(msg) => msg.clone(),
    };

    let widget = Paragraph::new(Line::styled(text, Theme::status_style(status)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Styles::border_inactive()),
        );
    f.render_widget(widget, area);
}
