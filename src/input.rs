//! Input handling module
//!
//! Turns key events into form actions. Text editing produces a full
//! replacement value for the focused field so every edit reaches the form as
//! one typed `FieldUpdate`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{FormFocus, FormState};
use crate::components::keybindings::{ControlKind, KeyAction, KeybindingContext};
use crate::request::{FieldUpdate, TemplateRequest};

/// Result of interpreting a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Nothing to do
    None,
    /// Move focus to a control
    Focus(FormFocus),
    /// Change one field
    Edit(FieldUpdate),
    /// Start a submission
    Submit,
    /// Show or hide the help overlay
    ToggleHelp,
    /// Leave the application
    Quit,
}

/// Maps key events to actions for the current form state
pub struct InputHandler {
    keybindings: KeybindingContext,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            keybindings: KeybindingContext::new(),
        }
    }

    pub fn keybindings(&self) -> &KeybindingContext {
        &self.keybindings
    }

    /// Interpret a key event against the focused control
    pub fn handle_key(&self, state: &FormState, key: KeyEvent) -> FormAction {
        if key.kind == KeyEventKind::Release {
            return FormAction::None;
        }

        let kind = ControlKind::for_focus(state.focus, state.help_visible);
        if let Some(action) = self.keybindings.action_for(kind, &key) {
            return self.resolve(action, state);
        }

        // Unbound printable characters type into text fields
        if kind == ControlKind::Text {
            if let KeyCode::Char(c) = key.code {
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                    return edit_text(state.request(), state.focus, |value| value.push(c));
                }
            }
        }

        FormAction::None
    }

    fn resolve(&self, action: KeyAction, state: &FormState) -> FormAction {
        let request = state.request();
        match action {
            KeyAction::NextField => FormAction::Focus(state.focus.next()),
            KeyAction::PreviousField => FormAction::Focus(state.focus.previous()),
            KeyAction::DeleteChar => edit_text(request, state.focus, |value| {
                value.pop();
            }),
            KeyAction::ClearField => edit_text(request, state.focus, String::clear),
            KeyAction::Toggle => {
                FormAction::Edit(FieldUpdate::IncludeExamples(!request.include_examples))
            }
            KeyAction::NextOption => {
                FormAction::Edit(FieldUpdate::Framework(request.framework.next()))
            }
            KeyAction::PreviousOption => {
                FormAction::Edit(FieldUpdate::Framework(request.framework.previous()))
            }
            KeyAction::Submit => FormAction::Submit,
            KeyAction::Help | KeyAction::Dismiss => FormAction::ToggleHelp,
            KeyAction::Quit => FormAction::Quit,
        }
    }
}

fn edit_text(
    request: &TemplateRequest,
    focus: FormFocus,
    edit: impl FnOnce(&mut String),
) -> FormAction {
    let Some(field) = focus.field() else {
        return FormAction::None;
    };
    let Some(current) = request.text(field) else {
        return FormAction::None;
    };
    let mut value = current.to_string();
    edit(&mut value);
    TemplateRequest::text_update(field, value)
        .map(FormAction::Edit)
        .unwrap_or(FormAction::None)
}
