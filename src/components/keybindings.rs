//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the focused control.
//! The same registry drives key dispatch, the nav bar and the help overlay.

use crate::app::FormFocus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NextField,
    PreviousField,
    DeleteChar,
    ClearField,
    Toggle,
    NextOption,
    PreviousOption,
    Submit,
    Help,
    Dismiss,
    Quit,
}

/// Kind of control that has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Text,
    Checkbox,
    Select,
    Button,
    /// Help overlay is open
    Help,
}

impl ControlKind {
    pub fn for_focus(focus: FormFocus, help_visible: bool) -> Self {
        if help_visible {
            return Self::Help;
        }
        match focus {
            FormFocus::EngineName
            | FormFocus::Version
            | FormFocus::Author
            | FormFocus::Description => Self::Text,
            FormFocus::IncludeExamples => Self::Checkbox,
            FormFocus::Framework => Self::Select,
            FormFocus::Submit => Self::Button,
        }
    }

    /// Name shown in the help overlay
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "Text Field",
            Self::Checkbox => "Checkbox",
            Self::Select => "Framework Selection",
            Self::Button => "Generate Button",
            Self::Help => "Help",
        }
    }
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self::with_modifiers(key, KeyModifiers::NONE, action, display, description)
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        if self.key != event.code {
            return false;
        }
        // Shift is folded into the key code for characters and BackTab.
        let mods = event.modifiers - KeyModifiers::SHIFT;
        mods == self.modifiers - KeyModifiers::SHIFT
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Control-specific keybindings
    control_bindings: HashMap<ControlKind, Vec<Keybinding>>,
    /// Bindings available on every form control
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            control_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
            Keybinding::new(KeyCode::BackTab, KeyAction::PreviousField, "S-Tab", "Previous field"),
            Keybinding::new(KeyCode::Down, KeyAction::NextField, "Down", "Next field"),
            Keybinding::new(KeyCode::Up, KeyAction::PreviousField, "Up", "Previous field"),
            Keybinding::with_modifiers(
                KeyCode::Char('s'),
                KeyModifiers::CONTROL,
                KeyAction::Submit,
                "Ctrl+S",
                "Generate",
            ),
            Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Help"),
            Keybinding::new(KeyCode::Esc, KeyAction::Quit, "Esc", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.control_bindings.insert(
            ControlKind::Text,
            vec![
                Keybinding::new(
                    KeyCode::Backspace,
                    KeyAction::DeleteChar,
                    "Bksp",
                    "Delete character",
                ),
                Keybinding::with_modifiers(
                    KeyCode::Char('u'),
                    KeyModifiers::CONTROL,
                    KeyAction::ClearField,
                    "Ctrl+U",
                    "Clear field",
                ),
                Keybinding::new(KeyCode::Enter, KeyAction::NextField, "Enter", "Next field"),
            ],
        );

        self.control_bindings.insert(
            ControlKind::Checkbox,
            vec![
                Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle"),
                Keybinding::new(KeyCode::Enter, KeyAction::Toggle, "Enter", "Toggle"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            ],
        );

        self.control_bindings.insert(
            ControlKind::Select,
            vec![
                Keybinding::new(KeyCode::Right, KeyAction::NextOption, "Right", "Next framework"),
                Keybinding::new(
                    KeyCode::Left,
                    KeyAction::PreviousOption,
                    "Left",
                    "Previous framework",
                ),
                Keybinding::new(
                    KeyCode::Char(' '),
                    KeyAction::NextOption,
                    "Space",
                    "Next framework",
                ),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            ],
        );

        self.control_bindings.insert(
            ControlKind::Button,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Submit, "Enter", "Generate template"),
                Keybinding::new(
                    KeyCode::Char(' '),
                    KeyAction::Submit,
                    "Space",
                    "Generate template",
                ),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );

        self.control_bindings.insert(
            ControlKind::Help,
            vec![
                Keybinding::new(KeyCode::Esc, KeyAction::Dismiss, "Esc", "Close help"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Dismiss, "?", "Close help"),
                Keybinding::new(KeyCode::F(1), KeyAction::Dismiss, "F1", "Close help"),
                Keybinding::new(KeyCode::Enter, KeyAction::Dismiss, "Enter", "Close help"),
            ],
        );
    }

    /// Keybindings for a control (control-specific first, then global)
    pub fn get_bindings(&self, kind: ControlKind) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(control_bindings) = self.control_bindings.get(&kind) {
            bindings.extend(control_bindings.iter());
        }

        // The help overlay swallows everything except its own keys
        if kind != ControlKind::Help {
            bindings.extend(self.global_bindings.iter());
        }

        bindings
    }

    /// Resolve a key event to an action
    pub fn action_for(&self, kind: ControlKind, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(kind)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Navigation bar items for display
    pub fn get_nav_items(&self, kind: ControlKind) -> Vec<NavBarItem> {
        let priority_actions: &[KeyAction] = match kind {
            ControlKind::Text => &[
                KeyAction::NextField,
                KeyAction::Submit,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            ControlKind::Checkbox => &[
                KeyAction::Toggle,
                KeyAction::NextField,
                KeyAction::Submit,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            ControlKind::Select => &[
                KeyAction::NextOption,
                KeyAction::PreviousOption,
                KeyAction::NextField,
                KeyAction::Submit,
                KeyAction::Quit,
            ],
            ControlKind::Button => &[
                KeyAction::Submit,
                KeyAction::NextField,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            ControlKind::Help => &[KeyAction::Dismiss],
        };

        let bindings = self.get_bindings(kind);
        priority_actions
            .iter()
            .filter_map(|action| bindings.iter().find(|b| b.action == *action))
            .map(|b| NavBarItem {
                key_display: b.display.clone(),
                action_label: b.description.clone(),
            })
            .collect()
    }

    /// Full help content for a control (for help overlay)
    pub fn get_help_content(&self, kind: ControlKind) -> Vec<HelpSection> {
        let groups: [(&str, &[KeyAction]); 3] = [
            ("Navigation", &[KeyAction::NextField, KeyAction::PreviousField]),
            (
                "Editing",
                &[
                    KeyAction::DeleteChar,
                    KeyAction::ClearField,
                    KeyAction::Toggle,
                    KeyAction::NextOption,
                    KeyAction::PreviousOption,
                ],
            ),
            (
                "General",
                &[KeyAction::Submit, KeyAction::Help, KeyAction::Dismiss, KeyAction::Quit],
            ),
        ];

        let bindings = self.get_bindings(kind);
        groups
            .iter()
            .filter_map(|(title, actions)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| actions.contains(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                if items.is_empty() {
                    None
                } else {
                    Some(HelpSection {
                        title: title.to_string(),
                        items,
                    })
                }
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
