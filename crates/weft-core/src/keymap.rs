//! Global key bindings consulted when the focused widget ignores a key.

use crossterm::event::KeyCode;

/// One or more keys that trigger a described action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyCode>,
    /// Human-readable description, e.g. for a help line.
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

impl Binding {
    pub fn new(key: KeyCode, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    pub fn with_keys(keys: Vec<KeyCode>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    pub fn matches(&self, code: KeyCode) -> bool {
        self.enabled && self.keys.contains(&code)
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Short label of the first key, e.g. `"tab"` or `"q"`.
    pub fn key_label(&self) -> String {
        self.keys.first().map(|k| key_name(*k)).unwrap_or_default()
    }
}

/// What a global binding asks the runtime to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    FocusNext,
    FocusPrevious,
    CloseModal,
    Quit,
}

/// The runtime's global bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    pub focus_next: Binding,
    pub focus_prev: Binding,
    pub close_modal: Binding,
    pub quit: Binding,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            focus_next: Binding::new(KeyCode::Tab, "next"),
            focus_prev: Binding::new(KeyCode::BackTab, "previous"),
            close_modal: Binding::new(KeyCode::Esc, "close"),
            quit: Binding::with_keys(vec![KeyCode::Char('q'), KeyCode::Char('Q')], "quit"),
        }
    }
}

impl Keymap {
    /// The action bound to `code`, if any. Earlier bindings win.
    pub fn action(&self, code: KeyCode) -> Option<GlobalAction> {
        [
            (&self.focus_next, GlobalAction::FocusNext),
            (&self.focus_prev, GlobalAction::FocusPrevious),
            (&self.close_modal, GlobalAction::CloseModal),
            (&self.quit, GlobalAction::Quit),
        ]
        .into_iter()
        .find_map(|(binding, action)| binding.matches(code).then_some(action))
    }

    /// Enabled bindings in display order.
    pub fn bindings(&self) -> Vec<&Binding> {
        [&self.focus_next, &self.focus_prev, &self.close_modal, &self.quit]
            .into_iter()
            .filter(|b| b.enabled)
            .collect()
    }

    /// One-line help, e.g. `"tab next • shift+tab previous • esc close"`.
    pub fn help_line(&self) -> String {
        self.bindings()
            .iter()
            .map(|b| format!("{} {}", b.key_label(), b.description))
            .collect::<Vec<_>>()
            .join(" • ")
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Tab => "tab".into(),
        KeyCode::BackTab => "shift+tab".into(),
        KeyCode::Esc => "esc".into(),
        KeyCode::Enter => "enter".into(),
        KeyCode::Backspace => "backspace".into(),
        KeyCode::Up => "↑".into(),
        KeyCode::Down => "↓".into(),
        KeyCode::Left => "←".into(),
        KeyCode::Right => "→".into(),
        other => format!("{other:?}").to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let km = Keymap::default();
        assert_eq!(km.action(KeyCode::Tab), Some(GlobalAction::FocusNext));
        assert_eq!(km.action(KeyCode::BackTab), Some(GlobalAction::FocusPrevious));
        assert_eq!(km.action(KeyCode::Esc), Some(GlobalAction::CloseModal));
        assert_eq!(km.action(KeyCode::Char('Q')), Some(GlobalAction::Quit));
        assert_eq!(km.action(KeyCode::Char('x')), None);
    }

    #[test]
    fn disabled_binding_never_matches() {
        let km = Keymap {
            quit: Binding::new(KeyCode::Char('q'), "quit").enabled(false),
            ..Keymap::default()
        };
        assert_eq!(km.action(KeyCode::Char('q')), None);
        assert_eq!(km.bindings().len(), 3);
    }

    #[test]
    fn help_line_lists_enabled_bindings() {
        let km = Keymap::default();
        assert_eq!(
            km.help_line(),
            "tab next • shift+tab previous • esc close • q quit"
        );
    }
}
