use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as CtMouseButton, MouseEvent,
    MouseEventKind,
};

/// A decoded input event, as seen by the dispatcher.
///
/// Anything the runtime has no use for (key releases, focus reports, pastes,
/// mouse moves without a button) decodes to [`InputEvent::None`] and is
/// dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    None,
    Key(KeyCode),
    Mouse(MouseInput),
    /// Terminal resized; the next frame must repaint.
    Resize,
    /// Ctrl+C.
    Quit,
}

/// A mouse event in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInput {
    pub button: MouseButton,
    pub action: MouseAction,
    pub column: u16,
    pub row: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Press,
    Release,
    Drag,
}

impl MouseInput {
    pub fn new(button: MouseButton, action: MouseAction, column: u16, row: u16) -> Self {
        Self {
            button,
            action,
            column,
            row,
        }
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return InputEvent::None;
        }
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                InputEvent::Quit
            }
            code => InputEvent::Key(code),
        }
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(m: MouseEvent) -> Self {
        let (button, action) = match m.kind {
            MouseEventKind::Down(b) => (button(b), MouseAction::Press),
            MouseEventKind::Up(b) => (button(b), MouseAction::Release),
            MouseEventKind::Drag(b) => (button(b), MouseAction::Drag),
            MouseEventKind::ScrollUp => (MouseButton::ScrollUp, MouseAction::Press),
            MouseEventKind::ScrollDown => (MouseButton::ScrollDown, MouseAction::Press),
            _ => return InputEvent::None,
        };
        InputEvent::Mouse(MouseInput::new(button, action, m.column, m.row))
    }
}

fn button(b: CtMouseButton) -> MouseButton {
    match b {
        CtMouseButton::Left => MouseButton::Left,
        CtMouseButton::Right => MouseButton::Right,
        CtMouseButton::Middle => MouseButton::Middle,
    }
}

impl From<Event> for InputEvent {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(k) => k.into(),
            Event::Mouse(m) => m.into(),
            Event::Resize(_, _) => InputEvent::Resize,
            _ => InputEvent::None,
        }
    }
}
