//! Routing decoded input to widgets.
//!
//! Keys go to the focused widget first; keys it ignores fall through to the
//! global [`Keymap`]. Mouse events are hit-tested against the tree that is
//! currently on screen. Widgets mutate application state through their
//! [`Shared`](crate::Shared) handles and fire their actions; the caller
//! rebuilds the tree when [`Dispatch::render`] is set.

use crossterm::event::KeyCode;

use crate::event::{InputEvent, MouseAction, MouseButton, MouseInput};
use crate::focus::FocusRouter;
use crate::keymap::{GlobalAction, Keymap};
use crate::tree::{InputData, ListData, Node, NodeKind, NodePath, ScrollViewData};

/// Outcome of dispatching one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatch {
    /// Something changed; rebuild and repaint.
    pub render: bool,
    /// Leave the run loop.
    pub quit: bool,
}

impl Dispatch {
    fn render() -> Self {
        Self {
            render: true,
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            render: false,
            quit: true,
        }
    }

    fn render_if(changed: bool) -> Self {
        Self {
            render: changed,
            quit: false,
        }
    }
}

/// Handle one event against the on-screen tree.
pub fn dispatch(root: &mut Node, focus: &mut FocusRouter, keymap: &Keymap, event: InputEvent) -> Dispatch {
    tracing::trace!(?event, "dispatch");
    match event {
        InputEvent::None => Dispatch::default(),
        InputEvent::Resize => Dispatch::render(),
        InputEvent::Quit => {
            tracing::debug!("quit requested");
            Dispatch::quit()
        }
        InputEvent::Key(code) => handle_key(root, focus, keymap, code),
        InputEvent::Mouse(mouse) => handle_mouse(root, focus, mouse),
    }
}

fn handle_key(root: &mut Node, focus: &mut FocusRouter, keymap: &Keymap, code: KeyCode) -> Dispatch {
    let handled = match focus.current().cloned() {
        Some(path) => root.at_mut(&path).is_some_and(|node| widget_key(node, code)),
        None => false,
    };
    if handled {
        return Dispatch::render();
    }

    let modal = root.find_open_modal();
    match keymap.action(code) {
        Some(GlobalAction::FocusNext) => Dispatch::render_if(focus.next(root)),
        Some(GlobalAction::FocusPrevious) => Dispatch::render_if(focus.previous(root)),
        Some(GlobalAction::CloseModal) if modal.is_some() => Dispatch::render_if(close_modal(root, modal)),
        // A modal with nothing to focus is a plain message box: any key dismisses it.
        _ if modal.is_some() && focus.is_empty() => Dispatch::render_if(close_modal(root, modal)),
        Some(GlobalAction::Quit) if modal.is_none() => {
            tracing::debug!("quit key");
            Dispatch::quit()
        }
        _ => Dispatch::default(),
    }
}

fn close_modal(root: &mut Node, path: Option<NodePath>) -> bool {
    let Some(path) = path else {
        return false;
    };
    let Some(NodeKind::Modal(d)) = root.at_mut(&path).map(|n| &mut n.kind) else {
        return false;
    };
    d.open.set(false);
    tracing::debug!(title = ?d.title, "modal closed");
    if let Some(on_close) = &d.on_close {
        on_close.call();
    }
    true
}

/// Let a focused widget react to `code`. Returns whether it consumed the key.
fn widget_key(node: &mut Node, code: KeyCode) -> bool {
    match &mut node.kind {
        NodeKind::TextInput(d) => input_key(d, code),
        NodeKind::Button(d) => match (code, &d.on_click) {
            (KeyCode::Enter | KeyCode::Char(' '), Some(on_click)) => {
                on_click.call();
                true
            }
            _ => false,
        },
        NodeKind::ScrollView(d) => match code {
            KeyCode::Up => scroll_view_by(d, -1),
            KeyCode::Down => scroll_view_by(d, 1),
            _ => false,
        },
        NodeKind::List(d) => list_key(d, code),
        _ => false,
    }
}

fn input_key(d: &mut InputData, code: KeyCode) -> bool {
    let cursor = d.cursor();
    let len = d.buffer.with(|b| b.chars().count());
    let moved = match code {
        KeyCode::Char(c) if !c.is_control() => {
            if len >= d.capacity {
                return false;
            }
            d.buffer.update(|b| b.insert(byte_index(b, cursor), c));
            Some(cursor + 1)
        }
        KeyCode::Backspace if cursor > 0 => {
            d.buffer.update(|b| {
                b.remove(byte_index(b, cursor - 1));
            });
            Some(cursor - 1)
        }
        KeyCode::Delete if cursor < len => {
            d.buffer.update(|b| {
                b.remove(byte_index(b, cursor));
            });
            Some(cursor)
        }
        KeyCode::Left if cursor > 0 => Some(cursor - 1),
        KeyCode::Right if cursor < len => Some(cursor + 1),
        KeyCode::Home if cursor > 0 => Some(0),
        KeyCode::End if cursor < len => Some(len),
        _ => None,
    };
    match moved {
        Some(c) => {
            d.cursor = Some(c);
            true
        }
        None => false,
    }
}

fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}

fn list_key(d: &mut ListData, code: KeyCode) -> bool {
    // The application may have shrunk `items` under a stored selection.
    let stored = d.selected.get();
    let selected = stored.min(d.items.len().saturating_sub(1));
    match code {
        KeyCode::Up if selected > 0 => {
            select(d, selected - 1);
            true
        }
        KeyCode::Down if selected + 1 < d.items.len() => {
            select(d, selected + 1);
            true
        }
        KeyCode::Down if stored != selected && !d.items.is_empty() => {
            select(d, selected);
            true
        }
        KeyCode::Enter => match &d.on_select {
            Some(on_select) if selected < d.items.len() => {
                on_select.call(selected);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

/// Move the selection and scroll just enough to keep it visible.
fn select(d: &mut ListData, index: usize) {
    d.selected.set(index);
    let offset = d.offset.get();
    if index < offset {
        d.offset.set(index);
    } else if index >= offset + d.max_visible {
        d.offset.set(index + 1 - d.max_visible);
    }
}

fn scroll_view_by(d: &mut ScrollViewData, delta: i32) -> bool {
    let max = d.max_offset();
    let current = d.offset.get();
    let next = clamp_step(current, delta, max);
    if next == current {
        return false;
    }
    d.offset.set(next);
    true
}

fn scroll_list_by(d: &mut ListData, delta: i32) -> bool {
    let current = d.offset.get();
    let next = clamp_step(current, delta, d.max_offset());
    if next == current {
        return false;
    }
    d.offset.set(next);
    true
}

fn clamp_step(current: usize, delta: i32, max: usize) -> usize {
    let next = if delta < 0 {
        current.saturating_sub(delta.unsigned_abs() as usize)
    } else {
        current.saturating_add(delta as usize)
    };
    next.min(max)
}

fn handle_mouse(root: &mut Node, focus: &mut FocusRouter, mouse: MouseInput) -> Dispatch {
    let (x, y) = (i32::from(mouse.column), i32::from(mouse.row));
    let Some(hit) = hit_test(root, x, y) else {
        return Dispatch::default();
    };

    let mut changed = false;
    if let Some(target) = nearest(root, &hit, |n| n.focus.focusable) {
        let before = focus.cursor();
        focus.focus_path(root, &target);
        changed |= focus.cursor() != before;
    }

    match (mouse.button, mouse.action) {
        (MouseButton::Left, MouseAction::Press) => {
            let clickable = |n: &Node| matches!(n.kind, NodeKind::Button(_) | NodeKind::List(_));
            if let Some(target) = nearest(root, &hit, clickable) {
                if let Some(node) = root.at_mut(&target) {
                    changed |= click(node, y);
                }
            }
        }
        (MouseButton::ScrollUp | MouseButton::ScrollDown, MouseAction::Press) => {
            let delta = if mouse.button == MouseButton::ScrollUp { -1 } else { 1 };
            let scrollable = |n: &Node| matches!(n.kind, NodeKind::ScrollView(_) | NodeKind::List(_));
            if let Some(target) = nearest(root, &hit, scrollable) {
                changed |= match root.at_mut(&target).map(|n| &mut n.kind) {
                    Some(NodeKind::ScrollView(d)) => scroll_view_by(d, delta),
                    Some(NodeKind::List(d)) => scroll_list_by(d, delta),
                    _ => false,
                };
            }
        }
        _ => {}
    }
    Dispatch::render_if(changed)
}

fn click(node: &mut Node, y: i32) -> bool {
    let top = node.bounds.y;
    match &mut node.kind {
        NodeKind::Button(d) => match &d.on_click {
            Some(on_click) => {
                on_click.call();
                true
            }
            None => false,
        },
        NodeKind::List(d) => {
            let row = (y - top).max(0) as usize;
            let index = d.first_visible() + row;
            if index >= d.items.len() {
                return false;
            }
            d.selected.set(index);
            if let Some(on_select) = &d.on_select {
                on_select.call(index);
            }
            true
        }
        _ => false,
    }
}

/// `path` or its closest ancestor satisfying `pred`.
fn nearest(root: &Node, path: &NodePath, pred: impl Fn(&Node) -> bool) -> Option<NodePath> {
    let mut current = Some(path.clone());
    while let Some(p) = current {
        if root.at(&p).is_some_and(&pred) {
            return Some(p);
        }
        current = p.parent();
    }
    None
}

/// Deepest node under (`x`, `y`).
///
/// Later children win over earlier ones, content is searched before the
/// container itself, scroll-view content is clipped to the viewport, and
/// while a modal is open nothing outside it can be hit.
pub fn hit_test(root: &Node, x: i32, y: i32) -> Option<NodePath> {
    match root.find_open_modal() {
        Some(modal) => root.at(&modal).and_then(|m| hit_node(m, modal, x, y)),
        None => hit_node(root, NodePath::root(), x, y),
    }
}

fn hit_node(node: &Node, path: NodePath, x: i32, y: i32) -> Option<NodePath> {
    if matches!(&node.kind, NodeKind::Modal(d) if !d.open.get()) {
        return None;
    }
    if let Some(content) = node.content() {
        let clipped = matches!(node.kind, NodeKind::ScrollView(_)) && !node.bounds.contains(x, y);
        if !clipped {
            if let Some(found) = hit_node(content, path.content(), x, y) {
                return Some(found);
            }
        }
    }
    for (i, child) in node.children.iter().enumerate().rev() {
        if let Some(found) = hit_node(child, path.child(i), x, y) {
            return Some(found);
        }
    }
    node.bounds.contains(x, y).then_some(path)
}
