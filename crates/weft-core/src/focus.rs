//! Tab order and keyboard focus.

use crate::tree::{Node, NodeKind, NodePath};

/// Default upper bound on the number of focusable widgets tracked per frame.
pub const DEFAULT_FOCUS_CAPACITY: usize = 64;

/// Tab order over the current tree plus one cursor.
///
/// The order is rebuilt every frame from the positioned tree. While a modal is
/// open only widgets inside its content are collected, which traps focus
/// inside the modal. The cursor is kept by index across rebuilds as long as it
/// is still in range; otherwise focus returns to the first widget.
#[derive(Debug, Clone)]
pub struct FocusRouter {
    order: Vec<NodePath>,
    cursor: Option<usize>,
    capacity: usize,
}

impl Default for FocusRouter {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_FOCUS_CAPACITY)
    }
}

impl FocusRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A router tracking at most `capacity` focusable widgets. Widgets past
    /// the limit are skipped in tab order.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::new(),
            cursor: None,
            capacity,
        }
    }

    /// Collect the tab order from `root` and write focus flags into the tree.
    pub fn rebuild(&mut self, root: &mut Node) {
        let previous = self.cursor;
        self.order.clear();
        clear_flags(root);

        match root.find_open_modal() {
            Some(modal) => {
                let content = modal.content();
                if let Some(node) = root.at(&content) {
                    collect(node, content, &mut self.order, self.capacity);
                }
            }
            None => collect(root, NodePath::root(), &mut self.order, self.capacity),
        }

        for (i, path) in self.order.iter().enumerate() {
            if let Some(node) = root.at_mut(path) {
                node.focus.index = Some(i);
            }
        }

        self.cursor = match previous {
            _ if self.order.is_empty() => None,
            Some(c) if c < self.order.len() => Some(c),
            _ => Some(0),
        };
        self.set_focused(root, true);
    }

    /// Move focus forward, wrapping after the last widget.
    ///
    /// Returns `false` when nothing is focusable.
    pub fn next(&mut self, root: &mut Node) -> bool {
        self.step(root, 1)
    }

    /// Move focus backward, wrapping before the first widget.
    pub fn previous(&mut self, root: &mut Node) -> bool {
        let len = self.order.len();
        self.step(root, len.saturating_sub(1))
    }

    fn step(&mut self, root: &mut Node, by: usize) -> bool {
        let len = self.order.len();
        if len == 0 {
            return false;
        }
        self.set_focused(root, false);
        let next = self.cursor.map_or(0, |c| (c + by) % len);
        self.cursor = Some(next);
        self.set_focused(root, true);
        tracing::debug!(index = next, "focus moved");
        true
    }

    /// Focus the widget at `path` if it is in the tab order.
    pub fn focus_path(&mut self, root: &mut Node, path: &NodePath) -> bool {
        let Some(index) = self.order.iter().position(|p| p == path) else {
            return false;
        };
        if self.cursor != Some(index) {
            self.set_focused(root, false);
            self.cursor = Some(index);
            self.set_focused(root, true);
            tracing::debug!(index, "focus moved by pointer");
        }
        true
    }

    fn set_focused(&self, root: &mut Node, focused: bool) {
        let Some(path) = self.current() else {
            return;
        };
        if let Some(node) = root.at_mut(path) {
            node.focus.focused = focused;
        }
    }

    /// Path of the focused widget.
    pub fn current(&self) -> Option<&NodePath> {
        self.cursor.and_then(|c| self.order.get(c))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The tab order, first to last.
    pub fn order(&self) -> &[NodePath] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn clear_flags(node: &mut Node) {
    node.focus.focused = false;
    node.focus.index = None;
    for child in &mut node.children {
        clear_flags(child);
    }
    if let Some(content) = node.content_mut() {
        clear_flags(content);
    }
}

fn collect(node: &Node, path: NodePath, out: &mut Vec<NodePath>, capacity: usize) {
    if node.focus.focusable && out.len() < capacity {
        out.push(path.clone());
    }
    for (i, child) in node.children.iter().enumerate() {
        collect(child, path.child(i), out, capacity);
    }
    let walk_content = !matches!(&node.kind, NodeKind::Modal(d) if !d.open.get());
    if let Some(content) = node.content().filter(|_| walk_content) {
        collect(content, path.content(), out, capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Shared;
    use crate::tree::*;

    fn button(label: &str) -> Node {
        Node::new(NodeKind::Button(ButtonData {
            label: label.into(),
            on_click: None,
        }))
    }

    fn vstack(children: Vec<Node>) -> Node {
        Node::with_children(NodeKind::VStack(StackData::default()), children)
    }

    fn modal(open: &Shared<bool>, content: Node) -> Node {
        Node::new(NodeKind::Modal(ModalData {
            open: open.clone(),
            title: None,
            content: Box::new(content),
            on_close: None,
        }))
    }

    fn focused_label(root: &Node) -> Option<String> {
        let mut found = None;
        root.walk(&mut |_, n| {
            if let NodeKind::Button(b) = &n.kind {
                if n.focus.focused {
                    found = Some(b.label.clone());
                }
            }
        });
        found
    }

    #[test]
    fn first_widget_focused_after_build() {
        let mut root = vstack(vec![button("a"), button("b"), button("c")]);
        let mut focus = FocusRouter::new();
        focus.rebuild(&mut root);
        assert_eq!(focus.len(), 3);
        assert_eq!(focused_label(&root).as_deref(), Some("a"));
        assert_eq!(root.children[2].focus.index, Some(2));
    }

    #[test]
    fn next_wraps_around_to_start() {
        let mut root = vstack(vec![button("a"), button("b"), button("c")]);
        let mut focus = FocusRouter::new();
        focus.rebuild(&mut root);
        for _ in 0..focus.len() {
            assert!(focus.next(&mut root));
        }
        assert_eq!(focused_label(&root).as_deref(), Some("a"));
    }

    #[test]
    fn previous_undoes_next() {
        let mut root = vstack(vec![button("a"), button("b")]);
        let mut focus = FocusRouter::new();
        focus.rebuild(&mut root);
        focus.next(&mut root);
        focus.previous(&mut root);
        assert_eq!(focused_label(&root).as_deref(), Some("a"));
        focus.previous(&mut root);
        assert_eq!(focused_label(&root).as_deref(), Some("b"));
        assert!(!root.children[0].focus.focused);
    }

    #[test]
    fn empty_order_is_a_no_op() {
        let mut root = vstack(vec![Node::new(NodeKind::Spacer)]);
        let mut focus = FocusRouter::new();
        focus.rebuild(&mut root);
        assert!(focus.is_empty());
        assert!(!focus.next(&mut root));
        assert!(!focus.previous(&mut root));
        assert_eq!(focus.current(), None);
    }

    #[test]
    fn open_modal_traps_focus() {
        let open = Shared::new(true);
        let mut root = vstack(vec![
            button("outside"),
            modal(&open, vstack(vec![button("ok"), button("cancel")])),
            button("also outside"),
        ]);
        let mut focus = FocusRouter::new();
        focus.rebuild(&mut root);
        assert_eq!(focus.len(), 2);
        assert!(focus.order().iter().all(|p| p.starts_with(&NodePath::root().child(1))));
        assert_eq!(focused_label(&root).as_deref(), Some("ok"));
        assert!(root.children[0].focus.index.is_none());

        open.set(false);
        focus.rebuild(&mut root);
        assert_eq!(focus.len(), 2);
        let labels: Vec<_> = focus
            .order()
            .iter()
            .filter_map(|p| match &root.at(p)?.kind {
                NodeKind::Button(b) => Some(b.label.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["outside", "also outside"]);
    }

    #[test]
    fn cursor_survives_rebuild_while_in_range() {
        let mut focus = FocusRouter::new();
        let mut root = vstack(vec![button("a"), button("b"), button("c")]);
        focus.rebuild(&mut root);
        focus.next(&mut root);
        focus.next(&mut root);

        let mut same = vstack(vec![button("a"), button("b"), button("c")]);
        focus.rebuild(&mut same);
        assert_eq!(focused_label(&same).as_deref(), Some("c"));

        let mut shorter = vstack(vec![button("x"), button("y")]);
        focus.rebuild(&mut shorter);
        assert_eq!(focused_label(&shorter).as_deref(), Some("x"));
    }

    #[test]
    fn capacity_bounds_the_order() {
        let mut root = vstack((0..10).map(|i| button(&i.to_string())).collect());
        let mut focus = FocusRouter::with_capacity(4);
        focus.rebuild(&mut root);
        assert_eq!(focus.len(), 4);
        assert!(root.children[7].focus.index.is_none());
    }

    #[test]
    fn focus_path_moves_cursor() {
        let mut root = vstack(vec![button("a"), Node::new(NodeKind::Spacer), button("b")]);
        let mut focus = FocusRouter::new();
        focus.rebuild(&mut root);
        assert!(focus.focus_path(&mut root, &NodePath::root().child(2)));
        assert_eq!(focused_label(&root).as_deref(), Some("b"));
        assert!(!focus.focus_path(&mut root, &NodePath::root().child(1)));
        assert_eq!(focus.cursor(), Some(1));
    }
}
