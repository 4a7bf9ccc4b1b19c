//! Reconciliation of consecutive frames.
//!
//! Nodes are matched by position, not identity. Reconciling happens in two
//! passes around layout and animation:
//!
//! 1. [`carry_over`] runs on the freshly built tree before anything else and
//!    moves state that must survive a rebuild (scroll motion, spinner frame,
//!    input cursor, toast lifecycle) from the old node onto its match.
//! 2. [`diff_trees`] runs once the new tree is laid out, focused and ticked,
//!    so both trees are compared in the same settled form. A node is dirty
//!    when its kind changed, its structural hash changed, its computed bounds
//!    moved, or anything it owns is dirty.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::mem;

use crate::tree::{Node, NodeKind, ScrollOffset};

/// Move carried-over state from the previous frame's tree onto `new`.
///
/// Matching stops wherever the kinds differ; those subtrees start fresh.
pub fn carry_over(old: Option<&mut Node>, new: &mut Node) {
    if let Some(old) = old {
        carry_node(old, new);
    }
}

fn carry_node(old: &mut Node, new: &mut Node) {
    if old.kind() != new.kind() {
        return;
    }
    transplant(old, new);
    for (o, n) in old.children.iter_mut().zip(new.children.iter_mut()) {
        carry_node(o, n);
    }
    if let (Some(o), Some(n)) = (old.content_mut(), new.content_mut()) {
        carry_node(o, n);
    }
}

/// Diff `new` against the previous frame's tree.
///
/// Returns whether anything changed. With no previous tree every node is
/// dirty. Both trees are expected to be in their final, positioned form.
pub fn diff_trees(old: Option<&Node>, new: &mut Node) -> bool {
    match old {
        Some(old) => diff_node(old, new),
        None => {
            mark_fresh(new);
            true
        }
    }
}

fn diff_node(old: &Node, new: &mut Node) -> bool {
    if old.kind() != new.kind() {
        mark_fresh(new);
        return true;
    }

    new.content_hash = content_hash(new);
    let mut dirty = new.content_hash != old.content_hash || new.bounds != old.bounds;

    if old.children.len() != new.children.len() {
        dirty = true;
    }
    for (o, n) in old.children.iter().zip(new.children.iter_mut()) {
        dirty |= diff_node(o, n);
    }
    for n in new.children.iter_mut().skip(old.children.len()) {
        mark_fresh(n);
    }

    match (old.content(), new.content_mut()) {
        (Some(o), Some(n)) => dirty |= diff_node(o, n),
        (None, Some(n)) => {
            mark_fresh(n);
            dirty = true;
        }
        _ => {}
    }

    new.dirty = dirty;
    dirty
}

/// Hash and mark dirty a node with no counterpart in the previous frame.
fn mark_fresh(node: &mut Node) {
    node.content_hash = content_hash(node);
    node.dirty = true;
    for child in &mut node.children {
        mark_fresh(child);
    }
    if let Some(content) = node.content_mut() {
        mark_fresh(content);
    }
}

/// Move carried-over state from `old` onto `new`, leaving defaults behind.
fn transplant(old: &mut Node, new: &mut Node) {
    match (&mut old.kind, &mut new.kind) {
        (NodeKind::List(o), NodeKind::List(n)) => {
            n.motion = mem::take(&mut o.motion);
            if let (ScrollOffset::Internal(prev), ScrollOffset::Internal(next)) = (&o.offset, &mut n.offset) {
                *next = *prev;
            }
        }
        (NodeKind::ScrollView(o), NodeKind::ScrollView(n)) => {
            n.motion = mem::take(&mut o.motion);
        }
        (NodeKind::Spinner(o), NodeKind::Spinner(n)) => {
            n.frame = o.frame;
            n.last_advance = o.last_advance.take();
        }
        (NodeKind::TextInput(o), NodeKind::TextInput(n)) => {
            if n.cursor.is_none() {
                n.cursor = o.cursor;
            }
        }
        (NodeKind::Toast(o), NodeKind::Toast(n)) => {
            n.lifecycle = mem::take(&mut o.lifecycle);
        }
        _ => {}
    }
}

/// Structural hash of a node's own content, excluding children and
/// animation-only fields.
pub fn content_hash(node: &Node) -> u64 {
    let mut h = DefaultHasher::new();
    node.kind().hash(&mut h);
    node.paint.hash(&mut h);
    node.focus.focusable.hash(&mut h);
    node.focus.focused.hash(&mut h);

    match &node.kind {
        NodeKind::Text(d) => d.content.hash(&mut h),
        NodeKind::Button(d) => d.label.hash(&mut h),
        NodeKind::TextInput(d) => {
            d.buffer.with(|b| b.hash(&mut h));
            d.capacity.hash(&mut h);
            d.cursor().hash(&mut h);
        }
        NodeKind::List(d) => {
            d.items.hash(&mut h);
            d.selected.get().hash(&mut h);
            d.offset.get().hash(&mut h);
            d.max_visible.hash(&mut h);
        }
        NodeKind::Modal(d) => {
            d.open.get().hash(&mut h);
            d.title.hash(&mut h);
        }
        NodeKind::ScrollView(d) => {
            d.offset.get().hash(&mut h);
            d.max_height.hash(&mut h);
        }
        NodeKind::Table(d) => {
            d.headers.hash(&mut h);
            d.rows.hash(&mut h);
            d.column_widths.hash(&mut h);
            d.borders.hash(&mut h);
        }
        NodeKind::Padding(d) => d.insets.hash(&mut h),
        NodeKind::Spacer => {}
        NodeKind::Spinner(d) => {
            d.style.hash(&mut h);
            d.label.hash(&mut h);
            d.progress.map(f32::to_bits).hash(&mut h);
            d.speed.hash(&mut h);
        }
        NodeKind::Toast(d) => {
            d.message.hash(&mut h);
            d.position.hash(&mut h);
            d.visible.get().hash(&mut h);
            d.auto_dismiss.hash(&mut h);
        }
        NodeKind::VStack(s) | NodeKind::HStack(s) => s.hash(&mut h),
    }
    h.finish()
}
