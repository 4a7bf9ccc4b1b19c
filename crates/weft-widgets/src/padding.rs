//! Padding around a single child.

use weft_core::{Insets, Node, NodeKind, PaddingData};

/// Surround `child` with empty cells.
pub fn padded(child: Node, insets: Insets) -> Node {
    Node::new(NodeKind::Padding(PaddingData {
        insets,
        content: Box::new(child),
    }))
}

/// The same padding on all four sides.
pub fn pad(child: Node, cells: u16) -> Node {
    padded(child, Insets::all(cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::text;
    use ratatui::layout::Size;
    use weft_core::layout::layout;

    #[test]
    fn insets_grow_size_and_offset_child() {
        let mut node = padded(text("hi"), Insets::symmetric(1, 3));
        layout(&mut node, Size::new(20, 5));
        assert_eq!((node.bounds.width, node.bounds.height), (8, 3));
        let child = node.content().expect("content");
        assert_eq!((child.bounds.x, child.bounds.y), (3, 1));
    }

    #[test]
    fn uniform_padding() {
        let mut node = pad(text("abc"), 2);
        layout(&mut node, Size::new(20, 10));
        assert_eq!((node.bounds.width, node.bounds.height), (7, 5));
    }
}
