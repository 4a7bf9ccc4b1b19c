//! Vertical and horizontal stacks.

use weft_core::{Align, Node, NodeKind, StackData};

/// Stack children top to bottom with no spacing.
pub fn vstack(children: impl IntoIterator<Item = Node>) -> Node {
    Stack::vertical(children).build()
}

/// Stack children left to right with no spacing.
pub fn hstack(children: impl IntoIterator<Item = Node>) -> Node {
    Stack::horizontal(children).build()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Vertical,
    Horizontal,
}

/// A stack with spacing and cross-axis alignment.
///
/// ```rust,ignore
/// let row = Stack::horizontal([button("Ok", ok), button("Cancel", cancel)])
///     .with_spacing(2)
///     .with_align(Align::Center)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct Stack {
    axis: Axis,
    children: Vec<Node>,
    data: StackData,
}

impl Stack {
    pub fn vertical(children: impl IntoIterator<Item = Node>) -> Self {
        Self::new(Axis::Vertical, children)
    }

    pub fn horizontal(children: impl IntoIterator<Item = Node>) -> Self {
        Self::new(Axis::Horizontal, children)
    }

    fn new(axis: Axis, children: impl IntoIterator<Item = Node>) -> Self {
        Self {
            axis,
            children: children.into_iter().collect(),
            data: StackData::default(),
        }
    }

    /// Cells between consecutive children.
    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.data.spacing = spacing;
        self
    }

    /// Placement of narrower (or shorter) children across the stack.
    pub fn with_align(mut self, align: Align) -> Self {
        self.data.align = align;
        self
    }

    /// Append one more child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> Node {
        let kind = match self.axis {
            Axis::Vertical => NodeKind::VStack(self.data),
            Axis::Horizontal => NodeKind::HStack(self.data),
        };
        Node::with_children(kind, self.children)
    }
}

impl From<Stack> for Node {
    fn from(stack: Stack) -> Self {
        stack.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::text;
    use weft_core::layout::layout;
    use ratatui::layout::Size;

    #[test]
    fn spaced_vertical_stack() {
        let mut root = Stack::vertical([text("a"), text("bbb"), text("cc")])
            .with_spacing(1)
            .build();
        layout(&mut root, Size::new(20, 10));
        assert_eq!((root.bounds.width, root.bounds.height), (3, 5));
        let ys: Vec<i32> = root.children.iter().map(|c| c.bounds.y).collect();
        assert_eq!(ys, vec![0, 2, 4]);
    }

    #[test]
    fn centered_horizontal_stack() {
        let mut root = Stack::horizontal([text("a"), vstack([text("b"), text("c"), text("d")])])
            .with_align(Align::Center)
            .build();
        layout(&mut root, Size::new(20, 10));
        assert_eq!((root.bounds.width, root.bounds.height), (2, 3));
        assert_eq!(root.children[0].bounds.y, 1);
        assert_eq!(root.children[1].bounds.x, 1);
    }

    #[test]
    fn with_child_appends() {
        let root = Stack::vertical([text("a")]).with_child(text("b")).build();
        assert_eq!(root.children.len(), 2);
        assert!(matches!(root.kind, NodeKind::VStack(_)));
    }
}
