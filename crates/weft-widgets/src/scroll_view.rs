//! Vertically scrolling viewport.

use weft_core::{Node, NodeKind, ScrollMotion, ScrollViewData, Shared};

/// Viewport height used when none is given.
pub const DEFAULT_MAX_HEIGHT: usize = 10;

/// A viewport that shows at most `max_height` rows of its content.
///
/// Up/Down (when focused) and the mouse wheel move `offset` one row at a
/// time, clamped so the last row of content stays at the bottom of the
/// viewport. The displayed position eases toward a new offset.
#[derive(Debug, Clone)]
pub struct ScrollView {
    content: Node,
    offset: Shared<usize>,
    max_height: usize,
}

impl ScrollView {
    pub fn new(content: Node, offset: Shared<usize>) -> Self {
        Self {
            content,
            offset,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }

    /// Viewport height in rows, at least one.
    pub fn with_max_height(mut self, rows: usize) -> Self {
        self.max_height = rows.max(1);
        self
    }

    pub fn build(self) -> Node {
        let motion = ScrollMotion::settled(self.offset.get());
        Node::new(NodeKind::ScrollView(ScrollViewData {
            content: Box::new(self.content),
            offset: self.offset,
            max_height: self.max_height,
            motion,
        }))
    }
}

impl From<ScrollView> for Node {
    fn from(view: ScrollView) -> Self {
        view.build()
    }
}
