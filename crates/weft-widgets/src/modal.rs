//! Modal dialog overlay.

use weft_core::{Callback, ModalData, Node, NodeKind, Shared};

/// A framed overlay shown while `open` is true.
///
/// While open the modal traps focus and mouse input inside its content and
/// the quit key is ignored. Esc (or any key, when the content has nothing
/// focusable) clears `open` and fires the close action.
#[derive(Debug, Clone)]
pub struct Modal {
    open: Shared<bool>,
    title: Option<String>,
    content: Node,
    on_close: Option<Callback>,
}

impl Modal {
    pub fn new(open: Shared<bool>, content: Node) -> Self {
        Self {
            open,
            title: None,
            content,
            on_close: None,
        }
    }

    /// Title drawn in the top border.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn on_close(mut self, action: impl Into<Callback>) -> Self {
        self.on_close = Some(action.into());
        self
    }

    pub fn build(self) -> Node {
        Node::new(NodeKind::Modal(ModalData {
            open: self.open,
            title: self.title,
            content: Box::new(self.content),
            on_close: self.on_close,
        }))
    }
}

impl From<Modal> for Node {
    fn from(modal: Modal) -> Self {
        modal.build()
    }
}
