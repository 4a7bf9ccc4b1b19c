//! Single-line text input bound to an application-owned buffer.

use weft_core::{InputData, Node, NodeKind, Shared};

/// Default number of characters an input accepts.
pub const DEFAULT_CAPACITY: usize = 256;

/// A single-line editor over a [`Shared<String>`].
///
/// The buffer belongs to the application; the input edits it in place. The
/// cursor is kept by the runtime between frames and starts at the end of the
/// buffer.
#[derive(Debug, Clone)]
pub struct TextInput {
    buffer: Shared<String>,
    capacity: usize,
}

impl TextInput {
    pub fn new(buffer: Shared<String>) -> Self {
        Self {
            buffer,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Maximum number of characters. Typing stops once it is reached.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> Node {
        Node::new(NodeKind::TextInput(InputData {
            buffer: self.buffer,
            capacity: self.capacity,
            cursor: None,
        }))
    }
}

impl From<TextInput> for Node {
    fn from(input: TextInput) -> Self {
        input.build()
    }
}

/// A text input with the default capacity.
pub fn text_input(buffer: Shared<String>) -> Node {
    TextInput::new(buffer).build()
}
