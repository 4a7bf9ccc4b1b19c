//! Static text, buttons and spacers.

use weft_core::{ButtonData, Callback, Node, NodeKind, TextData};

/// A single line of text.
pub fn text(content: impl Into<String>) -> Node {
    Node::new(NodeKind::Text(TextData {
        content: content.into(),
    }))
}

/// A focusable `[label]` that fires `on_click` on Enter, Space or a left click.
pub fn button(label: impl Into<String>, on_click: impl Into<Callback>) -> Node {
    Node::new(NodeKind::Button(ButtonData {
        label: label.into(),
        on_click: Some(on_click.into()),
    }))
}

/// A focusable button with no action attached.
pub fn inert_button(label: impl Into<String>) -> Node {
    Node::new(NodeKind::Button(ButtonData {
        label: label.into(),
        on_click: None,
    }))
}

/// An empty node. Spacers measure to zero and do not stretch.
pub fn spacer() -> Node {
    Node::new(NodeKind::Spacer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_core::layout::measure;
    use weft_core::{Kind, Shared};

    #[test]
    fn button_measures_with_brackets_and_is_focusable() {
        let hits = Shared::new(0);
        let h = hits.clone();
        let mut b = button("Save", move || h.update(|n| *n += 1));
        measure(&mut b);
        assert_eq!((b.bounds.width, b.bounds.height), (6, 1));
        assert!(b.focus.focusable);

        if let NodeKind::Button(d) = &b.kind {
            d.on_click.as_ref().expect("action").call();
        }
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn text_is_not_focusable() {
        let mut t = text("héllo");
        measure(&mut t);
        assert_eq!(t.bounds.width, 5);
        assert!(!t.focus.focusable);
    }

    #[test]
    fn spacer_is_zero_sized() {
        let mut s = spacer();
        measure(&mut s);
        assert_eq!(s.kind(), Kind::Spacer);
        assert_eq!((s.bounds.width, s.bounds.height), (0, 0));
    }
}
