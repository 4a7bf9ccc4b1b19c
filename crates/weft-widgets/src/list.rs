//! Scrollable single-selection list.

use weft_core::{ListData, Node, NodeKind, ScrollMotion, ScrollOffset, SelectCallback, Shared};

use crate::error::BuildError;

/// Rows a list shows when no limit is given.
pub const DEFAULT_MAX_VISIBLE: usize = 10;

/// A list of text items with a selection cursor.
///
/// Up/Down move the selection and scroll it into view, Enter or a click fires
/// the select action, and the mouse wheel scrolls. The selected index is an
/// application handle; the scroll offset is kept by the list unless the
/// application supplies its own handle with [`with_offset`](List::with_offset).
///
/// ```rust,ignore
/// let node = List::new(files, selected.clone())
///     .with_max_visible(5)
///     .on_select(move |i| open(i))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct List {
    items: Vec<String>,
    selected: Shared<usize>,
    offset: Option<Shared<usize>>,
    max_visible: usize,
    on_select: Option<SelectCallback>,
}

impl List {
    pub fn new<I, S>(items: I, selected: Shared<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            selected,
            offset: None,
            max_visible: DEFAULT_MAX_VISIBLE,
            on_select: None,
        }
    }

    /// Number of rows shown at once. Zero falls back to the default.
    pub fn with_max_visible(mut self, rows: usize) -> Self {
        self.max_visible = if rows == 0 { DEFAULT_MAX_VISIBLE } else { rows };
        self
    }

    /// Keep the scroll offset in an application handle.
    pub fn with_offset(mut self, offset: Shared<usize>) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Action receiving the chosen index.
    pub fn on_select(mut self, action: impl Into<SelectCallback>) -> Self {
        self.on_select = Some(action.into());
        self
    }

    pub fn build(self) -> Result<Node, BuildError> {
        if self.items.is_empty() {
            return Err(BuildError::EmptyList);
        }
        let offset = match self.offset {
            Some(handle) => ScrollOffset::External(handle),
            None => ScrollOffset::Internal(0),
        };
        let motion = ScrollMotion::settled(offset.get());
        Ok(Node::new(NodeKind::List(ListData {
            items: self.items,
            selected: self.selected,
            offset,
            max_visible: self.max_visible,
            on_select: self.on_select,
            motion,
        })))
    }
}

impl TryFrom<List> for Node {
    type Error = BuildError;

    fn try_from(list: List) -> Result<Self, Self::Error> {
        list.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use weft_core::layout::measure;
    use weft_core::testing::TestRuntime;

    fn fruits() -> Vec<&'static str> {
        vec!["apple", "banana", "cherry", "damson", "elder"]
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = List::new(Vec::<String>::new(), Shared::new(0)).build().unwrap_err();
        assert_eq!(err, BuildError::EmptyList);
    }

    #[test]
    fn measures_widest_item_and_visible_rows() {
        let mut node = List::new(fruits(), Shared::new(0)).with_max_visible(3).build().unwrap();
        measure(&mut node);
        assert_eq!((node.bounds.width, node.bounds.height), (6, 3));
    }

    #[test]
    fn internal_offset_survives_rebuilds() {
        let selected = Shared::new(0);
        let picked = Shared::new(None);
        let (s, p) = (selected.clone(), picked.clone());
        let mut rt = TestRuntime::new(20, 5, move || {
            let p = p.clone();
            List::new(fruits(), s.clone())
                .with_max_visible(2)
                .on_select(move |i| p.set(Some(i)))
                .build()
                .ok()
        });
        for _ in 0..3 {
            rt.press(KeyCode::Down);
        }
        assert_eq!(selected.get(), 3);
        rt.advance(std::time::Duration::from_secs(1));
        let offset = match &rt.tree().expect("tree").kind {
            NodeKind::List(d) => d.offset.get(),
            _ => panic!("not a list"),
        };
        assert_eq!(offset, 2);
        assert!(rt.render_string().starts_with("cherry"));

        rt.press(KeyCode::Enter);
        assert_eq!(picked.get(), Some(3));
    }

    #[test]
    fn external_offset_is_written_back() {
        let offset = Shared::new(0);
        let o = offset.clone();
        let mut rt = TestRuntime::new(20, 5, move || {
            List::new(fruits(), Shared::new(0))
                .with_max_visible(2)
                .with_offset(o.clone())
                .build()
                .ok()
        });
        rt.scroll(0, 0, true);
        rt.scroll(0, 0, true);
        rt.scroll(0, 0, true);
        rt.scroll(0, 0, true);
        assert_eq!(offset.get(), 3);
    }
}
