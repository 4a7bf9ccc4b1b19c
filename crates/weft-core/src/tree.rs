//! The component tree produced by application code every frame.
//!
//! A [`Node`] owns its children and any single "content" node (modal,
//! scroll view, padding). Everything the application owns and a widget edits
//! (offsets, selections, flags, text buffers) is referenced through
//! [`Shared`] handles, so dropping a tree never touches application state.

use std::time::{Duration, Instant};

use ratatui::style::{Color, Modifier, Style};

use crate::action::{Callback, SelectCallback};
use crate::animation::Animation;
use crate::shared::Shared;
use crate::toast::ToastLifecycle;

/// Computed position and size in terminal cells.
///
/// Coordinates are signed: content inside a scrolled view may sit above the
/// visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the cell at (`x`, `y`) lies inside these bounds.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Overlapping region of two bounds; zero-sized when they do not meet.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        Bounds::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Focus bookkeeping written by the focus router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusMeta {
    pub focusable: bool,
    pub focused: bool,
    /// Position in the current tab order, if the node is in it.
    pub index: Option<usize>,
}

/// Colors and text modifiers applied when drawing a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Paint {
    pub fg: Color,
    pub bg: Color,
    pub modifiers: Modifier,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
            modifiers: Modifier::empty(),
        }
    }
}

impl Paint {
    pub fn style(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.bg)
            .add_modifier(self.modifiers)
    }
}

/// Cross-axis alignment of stack children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StackData {
    pub spacing: u16,
    pub align: Align,
}

#[derive(Debug, Clone)]
pub struct TextData {
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ButtonData {
    pub label: String,
    pub on_click: Option<Callback>,
}

#[derive(Debug, Clone)]
pub struct InputData {
    pub buffer: Shared<String>,
    /// Maximum number of characters the buffer may hold.
    pub capacity: usize,
    /// Cursor as a character index. `None` until the diff carries the
    /// previous frame's cursor over; treated as "end of buffer".
    pub cursor: Option<usize>,
}

impl InputData {
    /// Cursor position clamped to the current buffer length.
    pub fn cursor(&self) -> usize {
        let len = self.buffer.with(|b| b.chars().count());
        self.cursor.map_or(len, |c| c.min(len))
    }
}

/// Displayed scroll position of a list or scroll view.
///
/// `visual` is what layout and rendering use; it chases `target` through the
/// optional animation whenever the external offset changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollMotion {
    pub visual: f32,
    pub target: f32,
    pub animation: Option<Animation>,
}

impl ScrollMotion {
    /// Motion already resting at `offset`.
    pub fn settled(offset: usize) -> Self {
        Self {
            visual: offset as f32,
            target: offset as f32,
            animation: None,
        }
    }

    /// Visual offset rounded to whole rows.
    pub fn rows(&self) -> i32 {
        self.visual.round() as i32
    }
}

/// Where a list's scroll offset lives.
#[derive(Debug, Clone)]
pub enum ScrollOffset {
    /// Application-owned offset.
    External(Shared<usize>),
    /// Offset kept by the list itself and carried across rebuilds.
    Internal(usize),
}

impl ScrollOffset {
    pub fn get(&self) -> usize {
        match self {
            ScrollOffset::External(s) => s.get(),
            ScrollOffset::Internal(v) => *v,
        }
    }

    pub fn set(&mut self, value: usize) {
        match self {
            ScrollOffset::External(s) => s.set(value),
            ScrollOffset::Internal(v) => *v = value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListData {
    pub items: Vec<String>,
    pub selected: Shared<usize>,
    pub offset: ScrollOffset,
    pub max_visible: usize,
    pub on_select: Option<SelectCallback>,
    pub motion: ScrollMotion,
}

impl ListData {
    /// Largest valid scroll offset.
    pub fn max_offset(&self) -> usize {
        self.items.len().saturating_sub(self.max_visible)
    }

    /// Index of the item drawn on the list's top row.
    pub fn first_visible(&self) -> usize {
        self.motion.rows().max(0) as usize
    }
}

#[derive(Debug, Clone)]
pub struct ModalData {
    pub open: Shared<bool>,
    pub title: Option<String>,
    pub content: Box<Node>,
    pub on_close: Option<Callback>,
}

#[derive(Debug, Clone)]
pub struct ScrollViewData {
    pub content: Box<Node>,
    pub offset: Shared<usize>,
    /// Viewport height in rows.
    pub max_height: usize,
    pub motion: ScrollMotion,
}

impl ScrollViewData {
    /// Largest valid scroll offset given the measured content.
    pub fn max_offset(&self) -> usize {
        let content = self.content.bounds.height.max(0) as usize;
        content.saturating_sub(self.max_height)
    }
}

#[derive(Debug, Clone)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub column_widths: Vec<usize>,
    pub borders: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Insets {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Insets {
    pub fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    pub fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaddingData {
    pub insets: Insets,
    pub content: Box<Node>,
}

/// Built-in spinner frame sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpinnerStyle {
    #[default]
    Braille,
    Classic,
    Dots,
    Box,
    Arrow,
}

impl SpinnerStyle {
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Braille => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            SpinnerStyle::Classic => &["|", "/", "-", "\\"],
            SpinnerStyle::Dots => &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"],
            SpinnerStyle::Box => &["◰", "◳", "◲", "◱"],
            SpinnerStyle::Arrow => &["←", "↖", "↑", "↗", "→", "↘", "↓", "↙"],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpinnerData {
    pub style: SpinnerStyle,
    pub label: Option<String>,
    /// Completion in `[0, 1]`, shown as a percentage.
    pub progress: Option<f32>,
    pub speed: Duration,
    pub frame: usize,
    pub last_advance: Option<Instant>,
}

impl SpinnerData {
    pub fn glyph(&self) -> &'static str {
        let frames = self.style.frames();
        frames[self.frame % frames.len()]
    }

    /// Progress formatted as ` XXX.X%`.
    pub fn progress_text(&self) -> Option<String> {
        self.progress
            .map(|p| format!(" {:>5.1}%", (p.clamp(0.0, 1.0) * 100.0)))
    }
}

/// Screen anchor of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastPosition {
    Top,
    #[default]
    Bottom,
    TopRight,
    BottomRight,
}

#[derive(Debug, Clone)]
pub struct ToastData {
    pub message: String,
    pub position: ToastPosition,
    pub visible: Shared<bool>,
    pub auto_dismiss: Option<Duration>,
    pub on_close: Option<Callback>,
    pub lifecycle: ToastLifecycle,
}

/// Widget kind plus its kind-specific payload.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Text(TextData),
    Button(ButtonData),
    TextInput(InputData),
    List(ListData),
    Modal(ModalData),
    ScrollView(ScrollViewData),
    Table(TableData),
    Padding(PaddingData),
    Spacer,
    Spinner(SpinnerData),
    Toast(ToastData),
    VStack(StackData),
    HStack(StackData),
}

/// Payload-free widget kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Text,
    Button,
    TextInput,
    List,
    Modal,
    ScrollView,
    Table,
    Padding,
    Spacer,
    Spinner,
    Toast,
    VStack,
    HStack,
}

impl NodeKind {
    pub fn kind(&self) -> Kind {
        match self {
            NodeKind::Text(_) => Kind::Text,
            NodeKind::Button(_) => Kind::Button,
            NodeKind::TextInput(_) => Kind::TextInput,
            NodeKind::List(_) => Kind::List,
            NodeKind::Modal(_) => Kind::Modal,
            NodeKind::ScrollView(_) => Kind::ScrollView,
            NodeKind::Table(_) => Kind::Table,
            NodeKind::Padding(_) => Kind::Padding,
            NodeKind::Spacer => Kind::Spacer,
            NodeKind::Spinner(_) => Kind::Spinner,
            NodeKind::Toast(_) => Kind::Toast,
            NodeKind::VStack(_) => Kind::VStack,
            NodeKind::HStack(_) => Kind::HStack,
        }
    }
}

/// One step from a node to one of its owned nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Child(usize),
    Content,
}

/// Address of a node relative to the root of its tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<Step>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        self.join(Step::Child(index))
    }

    pub fn content(&self) -> Self {
        self.join(Step::Content)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &NodePath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// The path one step up, or `None` at the root.
    pub fn parent(&self) -> Option<NodePath> {
        let (_, rest) = self.0.split_last()?;
        Some(Self(rest.to_vec()))
    }

    fn join(&self, step: Step) -> Self {
        let mut steps = self.0.clone();
        steps.push(step);
        Self(steps)
    }
}

/// A component in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    pub bounds: Bounds,
    pub focus: FocusMeta,
    pub paint: Paint,
    pub dirty: bool,
    pub content_hash: u64,
}

impl Node {
    /// Create a childless node. Interactive kinds start focusable.
    pub fn new(kind: NodeKind) -> Self {
        let focusable = matches!(
            kind,
            NodeKind::Button(_) | NodeKind::TextInput(_) | NodeKind::List(_) | NodeKind::ScrollView(_)
        );
        Self {
            kind,
            children: Vec::new(),
            bounds: Bounds::default(),
            focus: FocusMeta {
                focusable,
                ..FocusMeta::default()
            },
            paint: Paint::default(),
            dirty: false,
            content_hash: 0,
        }
    }

    /// Create a container node owning `children`.
    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::new(kind)
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind.kind()
    }

    /// The single non-child node owned by modals, scroll views and padding.
    pub fn content(&self) -> Option<&Node> {
        match &self.kind {
            NodeKind::Modal(d) => Some(&d.content),
            NodeKind::ScrollView(d) => Some(&d.content),
            NodeKind::Padding(d) => Some(&d.content),
            _ => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut Node> {
        match &mut self.kind {
            NodeKind::Modal(d) => Some(&mut d.content),
            NodeKind::ScrollView(d) => Some(&mut d.content),
            NodeKind::Padding(d) => Some(&mut d.content),
            _ => None,
        }
    }

    /// Whether this node is a modal whose open flag is set.
    pub fn is_open_modal(&self) -> bool {
        matches!(&self.kind, NodeKind::Modal(d) if d.open.get())
    }

    /// Resolve a path relative to this node.
    pub fn at(&self, path: &NodePath) -> Option<&Node> {
        path.steps().iter().try_fold(self, |node, step| match step {
            Step::Child(i) => node.children.get(*i),
            Step::Content => node.content(),
        })
    }

    pub fn at_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let mut node = self;
        for step in path.steps() {
            node = match step {
                Step::Child(i) => node.children.get_mut(*i)?,
                Step::Content => node.content_mut()?,
            };
        }
        Some(node)
    }

    /// Depth-first, pre-order walk over this node, its children and content.
    pub fn walk(&self, f: &mut impl FnMut(&NodePath, &Node)) {
        self.walk_from(&NodePath::root(), f);
    }

    fn walk_from(&self, path: &NodePath, f: &mut impl FnMut(&NodePath, &Node)) {
        f(path, self);
        for (i, child) in self.children.iter().enumerate() {
            child.walk_from(&path.child(i), f);
        }
        if let Some(content) = self.content() {
            content.walk_from(&path.content(), f);
        }
    }

    /// Path of the first open modal, depth-first. Content of closed modals
    /// is not searched.
    pub fn find_open_modal(&self) -> Option<NodePath> {
        self.find_open_modal_from(NodePath::root())
    }

    fn find_open_modal_from(&self, path: NodePath) -> Option<NodePath> {
        match &self.kind {
            NodeKind::Modal(d) if d.open.get() => return Some(path),
            NodeKind::Modal(_) => return None,
            _ => {}
        }
        for (i, child) in self.children.iter().enumerate() {
            if let Some(found) = child.find_open_modal_from(path.child(i)) {
                return Some(found);
            }
        }
        self.content()
            .and_then(|content| content.find_open_modal_from(path.content()))
    }

    /// Mark this node and everything it owns dirty.
    pub fn mark_all_dirty(&mut self) {
        self.dirty = true;
        for child in &mut self.children {
            child.mark_all_dirty();
        }
        if let Some(content) = self.content_mut() {
            content.mark_all_dirty();
        }
    }

    // -- paint helpers ----------------------------------------------------

    pub fn fg(mut self, color: Color) -> Self {
        self.paint.fg = color;
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.paint.bg = color;
        self
    }

    pub fn colors(self, fg: Color, bg: Color) -> Self {
        self.fg(fg).bg(bg)
    }

    pub fn bold(self) -> Self {
        self.modifier(Modifier::BOLD)
    }

    pub fn underline(self) -> Self {
        self.modifier(Modifier::UNDERLINED)
    }

    pub fn italic(self) -> Self {
        self.modifier(Modifier::ITALIC)
    }

    pub fn dim(self) -> Self {
        self.modifier(Modifier::DIM)
    }

    pub fn reversed(self) -> Self {
        self.modifier(Modifier::REVERSED)
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.paint.modifiers |= modifier;
        self
    }

    /// Override whether the node takes part in the tab order.
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focus.focusable = focusable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::new(NodeKind::Text(TextData {
            content: s.into(),
        }))
    }

    fn padded(inner: Node) -> Node {
        Node::new(NodeKind::Padding(PaddingData {
            insets: Insets::all(1),
            content: Box::new(inner),
        }))
    }

    fn vstack(children: Vec<Node>) -> Node {
        Node::with_children(NodeKind::VStack(StackData::default()), children)
    }

    #[test]
    fn path_resolves_children_and_content() {
        let tree = vstack(vec![text("a"), padded(text("b"))]);
        let path = NodePath::root().child(1).content();
        let node = tree.at(&path).expect("node exists");
        assert!(matches!(&node.kind, NodeKind::Text(t) if t.content == "b"));
        assert!(tree.at(&NodePath::root().child(5)).is_none());
        assert!(tree.at(&NodePath::root().child(0).content()).is_none());
    }

    #[test]
    fn walk_is_preorder_including_content() {
        let tree = vstack(vec![padded(text("x")), text("y")]);
        let mut kinds = Vec::new();
        tree.walk(&mut |_, n| kinds.push(n.kind()));
        assert_eq!(
            kinds,
            vec![Kind::VStack, Kind::Padding, Kind::Text, Kind::Text]
        );
    }

    #[test]
    fn interactive_kinds_start_focusable() {
        let button = Node::new(NodeKind::Button(ButtonData {
            label: "ok".into(),
            on_click: None,
        }));
        assert!(button.focus.focusable);
        assert!(!text("t").focus.focusable);
    }

    #[test]
    fn paint_helpers_accumulate_modifiers() {
        let n = text("t").fg(Color::Red).bold().underline();
        assert_eq!(n.paint.fg, Color::Red);
        assert!(n.paint.modifiers.contains(Modifier::BOLD | Modifier::UNDERLINED));
    }

    #[test]
    fn dropping_tree_leaves_external_state_alive() {
        let offset = Shared::new(7usize);
        let tree = Node::new(NodeKind::ScrollView(ScrollViewData {
            content: Box::new(text("c")),
            offset: offset.clone(),
            max_height: 3,
            motion: ScrollMotion::settled(7),
        }));
        drop(tree);
        assert_eq!(offset.get(), 7);
    }

    #[test]
    fn bounds_intersection() {
        let a = Bounds::new(0, 0, 10, 10);
        let b = Bounds::new(5, 8, 10, 10);
        assert_eq!(a.intersect(&b), Bounds::new(5, 8, 5, 2));
        assert!(a.intersect(&Bounds::new(20, 20, 1, 1)).is_empty());
    }

    #[test]
    fn input_cursor_defaults_to_end_and_clamps() {
        let mut data = InputData {
            buffer: Shared::new("héllo".to_string()),
            capacity: 32,
            cursor: None,
        };
        assert_eq!(data.cursor(), 5);
        data.cursor = Some(99);
        assert_eq!(data.cursor(), 5);
        data.cursor = Some(2);
        assert_eq!(data.cursor(), 2);
    }
}
