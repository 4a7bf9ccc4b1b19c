use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};

use crate::dispatch::Dispatch;
use crate::engine::{Engine, FrameOutcome};
use crate::event::{InputEvent, MouseAction, MouseButton, MouseInput};
use crate::focus::FocusRouter;
use crate::keymap::Keymap;
use crate::tick::Timing;
use crate::tree::Node;

/// A headless harness that drives the full frame pipeline without a terminal.
///
/// `TestRuntime` builds, lays out, reconciles, ticks and paints exactly like
/// the real [`Runtime`](crate::Runtime), but into an in-memory [`Buffer`] and
/// on a clock the test controls. Input helpers dispatch an event and, when it
/// asks for a render, immediately build the next frame.
///
/// # Example
///
/// ```rust,ignore
/// use weft_core::testing::TestRuntime;
///
/// let count = Shared::new(0);
/// let mut rt = TestRuntime::new(40, 5, counter_ui(count.clone()));
/// rt.press(KeyCode::Enter);
/// assert_eq!(count.get(), 1);
/// assert!(rt.render_string().contains("Count: 1"));
/// ```
pub struct TestRuntime {
    engine: Engine,
    buffer: Buffer,
    cursor: Option<Position>,
    now: Instant,
    paints: usize,
    quit: bool,
    exited: bool,
}

impl TestRuntime {
    /// Create a harness with a `width` x `height` screen and build the first frame.
    pub fn new(width: u16, height: u16, builder: impl FnMut() -> Option<Node> + Send + 'static) -> Self {
        Self::with_engine(
            width,
            height,
            Engine::new(FocusRouter::default(), Keymap::default(), Timing::default()),
            builder,
        )
    }

    /// Like [`new`](TestRuntime::new) with a preconfigured engine.
    pub fn with_engine(
        width: u16,
        height: u16,
        mut engine: Engine,
        builder: impl FnMut() -> Option<Node> + Send + 'static,
    ) -> Self {
        engine.set_root(builder);
        let mut rt = Self {
            engine,
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
            cursor: None,
            now: Instant::now(),
            paints: 0,
            quit: false,
            exited: false,
        };
        rt.frame();
        rt
    }

    /// Build a frame at the harness clock, painting if needed.
    pub fn frame(&mut self) -> FrameOutcome {
        self.frame_at(self.now)
    }

    /// Build a frame at `now`, painting if needed. Moves the clock to `now`.
    pub fn frame_at(&mut self, now: Instant) -> FrameOutcome {
        self.now = now;
        let outcome = self.engine.frame(self.buffer.area.as_size(), now);
        match outcome {
            FrameOutcome::Paint => {
                self.buffer.reset();
                self.cursor = self.engine.paint(&mut self.buffer);
                self.paints += 1;
            }
            FrameOutcome::Exit => self.exited = true,
            FrameOutcome::Skip => {}
        }
        outcome
    }

    /// Advance the clock by `by` and build a frame.
    pub fn advance(&mut self, by: Duration) -> FrameOutcome {
        self.frame_at(self.now + by)
    }

    /// Dispatch an event; build a frame when it asks for one.
    pub fn send(&mut self, event: InputEvent) -> Dispatch {
        let out = self.engine.handle(event);
        if out.quit {
            self.quit = true;
        }
        if out.render {
            self.frame();
        }
        out
    }

    pub fn press(&mut self, code: KeyCode) -> Dispatch {
        self.send(InputEvent::Key(code))
    }

    /// Press one key per character of `text`.
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Left-click the cell at (`column`, `row`).
    pub fn click(&mut self, column: u16, row: u16) -> Dispatch {
        self.send(InputEvent::Mouse(MouseInput::new(
            MouseButton::Left,
            MouseAction::Press,
            column,
            row,
        )))
    }

    /// Turn the mouse wheel one notch over (`column`, `row`).
    pub fn scroll(&mut self, column: u16, row: u16, down: bool) -> Dispatch {
        let button = if down {
            MouseButton::ScrollDown
        } else {
            MouseButton::ScrollUp
        };
        self.send(InputEvent::Mouse(MouseInput::new(button, MouseAction::Press, column, row)))
    }

    /// Change the screen size and build a frame.
    pub fn resize(&mut self, width: u16, height: u16) -> FrameOutcome {
        self.buffer = Buffer::empty(Rect::new(0, 0, width, height));
        self.send(InputEvent::Resize);
        self.frame()
    }

    /// The tree built by the most recent frame.
    pub fn tree(&self) -> Option<&Node> {
        self.engine.tree()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// The last painted screen.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Terminal cursor position of the last paint.
    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    /// Number of frames actually painted so far.
    pub fn paints(&self) -> usize {
        self.paints
    }

    /// Whether a quit was requested by input.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Whether the builder ended the run.
    pub fn exited(&self) -> bool {
        self.exited
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// The last painted screen as text, one line per row, trailing spaces kept.
    pub fn render_string(&self) -> String {
        let area = self.buffer.area;
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(self.buffer[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Callback;
    use crate::shared::Shared;
    use crate::toast::{ToastLifecycle, ToastState};
    use crate::tree::*;

    fn text(s: &str) -> Node {
        Node::new(NodeKind::Text(TextData { content: s.into() }))
    }

    fn vstack(children: Vec<Node>) -> Node {
        Node::with_children(NodeKind::VStack(StackData::default()), children)
    }

    fn button(label: &str, on_click: Callback) -> Node {
        Node::new(NodeKind::Button(ButtonData {
            label: label.into(),
            on_click: Some(on_click),
        }))
    }

    fn counter_ui(count: Shared<i32>) -> impl FnMut() -> Option<Node> + Send + 'static {
        move || {
            let c = count.clone();
            Some(vstack(vec![
                text(&format!("Count: {}", count.get())),
                button("+", Callback::new(move || c.update(|n| *n += 1))),
            ]))
        }
    }

    #[test]
    fn counter_increments_and_repaints() {
        let count = Shared::new(0);
        let mut rt = TestRuntime::new(20, 3, counter_ui(count.clone()));
        assert_eq!(rt.paints(), 1);
        assert!(rt.render_string().starts_with("Count: 0"));

        let out = rt.press(KeyCode::Enter);
        assert!(out.render);
        assert_eq!(count.get(), 1);
        assert_eq!(rt.paints(), 2);
        let tree = rt.tree().expect("tree");
        assert!(tree.children[0].dirty);
        assert!(rt.render_string().starts_with("Count: 1"));
    }

    #[test]
    fn ignored_key_does_not_repaint() {
        let count = Shared::new(0);
        let mut rt = TestRuntime::new(20, 3, counter_ui(count));
        let out = rt.press(KeyCode::Char('x'));
        assert_eq!(out, Dispatch::default());
        assert_eq!(rt.paints(), 1);
        assert!(rt.press(KeyCode::Char('q')).quit);
        assert!(rt.quit_requested());
    }

    #[test]
    fn scroll_clamps_after_many_presses() {
        let offset = Shared::new(0);
        let o = offset.clone();
        let mut rt = TestRuntime::new(20, 12, move || {
            let lines = (0..50).map(|i| text(&format!("row {i}"))).collect();
            Some(Node::new(NodeKind::ScrollView(ScrollViewData {
                content: Box::new(vstack(lines)),
                offset: o.clone(),
                max_height: 10,
                motion: ScrollMotion::settled(o.get()),
            })))
        });
        for _ in 0..100 {
            rt.press(KeyCode::Down);
        }
        assert_eq!(offset.get(), 40);

        rt.advance(Duration::from_secs(1));
        assert!(!rt.engine().is_animating());
        assert!(rt.render_string().starts_with("row 40"));
    }

    #[test]
    fn toast_runs_its_lifecycle() {
        let visible = Shared::new(false);
        let closed = Shared::new(0);
        let (v, c) = (visible.clone(), closed.clone());
        let mut rt = TestRuntime::new(30, 8, move || {
            let c = c.clone();
            Some(vstack(vec![
                text("body"),
                Node::new(NodeKind::Toast(ToastData {
                    message: "Saved".into(),
                    position: ToastPosition::Bottom,
                    visible: v.clone(),
                    auto_dismiss: Some(Duration::from_secs(2)),
                    on_close: Some(Callback::new(move || c.update(|n| *n += 1))),
                    lifecycle: ToastLifecycle::default(),
                })),
            ]))
        });
        let state = |rt: &TestRuntime| match &rt.tree().expect("tree").children[1].kind {
            NodeKind::Toast(d) => d.lifecycle.state,
            _ => panic!("not a toast"),
        };

        visible.set(true);
        rt.frame();
        assert_eq!(state(&rt), ToastState::SlidingIn);
        assert!(rt.engine().is_animating());

        rt.advance(Duration::from_millis(300));
        assert_eq!(state(&rt), ToastState::Visible);
        assert!(rt.render_string().contains("│ Saved │"));

        rt.advance(Duration::from_secs(2));
        assert_eq!(state(&rt), ToastState::SlidingOut);
        assert!(visible.get());

        rt.advance(Duration::from_millis(300));
        assert_eq!(state(&rt), ToastState::Hidden);
        assert!(!visible.get());
        assert_eq!(closed.get(), 1);
        assert!(!rt.render_string().contains("Saved"));

        rt.advance(Duration::from_secs(5));
        assert_eq!(closed.get(), 1);
    }

    #[test]
    fn shown_toast_does_not_repaint_identical_frames() {
        let visible = Shared::new(true);
        let v = visible.clone();
        let mut rt = TestRuntime::new(30, 8, move || {
            Some(vstack(vec![
                text("body"),
                Node::new(NodeKind::Toast(ToastData {
                    message: "Pinned".into(),
                    position: ToastPosition::TopRight,
                    visible: v.clone(),
                    auto_dismiss: None,
                    on_close: None,
                    lifecycle: ToastLifecycle::default(),
                })),
            ]))
        });
        rt.advance(Duration::from_millis(400));
        assert!(rt.render_string().contains("Pinned"));
        let painted = rt.paints();

        assert_eq!(rt.frame(), FrameOutcome::Skip);
        assert_eq!(rt.advance(Duration::from_secs(1)), FrameOutcome::Skip);
        let tree = rt.tree().expect("tree");
        assert!(!tree.dirty);
        assert!(!tree.children[1].dirty);
        assert_eq!(rt.paints(), painted);
        assert!(visible.get());
    }

    #[test]
    fn offset_past_the_end_settles_into_skipped_frames() {
        let offset = Shared::new(100);
        let o = offset.clone();
        let mut rt = TestRuntime::new(20, 12, move || {
            let lines = (0..50).map(|i| text(&format!("row {i}"))).collect();
            Some(Node::new(NodeKind::ScrollView(ScrollViewData {
                content: Box::new(vstack(lines)),
                offset: o.clone(),
                max_height: 10,
                motion: ScrollMotion::settled(o.get()),
            })))
        });
        rt.advance(Duration::from_secs(1));
        assert!(rt.render_string().starts_with("row 40"));

        assert_eq!(rt.frame(), FrameOutcome::Skip);
        assert!(!rt.tree().expect("tree").dirty);
        assert_eq!(offset.get(), 100);
    }

    #[test]
    fn click_on_clamped_list_selects_visible_row() {
        let selected = Shared::new(0);
        let offset = Shared::new(9);
        let (s, o) = (selected.clone(), offset.clone());
        let mut rt = TestRuntime::new(20, 5, move || {
            Some(Node::new(NodeKind::List(ListData {
                items: (0..10).map(|i| format!("item {i}")).collect(),
                selected: s.clone(),
                offset: ScrollOffset::External(o.clone()),
                max_visible: 3,
                on_select: None,
                motion: ScrollMotion::default(),
            })))
        });
        rt.advance(Duration::from_secs(1));
        assert!(rt.render_string().starts_with("item 7"));

        assert!(rt.click(0, 0).render);
        assert_eq!(selected.get(), 7);
    }

    #[test]
    fn modal_traps_focus_and_closes_on_escape() {
        let open = Shared::new(false);
        let hits = Shared::new(Vec::new());
        let (o, h) = (open.clone(), hits.clone());
        let mut rt = TestRuntime::new(40, 14, move || {
            let record = |name: &'static str| {
                let h = h.clone();
                Callback::new(move || h.update(|v| v.push(name)))
            };
            let o2 = o.clone();
            Some(vstack(vec![
                button("open", Callback::new(move || o2.set(true))),
                button("other", record("other")),
                Node::new(NodeKind::Modal(ModalData {
                    open: o.clone(),
                    title: Some("Sure?".into()),
                    content: Box::new(vstack(vec![button("yes", record("yes")), button("no", record("no"))])),
                    on_close: None,
                })),
            ]))
        });

        rt.press(KeyCode::Enter);
        assert!(open.get());
        assert_eq!(rt.engine().focus().len(), 2);

        // Three tabs inside a two-button modal land on the second button.
        for _ in 0..3 {
            rt.press(KeyCode::Tab);
        }
        rt.press(KeyCode::Enter);
        assert_eq!(hits.get(), vec!["no"]);

        assert!(!rt.press(KeyCode::Char('q')).quit);
        rt.press(KeyCode::Esc);
        assert!(!open.get());
        assert_eq!(rt.engine().focus().len(), 3);
    }

    #[test]
    fn focused_input_shows_cursor() {
        let buffer = Shared::new(String::new());
        let b = buffer.clone();
        let mut rt = TestRuntime::new(30, 2, move || {
            Some(Node::new(NodeKind::TextInput(InputData {
                buffer: b.clone(),
                capacity: 32,
                cursor: None,
            })))
        });
        rt.type_str("hi there");
        assert_eq!(buffer.get(), "hi there");
        assert_eq!(rt.cursor(), Some(Position::new(9, 0)));
        rt.press(KeyCode::Home);
        assert_eq!(rt.cursor(), Some(Position::new(1, 0)));
    }

    #[test]
    fn builder_can_end_the_run() {
        let done = Shared::new(false);
        let d = done.clone();
        let mut rt = TestRuntime::new(10, 2, move || (!d.get()).then(|| text("running")));
        assert!(!rt.exited());
        done.set(true);
        assert_eq!(rt.frame(), FrameOutcome::Exit);
        assert!(rt.exited());
    }

    #[test]
    fn resize_repaints() {
        let mut rt = TestRuntime::new(10, 2, || Some(text("hello")));
        let painted = rt.paints();
        assert_eq!(rt.frame(), FrameOutcome::Skip);
        rt.resize(20, 4);
        assert!(rt.paints() > painted);
        assert_eq!(rt.render_string().lines().count(), 4);
    }
}
