//! Core runtime for the **weft** TUI framework.
//!
//! `weft-core` is a retained-mode runtime: the application describes its
//! whole interface as a fresh tree of [`Node`]s every frame, and the runtime
//! works out what changed, where everything goes and which widget an input
//! event belongs to. State the application cares about lives outside the tree
//! in [`Shared`] handles that widgets reference.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Node`] | One widget: kind, payload, children, computed bounds |
//! | [`Shared`] | Application-owned state referenced by widgets |
//! | [`Callback`] | Action fired by buttons, modals and toasts |
//! | [`Engine`] | The frame pipeline, independent of any terminal |
//! | [`Runtime`] | Drives an [`Engine`] on a real terminal until quit |
//! | [`TestRuntime`](testing::TestRuntime) | Headless harness for testing a UI without a terminal |
//!
//! # Frame pipeline
//!
//! 1. **build** -- the root builder returns a new tree (`None` ends the run).
//! 2. **carry over** -- scroll motion, spinner frames, cursors and toast state
//!    move from the previous frame onto their positional matches.
//! 3. **layout** -- sizes are measured bottom-up, positions assigned top-down.
//! 4. **focus** -- the tab order is rebuilt, scoped to an open modal.
//! 5. **tick** -- animations, spinners and toasts advance.
//! 6. **diff** -- the settled tree is compared with the previous frame.
//! 7. **paint** -- the screen is redrawn, or the frame is skipped if nothing
//!    changed.
//!
//! # Quick example
//!
//! ```ignore
//! use weft_core::{Callback, Node, NodeKind, Shared, StackData, TextData, ButtonData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), weft_core::RuntimeError> {
//!     let count = Shared::new(0);
//!     weft_core::run(move || {
//!         let c = count.clone();
//!         Some(Node::with_children(
//!             NodeKind::VStack(StackData::default()),
//!             vec![
//!                 Node::new(NodeKind::Text(TextData { content: format!("Count: {}", count.get()) })),
//!                 Node::new(NodeKind::Button(ButtonData {
//!                     label: "+".into(),
//!                     on_click: Some(Callback::new(move || c.update(|n| *n += 1))),
//!                 })),
//!             ],
//!         ))
//!     })
//!     .await
//! }
//! ```

pub mod action;
pub mod animation;
pub mod diff;
pub mod dispatch;
pub mod engine;
pub mod event;
pub mod focus;
pub mod keymap;
pub mod layout;
pub mod logging;
pub mod render;
pub mod runtime;
pub mod shared;
pub mod testing;
pub mod tick;
pub mod toast;
pub mod tree;

pub use action::{Callback, SelectCallback};
pub use animation::{Animation, AnimationSet, Easing};
pub use dispatch::{hit_test, Dispatch};
pub use engine::{Builder, Engine, FrameOutcome};
pub use event::{InputEvent, MouseAction, MouseButton, MouseInput};
pub use focus::{FocusRouter, DEFAULT_FOCUS_CAPACITY};
pub use keymap::{Binding, GlobalAction, Keymap};
pub use logging::init_file_logging;
pub use runtime::{terminal_size, OutputTarget, RenderHandle, Runtime, RuntimeError, RuntimeOptions};
pub use shared::Shared;
pub use tick::Timing;
pub use toast::{ToastLifecycle, ToastState, TOAST_HEIGHT};
pub use tree::{
    Align, Bounds, ButtonData, FocusMeta, InputData, Insets, Kind, ListData, ModalData, Node, NodeKind, NodePath,
    PaddingData, Paint, ScrollMotion, ScrollOffset, ScrollViewData, SpinnerData, SpinnerStyle, StackData, Step,
    TableData, TextData, ToastData, ToastPosition,
};

/// Run a UI with default options until quit.
pub async fn run(builder: impl FnMut() -> Option<Node> + Send + 'static) -> Result<(), RuntimeError> {
    run_with(builder, RuntimeOptions::default()).await
}

/// Run with custom options.
pub async fn run_with(
    builder: impl FnMut() -> Option<Node> + Send + 'static,
    options: RuntimeOptions,
) -> Result<(), RuntimeError> {
    let mut runtime = Runtime::with_options(options)?;
    runtime.set_root(builder);
    runtime.run().await
}
