//! Transient notifications that slide in, wait, and slide out.

use std::time::Duration;

use weft_core::{Callback, Node, NodeKind, Shared, ToastData, ToastLifecycle, ToastPosition};

/// How long a toast stays before sliding out, unless made sticky.
pub const DEFAULT_AUTO_DISMISS: Duration = Duration::from_secs(2);

/// A framed one-line message anchored to an edge of the screen.
///
/// Setting `visible` to true starts the slide in. After the auto-dismiss
/// delay the toast slides out, clears `visible` and fires its close action.
/// Toasts take no space in their parent; place them anywhere in the tree.
///
/// ```rust,ignore
/// Toast::new("Saved", saved.clone())
///     .with_position(ToastPosition::TopRight)
///     .on_close(move || log.update(|l| l.push("toast closed")))
///     .build()
/// ```
#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    visible: Shared<bool>,
    position: ToastPosition,
    auto_dismiss: Option<Duration>,
    on_close: Option<Callback>,
}

impl Toast {
    pub fn new(message: impl Into<String>, visible: Shared<bool>) -> Self {
        Self {
            message: message.into(),
            visible,
            position: ToastPosition::default(),
            auto_dismiss: Some(DEFAULT_AUTO_DISMISS),
            on_close: None,
        }
    }

    pub fn with_position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_auto_dismiss(mut self, after: Duration) -> Self {
        self.auto_dismiss = Some(after);
        self
    }

    /// Stay until `visible` is cleared by the application.
    pub fn sticky(mut self) -> Self {
        self.auto_dismiss = None;
        self
    }

    pub fn on_close(mut self, action: impl Into<Callback>) -> Self {
        self.on_close = Some(action.into());
        self
    }

    pub fn build(self) -> Node {
        Node::new(NodeKind::Toast(ToastData {
            message: self.message,
            position: self.position,
            visible: self.visible,
            auto_dismiss: self.auto_dismiss,
            on_close: self.on_close,
            lifecycle: ToastLifecycle::default(),
        }))
    }
}

impl From<Toast> for Node {
    fn from(toast: Toast) -> Self {
        toast.build()
    }
}
