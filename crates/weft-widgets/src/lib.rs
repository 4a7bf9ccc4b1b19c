//! Widget constructors for the **weft** TUI framework.
//!
//! Every constructor here returns a [`weft_core::Node`] (or a builder that
//! produces one). Compose them into a tree inside your root builder; styling
//! is applied with the paint helpers on `Node` (`.fg()`, `.bold()`, ...).
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`text`] | Text, buttons and spacers |
//! | [`stack`] | Vertical and horizontal stacks with spacing and alignment |
//! | [`text_input`] | Single-line editor over a shared buffer |
//! | [`list`] | Scrollable single-selection list |
//! | [`table`] | Read-only table, framed or plain |
//! | [`scroll_view`] | Viewport with eased scrolling |
//! | [`padding`] | Insets around one child |
//! | [`modal`] | Focus-trapping dialog overlay |
//! | [`spinner`] | Animated activity indicator |
//! | [`toast`] | Sliding notifications |
//!
//! Constructors that can reject their input ([`List`](list::List),
//! [`Table`](table::Table)) return [`BuildError`].

pub mod error;
pub mod list;
pub mod modal;
pub mod padding;
pub mod scroll_view;
pub mod spinner;
pub mod stack;
pub mod table;
pub mod text;
pub mod text_input;
pub mod toast;

pub use error::BuildError;

/// Everything needed to write a root builder.
pub mod prelude {
    pub use crate::error::BuildError;
    pub use crate::list::List;
    pub use crate::modal::Modal;
    pub use crate::padding::{pad, padded};
    pub use crate::scroll_view::ScrollView;
    pub use crate::spinner::Spinner;
    pub use crate::stack::{hstack, vstack, Stack};
    pub use crate::table::Table;
    pub use crate::text::{button, inert_button, spacer, text};
    pub use crate::text_input::{text_input, TextInput};
    pub use crate::toast::Toast;
    pub use ratatui::style::{Color, Modifier};
    pub use weft_core::{
        Align, Callback, Insets, Node, SelectCallback, Shared, SpinnerStyle, ToastPosition,
    };
}
