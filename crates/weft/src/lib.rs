//! **weft** -- a declarative, retained-mode TUI framework for [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything you need to build a
//! weft application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! weft = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`weft_core`] are available at the crate root
//!   ([`Node`], [`Shared`], [`Callback`], [`Runtime`], [`run`], [`run_with`],
//!   etc.).
//! * The [`widgets`] module re-exports everything from [`weft_widgets`];
//!   [`prelude`] gathers the constructors and handles a root builder needs.
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use weft::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), weft::RuntimeError> {
//!     let count = Shared::new(0);
//!     weft::run(move || {
//!         let c = count.clone();
//!         Some(vstack([
//!             text(format!("Count: {}", count.get())),
//!             button("+", move || c.update(|n| *n += 1)),
//!         ]))
//!     })
//!     .await
//! }
//! ```

pub use weft_core::*;
pub mod widgets {
    pub use weft_widgets::*;
}
pub use weft_widgets::prelude;

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
