//! File logging for full-screen applications.
//!
//! A TUI owns the terminal, so diagnostics go to a file instead. The filter
//! defaults to [`DEFAULT_FILTER`] and can be overridden with `RUST_LOG`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "weft=debug,weft_core=debug";

/// Route `tracing` output to `path`, appending.
///
/// Returns `Ok(false)` when a global subscriber was already installed, in
/// which case the existing one keeps receiving events.
pub fn init_file_logging(path: impl AsRef<Path>) -> io::Result<bool> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init()
        .is_ok();
    Ok(installed)
}
