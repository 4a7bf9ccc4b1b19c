use std::io::{self, stderr, stdout, Stderr, Stdout, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, layout::Size, Terminal};
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

use crate::engine::{Engine, FrameOutcome};
use crate::event::InputEvent;
use crate::focus::{FocusRouter, DEFAULT_FOCUS_CAPACITY};
use crate::keymap::Keymap;
use crate::logging;
use crate::tick::Timing;
use crate::tree::Node;

/// Output target for the terminal UI.
///
/// By default the UI renders to **stdout**. When stdout is piped, switch to
/// [`Stderr`](OutputTarget::Stderr) so the UI still reaches the terminal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    Stderr,
}

/// Writer that wraps either stdout or stderr.
enum Output {
    Stdout(Stdout),
    Stderr(Stderr),
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::Stderr(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::Stderr(w) => w.flush(),
        }
    }
}

impl Output {
    fn new(target: OutputTarget) -> Self {
        match target {
            OutputTarget::Stdout => Output::Stdout(stdout()),
            OutputTarget::Stderr => Output::Stderr(stderr()),
        }
    }
}

/// Errors from terminal setup or the run loop.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// An I/O error from terminal setup, rendering, input or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// [`Runtime::run`] was called before [`Runtime::set_root`].
    #[error("no root builder set")]
    NoRoot,
}

/// Configuration options for a [`Runtime`].
///
/// Use struct update syntax to override only what you need:
///
/// ```rust,ignore
/// use weft_core::{RuntimeOptions, OutputTarget};
///
/// let opts = RuntimeOptions {
///     mouse: false,
///     log_file: Some("weft.log".into()),
///     output: OutputTarget::Stderr,
///     ..RuntimeOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// Longest wait for input before animations get another frame (default: 100ms).
    pub tick: Duration,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Enable mouse capture (default: true).
    pub mouse: bool,
    /// Whether to catch panics and restore terminal (default: true).
    pub catch_panics: bool,
    /// Whether to handle signals gracefully (default: true).
    pub handle_signals: bool,
    /// Send `tracing` output to this file.
    pub log_file: Option<PathBuf>,
    /// Output target: stdout (default) or stderr.
    pub output: OutputTarget,
    /// Maximum number of focusable widgets per frame (default: 64).
    pub focus_capacity: usize,
    pub keymap: Keymap,
    pub timing: Timing,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            alt_screen: true,
            mouse: true,
            catch_panics: true,
            handle_signals: true,
            log_file: None,
            output: OutputTarget::default(),
            focus_capacity: DEFAULT_FOCUS_CAPACITY,
            keymap: Keymap::default(),
            timing: Timing::default(),
        }
    }
}

/// A cloneable, thread-safe "please re-render" signal.
///
/// Any number of requests between two frames coalesce into one rebuild.
#[derive(Debug, Clone, Default)]
pub struct RenderHandle {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl RenderHandle {
    /// Ask the runtime to rebuild and repaint at the next opportunity.
    pub fn request_render(&self) {
        self.requested.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Whether a render is pending, clearing the request.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }

    async fn notified(&self) {
        self.notify.notified().await;
    }
}

/// The terminal runtime: owns the terminal and drives the [`Engine`] until
/// quit.
///
/// ```rust,ignore
/// use weft_core::{Runtime, RuntimeError};
///
/// #[tokio::main]
/// async fn main() -> Result<(), RuntimeError> {
///     let mut rt = Runtime::new()?;
///     rt.set_root(move || Some(build_ui()));
///     rt.run().await
/// }
/// ```
pub struct Runtime {
    engine: Engine,
    terminal: Terminal<CrosstermBackend<Output>>,
    options: RuntimeOptions,
    render: RenderHandle,
}

impl Runtime {
    /// Take over the terminal with default options.
    pub fn new() -> Result<Self, RuntimeError> {
        Self::with_options(RuntimeOptions::default())
    }

    /// Take over the terminal with custom options.
    pub fn with_options(options: RuntimeOptions) -> Result<Self, RuntimeError> {
        if let Some(path) = &options.log_file {
            logging::init_file_logging(path)?;
        }

        let terminal = init_terminal(&options)?;
        let engine = Engine::new(
            FocusRouter::with_capacity(options.focus_capacity),
            options.keymap.clone(),
            options.timing,
        );
        tracing::debug!(?options, "runtime initialized");

        Ok(Self {
            engine,
            terminal,
            options,
            render: RenderHandle::default(),
        })
    }

    /// Install the function that builds the UI tree.
    pub fn set_root(&mut self, builder: impl FnMut() -> Option<Node> + Send + 'static) {
        self.engine.set_root(builder);
        self.render.request_render();
    }

    /// A handle for requesting renders from other tasks or threads.
    pub fn render_handle(&self) -> RenderHandle {
        self.render.clone()
    }

    /// Current terminal size.
    pub fn size(&self) -> Result<Size, RuntimeError> {
        Ok(self.terminal.size()?)
    }

    /// Run until quit, then restore the terminal.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        let result = self.event_loop().await;
        tracing::debug!("shutting down");
        let restored = restore_terminal(&self.options);
        result?;
        restored
    }

    async fn event_loop(&mut self) -> Result<(), RuntimeError> {
        if !self.engine.has_root() {
            return Err(RuntimeError::NoRoot);
        }

        let mut events = EventStream::new();
        let mut tick = tokio::time::interval(self.options.tick);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let handle_signals = self.options.handle_signals;
        self.render.request_render();

        loop {
            if self.render.take() && self.frame()? == FrameOutcome::Exit {
                return Ok(());
            }

            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    tracing::debug!("received ctrl+c signal");
                    return Ok(());
                }

                maybe = events.next() => match maybe {
                    Some(Ok(event)) => {
                        let out = self.engine.handle(InputEvent::from(event));
                        if out.quit {
                            return Ok(());
                        }
                        if out.render {
                            self.render.request_render();
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                },

                _ = self.render.notified() => {}

                _ = tick.tick() => {
                    if self.engine.is_animating() {
                        self.render.request_render();
                    }
                }
            }
        }
    }

    fn frame(&mut self) -> Result<FrameOutcome, RuntimeError> {
        let size = self.terminal.size()?;
        let outcome = self.engine.frame(size, Instant::now());
        if outcome == FrameOutcome::Paint {
            let engine = &mut self.engine;
            self.terminal.draw(|frame| {
                if let Some(cursor) = engine.paint(frame.buffer_mut()) {
                    frame.set_cursor_position(cursor);
                }
            })?;
        }
        Ok(outcome)
    }
}

/// Size of the controlling terminal.
pub fn terminal_size() -> io::Result<Size> {
    let (width, height) = crossterm::terminal::size()?;
    Ok(Size::new(width, height))
}

fn init_terminal(options: &RuntimeOptions) -> Result<Terminal<CrosstermBackend<Output>>, RuntimeError> {
    // Install panic hook that restores terminal (only once to avoid stacking)
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        let output_target = options.output;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen, output_target);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = Output::new(options.output);

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.mouse {
        execute!(writer, EnableMouseCapture)?;
    }
    execute!(writer, cursor::Hide)?;

    let backend = CrosstermBackend::new(writer);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(options: &RuntimeOptions) -> Result<(), RuntimeError> {
    restore_terminal_minimal(options.alt_screen, options.output)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool, output_target: OutputTarget) -> Result<(), std::io::Error> {
    // Best effort: keep going so as much terminal state as possible is restored.
    let raw = disable_raw_mode();
    let mut writer = Output::new(output_target);
    execute!(writer, DisableMouseCapture).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}
