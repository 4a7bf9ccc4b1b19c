//! Animated activity indicator with optional label and progress.

use std::time::Duration;

use weft_core::{Node, NodeKind, SpinnerData, SpinnerStyle};

/// Time between frames when no speed is given.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(100);

/// A spinner glyph, optionally followed by a label and a percentage.
///
/// The runtime advances the frame while the spinner is on screen; the
/// application only rebuilds it with the current label or progress.
#[derive(Debug, Clone)]
pub struct Spinner {
    style: SpinnerStyle,
    label: Option<String>,
    progress: Option<f32>,
    speed: Duration,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    /// A braille spinner at the default speed.
    pub fn new() -> Self {
        Self {
            style: SpinnerStyle::default(),
            label: None,
            progress: None,
            speed: DEFAULT_SPEED,
        }
    }

    pub fn with_style(mut self, style: SpinnerStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Completion between 0 and 1, shown as a percentage.
    pub fn with_progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress.clamp(0.0, 1.0));
        self
    }

    /// Time between frames. Zero falls back to the default.
    pub fn with_speed(mut self, speed: Duration) -> Self {
        self.speed = if speed.is_zero() { DEFAULT_SPEED } else { speed };
        self
    }

    pub fn build(self) -> Node {
        Node::new(NodeKind::Spinner(SpinnerData {
            style: self.style,
            label: self.label,
            progress: self.progress,
            speed: self.speed,
            frame: 0,
            last_advance: None,
        }))
    }
}

impl From<Spinner> for Node {
    fn from(spinner: Spinner) -> Self {
        spinner.build()
    }
}
