//! The frame pipeline, independent of any terminal.
//!
//! One frame: build a fresh tree, carry animation state over from the
//! previous frame, lay it out, rebuild the tab order, advance animations,
//! re-position, diff against the previous frame, and decide whether the
//! screen must be repainted.
//! Input is dispatched against the most recently built tree.

use std::fmt;
use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Size};

use crate::diff::{carry_over, diff_trees};
use crate::dispatch::{dispatch, Dispatch};
use crate::event::InputEvent;
use crate::focus::FocusRouter;
use crate::keymap::Keymap;
use crate::layout::{layout, position};
use crate::render::paint;
use crate::tick::{tick, Timing};
use crate::tree::{Node, NodePath};

/// Application function producing a fresh tree each frame. Returning `None`
/// ends the run.
pub type Builder = Box<dyn FnMut() -> Option<Node> + Send>;

/// Result of building one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The builder returned no tree.
    Exit,
    /// Nothing visible changed.
    Skip,
    /// The screen must be repainted.
    Paint,
}

pub struct Engine {
    builder: Option<Builder>,
    tree: Option<Node>,
    focus: FocusRouter,
    keymap: Keymap,
    timing: Timing,
    animating: bool,
    painted_focus: Option<NodePath>,
    painted_size: Option<Size>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("has_root", &self.builder.is_some())
            .field("focus", &self.focus)
            .field("animating", &self.animating)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(FocusRouter::default(), Keymap::default(), Timing::default())
    }
}

impl Engine {
    pub fn new(focus: FocusRouter, keymap: Keymap, timing: Timing) -> Self {
        Self {
            builder: None,
            tree: None,
            focus,
            keymap,
            timing,
            animating: false,
            painted_focus: None,
            painted_size: None,
        }
    }

    /// Install the tree builder. Replacing it drops the previous tree.
    pub fn set_root(&mut self, builder: impl FnMut() -> Option<Node> + Send + 'static) {
        self.builder = Some(Box::new(builder));
        self.tree = None;
        self.painted_size = None;
    }

    pub fn has_root(&self) -> bool {
        self.builder.is_some()
    }

    /// Build and reconcile one frame for a screen of `size` at time `now`.
    pub fn frame(&mut self, size: Size, now: Instant) -> FrameOutcome {
        let Some(builder) = self.builder.as_mut() else {
            return FrameOutcome::Exit;
        };
        let Some(mut tree) = builder() else {
            tracing::debug!("builder returned no tree");
            return FrameOutcome::Exit;
        };

        carry_over(self.tree.as_mut(), &mut tree);
        layout(&mut tree, size);
        self.focus.rebuild(&mut tree);
        let ticked = tick(&mut tree, now, &self.timing);
        // Ticked scroll and toast state moves things.
        position(&mut tree, 0, 0, size);
        let changed = diff_trees(self.tree.as_ref(), &mut tree);
        self.tree = Some(tree);
        self.animating = ticked.active;

        let focus_moved = self.focus.current() != self.painted_focus.as_ref();
        let resized = self.painted_size != Some(size);
        let paint = changed || ticked.changed || focus_moved || resized;
        tracing::debug!(changed, animated = ticked.changed, focus_moved, resized, paint, "frame");
        if paint {
            FrameOutcome::Paint
        } else {
            FrameOutcome::Skip
        }
    }

    /// Paint the current tree into `buf`; returns the cursor position.
    pub fn paint(&mut self, buf: &mut Buffer) -> Option<Position> {
        let tree = self.tree.as_ref()?;
        let cursor = paint(tree, buf);
        self.painted_focus = self.focus.current().cloned();
        self.painted_size = Some(buf.area.as_size());
        cursor
    }

    /// Route one input event to the current tree.
    pub fn handle(&mut self, event: InputEvent) -> Dispatch {
        match self.tree.as_mut() {
            Some(tree) => dispatch(tree, &mut self.focus, &self.keymap, event),
            None => match event {
                InputEvent::Quit => Dispatch {
                    render: false,
                    quit: true,
                },
                _ => Dispatch::default(),
            },
        }
    }

    /// Whether an animation needs further frames.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// The most recently built tree.
    pub fn tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    pub fn focus(&self) -> &FocusRouter {
        &self.focus
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }
}
