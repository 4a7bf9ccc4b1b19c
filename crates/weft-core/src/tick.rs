//! Per-frame advancement of everything that moves on its own.
//!
//! Runs once per render, after the diff has carried state over from the
//! previous tree: scroll motions chase their external offsets, spinners step
//! through their frames and toasts advance their lifecycle.

use std::time::{Duration, Instant};

use crate::animation::{Animation, Easing};
use crate::toast;
use crate::tree::{Node, NodeKind, ScrollMotion, SpinnerData, ToastData};

/// Durations of built-in animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Smooth-scroll duration for lists and scroll views (ease-out).
    pub scroll: Duration,
    /// Toast slide in (ease-out) and slide out (ease-in).
    pub toast_slide: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            scroll: Duration::from_millis(150),
            toast_slide: Duration::from_millis(300),
        }
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    /// Something visible moved this tick.
    pub changed: bool,
    /// Something still needs future ticks.
    pub active: bool,
}

impl Tick {
    fn merge(&mut self, other: Tick) {
        self.changed |= other.changed;
        self.active |= other.active;
    }
}

/// Advance every animation in `root` to `now`.
pub fn tick(root: &mut Node, now: Instant, timing: &Timing) -> Tick {
    let mut out = Tick::default();
    tick_node(root, now, timing, &mut out);
    out
}

fn tick_node(node: &mut Node, now: Instant, timing: &Timing, out: &mut Tick) {
    match &mut node.kind {
        NodeKind::List(d) => {
            let target = d.offset.get().min(d.max_offset());
            out.merge(chase(&mut d.motion, target, now, timing.scroll));
        }
        NodeKind::ScrollView(d) => {
            let target = d.offset.get().min(d.max_offset());
            out.merge(chase(&mut d.motion, target, now, timing.scroll));
        }
        NodeKind::Spinner(d) => out.merge(spin(d, now)),
        NodeKind::Toast(d) => out.merge(advance_toast(d, now, timing.toast_slide)),
        NodeKind::Modal(d) if !d.open.get() => return,
        _ => {}
    }

    for child in &mut node.children {
        tick_node(child, now, timing, out);
    }
    if let Some(content) = node.content_mut() {
        tick_node(content, now, timing, out);
    }
}

/// Move `motion` toward `target`, starting a new animation from the current
/// visual position whenever the target changes.
fn chase(motion: &mut ScrollMotion, target: usize, now: Instant, duration: Duration) -> Tick {
    let target = target as f32;
    if motion.target != target {
        if motion.animation.is_some() {
            tracing::trace!(from = motion.target, to = target, "scroll animation superseded");
        }
        let mut anim = Animation::new(motion.visual, target, duration, Easing::EaseOut);
        anim.start_at(now);
        motion.target = target;
        motion.animation = Some(anim);
    }

    let Some(anim) = motion.animation.as_mut() else {
        return Tick::default();
    };
    let before = motion.visual;
    let running = anim.update_at(now);
    motion.visual = anim.value();
    if !running {
        motion.animation = None;
        motion.visual = motion.target;
    }
    Tick {
        changed: motion.visual != before,
        active: running,
    }
}

fn spin(d: &mut SpinnerData, now: Instant) -> Tick {
    let due = match d.last_advance {
        Some(last) => now.saturating_duration_since(last) >= d.speed,
        None => {
            d.last_advance = Some(now);
            false
        }
    };
    if due {
        d.frame = (d.frame + 1) % d.style.frames().len();
        d.last_advance = Some(now);
    }
    Tick {
        changed: due,
        active: true,
    }
}

fn advance_toast(d: &mut ToastData, now: Instant, slide: Duration) -> Tick {
    let before = (d.lifecycle.state, d.lifecycle.slide_offset());
    let active = toast::advance(d, now, slide);
    let after = (d.lifecycle.state, d.lifecycle.slide_offset());
    Tick {
        changed: before != after,
        active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::Shared;
    use crate::toast::ToastState;
    use crate::tree::*;

    const MS: Duration = Duration::from_millis(1);

    fn text(s: &str) -> Node {
        Node::new(NodeKind::Text(TextData { content: s.into() }))
    }

    fn scroll_view(offset: &Shared<usize>) -> Node {
        let mut lines = Node::with_children(
            NodeKind::VStack(StackData::default()),
            (0..30).map(|i| text(&i.to_string())).collect(),
        );
        crate::layout::measure(&mut lines);
        Node::new(NodeKind::ScrollView(ScrollViewData {
            content: Box::new(lines),
            offset: offset.clone(),
            max_height: 10,
            motion: ScrollMotion::settled(0),
        }))
    }

    fn motion(node: &Node) -> &ScrollMotion {
        match &node.kind {
            NodeKind::ScrollView(d) => &d.motion,
            _ => panic!("not a scroll view"),
        }
    }

    #[test]
    fn settled_scroll_is_idle() {
        let offset = Shared::new(0);
        let mut sv = scroll_view(&offset);
        assert_eq!(tick(&mut sv, Instant::now(), &Timing::default()), Tick::default());
    }

    #[test]
    fn scroll_eases_toward_new_offset() {
        let timing = Timing::default();
        let offset = Shared::new(0);
        let mut sv = scroll_view(&offset);
        let t0 = Instant::now();

        offset.set(6);
        let first = tick(&mut sv, t0, &timing);
        assert!(first.active);
        assert_eq!(motion(&sv).target, 6.0);

        let mid = tick(&mut sv, t0 + 75 * MS, &timing);
        assert!(mid.changed && mid.active);
        let visual = motion(&sv).visual;
        // Ease-out covers more than half the distance by half time.
        assert!(visual > 3.0 && visual < 6.0, "visual = {visual}");

        let done = tick(&mut sv, t0 + 150 * MS, &timing);
        assert!(done.changed && !done.active);
        assert_eq!(motion(&sv).visual, 6.0);
        assert!(motion(&sv).animation.is_none());
    }

    #[test]
    fn new_target_supersedes_running_animation() {
        let timing = Timing::default();
        let offset = Shared::new(10);
        let mut sv = scroll_view(&offset);
        let t0 = Instant::now();
        tick(&mut sv, t0, &timing);
        tick(&mut sv, t0 + 50 * MS, &timing);
        let halfway = motion(&sv).visual;

        offset.set(2);
        tick(&mut sv, t0 + 60 * MS, &timing);
        let m = motion(&sv);
        assert_eq!(m.target, 2.0);
        assert_eq!(m.visual, halfway);

        tick(&mut sv, t0 + 60 * MS + timing.scroll, &timing);
        assert_eq!(motion(&sv).visual, 2.0);
    }

    #[test]
    fn target_is_clamped_to_content() {
        let offset = Shared::new(500);
        let mut sv = scroll_view(&offset);
        let t0 = Instant::now();
        tick(&mut sv, t0, &Timing::default());
        assert_eq!(motion(&sv).target, 20.0);
    }

    #[test]
    fn spinner_steps_at_its_speed() {
        let mut s = Node::new(NodeKind::Spinner(SpinnerData {
            style: SpinnerStyle::Classic,
            label: None,
            progress: None,
            speed: 100 * MS,
            frame: 3,
            last_advance: None,
        }));
        let t0 = Instant::now();
        let first = tick(&mut s, t0, &Timing::default());
        assert!(first.active && !first.changed);
        assert!(!tick(&mut s, t0 + 50 * MS, &Timing::default()).changed);
        assert!(tick(&mut s, t0 + 100 * MS, &Timing::default()).changed);
        assert!(matches!(&s.kind, NodeKind::Spinner(d) if d.frame == 0));
    }

    #[test]
    fn toasts_advance_but_closed_modals_are_skipped() {
        let visible = Shared::new(true);
        let toast = |visible: &Shared<bool>| {
            Node::new(NodeKind::Toast(ToastData {
                message: "hi".into(),
                position: ToastPosition::Top,
                visible: visible.clone(),
                auto_dismiss: None,
                on_close: None,
                lifecycle: Default::default(),
            }))
        };
        let hidden_visible = Shared::new(true);
        let mut root = Node::with_children(
            NodeKind::VStack(StackData::default()),
            vec![
                toast(&visible),
                Node::new(NodeKind::Modal(ModalData {
                    open: Shared::new(false),
                    title: None,
                    content: Box::new(toast(&hidden_visible)),
                    on_close: None,
                })),
            ],
        );
        let out = tick(&mut root, Instant::now(), &Timing::default());
        assert!(out.changed && out.active);
        assert!(matches!(
            &root.children[0].kind,
            NodeKind::Toast(d) if d.lifecycle.state == ToastState::SlidingIn
        ));
        let inner = root.children[1].content().expect("modal content");
        assert!(matches!(&inner.kind, NodeKind::Toast(d) if d.lifecycle.state == ToastState::Hidden));
    }
}
