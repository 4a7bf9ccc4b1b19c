//! Toast lifecycle: slide in, stay, slide out, hide.

use std::time::{Duration, Instant};

use crate::animation::{Animation, Easing};
use crate::tree::ToastData;

/// Rows a toast occupies, border included. Also the slide distance.
pub const TOAST_HEIGHT: i32 = 3;

/// Phase of a toast's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastState {
    SlidingIn,
    Visible,
    SlidingOut,
    #[default]
    Hidden,
}

/// Per-toast animation state carried from frame to frame by the diff.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastLifecycle {
    pub state: ToastState,
    pub slide: Option<Animation>,
    pub visible_since: Option<Instant>,
}

impl ToastLifecycle {
    /// How many rows the toast is currently pushed off its resting place.
    pub fn slide_offset(&self) -> f32 {
        match self.state {
            ToastState::Visible => 0.0,
            ToastState::Hidden => TOAST_HEIGHT as f32,
            ToastState::SlidingIn => self.slide.as_ref().map_or(TOAST_HEIGHT as f32, Animation::value),
            ToastState::SlidingOut => self.slide.as_ref().map_or(0.0, Animation::value),
        }
    }

    pub fn is_shown(&self) -> bool {
        self.state != ToastState::Hidden
    }
}

/// Advance a toast by one frame at `now`.
///
/// Returns `true` while the toast still needs frames: during either slide, and
/// while an auto-dismiss timer is pending.
pub fn advance(toast: &mut ToastData, now: Instant, slide: Duration) -> bool {
    let lc = &mut toast.lifecycle;

    if !toast.visible.get() {
        if lc.state != ToastState::Hidden {
            tracing::trace!(message = %toast.message, "toast flag cleared externally");
            *lc = ToastLifecycle::default();
        }
        return false;
    }

    if lc.state == ToastState::Hidden {
        lc.state = ToastState::SlidingIn;
        lc.slide = None;
        lc.visible_since = None;
    }

    match lc.state {
        ToastState::SlidingIn => {
            let anim = lc
                .slide
                .get_or_insert_with(|| started(TOAST_HEIGHT as f32, 0.0, slide, Easing::EaseOut, now));
            if anim.update_at(now) {
                return true;
            }
            lc.slide = None;
            lc.state = ToastState::Visible;
            lc.visible_since = Some(now);
            tracing::debug!(message = %toast.message, "toast visible");
            toast.auto_dismiss.is_some()
        }
        ToastState::Visible => match (toast.auto_dismiss, lc.visible_since) {
            (Some(after), Some(since)) if now.saturating_duration_since(since) >= after => {
                let mut anim = started(0.0, TOAST_HEIGHT as f32, slide, Easing::EaseIn, now);
                let running = anim.update_at(now);
                lc.slide = Some(anim);
                lc.state = ToastState::SlidingOut;
                running || finish(toast)
            }
            (Some(_), _) => true,
            (None, _) => false,
        },
        ToastState::SlidingOut => {
            let anim = lc
                .slide
                .get_or_insert_with(|| started(0.0, TOAST_HEIGHT as f32, slide, Easing::EaseIn, now));
            if anim.update_at(now) {
                return true;
            }
            finish(toast)
        }
        ToastState::Hidden => false,
    }
}

fn finish(toast: &mut ToastData) -> bool {
    toast.lifecycle = ToastLifecycle::default();
    toast.visible.set(false);
    tracing::debug!(message = %toast.message, "toast closed");
    if let Some(on_close) = &toast.on_close {
        on_close.call();
    }
    false
}

fn started(from: f32, to: f32, duration: Duration, easing: Easing, now: Instant) -> Animation {
    let mut anim = Animation::new(from, to, duration, easing);
    anim.start_at(now);
    anim
}
