//! Time-based value interpolation.
//!
//! Animations are pull-based: nothing ticks on its own. Callers invoke
//! [`Animation::update`] once per frame and use the return value to decide
//! whether another frame is needed.

use std::time::{Duration, Instant};

/// Normalized-time remapping curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic ease-in: slow start.
    EaseIn,
    /// Quadratic ease-out: slow finish.
    EaseOut,
    /// Piecewise quadratic: slow start and finish.
    EaseInOut,
}

impl Easing {
    /// Map `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// A single animated value.
///
/// Created inactive by [`Animation::new`]; [`start`](Animation::start) stamps
/// the start time. Once elapsed time reaches the duration, `current` equals
/// `end` exactly and the animation is complete.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    start: f32,
    end: f32,
    current: f32,
    started_at: Option<Instant>,
    duration: Duration,
    easing: Easing,
    active: bool,
    completed: bool,
}

impl Animation {
    /// Create an inactive animation from `start` to `end`.
    pub fn new(start: f32, end: f32, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            end,
            current: start,
            started_at: None,
            duration,
            easing,
            active: false,
            completed: false,
        }
    }

    /// Activate the animation, starting now.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Activate the animation with an explicit start time.
    pub fn start_at(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.current = self.start;
        self.active = true;
        self.completed = false;
    }

    /// Recompute the current value for the present moment.
    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    /// Recompute the current value at `now`.
    ///
    /// Returns `true` while the animation is still running.
    pub fn update_at(&mut self, now: Instant) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        if !self.active || self.completed {
            return false;
        }

        let elapsed = now.saturating_duration_since(started_at);
        if elapsed >= self.duration {
            self.current = self.end;
            self.completed = true;
            self.active = false;
            return false;
        }

        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = self.easing.apply(t.clamp(0.0, 1.0));
        self.current = self.start + (self.end - self.start) * eased;
        true
    }

    /// The most recently computed value.
    pub fn value(&self) -> f32 {
        self.current
    }

    /// The value this animation converges to.
    pub fn target(&self) -> f32 {
        self.end
    }

    /// Whether the animation has been started and not yet finished.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the animation reached its end value.
    pub fn is_complete(&self) -> bool {
        self.completed
    }
}

/// An unordered collection of concurrently running animations.
///
/// Most widgets embed a single `Option<Animation>`; the set is for callers that
/// drive many independent values at once.
#[derive(Debug, Default)]
pub struct AnimationSet {
    animations: Vec<Animation>,
}

/// Opaque index of an animation inside an [`AnimationSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationId(usize);

impl AnimationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an animation and return its id.
    ///
    /// Ids are invalidated by [`cleanup`](AnimationSet::cleanup).
    pub fn add(&mut self, animation: Animation) -> AnimationId {
        self.animations.push(animation);
        AnimationId(self.animations.len() - 1)
    }

    /// Look up an animation by id.
    pub fn get(&self, id: AnimationId) -> Option<&Animation> {
        self.animations.get(id.0)
    }

    /// Update every animation at `now`; returns whether any is still active.
    pub fn update_at(&mut self, now: Instant) -> bool {
        let mut any_active = false;
        for anim in &mut self.animations {
            any_active |= anim.update_at(now);
        }
        any_active
    }

    /// Update every animation for the present moment.
    pub fn update(&mut self) -> bool {
        self.update_at(Instant::now())
    }

    /// Drop completed animations.
    pub fn cleanup(&mut self) {
        self.animations.retain(|a| !a.is_complete());
    }

    /// Number of tracked animations.
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Drop all animations.
    pub fn clear(&mut self) {
        self.animations.clear();
    }
}
