#![forbid(unsafe_code)]

//! Easing curves and a retargetable tween.
//!
//! The flow container uses [`Tween`] to glide items from their old layout
//! position to their new one after a reorder. Tweens are time-based and
//! allocation-free during [`Animation::tick`].

use std::time::Duration;

// ---------------------------------------------------------------------------
// Easing functions
// ---------------------------------------------------------------------------

/// Easing function signature: maps `t` in [0, 1] to output in [0, 1].
pub type EasingFn = fn(f32) -> f32;

/// Identity easing (constant velocity).
#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic ease-out.
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Quintic ease-out: very fast start, long gentle settle.
#[inline]
pub fn ease_out_quint(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(5)
}

// ---------------------------------------------------------------------------
// Animation trait
// ---------------------------------------------------------------------------

/// A time-based animation producing values in [0.0, 1.0].
pub trait Animation {
    /// Advance the animation by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current eased progress, clamped to [0.0, 1.0].
    fn value(&self) -> f32;

    /// Restart from the beginning.
    fn reset(&mut self);
}

// ---------------------------------------------------------------------------
// Tween
// ---------------------------------------------------------------------------

/// Interpolates an `f32` from `from` to `to` over a duration.
///
/// [`retarget`](Tween::retarget) restarts the tween from the currently
/// displayed value, so an item that is re-sorted mid-flight never jumps.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// A tween that is already at rest at `value`.
    #[must_use]
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            easing: linear,
        }
    }

    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            easing: ease_out_quint,
        }
    }

    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Start heading to `to` from wherever the tween currently is.
    ///
    /// A zero `duration` snaps immediately.
    pub fn retarget(&mut self, to: f32, duration: Duration) {
        self.from = self.current();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    /// Jump to `value` with no animation.
    pub fn snap(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.elapsed = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    /// The value the tween is heading to.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// The interpolated value right now.
    #[must_use]
    pub fn current(&self) -> f32 {
        if self.is_complete() {
            return self.to;
        }
        let t = self.value();
        self.from + (self.to - self.from) * t
    }

    fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        (t as f32).clamp(0.0, 1.0)
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.progress())
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }
}
