#![forbid(unsafe_code)]

//! Edge-triggered autoscroll while dragging.
//!
//! Each frame of an active drag, a pointer inside the trigger band at the top
//! or bottom of the viewport scrolls the list toward that edge. The per-frame
//! delta is `base^power`, where `power` is the pointer's penetration into the
//! band (continuing past the edge), capped at `max_power`:
//!
//! ```text
//! top:    y < trigger       and not at start  ->  -(base ^ min(max, trigger - y))
//! bottom: y > h - trigger   and not at end    ->  +(base ^ min(max, y - (h - trigger)))
//! ```
//!
//! The delta is not clamped here; [`ScrollViewport::scroll_by`] clamps.

use crate::drag::DragPhase;
use crate::viewport::ScrollViewport;

/// Autoscroll tuning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoscrollConfig {
    /// Height of the trigger band at each edge (default: 10.0).
    pub trigger_distance: f32,
    /// Exponential base, greater than one (default: 1.05).
    pub exp_base: f32,
    /// Cap on the exponent (default: 50.0).
    pub max_power: f32,
}

impl Default for AutoscrollConfig {
    fn default() -> Self {
        Self {
            trigger_distance: 10.0,
            exp_base: 1.05,
            max_power: 50.0,
        }
    }
}

impl AutoscrollConfig {
    #[must_use]
    pub fn with_trigger_distance(mut self, distance: f32) -> Self {
        self.trigger_distance = distance.max(0.0);
        self
    }

    #[must_use]
    pub fn with_exp_base(mut self, base: f32) -> Self {
        self.exp_base = base;
        self
    }

    #[must_use]
    pub fn with_max_power(mut self, max_power: f32) -> Self {
        self.max_power = max_power.max(0.0);
        self
    }

    /// Largest delta magnitude a single frame can produce.
    #[must_use]
    pub fn max_delta(&self) -> f32 {
        self.exp_base.powf(self.max_power)
    }
}

/// Computes per-frame autoscroll deltas.
#[derive(Debug, Clone, Default)]
pub struct Autoscroll {
    config: AutoscrollConfig,
}

impl Autoscroll {
    #[must_use]
    pub fn new(config: AutoscrollConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &AutoscrollConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AutoscrollConfig) {
        self.config = config;
    }

    /// Scroll delta for this frame.
    ///
    /// `local_y` is the pointer's y relative to the viewport top. Returns
    /// zero while idle or outside both bands.
    #[must_use]
    pub fn delta(&self, phase: DragPhase, local_y: f32, viewport: &ScrollViewport) -> f32 {
        if phase == DragPhase::Idle {
            return 0.0;
        }
        let trigger = self.config.trigger_distance;
        let height = viewport.bounds().height;

        if local_y < trigger && !viewport.is_at_start() {
            return -self.magnitude(trigger - local_y);
        }
        let bottom_band = height - trigger;
        if local_y > bottom_band && !viewport.is_scrolled_to_end() {
            return self.magnitude(local_y - bottom_band);
        }
        0.0
    }

    fn magnitude(&self, penetration: f32) -> f32 {
        let power = penetration.abs().min(self.config.max_power);
        self.config.exp_base.powf(power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortflow_core::geometry::Rect;

    /// 100-high viewport over 1000 units of content, scrolled to the middle.
    fn mid_scroll() -> ScrollViewport {
        let mut vp = ScrollViewport::new(Rect::new(0.0, 0.0, 50.0, 100.0));
        vp.set_content_height(1000.0);
        vp.scroll_to(400.0);
        vp
    }

    fn auto() -> Autoscroll {
        Autoscroll::default()
    }

    #[test]
    fn idle_never_scrolls() {
        let vp = mid_scroll();
        for y in [-100.0, 0.0, 5.0, 50.0, 95.0, 300.0] {
            assert_eq!(auto().delta(DragPhase::Idle, y, &vp), 0.0);
        }
    }

    #[test]
    fn outside_bands_is_zero() {
        let vp = mid_scroll();
        assert_eq!(auto().delta(DragPhase::Dragging, 10.0, &vp), 0.0);
        assert_eq!(auto().delta(DragPhase::Dragging, 50.0, &vp), 0.0);
        assert_eq!(auto().delta(DragPhase::Dragging, 90.0, &vp), 0.0);
    }

    #[test]
    fn top_band_scrolls_toward_start() {
        let vp = mid_scroll();
        let d = auto().delta(DragPhase::Dragging, 9.99, &vp);
        assert!(d < 0.0);
        // Barely inside the band: base^~0.
        assert!((d + 1.0).abs() < 1e-3);
    }

    #[test]
    fn bottom_band_scrolls_toward_end() {
        let vp = mid_scroll();
        let d = auto().delta(DragPhase::Dragging, 95.0, &vp);
        assert!((d - 1.05f32.powf(5.0)).abs() < 1e-4);
    }

    #[test]
    fn magnitude_grows_with_depth_and_caps() {
        let vp = mid_scroll();
        let a = auto();
        let shallow = a.delta(DragPhase::Dragging, 8.0, &vp).abs();
        let edge = a.delta(DragPhase::Dragging, 0.0, &vp).abs();
        let past = a.delta(DragPhase::Dragging, -20.0, &vp).abs();
        let far = a.delta(DragPhase::Dragging, -1000.0, &vp).abs();
        assert!(shallow < edge);
        assert!(edge < past);
        assert!(past < far);
        assert!((far - a.config().max_delta()).abs() < 1e-3);
    }

    #[test]
    fn guarded_at_extremes() {
        let mut vp = mid_scroll();
        vp.scroll_to(0.0);
        assert_eq!(auto().delta(DragPhase::Dragging, 0.0, &vp), 0.0);
        assert!(auto().delta(DragPhase::Dragging, 100.0, &vp) > 0.0);

        vp.scroll_to(f32::MAX);
        assert_eq!(auto().delta(DragPhase::Dragging, 100.0, &vp), 0.0);
        assert!(auto().delta(DragPhase::Dragging, 0.0, &vp) < 0.0);
    }

    #[test]
    fn config_builder() {
        let cfg = AutoscrollConfig::default()
            .with_trigger_distance(20.0)
            .with_exp_base(1.1)
            .with_max_power(-3.0);
        assert_eq!(cfg.trigger_distance, 20.0);
        assert_eq!(cfg.exp_base, 1.1);
        assert_eq!(cfg.max_power, 0.0);
        assert_eq!(cfg.max_delta(), 1.0);
    }
}
