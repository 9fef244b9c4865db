#![forbid(unsafe_code)]

//! Scroll state for the list viewport.
//!
//! The viewport occupies `bounds` on screen. Content (the flow plus padding)
//! scrolls inside it; the offset is clamped to `[0, extent - height]` where
//! `extent` is the flow's content height plus vertical padding.

use sortflow_core::geometry::{Point, Rect, Sides};

/// Scrollable viewport over a vertical flow.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollViewport {
    bounds: Rect,
    padding: Sides,
    offset: f32,
    content_height: f32,
}

impl Default for ScrollViewport {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

impl ScrollViewport {
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            padding: Sides::default(),
            offset: 0.0,
            content_height: 0.0,
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self.clamp();
        self
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.clamp();
    }

    #[inline]
    #[must_use]
    pub fn padding(&self) -> Sides {
        self.padding
    }

    /// Width available to rows after horizontal padding.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        (self.bounds.width - self.padding.horizontal_sum()).max(0.0)
    }

    #[inline]
    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Update the flow's content height, re-clamping the offset.
    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.clamp();
    }

    #[inline]
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Largest valid offset.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        let extent = self.content_height + self.padding.vertical_sum();
        (extent - self.bounds.height).max(0.0)
    }

    /// Scroll by `delta` (negative toward the start), returning the change
    /// actually applied.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let before = self.offset;
        self.scroll_to(self.offset + delta);
        self.offset - before
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.offset <= 0.0
    }

    #[must_use]
    pub fn is_scrolled_to_end(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Screen-space origin of the flow inside the viewport.
    #[must_use]
    pub fn flow_origin(&self) -> Point {
        Point::new(
            self.bounds.x + self.padding.left,
            self.bounds.y + self.padding.top - self.offset,
        )
    }

    /// Convert a screen-space point to viewport-local space.
    #[must_use]
    pub fn to_local(&self, screen: Point) -> Point {
        screen.relative_to(self.bounds.origin())
    }

    #[must_use]
    pub fn contains(&self, screen: Point) -> bool {
        self.bounds.contains(screen)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}
