#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All coordinates are continuous `f32` units with the origin at the top-left
//! and `y` growing downward. Screen space and local space share these types;
//! conversion between them is an offset by the local origin.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in screen or local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Shift the point by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Express this point relative to `origin`.
    #[inline]
    #[must_use]
    pub fn relative_to(self, origin: Point) -> Self {
        Self::new(self.x - origin.x, self.y - origin.y)
    }

    /// Manhattan distance to another point.
    #[inline]
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> f32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Zero-sized.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle used for item bounds, hit regions, and viewports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside the rectangle (half-open on right/bottom).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Same rectangle moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Shrink by the given margin. Dimensions never go below zero.
    #[must_use]
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x + margin.left,
            y: self.y + margin.top,
            width: (self.width - margin.horizontal_sum()).max(0.0),
            height: (self.height - margin.vertical_sum()).max(0.0),
        }
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Overlapping region, or `None` if the rectangles don't overlap.
    #[must_use]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Overlapping region; an empty rectangle if there is none.
    #[inline]
    #[must_use]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }
}

/// Per-side insets for padding and margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sides {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Sides {
    /// Equal insets on every side.
    #[must_use]
    pub const fn all(val: f32) -> Self {
        Self::new(val, val, val, val)
    }

    /// Left and right only.
    #[must_use]
    pub const fn horizontal(val: f32) -> Self {
        Self::new(0.0, val, 0.0, val)
    }

    /// Top and bottom only.
    #[must_use]
    pub const fn vertical(val: f32) -> Self {
        Self::new(val, 0.0, val, 0.0)
    }

    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[inline]
    #[must_use]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    #[inline]
    #[must_use]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.origin(), Point::new(10.0, 20.0));
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 9.99)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
        assert!(!r.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn rect_inner_never_negative() {
        let r = Rect::new(0.0, 0.0, 8.0, 8.0);
        let inner = r.inner(Sides::all(5.0));
        assert_eq!(inner.x, 5.0);
        assert_eq!(inner.width, 0.0);
        assert_eq!(inner.height, 0.0);
        assert!(inner.is_empty());
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersection(&b), Rect::new(5.0, 5.0, 5.0, 5.0));

        let c = Rect::new(20.0, 20.0, 1.0, 1.0);
        assert!(a.intersection_opt(&c).is_none());
        assert!(a.intersection(&c).is_empty());
    }

    #[test]
    fn rect_union() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(5.0, 1.0, 1.0, 4.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 6.0, 5.0));
    }

    #[test]
    fn point_relative_and_distance() {
        let p = Point::new(15.0, 30.0);
        let local = p.relative_to(Point::new(5.0, 10.0));
        assert_eq!(local, Point::new(10.0, 20.0));
        assert_eq!(p.manhattan_distance(Point::new(12.0, 34.0)), 7.0);
    }

    #[test]
    fn sides_sums() {
        let s = Sides::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(s.horizontal_sum(), 6.0);
        assert_eq!(s.vertical_sum(), 4.0);
        assert_eq!(Sides::horizontal(3.0).vertical_sum(), 0.0);
        assert_eq!(Sides::vertical(3.0).vertical_sum(), 6.0);
    }
}
