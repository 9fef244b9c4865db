#![forbid(unsafe_code)]

//! Flow layout for rearrangeable lists.
//!
//! - [`FlowContainer`] - the contract a list needs from its layout collaborator
//! - [`FillFlow`] - a vertical fill-flow ordered by sort key, with spacing and
//!   animated re-layout
//! - [`FlowConfig`] - spacing and animation settings
//!
//! # Coordinate spaces
//!
//! A flow has an *origin*: the screen-space position of its top-left corner.
//! Item bounding boxes are reported in flow-local space (origin at `(0, 0)`),
//! and [`FlowContainer::to_local`] converts a screen-space point into that
//! space. Whoever scrolls the flow moves the origin.
//!
//! # Example
//!
//! ```
//! use sortflow_layout::{FillFlow, FlowContainer};
//!
//! let mut flow: FillFlow<&str> = FillFlow::new();
//! flow.add("a", 50.0, 0);
//! flow.add("b", 30.0, 1);
//! assert_eq!(flow.flowing_keys(), vec!["a", "b"]);
//!
//! flow.set_sort_keys(&[("b", 0), ("a", 1)]);
//! assert_eq!(flow.flowing_keys(), vec!["b", "a"]);
//! ```

pub mod fill;

pub use fill::{FillFlow, FlowConfig};
pub use sortflow_core::geometry::{Point, Rect, Sides, Size};

use std::time::Duration;

/// Integer sort key controlling the visual order of a flow's children.
pub type SortKey = u64;

/// Layout collaborator for a rearrangeable list.
///
/// Children are identified by a caller-chosen key `K`. Visual order is
/// ascending [`SortKey`]; among equal sort keys, insertion order wins.
pub trait FlowContainer<K> {
    /// Append a child with the given measured height and sort key.
    ///
    /// Adding a key that is already present replaces its height and sort key.
    fn add(&mut self, key: K, height: f32, sort_key: SortKey);

    /// Append a batch of children, in order, with one re-layout.
    fn add_many(&mut self, children: impl IntoIterator<Item = (K, f32, SortKey)>) {
        for (key, height, sort_key) in children {
            self.add(key, height, sort_key);
        }
    }

    /// Remove a child. Returns `false` if it was not present.
    fn remove(&mut self, key: &K) -> bool;

    /// Remove every child.
    fn clear(&mut self);

    /// Number of children.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the key is a child of this flow.
    fn contains(&self, key: &K) -> bool;

    /// Current sort key of a child.
    fn sort_key(&self, key: &K) -> Option<SortKey>;

    /// Assign sort keys in one batch and re-layout once.
    ///
    /// Keys that are not children are ignored.
    fn set_sort_keys(&mut self, keys: &[(K, SortKey)]);

    /// Update a child's measured height.
    fn set_height(&mut self, key: &K, height: f32);

    /// Measured bounding box of a child in flow-local space, at its currently
    /// displayed (possibly animating) position.
    fn bounding_box(&self, key: &K) -> Option<Rect>;

    /// Children in visual order.
    fn flowing_keys(&self) -> Vec<K>;

    /// Fixed vertical gap between consecutive children.
    fn spacing(&self) -> f32;

    /// Total laid-out height: child heights plus the gaps between them.
    fn content_height(&self) -> f32;

    /// Screen-space position of the flow's top-left corner.
    fn origin(&self) -> Point;

    fn set_origin(&mut self, origin: Point);

    /// Convert a screen-space point into flow-local space.
    fn to_local(&self, screen: Point) -> Point {
        screen.relative_to(self.origin())
    }

    /// Advance layout animation. Default: no animation.
    fn update(&mut self, _dt: Duration) {}
}
