#![forbid(unsafe_code)]

//! The capability set a list needs from its items.
//!
//! Items are opaque to the list apart from an identity, a measured height,
//! and two optional hit regions: the drag handle and the remove button.
//! Rendering stays with the caller.

use std::fmt::Debug;
use std::hash::Hash;

use bitflags::bitflags;
use sortflow_core::geometry::Rect;

/// Width of the default drag handle strip on the left of each row.
pub const DEFAULT_HANDLE_WIDTH: f32 = 25.0;

/// An item that can live in a [`RearrangeableList`](crate::RearrangeableList).
///
/// # Example
///
/// ```
/// use sortflow_widgets::RearrangeableItem;
///
/// struct Track {
///     id: u32,
///     title: String,
/// }
///
/// impl RearrangeableItem for Track {
///     type Id = u32;
///
///     fn id(&self) -> u32 {
///         self.id
///     }
///
///     fn height(&self) -> f32 {
///         50.0
///     }
/// }
/// ```
pub trait RearrangeableItem {
    /// Identity used for duplicate detection and removal.
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;

    /// Measured row height.
    fn height(&self) -> f32;

    /// The region of the row (given in the same space as `bounds`) where a
    /// pointer-down makes the item draggable.
    ///
    /// Default: a [`DEFAULT_HANDLE_WIDTH`] strip on the left edge.
    fn drag_handle(&self, bounds: Rect) -> Rect {
        Rect::new(
            bounds.x,
            bounds.y,
            DEFAULT_HANDLE_WIDTH.min(bounds.width),
            bounds.height,
        )
    }

    /// The region of the row that requests removal when clicked.
    ///
    /// Default: none.
    fn remove_button(&self, _bounds: Rect) -> Option<Rect> {
        None
    }
}

bitflags! {
    /// Per-row interaction state tracked by the list.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ItemState: u8 {
        /// A pointer-down landed on the drag handle and no drag has ended since.
        const DRAGGABLE = 0b01;
        /// This row is the dragged item of the active session.
        const DRAGGING = 0b10;
    }
}

impl ItemState {
    #[inline]
    #[must_use]
    pub fn is_draggable(self) -> bool {
        self.contains(Self::DRAGGABLE)
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.contains(Self::DRAGGING)
    }
}
