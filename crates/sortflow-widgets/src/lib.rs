#![forbid(unsafe_code)]

//! Rearrangeable list for sortflow.
//!
//! Leaves first:
//!
//! - [`OrderedItemSet`] - the authoritative, duplicate-free item sequence
//! - [`LayoutPositionIndex`] - layout slots (sort keys) for rendered items
//! - [`DragController`] - drag lifecycle and destination scan
//! - [`Autoscroll`] - edge-triggered scrolling while dragging
//! - [`ScrollViewport`] - clamped scroll offset over the flow
//! - [`RearrangeableList`] - the composition root
//!
//! Pointer events flow into the drag controller, which turns the pointer's
//! position into a destination row; the resulting reorder renumbers layout
//! slots and the flow container re-sorts and animates. Autoscroll runs each
//! frame of an active drag, independently nudging the scroll offset.

pub mod autoscroll;
pub mod drag;
pub mod error;
pub mod item;
pub mod layout_index;
pub mod ordered_set;
pub mod rearrangeable_list;
pub mod viewport;

pub use autoscroll::{Autoscroll, AutoscrollConfig};
pub use drag::{DragConfig, DragController, DragPhase, DragSession, DropPosition, Reorder};
pub use error::{DragOperation, ListError, ListResult};
pub use item::{DEFAULT_HANDLE_WIDTH, ItemState, RearrangeableItem};
pub use layout_index::{LayoutPositionIndex, LayoutSlot};
pub use ordered_set::{OrderedItemSet, SetChange, SubscriptionId};
pub use rearrangeable_list::{EventResult, ListConfig, RearrangeableList};
pub use viewport::ScrollViewport;
