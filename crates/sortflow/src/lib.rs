#![forbid(unsafe_code)]

//! sortflow public facade crate.
//!
//! Re-exports the types needed to build and drive a rearrangeable list and
//! offers a prelude for day-to-day usage.
//!
//! # Example
//!
//! ```
//! use sortflow::prelude::*;
//!
//! struct Song {
//!     id: u64,
//! }
//!
//! impl RearrangeableItem for Song {
//!     type Id = u64;
//!     fn id(&self) -> u64 { self.id }
//!     fn height(&self) -> f32 { 30.0 }
//! }
//!
//! let mut list = RearrangeableList::new(Rect::new(0.0, 0.0, 300.0, 200.0));
//! list.add_items((0..4).map(|id| Song { id }))?;
//! list.set_draggable(&3, true)?;
//! list.begin_drag(Point::new(10.0, 100.0));
//! list.drag_to(Point::new(10.0, 10.0))?;
//! list.end_drag()?;
//! assert_eq!(list.rendered_order(), vec![3, 0, 1, 2]);
//! # Ok::<(), sortflow::ListError<u64>>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use sortflow_core::animation::{Animation, EasingFn, Tween};
pub use sortflow_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent,
    PointerEventKind,
};
pub use sortflow_core::geometry::{Point, Rect, Sides, Size};
pub use sortflow_core::gesture::{GestureConfig, GestureRecognizer};
pub use sortflow_core::semantic_event::SemanticEvent;

// --- Layout re-exports -----------------------------------------------------

pub use sortflow_layout::{FillFlow, FlowConfig, FlowContainer, SortKey};

// --- Widget re-exports -----------------------------------------------------

pub use sortflow_widgets::{
    Autoscroll, AutoscrollConfig, DragConfig, DragController, DragPhase, DragSession,
    DropPosition, EventResult, ItemState, LayoutPositionIndex, LayoutSlot, ListConfig, ListError,
    ListResult, OrderedItemSet, RearrangeableItem, RearrangeableList, Reorder, ScrollViewport,
    SetChange,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Event, EventResult, FlowContainer, ListConfig, ListError, ListResult, Point,
        PointerButton, PointerEvent, RearrangeableItem, RearrangeableList, Rect,
    };

    pub use crate::{core, layout, widgets};
}

pub use sortflow_core as core;
pub use sortflow_layout as layout;
pub use sortflow_widgets as widgets;
