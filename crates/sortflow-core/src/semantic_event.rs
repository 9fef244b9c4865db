#![forbid(unsafe_code)]

//! High-level pointer intentions derived from raw input.
//!
//! [`SemanticEvent`] is what a list reacts to: a press (arms drag handles),
//! a click (activates affordances such as a remove button), and the drag
//! lifecycle.
//!
//! ## Invariants
//! 1. Every drag sequence is well-formed: `DragStart` → zero or more
//!    `DragMove` → `DragEnd` or `DragCancel`.
//! 2. A press followed by release produces either `Click` or `DragEnd`,
//!    never both.

use crate::event::PointerButton;
use crate::geometry::Point;

/// High-level pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SemanticEvent {
    /// Button went down. Always precedes `Click` or `DragStart`.
    Press { pos: Point, button: PointerButton },

    /// Button released without the pointer having travelled past the drag
    /// threshold.
    Click { pos: Point, button: PointerButton },

    /// The pointer travelled past the drag threshold with the button held.
    ///
    /// `start` is where the button went down; `pos` is where the threshold
    /// was crossed.
    DragStart {
        start: Point,
        pos: Point,
        button: PointerButton,
    },

    /// Pointer moved during an active drag.
    DragMove {
        start: Point,
        current: Point,
        delta: (f32, f32),
    },

    /// Button released during an active drag.
    DragEnd { start: Point, end: Point },

    /// Drag aborted (Escape or focus loss).
    DragCancel,
}

impl SemanticEvent {
    /// Returns true for the four drag lifecycle variants.
    #[must_use]
    pub const fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::DragStart { .. } | Self::DragMove { .. } | Self::DragEnd { .. } | Self::DragCancel
        )
    }

    /// The pointer position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match *self {
            Self::Press { pos, .. } | Self::Click { pos, .. } | Self::DragStart { pos, .. } => {
                Some(pos)
            }
            Self::DragMove { current, .. } => Some(current),
            Self::DragEnd { end, .. } => Some(end),
            Self::DragCancel => None,
        }
    }
}
