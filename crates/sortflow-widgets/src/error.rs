#![forbid(unsafe_code)]

//! Errors raised by rearrangeable-list operations.
//!
//! | Variant | Cause | Handling |
//! |---------|-------|----------|
//! | [`ListError::DuplicateItem`] | `add` with an id already present | Rejected, no mutation |
//! | [`ListError::ItemNotFound`] | `remove` with an absent id | Rejected, no mutation |
//! | [`ListError::InvalidDragState`] | Drag move/end/cancel with no active session | Absorbed by the list as a no-op |

use std::fmt;

/// Drag operation that arrived while no drag session was active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOperation {
    Move,
    End,
    Cancel,
}

impl fmt::Display for DragOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Move => "drag move",
            Self::End => "drag end",
            Self::Cancel => "drag cancel",
        })
    }
}

/// Failure of a list operation, generic over the item id type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError<Id> {
    DuplicateItem { id: Id },
    ItemNotFound { id: Id },
    InvalidDragState { operation: DragOperation },
}

impl<Id> ListError<Id> {
    /// Whether this is an input-ordering mismatch rather than a caller bug.
    #[must_use]
    pub fn is_drag_state(&self) -> bool {
        matches!(self, Self::InvalidDragState { .. })
    }
}

impl<Id: fmt::Debug> fmt::Display for ListError<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateItem { id } => write!(f, "item {id:?} is already in the list"),
            Self::ItemNotFound { id } => write!(f, "item {id:?} is not in the list"),
            Self::InvalidDragState { operation } => {
                write!(f, "{operation} received with no active drag")
            }
        }
    }
}

impl<Id: fmt::Debug> std::error::Error for ListError<Id> {}

/// Result alias for list operations.
pub type ListResult<T, Id> = Result<T, ListError<Id>>;
