#![forbid(unsafe_code)]

//! Drag lifecycle and destination computation.
//!
//! [`DragController`] is a two-state machine (`Idle` ⇄ `Dragging`). While a
//! drag is active it owns a [`DragSession`]: the dragged id, the pointer, and
//! the visual order captured at drag start, kept current as live reorders
//! are applied.
//!
//! # Destination scan
//!
//! Rows have measured, non-uniform heights, so the hovered row is found by a
//! forward linear scan: walk the session order, accumulating each row's height
//! plus the flow spacing, and stop at the first row whose accumulated height
//! exceeds the pointer's local `y`. The result is clamped to the last row.
//!
//! The hovered row becomes a [`DropPosition`]: `After(h)` when the dragged
//! item sits above it, `Before(h)` otherwise. [`move_item`] then applies the
//! single-element move correction, so the dragged item always lands on the
//! hovered row.
//!
//! ## Invariants
//!
//! 1. At most one session exists; it is dropped on end, cancel, or removal of
//!    the dragged item.
//! 2. The session order is a permutation of the rendered ids.
//! 3. A step whose destination equals the source performs no mutation.
//!
//! ## Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | No draggable row at drag start | Press outside every handle | Drag declined |
//! | Move/end/cancel while idle | Stray input after drag end | `InvalidDragState` error |
//! | Dragged row removed mid-drag | Remove affordance during drag | Session dropped |

use std::hash::Hash;

use sortflow_core::event::PointerButton;
use sortflow_core::geometry::Point;
use sortflow_layout::FlowContainer;

use crate::error::{DragOperation, ListError, ListResult};

// ---------------------------------------------------------------------------
// DropPosition
// ---------------------------------------------------------------------------

/// Where in the sequence a dragged item is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropPosition {
    /// Before the item at the given index.
    Before(usize),
    /// After the item at the given index.
    After(usize),
    /// At the end of the sequence.
    Append,
}

impl DropPosition {
    /// Returns the index associated with this position, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Before(i) | Self::After(i) => Some(*i),
            Self::Append => None,
        }
    }

    /// The insertion gap in a sequence of `len` items, before the moved item
    /// is taken out. Gap `g` sits between items `g - 1` and `g`.
    #[must_use]
    pub fn gap(&self, len: usize) -> usize {
        match *self {
            Self::Before(i) => i.min(len),
            Self::After(i) => (i + 1).min(len),
            Self::Append => len,
        }
    }

    /// Position for dropping the item at `source` onto the hovered row.
    #[must_use]
    pub fn onto(source: usize, hovered: usize) -> Self {
        if source < hovered {
            Self::After(hovered)
        } else {
            Self::Before(hovered)
        }
    }
}

/// Move `items[from]` to `position`, returning its new index.
///
/// The gap is computed before removal; when the source precedes the gap the
/// destination shifts down by one to account for the removed element.
///
/// # Panics
///
/// Panics if `from` is out of bounds.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, position: DropPosition) -> usize {
    let mut to = position.gap(items.len());
    if from < to {
        to -= 1;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    to
}

// ---------------------------------------------------------------------------
// DragConfig
// ---------------------------------------------------------------------------

/// Configuration for drag acceptance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragConfig {
    /// Button that may arm handles and start a drag (default: left).
    pub button: PointerButton,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            button: PointerButton::Left,
        }
    }
}

impl DragConfig {
    #[must_use]
    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

// ---------------------------------------------------------------------------
// DragSession
// ---------------------------------------------------------------------------

/// State of an active drag. Exists only between drag start and drag end.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<Id> {
    /// The item being dragged.
    pub dragged: Id,
    /// Screen-space pointer position at drag start.
    pub start: Point,
    /// Last known screen-space pointer position.
    pub pointer: Point,
    /// Visual order, captured at drag start and updated by each live reorder.
    pub order: Vec<Id>,
}

impl<Id: Copy + Eq> DragSession<Id> {
    #[must_use]
    pub fn new(dragged: Id, start: Point, order: Vec<Id>) -> Self {
        Self {
            dragged,
            start,
            pointer: start,
            order,
        }
    }

    /// Current index of the dragged item in the session order.
    #[must_use]
    pub fn source_index(&self) -> Option<usize> {
        self.order.iter().position(|id| *id == self.dragged)
    }

    /// Manhattan distance from start to current pointer.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.start.manhattan_distance(self.pointer)
    }

    /// Delta from start to current pointer as `(dx, dy)`.
    #[must_use]
    pub fn delta(&self) -> (f32, f32) {
        (self.pointer.x - self.start.x, self.pointer.y - self.start.y)
    }
}

/// A live reorder produced by [`DragController::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reorder<Id> {
    pub item: Id,
    pub from: usize,
    pub to: usize,
    pub position: DropPosition,
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// Drag state machine phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Owns the drag lifecycle and computes live reorders.
#[derive(Clone, Debug)]
pub struct DragController<Id> {
    config: DragConfig,
    session: Option<DragSession<Id>>,
}

impl<Id: Copy + Eq + Hash> Default for DragController<Id> {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl<Id: Copy + Eq + Hash> DragController<Id> {
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession<Id>> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn dragged(&self) -> Option<Id> {
        self.session.as_ref().map(|s| s.dragged)
    }

    /// Try to start a drag.
    ///
    /// Scans `render_order` and picks the first item for which
    /// `is_draggable` holds. Returns `None` (declined) if there is none or a
    /// drag is already active.
    pub fn begin(
        &mut self,
        pointer: Point,
        render_order: &[Id],
        is_draggable: impl Fn(&Id) -> bool,
    ) -> Option<Id> {
        if self.session.is_some() {
            return None;
        }
        let dragged = *render_order.iter().find(|id| is_draggable(id))?;
        self.session = Some(DragSession::new(dragged, pointer, render_order.to_vec()));
        Some(dragged)
    }

    /// Record a new pointer position.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidDragState`] when idle.
    pub fn update_pointer(&mut self, pointer: Point) -> ListResult<(), Id> {
        let session = self.session.as_mut().ok_or(ListError::InvalidDragState {
            operation: DragOperation::Move,
        })?;
        session.pointer = pointer;
        Ok(())
    }

    /// Index of the row under the pointer, by forward scan over the session
    /// order. `None` when idle or when the session order is empty.
    #[must_use]
    pub fn destination<F: FlowContainer<Id>>(&self, flow: &F) -> Option<usize> {
        let session = self.session.as_ref()?;
        let local_y = flow.to_local(session.pointer).y;
        hovered_index(
            session
                .order
                .iter()
                .map(|id| flow.bounding_box(id).map_or(0.0, |b| b.height)),
            flow.spacing(),
            local_y,
        )
    }

    /// Recompute the destination and apply it to the session order.
    ///
    /// Returns the reorder that happened, or `None` when the dragged item is
    /// already on the hovered row.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidDragState`] when idle.
    pub fn step<F: FlowContainer<Id>>(&mut self, flow: &F) -> ListResult<Option<Reorder<Id>>, Id> {
        if self.session.is_none() {
            return Err(ListError::InvalidDragState {
                operation: DragOperation::Move,
            });
        }
        let Some(hovered) = self.destination(flow) else {
            return Ok(None);
        };
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let Some(from) = session.source_index() else {
            return Ok(None);
        };
        if from == hovered {
            return Ok(None);
        }
        let position = DropPosition::onto(from, hovered);
        let to = move_item(&mut session.order, from, position);
        Ok(Some(Reorder {
            item: session.dragged,
            from,
            to,
            position,
        }))
    }

    /// Finish the drag, returning the closed session.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidDragState`] when idle.
    pub fn end(&mut self) -> ListResult<DragSession<Id>, Id> {
        self.session.take().ok_or(ListError::InvalidDragState {
            operation: DragOperation::End,
        })
    }

    /// Abort the drag, returning the closed session.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidDragState`] when idle.
    pub fn cancel(&mut self) -> ListResult<DragSession<Id>, Id> {
        self.session.take().ok_or(ListError::InvalidDragState {
            operation: DragOperation::Cancel,
        })
    }

    /// Keep the session order in step with a newly rendered item.
    pub fn item_added(&mut self, id: Id) {
        if let Some(session) = self.session.as_mut() {
            session.order.push(id);
        }
    }

    /// Keep the session in step with a removed item.
    ///
    /// Returns the closed session if the removed item was the dragged one.
    pub fn item_removed(&mut self, id: &Id) -> Option<DragSession<Id>> {
        let session = self.session.as_mut()?;
        if session.dragged == *id {
            return self.session.take();
        }
        session.order.retain(|other| other != id);
        None
    }

    /// Drop any session without reporting it.
    pub fn reset(&mut self) {
        self.session = None;
    }
}

/// Forward scan: the first row whose accumulated height (plus spacing)
/// exceeds `y`, clamped to the last row.
#[must_use]
pub fn hovered_index(heights: impl IntoIterator<Item = f32>, spacing: f32, y: f32) -> Option<usize> {
    let mut accumulated = 0.0f32;
    let mut last = None;
    for (i, height) in heights.into_iter().enumerate() {
        accumulated += height + spacing;
        if accumulated > y {
            return Some(i);
        }
        last = Some(i);
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortflow_layout::FillFlow;

    // === move_item / DropPosition ===

    fn letters(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn move_forward_lands_on_hovered_row() {
        let mut v = letters("ABCDE");
        let to = move_item(&mut v, 0, DropPosition::onto(0, 2));
        assert_eq!(to, 2);
        assert_eq!(v, letters("BCADE"));
    }

    #[test]
    fn move_backward_lands_on_hovered_row() {
        let mut v = letters("ABCDE");
        let to = move_item(&mut v, 3, DropPosition::onto(3, 0));
        assert_eq!(to, 0);
        assert_eq!(v, letters("DABCE"));
    }

    #[test]
    fn before_gap_after_source_is_corrected() {
        // Gap 2 sits between B and C; removing A shifts it to 1.
        let mut v = letters("ABCDE");
        assert_eq!(move_item(&mut v, 0, DropPosition::Before(2)), 1);
        assert_eq!(v, letters("BACDE"));
    }

    #[test]
    fn append_moves_to_tail() {
        let mut v = letters("ABC");
        assert_eq!(move_item(&mut v, 0, DropPosition::Append), 2);
        assert_eq!(v, letters("BCA"));
    }

    #[test]
    fn no_op_moves() {
        let mut v = letters("ABC");
        assert_eq!(move_item(&mut v, 1, DropPosition::Before(1)), 1);
        assert_eq!(move_item(&mut v, 1, DropPosition::After(0)), 1);
        assert_eq!(move_item(&mut v, 1, DropPosition::Before(2)), 1);
        assert_eq!(v, letters("ABC"));
    }

    #[test]
    fn drop_position_index_and_gap() {
        assert_eq!(DropPosition::Before(3).index(), Some(3));
        assert_eq!(DropPosition::After(1).index(), Some(1));
        assert_eq!(DropPosition::Append.index(), None);
        assert_eq!(DropPosition::After(9).gap(4), 4);
        assert_eq!(DropPosition::Before(9).gap(4), 4);
    }

    // === hovered_index ===

    #[test]
    fn scan_uses_accumulated_heights() {
        let heights = [10.0, 30.0, 5.0];
        assert_eq!(hovered_index(heights, 1.0, 0.0), Some(0));
        assert_eq!(hovered_index(heights, 1.0, 10.9), Some(0));
        assert_eq!(hovered_index(heights, 1.0, 11.0), Some(1));
        assert_eq!(hovered_index(heights, 1.0, 41.5), Some(1));
        assert_eq!(hovered_index(heights, 1.0, 42.0), Some(2));
    }

    #[test]
    fn scan_clamps() {
        let heights = [10.0, 10.0];
        assert_eq!(hovered_index(heights, 0.0, -50.0), Some(0));
        assert_eq!(hovered_index(heights, 0.0, 1e6), Some(1));
        assert_eq!(hovered_index(std::iter::empty(), 0.0, 5.0), None);
    }

    // === DragConfig ===

    #[test]
    fn config_builder() {
        assert_eq!(DragConfig::default().button, PointerButton::Left);
        let cfg = DragConfig::default().with_button(PointerButton::Middle);
        assert_eq!(cfg.button, PointerButton::Middle);
    }

    // === DragSession ===

    #[test]
    fn session_distance_and_delta() {
        let mut s = DragSession::new('a', Point::new(10.0, 20.0), vec!['a']);
        s.pointer = Point::new(15.0, 18.0);
        assert_eq!(s.delta(), (5.0, -2.0));
        assert_eq!(s.distance(), 7.0);
        assert_eq!(s.source_index(), Some(0));
    }

    // === DragController ===

    fn flow_of(ids: &str) -> FillFlow<char> {
        let mut flow = FillFlow::new();
        for (slot, id) in ids.chars().enumerate() {
            flow.add(id, 10.0, slot as u64);
        }
        flow
    }

    /// Screen y at the middle of row `i` (height 10, spacing 1).
    fn row_y(i: usize) -> f32 {
        i as f32 * 11.0 + 5.0
    }

    #[test]
    fn begin_picks_first_draggable() {
        let mut ctl = DragController::default();
        let order = letters("ABC");
        assert_eq!(ctl.begin(Point::ZERO, &order, |id| *id == 'B' || *id == 'C'), Some('B'));
        assert_eq!(ctl.phase(), DragPhase::Dragging);
        assert_eq!(ctl.session().map(|s| s.order.clone()), Some(order));
    }

    #[test]
    fn begin_declines_without_draggable() {
        let mut ctl = DragController::<char>::default();
        assert_eq!(ctl.begin(Point::ZERO, &letters("ABC"), |_| false), None);
        assert_eq!(ctl.phase(), DragPhase::Idle);
    }

    #[test]
    fn begin_declines_while_dragging() {
        let mut ctl = DragController::default();
        ctl.begin(Point::ZERO, &letters("AB"), |id| *id == 'A');
        assert_eq!(ctl.begin(Point::ZERO, &letters("AB"), |_| true), None);
        assert_eq!(ctl.dragged(), Some('A'));
    }

    #[test]
    fn step_applies_live_reorder() {
        let flow = flow_of("ABCDE");
        let mut ctl = DragController::default();
        ctl.begin(Point::new(0.0, row_y(0)), &letters("ABCDE"), |id| *id == 'A');

        ctl.update_pointer(Point::new(0.0, row_y(2))).unwrap();
        let reorder = ctl.step(&flow).unwrap();
        assert_eq!(
            reorder,
            Some(Reorder {
                item: 'A',
                from: 0,
                to: 2,
                position: DropPosition::After(2),
            })
        );
        assert_eq!(ctl.session().unwrap().order, letters("BCADE"));
    }

    #[test]
    fn step_on_current_row_is_no_op() {
        let flow = flow_of("ABC");
        let mut ctl = DragController::default();
        ctl.begin(Point::new(0.0, row_y(1)), &letters("ABC"), |id| *id == 'B');
        assert_eq!(ctl.step(&flow), Ok(None));
        assert_eq!(ctl.session().unwrap().order, letters("ABC"));
    }

    #[test]
    fn destination_respects_flow_origin() {
        let mut flow = flow_of("ABC");
        flow.set_origin(Point::new(0.0, 100.0));
        let mut ctl = DragController::default();
        ctl.begin(Point::new(0.0, 100.0 + row_y(2)), &letters("ABC"), |_| true);
        assert_eq!(ctl.destination(&flow), Some(2));
    }

    #[test]
    fn idle_operations_are_drag_state_errors() {
        let flow = flow_of("AB");
        let mut ctl = DragController::<char>::default();
        assert_eq!(
            ctl.update_pointer(Point::ZERO),
            Err(ListError::InvalidDragState {
                operation: DragOperation::Move
            })
        );
        assert!(ctl.step(&flow).is_err());
        assert_eq!(
            ctl.end(),
            Err(ListError::InvalidDragState {
                operation: DragOperation::End
            })
        );
        assert_eq!(
            ctl.cancel(),
            Err(ListError::InvalidDragState {
                operation: DragOperation::Cancel
            })
        );
        assert_eq!(ctl.destination(&flow), None);
    }

    #[test]
    fn end_and_cancel_close_the_session() {
        let mut ctl = DragController::default();
        ctl.begin(Point::ZERO, &letters("AB"), |_| true);
        assert_eq!(ctl.end().map(|s| s.dragged), Ok('A'));
        assert!(!ctl.is_dragging());

        ctl.begin(Point::ZERO, &letters("AB"), |_| true);
        assert!(ctl.cancel().is_ok());
        assert_eq!(ctl.phase(), DragPhase::Idle);
    }

    #[test]
    fn removal_tracking() {
        let mut ctl = DragController::default();
        ctl.begin(Point::ZERO, &letters("ABC"), |id| *id == 'B');
        ctl.item_added('D');
        assert_eq!(ctl.item_removed(&'A'), None);
        assert_eq!(ctl.session().unwrap().order, letters("BCD"));

        let closed = ctl.item_removed(&'B');
        assert_eq!(closed.map(|s| s.dragged), Some('B'));
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.item_removed(&'C'), None);
    }
}
