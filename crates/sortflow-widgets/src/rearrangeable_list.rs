#![forbid(unsafe_code)]

//! The rearrangeable list: items in a scrolling flow, reordered by dragging
//! their handles.
//!
//! [`RearrangeableList`] wires together the item set, layout slots, drag
//! controller, autoscroll, and viewport. Input arrives either as raw
//! [`Event`]s through [`handle_event`](RearrangeableList::handle_event) (run
//! through a [`GestureRecognizer`]) or as explicit drag calls for callers
//! that recognize gestures themselves.
//!
//! # Frame loop
//!
//! Call [`update`](RearrangeableList::update) once per frame. While a drag is
//! active it applies autoscroll, moves the flow under the pointer, and re-runs
//! the destination scan, so a stationary pointer keeps reordering while the
//! list scrolls beneath it. It then advances the layout animation.
//!
//! # Example
//!
//! ```
//! use sortflow_core::event::{PointerButton, PointerEvent};
//! use sortflow_core::geometry::Rect;
//! use sortflow_widgets::{RearrangeableItem, RearrangeableList};
//!
//! struct Row(u32);
//!
//! impl RearrangeableItem for Row {
//!     type Id = u32;
//!     fn id(&self) -> u32 { self.0 }
//!     fn height(&self) -> f32 { 20.0 }
//! }
//!
//! let mut list = RearrangeableList::new(Rect::new(0.0, 0.0, 200.0, 400.0));
//! list.add_items([Row(1), Row(2), Row(3)]).unwrap();
//!
//! // Grab row 1 by its handle (padding 5, rows 20 high with 1 spacing)
//! // and drag it onto row 3.
//! list.handle_event(&PointerEvent::down(PointerButton::Left, 10.0, 15.0).into());
//! list.handle_event(&PointerEvent::drag(PointerButton::Left, 10.0, 50.0).into());
//! list.handle_event(&PointerEvent::up(PointerButton::Left, 10.0, 50.0).into());
//!
//! assert_eq!(list.rendered_order(), vec![2, 3, 1]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use sortflow_core::event::{Event, PointerEventKind};
use sortflow_core::geometry::{Point, Rect, Sides};
use sortflow_core::gesture::{GestureConfig, GestureRecognizer};
use sortflow_core::semantic_event::SemanticEvent;
use sortflow_layout::{FillFlow, FlowConfig, FlowContainer};

use crate::autoscroll::{Autoscroll, AutoscrollConfig};
use crate::drag::{DragConfig, DragController, DragPhase, Reorder};
use crate::error::{ListError, ListResult};
use crate::item::{ItemState, RearrangeableItem};
use crate::layout_index::{LayoutPositionIndex, LayoutSlot};
use crate::ordered_set::OrderedItemSet;
use crate::viewport::ScrollViewport;

// ---------------------------------------------------------------------------
// ListConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`RearrangeableList`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListConfig {
    /// Padding between the viewport edge and the flow (default: 5 all round).
    pub padding: Sides,
    /// Offset change per wheel notch (default: 20.0).
    pub scroll_step: f32,
    /// Whether a drag that no handle accepts scrolls the list instead
    /// (default: true).
    pub drag_to_scroll: bool,
    pub gesture: GestureConfig,
    pub drag: DragConfig,
    pub autoscroll: AutoscrollConfig,
    pub flow: FlowConfig,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            padding: Sides::all(5.0),
            scroll_step: 20.0,
            drag_to_scroll: true,
            gesture: GestureConfig::default(),
            drag: DragConfig::default(),
            autoscroll: AutoscrollConfig::default(),
            flow: FlowConfig::default(),
        }
    }
}

impl ListConfig {
    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_scroll_step(mut self, step: f32) -> Self {
        self.scroll_step = step.max(0.0);
        self
    }

    #[must_use]
    pub fn with_drag_to_scroll(mut self, enabled: bool) -> Self {
        self.drag_to_scroll = enabled;
        self
    }

    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    #[must_use]
    pub fn with_drag(mut self, drag: DragConfig) -> Self {
        self.drag = drag;
        self
    }

    #[must_use]
    pub fn with_autoscroll(mut self, autoscroll: AutoscrollConfig) -> Self {
        self.autoscroll = autoscroll;
        self
    }

    #[must_use]
    pub fn with_flow(mut self, flow: FlowConfig) -> Self {
        self.flow = flow;
        self
    }
}

/// Whether the list handled an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The list acted on the event; do not propagate it.
    Consumed,
    /// The list ignored the event; let it propagate.
    Ignored,
}

impl EventResult {
    #[inline]
    #[must_use]
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }

    fn or(self, other: Self) -> Self {
        if self.is_consumed() { self } else { other }
    }
}

// ---------------------------------------------------------------------------
// RearrangeableList
// ---------------------------------------------------------------------------

/// A scrolling vertical list whose items can be dragged into a new order.
pub struct RearrangeableList<T: RearrangeableItem, F = FillFlow<<T as RearrangeableItem>::Id>> {
    config: ListConfig,
    items: OrderedItemSet<T>,
    slots: LayoutPositionIndex<T::Id>,
    flow: F,
    states: HashMap<T::Id, ItemState>,
    drag: DragController<T::Id>,
    autoscroll: Autoscroll,
    viewport: ScrollViewport,
    gestures: GestureRecognizer,
    /// Pointer y a declined drag last scrolled from, while it scrolls the
    /// list instead.
    scroll_anchor: Option<f32>,
    layout_generation: u64,
}

impl<T: RearrangeableItem, F> fmt::Debug for RearrangeableList<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RearrangeableList")
            .field("items", &self.items)
            .field("drag", &self.drag.phase())
            .field("dragged", &self.drag.dragged())
            .field("viewport", &self.viewport)
            .field("layout_generation", &self.layout_generation)
            .finish()
    }
}

impl<T: RearrangeableItem> RearrangeableList<T> {
    /// A list with default configuration occupying `bounds` on screen.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, ListConfig::default())
    }

    #[must_use]
    pub fn with_config(bounds: Rect, config: ListConfig) -> Self {
        let viewport = ScrollViewport::new(bounds).with_padding(config.padding);
        let flow = FillFlow::with_config(
            config
                .flow
                .clone()
                .with_width(viewport.content_width()),
        );
        Self::with_flow(bounds, config, flow)
    }
}

impl<T: RearrangeableItem, F: FlowContainer<T::Id>> RearrangeableList<T, F> {
    /// A list laying out its rows with a caller-supplied flow container.
    ///
    /// The flow should be empty.
    pub fn with_flow(bounds: Rect, config: ListConfig, flow: F) -> Self {
        let viewport = ScrollViewport::new(bounds).with_padding(config.padding);
        let mut list = Self {
            items: OrderedItemSet::new(),
            slots: LayoutPositionIndex::new(),
            flow,
            states: HashMap::new(),
            drag: DragController::new(config.drag.clone()),
            autoscroll: Autoscroll::new(config.autoscroll.clone()),
            gestures: GestureRecognizer::new(config.gesture.clone()),
            viewport,
            scroll_anchor: None,
            layout_generation: 0,
            config,
        };
        list.sync_geometry();
        list
    }

    #[must_use]
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    // --- Items -------------------------------------------------------------

    /// Append an item and render it at the next layout slot.
    ///
    /// # Errors
    ///
    /// [`ListError::DuplicateItem`] if an item with the same id is present.
    pub fn add_item(&mut self, item: T) -> ListResult<(), T::Id> {
        let (id, height) = (item.id(), item.height());
        self.items.add(item)?;
        let slot = self.track_item(id);
        self.flow.add(id, height, slot);
        self.sync_geometry();
        Ok(())
    }

    /// Append a batch of items atomically.
    ///
    /// # Errors
    ///
    /// [`ListError::DuplicateItem`] if any id is present or repeats within
    /// the batch; nothing is added.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = T>) -> ListResult<(), T::Id> {
        let batch: Vec<T> = items.into_iter().collect();
        let rows: Vec<(T::Id, f32)> = batch.iter().map(|i| (i.id(), i.height())).collect();
        self.items.add_items(batch)?;
        let children: Vec<_> = rows
            .into_iter()
            .map(|(id, height)| (id, height, self.track_item(id)))
            .collect();
        self.flow.add_many(children);
        self.sync_geometry();
        Ok(())
    }

    /// Give a newly added item its slot and state; the caller renders it.
    fn track_item(&mut self, id: T::Id) -> LayoutSlot {
        let slot = self.slots.assign(id);
        self.states.insert(id, ItemState::empty());
        self.drag.item_added(id);
        sortflow_core::debug!(item = ?id, slot, "item added");
        slot
    }

    /// Remove an item, discarding its row and slot.
    ///
    /// Removing the dragged item ends the drag. Remaining slots are
    /// renumbered to `0..n-1`.
    ///
    /// # Errors
    ///
    /// [`ListError::ItemNotFound`] if no item has this id.
    pub fn remove_item(&mut self, id: &T::Id) -> ListResult<T, T::Id> {
        let item = self.items.remove(id)?;
        self.flow.remove(id);
        self.slots.remove(id);
        self.states.remove(id);
        if self.drag.item_removed(id).is_some() {
            sortflow_core::debug!(item = ?id, "dragged item removed, drag ended");
        }
        self.renumber();
        self.sync_geometry();
        sortflow_core::debug!(item = ?id, remaining = self.items.len(), "item removed");
        Ok(item)
    }

    /// Route a remove-affordance activation to [`remove_item`](Self::remove_item).
    ///
    /// # Errors
    ///
    /// [`ListError::ItemNotFound`] if no item has this id.
    pub fn request_removal(&mut self, id: &T::Id) -> ListResult<T, T::Id> {
        self.remove_item(id)
    }

    /// Remove every item and restart slot numbering at zero.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.flow.clear();
        self.slots.reset();
        self.states.clear();
        self.drag.reset();
        self.gestures.reset();
        self.scroll_anchor = None;
        self.sync_geometry();
        sortflow_core::debug!("items cleared");
    }

    /// Update an item's measured height.
    ///
    /// # Errors
    ///
    /// [`ListError::ItemNotFound`] if no item has this id.
    pub fn set_item_height(&mut self, id: &T::Id, height: f32) -> ListResult<(), T::Id> {
        if !self.items.contains(id) {
            return Err(ListError::ItemNotFound { id: *id });
        }
        self.flow.set_height(id, height);
        self.sync_geometry();
        Ok(())
    }

    /// Rendered item count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flow.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flow.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &OrderedItemSet<T> {
        &self.items
    }

    /// Mutable access to the item set, e.g. to subscribe to changes.
    pub fn items_mut(&mut self) -> &mut OrderedItemSet<T> {
        &mut self.items
    }

    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.get(id)
    }

    /// Current layout slot of an item.
    #[must_use]
    pub fn slot(&self, id: &T::Id) -> Option<LayoutSlot> {
        self.slots.get(id)
    }

    /// Ids in visual order.
    #[must_use]
    pub fn rendered_order(&self) -> Vec<T::Id> {
        self.flow.flowing_keys()
    }

    /// Screen-space bounds of a row at its displayed position.
    #[must_use]
    pub fn item_bounds(&self, id: &T::Id) -> Option<Rect> {
        let local = self.flow.bounding_box(id)?;
        let origin = self.flow.origin();
        Some(Rect::new(
            origin.x,
            origin.y + local.y,
            self.viewport.content_width(),
            local.height,
        ))
    }

    /// The row under a screen-space point.
    #[must_use]
    pub fn item_at(&self, screen: Point) -> Option<T::Id> {
        self.flow
            .flowing_keys()
            .into_iter()
            .find(|id| self.item_bounds(id).is_some_and(|b| b.contains(screen)))
    }

    #[must_use]
    pub fn item_state(&self, id: &T::Id) -> Option<ItemState> {
        self.states.get(id).copied()
    }

    #[must_use]
    pub fn flow(&self) -> &F {
        &self.flow
    }

    /// Incremented whenever a reorder or removal reassigns slots.
    #[must_use]
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    // --- Draggability -------------------------------------------------------

    /// Pointer-down at `screen`: the row whose drag handle contains the point
    /// becomes draggable; every other idle row stops being draggable.
    pub fn arm_drag_handle(&mut self, screen: Point) -> Option<T::Id> {
        self.disarm_all();
        let id = self.item_at(screen)?;
        let bounds = self.item_bounds(&id)?;
        let item = self.items.get(&id)?;
        if !item.drag_handle(bounds).contains(screen) {
            return None;
        }
        self.states.entry(id).or_default().insert(ItemState::DRAGGABLE);
        sortflow_core::trace!(item = ?id, "drag handle armed");
        Some(id)
    }

    /// Set or clear an item's draggable capability directly.
    ///
    /// # Errors
    ///
    /// [`ListError::ItemNotFound`] if no item has this id.
    pub fn set_draggable(&mut self, id: &T::Id, draggable: bool) -> ListResult<(), T::Id> {
        let state = self
            .states
            .get_mut(id)
            .ok_or(ListError::ItemNotFound { id: *id })?;
        state.set(ItemState::DRAGGABLE, draggable);
        Ok(())
    }

    #[must_use]
    pub fn is_draggable(&self, id: &T::Id) -> bool {
        self.states.get(id).is_some_and(|s| s.is_draggable())
    }

    fn disarm_all(&mut self) {
        for state in self.states.values_mut() {
            if !state.is_dragging() {
                state.remove(ItemState::DRAGGABLE);
            }
        }
    }

    // --- Drag lifecycle -------------------------------------------------------

    #[must_use]
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    #[must_use]
    pub fn dragged_item(&self) -> Option<T::Id> {
        self.drag.dragged()
    }

    /// Start a drag at `pointer`, picking the first draggable row in visual
    /// order. Returns [`EventResult::Ignored`] if no row is draggable.
    pub fn begin_drag(&mut self, pointer: Point) -> EventResult {
        let order = self.flow.flowing_keys();
        let states = &self.states;
        let accepted = self.drag.begin(pointer, &order, |id| {
            states.get(id).is_some_and(|s| s.is_draggable())
        });
        match accepted {
            Some(id) => {
                self.states.entry(id).or_default().insert(ItemState::DRAGGING);
                sortflow_core::debug!(item = ?id, "drag accepted");
                EventResult::Consumed
            }
            None => {
                sortflow_core::debug!("drag declined, no draggable item");
                EventResult::Ignored
            }
        }
    }

    /// Move the drag pointer and apply any resulting live reorder.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidDragState`] when no drag is active.
    pub fn drag_to(&mut self, pointer: Point) -> ListResult<Option<Reorder<T::Id>>, T::Id> {
        self.drag.update_pointer(pointer)?;
        self.live_reorder()
    }

    /// Finish the drag. The last live reorder already committed the order.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidDragState`] when no drag is active.
    pub fn end_drag(&mut self) -> ListResult<(), T::Id> {
        let session = self.drag.end()?;
        self.release(&session.dragged);
        sortflow_core::debug!(item = ?session.dragged, "drag ended");
        Ok(())
    }

    /// Abort the drag, keeping whatever order live reorders produced.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidDragState`] when no drag is active.
    pub fn cancel_drag(&mut self) -> ListResult<(), T::Id> {
        let session = self.drag.cancel()?;
        self.release(&session.dragged);
        sortflow_core::debug!(item = ?session.dragged, "drag cancelled");
        Ok(())
    }

    fn release(&mut self, id: &T::Id) {
        if let Some(state) = self.states.get_mut(id) {
            state.remove(ItemState::DRAGGABLE | ItemState::DRAGGING);
        }
    }

    fn live_reorder(&mut self) -> ListResult<Option<Reorder<T::Id>>, T::Id> {
        let Some(reorder) = self.drag.step(&self.flow)? else {
            return Ok(None);
        };
        if let Some(session) = self.drag.session() {
            self.slots.renumber(&session.order);
            self.slots.sync_flow(&mut self.flow, &session.order);
        }
        self.items.move_to(&reorder.item, reorder.to)?;
        self.layout_generation += 1;
        sortflow_core::debug!(
            item = ?reorder.item,
            from = reorder.from,
            to = reorder.to,
            slot = self.slots.get(&reorder.item).unwrap_or_default(),
            "live reorder"
        );
        Ok(Some(reorder))
    }

    fn renumber(&mut self) {
        let order = self.flow.flowing_keys();
        self.slots.renumber(&order);
        self.slots.sync_flow(&mut self.flow, &order);
        self.layout_generation += 1;
        sortflow_core::trace!(count = order.len(), "slots renumbered");
    }

    /// Log and swallow a drag-state mismatch.
    fn absorb(&self, result: ListResult<(), T::Id>) -> EventResult {
        match result {
            Ok(()) => EventResult::Consumed,
            Err(err) => {
                sortflow_core::trace!(error = %err, "drag input absorbed");
                EventResult::Ignored
            }
        }
    }

    // --- Input ----------------------------------------------------------------

    /// Feed a raw input event through gesture recognition.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        if let Event::Pointer(pointer) = event {
            let step = self.config.scroll_step;
            let wheel = match pointer.kind {
                PointerEventKind::ScrollUp => Some(-step),
                PointerEventKind::ScrollDown => Some(step),
                _ => None,
            };
            if let Some(delta) = wheel {
                if !self.viewport.contains(pointer.position) {
                    return EventResult::Ignored;
                }
                self.scroll_by(delta);
                return EventResult::Consumed;
            }
        }

        let was_pressed = self.gestures.is_pressed();
        let mut result = EventResult::Ignored;
        for semantic in self.gestures.process(event) {
            result = result.or(self.handle_semantic(semantic));
        }
        // A press that ended without a drag (release, Escape, focus loss)
        // leaves no handle armed for a later gesture.
        if was_pressed && !self.gestures.is_pressed() {
            self.disarm_all();
        }
        result
    }

    fn handle_semantic(&mut self, event: SemanticEvent) -> EventResult {
        let button = self.config.drag.button;
        match event {
            SemanticEvent::Press { pos, button: b } => {
                if b != button || !self.viewport.contains(pos) {
                    return EventResult::Ignored;
                }
                match self.arm_drag_handle(pos) {
                    Some(_) => EventResult::Consumed,
                    None => EventResult::Ignored,
                }
            }
            SemanticEvent::Click { pos, button: b } => {
                self.disarm_all();
                if b != button {
                    return EventResult::Ignored;
                }
                let Some(id) = self.remove_button_at(pos) else {
                    return EventResult::Ignored;
                };
                match self.request_removal(&id) {
                    Ok(_) => EventResult::Consumed,
                    Err(_) => EventResult::Ignored,
                }
            }
            SemanticEvent::DragStart { start, pos, button: b } => {
                if b != button {
                    return EventResult::Ignored;
                }
                if self.begin_drag(start).is_consumed() {
                    let moved = self.drag_to(pos).map(|_| ());
                    return self.absorb(moved).or(EventResult::Consumed);
                }
                // Anchor at the press point; the DragMove emitted alongside
                // DragStart then scrolls by the whole travel so far.
                if self.config.drag_to_scroll && self.viewport.contains(start) {
                    self.scroll_anchor = Some(start.y);
                    return EventResult::Consumed;
                }
                EventResult::Ignored
            }
            SemanticEvent::DragMove { current, .. } => {
                if let Some(anchor) = self.scroll_anchor {
                    self.scroll_anchor = Some(current.y);
                    self.scroll_by(anchor - current.y);
                    return EventResult::Consumed;
                }
                let moved = self.drag_to(current).map(|_| ());
                self.absorb(moved)
            }
            SemanticEvent::DragEnd { .. } => {
                if self.scroll_anchor.take().is_some() {
                    return EventResult::Consumed;
                }
                let ended = self.end_drag();
                self.absorb(ended)
            }
            SemanticEvent::DragCancel => {
                self.disarm_all();
                if self.scroll_anchor.take().is_some() {
                    return EventResult::Consumed;
                }
                let cancelled = self.cancel_drag();
                self.absorb(cancelled)
            }
        }
    }

    fn remove_button_at(&self, screen: Point) -> Option<T::Id> {
        let id = self.item_at(screen)?;
        let bounds = self.item_bounds(&id)?;
        let button = self.items.get(&id)?.remove_button(bounds)?;
        button.contains(screen).then_some(id)
    }

    // --- Viewport ---------------------------------------------------------------

    #[must_use]
    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f32 {
        self.viewport.offset()
    }

    /// Scroll by `delta`, clamped; returns the change applied.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let applied = self.viewport.scroll_by(delta);
        self.flow.set_origin(self.viewport.flow_origin());
        applied
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.viewport.scroll_to(offset);
        self.flow.set_origin(self.viewport.flow_origin());
    }

    /// Move or resize the list on screen.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.viewport.set_bounds(bounds);
        self.flow.set_origin(self.viewport.flow_origin());
    }

    fn sync_geometry(&mut self) {
        self.viewport.set_content_height(self.flow.content_height());
        self.flow.set_origin(self.viewport.flow_origin());
    }

    // --- Frame ------------------------------------------------------------------

    /// Per-frame update: autoscroll, live reorder, layout animation.
    pub fn update(&mut self, dt: Duration) {
        let _span = sortflow_core::debug_span!("list_update", items = self.items.len()).entered();
        if let Some(pointer) = self.drag.session().map(|s| s.pointer) {
            let local_y = self.viewport.to_local(pointer).y;
            let delta = self.autoscroll.delta(self.drag.phase(), local_y, &self.viewport);
            if delta != 0.0 {
                let applied = self.scroll_by(delta);
                sortflow_core::trace!(delta, applied, "autoscroll");
            }
            let stepped = self.live_reorder().map(|_| ());
            self.absorb(stepped);
        }
        self.flow.update(dt);
    }
}
