#![forbid(unsafe_code)]

//! Layout slots: the integer sort keys that order rendered items.
//!
//! Slots come from a counter on insertion and are densified to `0..n-1` by
//! [`LayoutPositionIndex::renumber`]. The counter never decreases except on
//! [`reset`](LayoutPositionIndex::reset), so a newly assigned slot is always
//! greater than every slot in use.

use std::collections::HashMap;
use std::hash::Hash;

use sortflow_layout::{FlowContainer, SortKey};

/// A layout slot.
pub type LayoutSlot = SortKey;

/// Item id → layout slot map with a monotone counter.
#[derive(Debug, Clone)]
pub struct LayoutPositionIndex<Id> {
    slots: HashMap<Id, LayoutSlot>,
    counter: LayoutSlot,
}

impl<Id: Copy + Eq + Hash> Default for LayoutPositionIndex<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Copy + Eq + Hash> LayoutPositionIndex<Id> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            counter: 0,
        }
    }

    /// Give `id` the next slot and advance the counter.
    ///
    /// An id that already had a slot is moved to the new one.
    pub fn assign(&mut self, id: Id) -> LayoutSlot {
        let slot = self.counter;
        self.counter += 1;
        self.slots.insert(id, slot);
        slot
    }

    #[must_use]
    pub fn get(&self, id: &Id) -> Option<LayoutSlot> {
        self.slots.get(id).copied()
    }

    /// Reassign slots `0..n-1` in the order given.
    ///
    /// Ids absent from `ordered` lose their slot.
    pub fn renumber(&mut self, ordered: &[Id]) {
        self.slots.clear();
        self.slots
            .extend(ordered.iter().enumerate().map(|(i, id)| (*id, i as LayoutSlot)));
        self.counter = self.counter.max(ordered.len() as LayoutSlot);
    }

    /// Drop an id's slot.
    pub fn remove(&mut self, id: &Id) -> Option<LayoutSlot> {
        self.slots.remove(id)
    }

    /// Forget every slot and restart the counter at zero.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.counter = 0;
    }

    /// The slot the next [`assign`](Self::assign) will hand out.
    #[must_use]
    pub fn next_slot(&self) -> LayoutSlot {
        self.counter
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the slots in use are exactly `0..len`.
    #[must_use]
    pub fn is_dense(&self) -> bool {
        let mut seen = vec![false; self.slots.len()];
        for &slot in self.slots.values() {
            match seen.get_mut(slot as usize) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }

    /// Push `(id, slot)` for the given ids into a flow as sort keys.
    pub fn sync_flow<F: FlowContainer<Id>>(&self, flow: &mut F, ids: &[Id]) {
        let keys: Vec<(Id, SortKey)> = ids
            .iter()
            .filter_map(|id| self.get(id).map(|slot| (*id, slot)))
            .collect();
        flow.set_sort_keys(&keys);
    }
}
