#![forbid(unsafe_code)]

//! The authoritative item sequence.
//!
//! [`OrderedItemSet`] owns the caller's items, rejects duplicate identities,
//! and keeps insertion order until an explicit move. Subscribers observe every
//! mutation as a [`SetChange`].
//!
//! ## Invariants
//!
//! 1. No two items share an id.
//! 2. Without a [`move_to`](OrderedItemSet::move_to), iteration order equals
//!    insertion order.
//! 3. A failed operation leaves the set untouched and notifies nobody.

use std::fmt;

use crate::error::{ListError, ListResult};
use crate::item::RearrangeableItem;

/// A mutation of an [`OrderedItemSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetChange<Id> {
    /// Items appended to the tail, in order.
    Added(Vec<Id>),
    /// One item removed.
    Removed(Id),
    /// The order changed; carries the full new order.
    Reordered(Vec<Id>),
    /// Every item removed.
    Cleared,
}

/// Callback type for set observers.
pub type ChangeCallback<Id> = Box<dyn Fn(&SetChange<Id>) + Send + Sync>;

/// Handle returned by [`OrderedItemSet::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered, duplicate-free item sequence with change notification.
pub struct OrderedItemSet<T: RearrangeableItem> {
    items: Vec<T>,
    subscribers: Vec<(SubscriptionId, ChangeCallback<T::Id>)>,
    next_subscription: u64,
}

impl<T: RearrangeableItem> fmt::Debug for OrderedItemSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedItemSet")
            .field("ids", &self.ids())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T: RearrangeableItem> Default for OrderedItemSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RearrangeableItem> OrderedItemSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Register an observer for every subsequent mutation.
    pub fn subscribe(
        &mut self,
        f: impl Fn(&SetChange<T::Id>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Remove an observer. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn notify(&self, change: &SetChange<T::Id>) {
        for (_, cb) in &self.subscribers {
            cb(change);
        }
    }

    /// Append an item to the tail.
    ///
    /// # Errors
    ///
    /// [`ListError::DuplicateItem`] if an item with the same id is present.
    pub fn add(&mut self, item: T) -> ListResult<(), T::Id> {
        let id = item.id();
        if self.contains(&id) {
            return Err(ListError::DuplicateItem { id });
        }
        self.items.push(item);
        self.notify(&SetChange::Added(vec![id]));
        Ok(())
    }

    /// Append a batch of items atomically.
    ///
    /// Either every item is added (one [`SetChange::Added`] carrying all ids)
    /// or none is.
    ///
    /// # Errors
    ///
    /// [`ListError::DuplicateItem`] if any id is already present or repeats
    /// within the batch.
    pub fn add_items(&mut self, items: impl IntoIterator<Item = T>) -> ListResult<(), T::Id> {
        let batch: Vec<T> = items.into_iter().collect();
        let mut ids = Vec::with_capacity(batch.len());
        for item in &batch {
            let id = item.id();
            if self.contains(&id) || ids.contains(&id) {
                return Err(ListError::DuplicateItem { id });
            }
            ids.push(id);
        }
        if ids.is_empty() {
            return Ok(());
        }
        self.items.extend(batch);
        self.notify(&SetChange::Added(ids));
        Ok(())
    }

    /// Remove an item by id, returning it.
    ///
    /// # Errors
    ///
    /// [`ListError::ItemNotFound`] if no item has this id.
    pub fn remove(&mut self, id: &T::Id) -> ListResult<T, T::Id> {
        let index = self
            .position(id)
            .ok_or(ListError::ItemNotFound { id: *id })?;
        let item = self.items.remove(index);
        self.notify(&SetChange::Removed(*id));
        Ok(item)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.notify(&SetChange::Cleared);
    }

    /// Move an item to `index` (clamped to the last position).
    ///
    /// Returns `Ok(false)` without notifying when the item is already there.
    ///
    /// # Errors
    ///
    /// [`ListError::ItemNotFound`] if no item has this id.
    pub fn move_to(&mut self, id: &T::Id, index: usize) -> ListResult<bool, T::Id> {
        let from = self
            .position(id)
            .ok_or(ListError::ItemNotFound { id: *id })?;
        let to = index.min(self.items.len() - 1);
        if from == to {
            return Ok(false);
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.notify(&SetChange::Reordered(self.ids()));
        Ok(true)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.position(id).is_some()
    }

    /// Index of an item in the current order.
    #[must_use]
    pub fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == *id)
    }

    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == *id)
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == *id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Ids in the current order.
    #[must_use]
    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(RearrangeableItem::id).collect()
    }
}

impl<'a, T: RearrangeableItem> IntoIterator for &'a OrderedItemSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
