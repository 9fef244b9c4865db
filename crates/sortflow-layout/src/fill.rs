#![forbid(unsafe_code)]

//! Vertical fill-flow.
//!
//! Children are stacked top-to-bottom in ascending sort-key order with a fixed
//! gap between them. When a sort-key change moves a child, its displayed `y`
//! glides from the old slot to the new one (see [`FlowConfig::layout_duration`]);
//! newly added children appear in place without animating.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use sortflow_core::animation::{Animation, EasingFn, Tween, ease_out_quint};
use sortflow_core::geometry::{Point, Rect};

use crate::{FlowContainer, SortKey};

/// Spacing and animation settings for a [`FillFlow`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowConfig {
    /// Vertical gap between consecutive children (default: 1.0).
    pub spacing: f32,
    /// Width reported in children's bounding boxes (default: 0.0, set by the
    /// owner once the viewport is known).
    pub width: f32,
    /// How long a moved child takes to glide to its new position
    /// (default: 160 ms). Zero disables animation.
    pub layout_duration: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            width: 0.0,
            layout_duration: Duration::from_millis(160),
        }
    }
}

impl FlowConfig {
    #[must_use]
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width.max(0.0);
        self
    }

    #[must_use]
    pub fn with_layout_duration(mut self, duration: Duration) -> Self {
        self.layout_duration = duration;
        self
    }
}

#[derive(Debug, Clone)]
struct FlowChild<K> {
    key: K,
    height: f32,
    sort_key: SortKey,
    /// Insertion sequence; breaks sort-key ties.
    seq: u64,
    y: Tween,
}

/// Slot-ordered vertical flow with animated re-layout.
#[derive(Debug, Clone)]
pub struct FillFlow<K> {
    config: FlowConfig,
    easing: EasingFn,
    origin: Point,
    /// Children in insertion order.
    children: Vec<FlowChild<K>>,
    /// Key → position in `children`.
    lookup: HashMap<K, usize>,
    /// Positions in `children`, in visual order.
    order: Vec<usize>,
    next_seq: u64,
    content_height: f32,
}

impl<K: Copy + Eq + Hash> Default for FillFlow<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> FillFlow<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FlowConfig::default())
    }

    #[must_use]
    pub fn with_config(config: FlowConfig) -> Self {
        Self {
            config,
            easing: ease_out_quint,
            origin: Point::ZERO,
            children: Vec::new(),
            lookup: HashMap::new(),
            order: Vec::new(),
            next_seq: 0,
            content_height: 0.0,
        }
    }

    /// Easing used for layout glides (default: ease-out quint).
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    #[must_use]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn set_width(&mut self, width: f32) {
        self.config.width = width.max(0.0);
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.config.spacing = spacing.max(0.0);
        self.relayout();
    }

    /// Whether any child is still gliding to its laid-out position.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.children.iter().any(|c| !c.y.is_complete())
    }

    /// The resting (post-animation) bounding box of a child.
    #[must_use]
    pub fn layout_box(&self, key: &K) -> Option<Rect> {
        let child = &self.children[*self.lookup.get(key)?];
        Some(Rect::new(
            0.0,
            child.y.target(),
            self.config.width,
            child.height,
        ))
    }

    /// Where a newcomer starts, so it doesn't glide in from the top.
    fn bottom(&self) -> f32 {
        if self.children.is_empty() {
            0.0
        } else {
            self.content_height + self.config.spacing
        }
    }

    /// Insert or update a child without re-layout. Returns `true` for a
    /// newcomer, which rests at `bottom`.
    fn place(&mut self, key: K, height: f32, sort_key: SortKey, bottom: f32) -> bool {
        if let Some(&i) = self.lookup.get(&key) {
            let child = &mut self.children[i];
            child.height = height;
            child.sort_key = sort_key;
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.lookup.insert(key, self.children.len());
        self.children.push(FlowChild {
            key,
            height,
            sort_key,
            seq,
            y: Tween::settled(bottom).easing(self.easing),
        });
        true
    }

    fn rebuild_lookup(&mut self) {
        self.lookup.clear();
        self.lookup
            .extend(self.children.iter().enumerate().map(|(i, c)| (c.key, i)));
    }

    /// Re-sort and assign target positions. Children whose target changed
    /// start gliding; children that never had a position snap.
    fn relayout(&mut self) {
        let children = &self.children;
        self.order.clear();
        self.order.extend(0..children.len());
        self.order
            .sort_by_key(|&i| (children[i].sort_key, children[i].seq));

        let spacing = self.config.spacing;
        let duration = self.config.layout_duration;
        let mut y = 0.0f32;
        for (n, &i) in self.order.iter().enumerate() {
            if n > 0 {
                y += spacing;
            }
            let child = &mut self.children[i];
            if child.y.target() != y {
                child.y.retarget(y, duration);
            }
            y += child.height;
        }
        self.content_height = y;
        sortflow_core::trace!(children = self.order.len(), content_height = y, "flow relayout");
    }
}

impl<K: Copy + Eq + Hash> FlowContainer<K> for FillFlow<K> {
    fn add(&mut self, key: K, height: f32, sort_key: SortKey) {
        let bottom = self.bottom();
        self.place(key, height.max(0.0), sort_key, bottom);
        self.relayout();
    }

    fn add_many(&mut self, children: impl IntoIterator<Item = (K, f32, SortKey)>) {
        let spacing = self.config.spacing;
        let mut bottom = self.bottom();
        for (key, height, sort_key) in children {
            let height = height.max(0.0);
            if self.place(key, height, sort_key, bottom) {
                bottom += height + spacing;
            }
        }
        self.relayout();
    }

    fn remove(&mut self, key: &K) -> bool {
        let Some(i) = self.lookup.remove(key) else {
            return false;
        };
        self.children.remove(i);
        self.rebuild_lookup();
        self.relayout();
        true
    }

    fn clear(&mut self) {
        self.children.clear();
        self.lookup.clear();
        self.order.clear();
        self.content_height = 0.0;
    }

    fn len(&self) -> usize {
        self.children.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.lookup.contains_key(key)
    }

    fn sort_key(&self, key: &K) -> Option<SortKey> {
        self.lookup.get(key).map(|&i| self.children[i].sort_key)
    }

    fn set_sort_keys(&mut self, keys: &[(K, SortKey)]) {
        for (key, sort_key) in keys {
            if let Some(&i) = self.lookup.get(key) {
                self.children[i].sort_key = *sort_key;
            }
        }
        self.relayout();
    }

    fn set_height(&mut self, key: &K, height: f32) {
        if let Some(&i) = self.lookup.get(key) {
            self.children[i].height = height.max(0.0);
            self.relayout();
        }
    }

    fn bounding_box(&self, key: &K) -> Option<Rect> {
        let child = &self.children[*self.lookup.get(key)?];
        Some(Rect::new(
            0.0,
            child.y.current(),
            self.config.width,
            child.height,
        ))
    }

    fn flowing_keys(&self) -> Vec<K> {
        self.order.iter().map(|&i| self.children[i].key).collect()
    }

    fn spacing(&self) -> f32 {
        self.config.spacing
    }

    fn content_height(&self) -> f32 {
        self.content_height
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn update(&mut self, dt: Duration) {
        for child in &mut self.children {
            child.y.tick(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow_of(heights: &[(u32, f32)]) -> FillFlow<u32> {
        let mut flow = FillFlow::with_config(FlowConfig::default().with_width(100.0));
        for (slot, &(key, h)) in heights.iter().enumerate() {
            flow.add(key, h, slot as SortKey);
        }
        flow
    }

    #[test]
    fn stacks_with_spacing() {
        let flow = flow_of(&[(1, 50.0), (2, 30.0), (3, 20.0)]);
        assert_eq!(flow.bounding_box(&1), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        assert_eq!(flow.bounding_box(&2), Some(Rect::new(0.0, 51.0, 100.0, 30.0)));
        assert_eq!(flow.bounding_box(&3), Some(Rect::new(0.0, 82.0, 100.0, 20.0)));
        assert_eq!(flow.content_height(), 102.0);
    }

    #[test]
    fn empty_flow_has_zero_height() {
        let flow: FillFlow<u32> = FillFlow::new();
        assert!(flow.is_empty());
        assert_eq!(flow.content_height(), 0.0);
        assert!(flow.flowing_keys().is_empty());
    }

    #[test]
    fn orders_by_sort_key_then_insertion() {
        let mut flow = FillFlow::new();
        flow.add('a', 10.0, 5);
        flow.add('b', 10.0, 1);
        flow.add('c', 10.0, 5);
        assert_eq!(flow.flowing_keys(), vec!['b', 'a', 'c']);
    }

    #[test]
    fn sort_key_change_animates() {
        let mut flow = flow_of(&[(1, 10.0), (2, 10.0)]);
        flow.set_sort_keys(&[(1, 1), (2, 0)]);
        assert_eq!(flow.flowing_keys(), vec![2, 1]);

        // Resting boxes are already final...
        assert_eq!(flow.layout_box(&2).map(|r| r.y), Some(0.0));
        assert_eq!(flow.layout_box(&1).map(|r| r.y), Some(11.0));
        // ...displayed boxes still start where they were.
        assert_eq!(flow.bounding_box(&2).map(|r| r.y), Some(11.0));
        assert!(flow.is_animating());

        flow.update(Duration::from_millis(200));
        assert!(!flow.is_animating());
        assert_eq!(flow.bounding_box(&2).map(|r| r.y), Some(0.0));
        assert_eq!(flow.bounding_box(&1).map(|r| r.y), Some(11.0));
    }

    #[test]
    fn zero_duration_snaps() {
        let mut flow = FillFlow::with_config(
            FlowConfig::default().with_layout_duration(Duration::ZERO),
        );
        flow.add(1u32, 10.0, 0);
        flow.add(2u32, 10.0, 1);
        flow.set_sort_keys(&[(1, 1), (2, 0)]);
        assert!(!flow.is_animating());
        assert_eq!(flow.bounding_box(&2).map(|r| r.y), Some(0.0));
    }

    #[test]
    fn new_children_do_not_animate() {
        let flow = flow_of(&[(1, 10.0), (2, 10.0), (3, 10.0)]);
        assert!(!flow.is_animating());
    }

    #[test]
    fn batch_add_matches_one_by_one() {
        let mut one_by_one = flow_of(&[(1, 10.0)]);
        let mut batch = flow_of(&[(1, 10.0)]);
        for (key, height, slot) in [(2u32, 5.0, 1), (3, 20.0, 2), (4, 7.0, 3)] {
            one_by_one.add(key, height, slot);
        }
        batch.add_many([(2u32, 5.0, 1), (3, 20.0, 2), (4, 7.0, 3)]);

        assert_eq!(batch.flowing_keys(), one_by_one.flowing_keys());
        assert_eq!(batch.content_height(), one_by_one.content_height());
        for key in 1..=4 {
            assert_eq!(batch.bounding_box(&key), one_by_one.bounding_box(&key));
        }
        // Newcomers rest where they were appended.
        assert!(!batch.is_animating());
    }

    #[test]
    fn remove_closes_gap() {
        let mut flow = flow_of(&[(1, 10.0), (2, 10.0), (3, 10.0)]);
        assert!(flow.remove(&2));
        assert!(!flow.remove(&2));
        assert_eq!(flow.flowing_keys(), vec![1, 3]);
        assert_eq!(flow.layout_box(&3).map(|r| r.y), Some(11.0));
        assert_eq!(flow.content_height(), 21.0);
        assert_eq!(flow.sort_key(&3), Some(2));
    }

    #[test]
    fn re_adding_updates_in_place() {
        let mut flow = flow_of(&[(1, 10.0), (2, 10.0)]);
        flow.add(1, 40.0, 7);
        assert_eq!(flow.len(), 2);
        assert_eq!(flow.sort_key(&1), Some(7));
        assert_eq!(flow.flowing_keys(), vec![2, 1]);
        assert_eq!(flow.content_height(), 51.0);
    }

    #[test]
    fn set_height_relayouts() {
        let mut flow = flow_of(&[(1, 10.0), (2, 10.0)]);
        flow.set_height(&1, 30.0);
        assert_eq!(flow.layout_box(&2).map(|r| r.y), Some(31.0));
    }

    #[test]
    fn to_local_uses_origin() {
        let mut flow: FillFlow<u32> = FillFlow::new();
        flow.set_origin(Point::new(5.0, 100.0));
        assert_eq!(flow.to_local(Point::new(10.0, 130.0)), Point::new(5.0, 30.0));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut flow = flow_of(&[(1, 10.0)]);
        flow.set_sort_keys(&[(9, 0)]);
        flow.set_height(&9, 5.0);
        assert_eq!(flow.bounding_box(&9), None);
        assert_eq!(flow.sort_key(&9), None);
        assert!(!flow.contains(&9));
    }

    #[test]
    fn clear_empties() {
        let mut flow = flow_of(&[(1, 10.0), (2, 10.0)]);
        flow.clear();
        assert!(flow.is_empty());
        assert_eq!(flow.content_height(), 0.0);
        assert_eq!(flow.bounding_box(&1), None);
    }
}
