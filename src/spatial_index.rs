//! Spatial Index Module
//!
//! R-tree over item frames in canvas space, used for pointer hit testing
//! and viewport culling. Point queries are O(log n) instead of a scan over
//! every item.

use crate::layout::GridLayout;
use crate::types::{Bounds, CanvasItem, ItemId};
use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

/// An item's frame in canvas space
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub item_id: ItemId,
    pub bounds: Bounds,
}

impl SpatialEntry {
    pub fn new(item_id: ItemId, bounds: Bounds) -> Self {
        Self { item_id, bounds }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.left, self.bounds.top],
            [self.bounds.right, self.bounds.bottom],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.item_id == other.item_id
    }
}

/// Frame of an item placed at its grid slot: the cell origin plus the
/// item's own size.
pub fn item_frame(item: &CanvasItem, layout: &GridLayout) -> Bounds {
    Bounds::from_origin(layout.grid_position(item.index), item.width, item.height)
}

/// Spatial index for canvas items using an R-tree.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ItemId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Build an index of every item at its committed slot.
    pub fn from_items(items: &[CanvasItem], layout: &GridLayout) -> Self {
        let mut index = Self::new();
        index.rebuild(items, layout);
        index
    }

    pub fn insert(&mut self, item_id: ItemId, bounds: Bounds) {
        if let Some(old_entry) = self.entries.remove(&item_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(item_id, bounds);
        self.tree.insert(entry);
        self.entries.insert(item_id, entry);
    }

    pub fn remove(&mut self, item_id: ItemId) -> bool {
        if let Some(entry) = self.entries.remove(&item_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    pub fn bounds_of(&self, item_id: ItemId) -> Option<Bounds> {
        self.entries.get(&item_id).map(|e| e.bounds)
    }

    /// Items whose frame contains the canvas-space point.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<ItemId> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .map(|entry| entry.item_id)
            .collect()
    }

    /// Items whose frame intersects a canvas-space rectangle.
    pub fn query_rect(&self, bounds: &Bounds) -> Vec<ItemId> {
        let envelope = AABB::from_corners([bounds.left, bounds.top], [bounds.right, bounds.bottom]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.item_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild(&mut self, items: &[CanvasItem], layout: &GridLayout) {
        let entries: Vec<SpatialEntry> = items
            .iter()
            .map(|item| SpatialEntry::new(item.id(), item_frame(item, layout)))
            .collect();

        self.entries = entries.iter().map(|e| (e.item_id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
