//! Core types for the canvas interaction core.
//!
//! This module defines the geometric primitives shared by every component
//! and the `CanvasItem` record the grid is made of.

use crate::error::{CanvasError, CanvasResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Stable identifier of a canvas item
pub type ItemId = u64;

// ============================================================================
// Geometry
// ============================================================================

/// A point in either screen or canvas space.
///
/// Screen points are relative to the canvas container's top-left corner
/// unless a function says it takes client coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn delta_to(self, other: Point) -> Point {
        Point::new(other.x - self.x, other.y - self.y)
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two points
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned rectangle given by its edges.
///
/// Used for item cells, item frames and the visible viewport in canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle with its top-left corner at `origin`
    pub fn from_origin(origin: Point, width: f64, height: f64) -> Self {
        Self::new(origin.x, origin.y, origin.x + width, origin.y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Overlap test. Rectangles that only touch along an edge overlap.
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.right < other.left
            || self.left > other.right
            || self.bottom < other.top
            || self.top > other.bottom)
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }
}

/// Client-space rectangle of the canvas container element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Container anchored at the client origin
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Convert a client-space point to container-local screen space
    #[inline]
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Center of the container in local screen space
    pub fn local_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for ContainerRect {
    fn default() -> Self {
        Self::sized(1280.0, 800.0)
    }
}

// ============================================================================
// Canvas Items
// ============================================================================

/// One positioned image in the grid.
///
/// `index` is the item's grid slot. Across a collection the indices always
/// form a contiguous permutation of `0..len`; only the drag-sort helpers and
/// the controller's insert/remove paths change them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasItem {
    id: ItemId,
    pub index: usize,
    pub width: f64,
    pub height: f64,
}

impl CanvasItem {
    pub fn new(id: ItemId, index: usize, width: f64, height: f64) -> Self {
        Self { id, index, width, height }
    }

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Find an item by id
pub fn find_item(items: &[CanvasItem], id: ItemId) -> Option<&CanvasItem> {
    items.iter().find(|item| item.id == id)
}

/// Find an item by id for mutation
pub fn find_item_mut(items: &mut [CanvasItem], id: ItemId) -> Option<&mut CanvasItem> {
    items.iter_mut().find(|item| item.id == id)
}

/// Returns true if the item indices are exactly `{0, .., len-1}`
pub fn is_contiguous_permutation(items: &[CanvasItem]) -> bool {
    let mut seen = vec![false; items.len()];
    for item in items {
        match seen.get_mut(item.index) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

/// Item sizes must be positive and finite.
pub fn validate_size(id: ItemId, width: f64, height: f64) -> CanvasResult<()> {
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(CanvasError::Other(format!(
            "Item {} has non-positive size {}x{}",
            id, width, height
        )));
    }
    Ok(())
}

/// Check an externally supplied collection before the canvas takes it over.
pub fn validate_items(items: &[CanvasItem]) -> CanvasResult<()> {
    let mut ids = HashSet::with_capacity(items.len());
    for item in items {
        if !ids.insert(item.id) {
            return Err(CanvasError::DuplicateItem(item.id));
        }
        validate_size(item.id, item.width, item.height)?;
    }
    if !is_contiguous_permutation(items) {
        return Err(CanvasError::BrokenPermutation { count: items.len() });
    }
    Ok(())
}
