//! Resize engine - aspect-locked resizing of a single item.

use crate::constants::MIN_RESIZE_WIDTH;
use crate::types::{find_item, find_item_mut, Bounds, CanvasItem, ItemId, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Corner handle being dragged
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// +1 for right-side handles (grow with positive dx), -1 for left-side
    pub fn horizontal_sign(&self) -> f64 {
        match self {
            Self::TopRight | Self::BottomRight => 1.0,
            Self::TopLeft | Self::BottomLeft => -1.0,
        }
    }

    /// The corner of `rect` this handle sits on
    pub fn corner(&self, rect: &Bounds) -> Point {
        match self {
            Self::TopLeft => Point::new(rect.left, rect.top),
            Self::TopRight => Point::new(rect.right, rect.top),
            Self::BottomLeft => Point::new(rect.left, rect.bottom),
            Self::BottomRight => Point::new(rect.right, rect.bottom),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot taken when a resize starts
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeState {
    pub item_id: ItemId,
    pub start: Point,
    pub start_width: f64,
    pub start_height: f64,
}

impl ResizeState {
    pub fn aspect_ratio(&self) -> f64 {
        self.start_width / self.start_height
    }
}

/// New `(width, height)` for a pointer position during a resize.
///
/// The pointer delta is converted to canvas units with `scale`. Only the
/// horizontal delta matters: the width follows the handle's side, is floored
/// at `min_width`, and the height is derived from the starting aspect ratio.
/// Both are rounded to whole units.
pub fn resized_dimensions(
    state: &ResizeState,
    pointer: Point,
    handle: ResizeHandle,
    scale: f64,
    min_width: f64,
) -> (f64, f64) {
    let dx = (pointer.x - state.start.x) / scale;
    let width = (state.start_width + handle.horizontal_sign() * dx).max(min_width);
    let height = width / state.aspect_ratio();
    (width.round(), height.round())
}

/// Tracks one resize gesture at a time.
#[derive(Clone, Debug)]
pub struct ImageResize {
    state: Option<ResizeState>,
    min_width: f64,
}

impl Default for ImageResize {
    fn default() -> Self {
        Self::new(MIN_RESIZE_WIDTH)
    }
}

impl ImageResize {
    pub fn new(min_width: f64) -> Self {
        Self { state: None, min_width }
    }

    pub fn state(&self) -> Option<&ResizeState> {
        self.state.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn set_min_width(&mut self, min_width: f64) {
        self.min_width = min_width;
    }

    /// Capture the item's size and the pointer. A missing item is a no-op.
    pub fn start_resize(&mut self, items: &[CanvasItem], id: ItemId, pointer: Point) -> bool {
        let Some(item) = find_item(items, id) else {
            tracing::debug!(item_id = id, "Resize start on missing item");
            return false;
        };
        self.state = Some(ResizeState {
            item_id: id,
            start: pointer,
            start_width: item.width,
            start_height: item.height,
        });
        true
    }

    /// Apply the resize for the current pointer position.
    ///
    /// Returns the new size, or `None` when no resize is active or the item
    /// has disappeared.
    pub fn update_resize(
        &mut self,
        items: &mut [CanvasItem],
        id: ItemId,
        pointer: Point,
        handle: ResizeHandle,
        viewport_scale: f64,
    ) -> Option<(f64, f64)> {
        let state = self.state.as_ref()?;
        let item = find_item_mut(items, id)?;
        let (width, height) = resized_dimensions(state, pointer, handle, viewport_scale, self.min_width);
        item.width = width;
        item.height = height;
        Some((width, height))
    }

    /// Finish the gesture, handing back the starting snapshot.
    pub fn end_resize(&mut self) -> Option<ResizeState> {
        self.state.take()
    }
}
