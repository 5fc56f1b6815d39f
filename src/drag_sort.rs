//! Drag-sort engine - live avoidance reflow and the final reorder commit.
//!
//! While an item is dragged the model is left untouched; `display_index`
//! computes where every other item should be drawn so a gap opens at the
//! hover slot. Only `end_drag` rewrites indices.
//!
//! ## Permutation helpers
//!
//! `move_item`, `insert_item` and `remove_item` are the only functions that
//! change `CanvasItem::index`. Each keeps the indices a contiguous
//! permutation of `0..len`; history entries reuse them to undo and redo.

use crate::constants::DRAG_THRESHOLD;
use crate::layout::GridLayout;
use crate::profile_scope;
use crate::types::{find_item, is_contiguous_permutation, CanvasItem, ItemId, Point};
use crate::viewport::Viewport;
use tracing::{debug, trace};

/// Ephemeral state of one drag gesture (screen space)
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub original_index: Option<usize>,
    pub hover_index: Option<usize>,
    /// Pointer position when the drag started
    pub start: Point,
    /// Pointer offset from the item's top-left corner
    pub offset: Point,
    /// Current top-left corner of the floating item
    pub current: Point,
}

/// A committed move of one item between slots
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reorder {
    pub id: ItemId,
    pub from: usize,
    pub to: usize,
}

impl Reorder {
    pub fn inverse(&self) -> Reorder {
        Reorder {
            id: self.id,
            from: self.to,
            to: self.from,
        }
    }
}

/// Drag-sort engine for one canvas.
#[derive(Clone, Debug)]
pub struct DragSort {
    state: Option<DragState>,
    threshold: f64,
}

impl Default for DragSort {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD)
    }
}

impl DragSort {
    pub fn new(threshold: f64) -> Self {
        Self { state: None, threshold }
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    pub fn hover_index(&self) -> Option<usize> {
        self.state.as_ref().and_then(|s| s.hover_index)
    }

    pub fn original_index(&self) -> Option<usize> {
        self.state.as_ref().and_then(|s| s.original_index)
    }

    /// Screen position of the floating item, while dragging
    pub fn dragging_position(&self) -> Option<Point> {
        self.state.as_ref().map(|s| s.current)
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = threshold;
    }

    /// Begin dragging `id` grabbed at `pointer` (screen space).
    ///
    /// Records the grab offset from the item's projected top-left corner so
    /// later moves keep the same grab point. A missing item is a no-op.
    pub fn start_drag(
        &mut self,
        items: &[CanvasItem],
        id: ItemId,
        pointer: Point,
        viewport: &Viewport,
        layout: &GridLayout,
    ) -> bool {
        let Some(item) = find_item(items, id) else {
            debug!(item_id = id, "Drag start on missing item");
            return false;
        };

        let screen = viewport.canvas_to_screen(layout.grid_position(item.index));
        self.state = Some(DragState {
            original_index: Some(item.index),
            hover_index: Some(item.index),
            start: pointer,
            offset: screen.delta_to(pointer),
            current: screen,
        });
        trace!(item_id = id, index = item.index, "Drag started");
        true
    }

    /// Follow the pointer and recompute the hover slot.
    ///
    /// The slot is the cell nearest the center of the floating item. Returns
    /// true when the hover index changed.
    pub fn update_drag(&mut self, pointer: Point, viewport: &Viewport, layout: &GridLayout, item_count: usize) -> bool {
        profile_scope!("drag_sort::update_drag");

        let Some(state) = self.state.as_mut() else {
            return false;
        };

        state.current = Point::new(pointer.x - state.offset.x, pointer.y - state.offset.y);

        let top_left = viewport.screen_to_canvas(state.current);
        let center_x = top_left.x + layout.cell_width() / 2.0;
        let center_y = top_left.y + layout.cell_height() / 2.0;
        let Some(hover) = layout.target_index(center_x, center_y, item_count) else {
            return false;
        };

        if state.hover_index == Some(hover) {
            return false;
        }
        trace!(from = ?state.hover_index, to = hover, "Hover slot changed");
        state.hover_index = Some(hover);
        true
    }

    /// Slot an item should be drawn in while a drag is in progress.
    ///
    /// The dragged item itself returns `None`: it is drawn as a floating
    /// overlay instead. Items between the original and hover slots shift one
    /// step toward the original slot.
    pub fn display_index(&self, item: &CanvasItem, dragged_id: Option<ItemId>, is_dragging: bool) -> Option<usize> {
        let Some(state) = self.state.as_ref().filter(|_| is_dragging) else {
            return Some(item.index);
        };
        let Some(hover) = state.hover_index else {
            return Some(item.index);
        };
        if Some(item.id()) == dragged_id {
            return None;
        }
        let Some(original) = state.original_index else {
            return Some(item.index);
        };

        let index = item.index;
        if hover < original && index >= hover && index < original {
            Some(index + 1)
        } else if hover > original && index > original && index <= hover {
            Some(index - 1)
        } else {
            Some(index)
        }
    }

    /// Drop the dragged item at the hover slot and end the gesture.
    ///
    /// Returns the committed move, or `None` when nothing moved (no target,
    /// same slot, or the item vanished mid-drag).
    pub fn end_drag(&mut self, items: &mut [CanvasItem], dragged_id: ItemId) -> Option<Reorder> {
        let state = self.state.take()?;
        let (Some(from), Some(to)) = (state.original_index, state.hover_index) else {
            return None;
        };
        if from == to {
            return None;
        }
        // the item may have been reindexed since the drag began
        if find_item(items, dragged_id).map(|item| item.index) != Some(from) {
            debug!(item_id = dragged_id, "Dragged item changed under the gesture, skipping commit");
            return None;
        }
        let reorder = move_item(items, dragged_id, to)?;
        debug!(item_id = reorder.id, from = reorder.from, to = reorder.to, "Reorder committed");
        Some(reorder)
    }

    /// Abort the gesture without touching the model.
    pub fn cancel(&mut self) {
        self.state = None;
    }

    /// True once the pointer has travelled more than the threshold on
    /// either axis since the drag started.
    pub fn has_moved_beyond_threshold(&self, pointer: Point) -> bool {
        self.has_moved_beyond(pointer, self.threshold)
    }

    pub fn has_moved_beyond(&self, pointer: Point, threshold: f64) -> bool {
        let Some(state) = self.state.as_ref() else {
            return false;
        };
        (pointer.x - state.start.x).abs() > threshold || (pointer.y - state.start.y).abs() > threshold
    }
}

// ============================================================================
// Permutation helpers
// ============================================================================

/// Move item `id` to slot `to`, shifting the items in between.
///
/// Returns `None` if the item is missing, `to` is out of range or the item
/// is already there.
pub fn move_item(items: &mut [CanvasItem], id: ItemId, to: usize) -> Option<Reorder> {
    if to >= items.len() {
        return None;
    }
    let from = find_item(items, id)?.index;
    if from == to {
        return None;
    }

    for item in items.iter_mut() {
        if item.id() == id {
            item.index = to;
        } else if to < from && item.index >= to && item.index < from {
            item.index += 1;
        } else if to > from && item.index > from && item.index <= to {
            item.index -= 1;
        }
    }

    debug_assert!(is_contiguous_permutation(items));
    Some(Reorder { id, from, to })
}

/// Insert `item` at its own `index`, shifting later items back.
///
/// The index is clamped to the end of the collection.
pub fn insert_item(items: &mut Vec<CanvasItem>, mut item: CanvasItem) {
    item.index = item.index.min(items.len());
    for other in items.iter_mut() {
        if other.index >= item.index {
            other.index += 1;
        }
    }
    items.push(item);
    debug_assert!(is_contiguous_permutation(items));
}

/// Remove item `id`, closing the gap it leaves.
pub fn remove_item(items: &mut Vec<CanvasItem>, id: ItemId) -> Option<CanvasItem> {
    let position = items.iter().position(|item| item.id() == id)?;
    let removed = items.remove(position);
    for other in items.iter_mut() {
        if other.index > removed.index {
            other.index -= 1;
        }
    }
    debug_assert!(is_contiguous_permutation(items));
    Some(removed)
}
