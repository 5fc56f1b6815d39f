//! Collection edits and undo/redo.
//!
//! Every edit goes through the permutation helpers in `drag_sort` so the
//! indices stay a contiguous `0..len`, and every edit is recorded.

use super::Canvas;
use crate::drag_sort::{insert_item, remove_item};
use crate::history::{ActionKind, HistoryEntry};
use crate::error::CanvasResult;
use crate::types::{find_item, validate_size, CanvasItem, ItemId};
use tracing::debug;

impl Canvas {
    /// Append an item in the next free slot. Returns its id.
    pub fn add_item(&mut self, width: f64, height: f64) -> CanvasResult<ItemId> {
        self.add_item_at(self.items.len(), width, height)
    }

    /// Insert an item at `index` (clamped to the end), shifting later
    /// items back one slot. Sizes must be positive and finite.
    pub fn add_item_at(&mut self, index: usize, width: f64, height: f64) -> CanvasResult<ItemId> {
        validate_size(self.next_id, width, height)?;
        let id = self.next_id;
        self.next_id += 1;

        let item = CanvasItem::new(id, index.min(self.items.len()), width, height);
        insert_item(&mut self.items, item.clone());
        debug!(item_id = id, index = item.index, "Item added");

        self.history.push(HistoryEntry::new(
            ActionKind::Add,
            move |items: &mut Vec<CanvasItem>| {
                remove_item(items, id);
            },
            move |items: &mut Vec<CanvasItem>| insert_item(items, item.clone()),
        ));
        self.rebuild_spatial_index();
        Ok(id)
    }

    /// Remove an item, closing the gap. A gesture on the item is cancelled
    /// first. Returns the removed item, or `None` if it does not exist.
    pub fn remove_item(&mut self, id: ItemId) -> Option<CanvasItem> {
        find_item(&self.items, id)?;
        if self.gesture_references(id) {
            self.cancel();
        }

        let removed = remove_item(&mut self.items, id)?;
        if self.state.selected_id() == Some(id) {
            self.state.deselect();
        }
        debug!(item_id = id, index = removed.index, "Item removed");

        let restored = removed.clone();
        self.history.push(HistoryEntry::new(
            ActionKind::Remove,
            move |items: &mut Vec<CanvasItem>| insert_item(items, restored.clone()),
            move |items: &mut Vec<CanvasItem>| {
                remove_item(items, id);
            },
        ));
        self.rebuild_spatial_index();
        Some(removed)
    }

    /// Revert the last edit. Refused while a gesture is in progress.
    pub fn undo(&mut self) -> bool {
        if self.is_busy() {
            debug!(state = ?self.state.state(), "Undo refused during gesture");
            return false;
        }
        let applied = self.history.undo(&mut self.items);
        if applied {
            self.after_history_step();
        }
        applied
    }

    /// Reapply the last undone edit. Refused while a gesture is in progress.
    pub fn redo(&mut self) -> bool {
        if self.is_busy() {
            debug!(state = ?self.state.state(), "Redo refused during gesture");
            return false;
        }
        let applied = self.history.redo(&mut self.items);
        if applied {
            self.after_history_step();
        }
        applied
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn after_history_step(&mut self) {
        if let Some(selected) = self.state.selected_id() {
            if find_item(&self.items, selected).is_none() {
                self.state.deselect();
            }
        }
        self.rebuild_spatial_index();
    }

    fn gesture_references(&self, id: ItemId) -> bool {
        self.state.dragged_id() == Some(id)
            || self.pending_drag.is_some_and(|p| p.id == id)
            || self.resize.state().is_some_and(|s| s.item_id == id)
    }
}
