//! Pointer press, move and release.
//!
//! ## Performance Notes
//!
//! Pointer move is the hot path. Hit testing goes through the R-tree and
//! the drag reflow only recomputes the hover slot; frames are derived on
//! demand by the host.

use super::{Canvas, PendingDrag};
use crate::constants::RESIZE_HANDLE_HIT_SIZE;
use crate::drag_sort::move_item;
use crate::history::{ActionKind, HistoryEntry};
use crate::input::{InteractionState, MouseButton, PointerEvent, TransitionContext, TransitionEvent};
use crate::profile_scope;
use crate::resize::ResizeHandle;
use crate::spatial_index::item_frame;
use crate::types::{find_item, find_item_mut, Bounds, CanvasItem, ItemId, Point};
use tracing::{debug, trace};

impl Canvas {
    pub fn handle_pointer_down(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_down");

        let local = self.container.to_local(event.position);
        self.input.handle_pointer_down(event.position);

        if self.input.should_pan(Some(event)) {
            if self.state.start_pan() {
                self.transform.start_pan(local);
            }
            return;
        }

        // a press without a matching release leaves a stale armed drag
        if self.pending_drag.take().is_some() {
            self.state.disarm_drag();
        }
        if event.button == Some(MouseButton::Secondary) || self.state.state().is_gesture() {
            return;
        }

        // Handles sit on the selected item's corners and win over the item
        if let Some((id, handle)) = self.handle_at(local) {
            if self.state.start_resize(handle) && !self.resize.start_resize(&self.items, id, local) {
                self.state.cancel();
            }
            return;
        }

        match self.item_at(local) {
            Some(id) => {
                self.state.select(id);
                self.state.prepare_drag(id);
                self.pending_drag = Some(PendingDrag { id, start: local });
                trace!(item_id = id, "Pressed item");
            }
            None => self.state.deselect(),
        }
    }

    pub fn handle_pointer_move(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_move");

        let local = self.container.to_local(event.position);
        self.input.handle_pointer_move(event.position);

        match self.state.state() {
            InteractionState::Panning => self.transform.update_pan(local),
            InteractionState::DraggingImage => self.update_drag(local),
            InteractionState::Resizing => self.update_resize(local),
            _ => {
                if self.pending_drag.is_some() && self.input.has_moved_beyond_threshold() {
                    self.promote_pending_drag(local);
                }
            }
        }
    }

    pub fn handle_pointer_up(&mut self, event: &PointerEvent) {
        profile_scope!("handle_pointer_up");

        self.input.handle_pointer_up(event.position);

        match self.state.state() {
            InteractionState::Panning => {
                self.transform.end_pan();
                let space = self.input.key_state().space;
                self.state.send(TransitionEvent::EndPan, TransitionContext::with_space(space));
            }
            InteractionState::DraggingImage => self.finish_drag(),
            InteractionState::Resizing => self.finish_resize(),
            _ => {
                if self.pending_drag.take().is_some() {
                    // released before the threshold: a click
                    self.state.disarm_drag();
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    /// Topmost item under a local screen point
    pub fn item_at(&self, local: Point) -> Option<ItemId> {
        profile_scope!("hit_test_items");

        let canvas = self.transform.screen_to_canvas(local);
        self.spatial
            .query_point(canvas.x, canvas.y)
            .into_iter()
            .filter_map(|id| find_item(&self.items, id))
            .max_by_key(|item| item.index)
            .map(CanvasItem::id)
    }

    /// Resize handle of the selected item under a local screen point
    pub fn handle_at(&self, local: Point) -> Option<(ItemId, ResizeHandle)> {
        let id = self.state.selected_id()?;
        let item = find_item(&self.items, id)?;
        let frame = item_frame(item, &self.layout);
        let top_left = self.transform.canvas_to_screen(Point::new(frame.left, frame.top));
        let bottom_right = self.transform.canvas_to_screen(Point::new(frame.right, frame.bottom));
        let screen = Bounds::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y);

        let half = RESIZE_HANDLE_HIT_SIZE / 2.0;
        ResizeHandle::ALL
            .into_iter()
            .find(|handle| {
                let corner = handle.corner(&screen);
                (local.x - corner.x).abs() <= half && (local.y - corner.y).abs() <= half
            })
            .map(|handle| (id, handle))
    }

    // ------------------------------------------------------------------
    // Drag
    // ------------------------------------------------------------------

    fn promote_pending_drag(&mut self, local: Point) {
        let Some(pending) = self.pending_drag.take() else {
            return;
        };
        if !self.state.start_drag(pending.id) {
            self.state.disarm_drag();
            return;
        }
        let viewport = self.transform.viewport();
        if !self
            .drag
            .start_drag(&self.items, pending.id, pending.start, &viewport, &self.layout)
        {
            self.state.cancel();
            return;
        }
        debug!(item_id = pending.id, "Drag started");
        self.update_drag(local);
    }

    fn update_drag(&mut self, local: Point) {
        if self.drag.has_moved_beyond_threshold(local) {
            self.state.mark_moved();
        }
        let viewport = self.transform.viewport();
        self.drag
            .update_drag(local, &viewport, &self.layout, self.items.len());
    }

    fn finish_drag(&mut self) {
        let dragged = self.state.dragged_id();
        let moved = self.state.end_drag();

        let reorder = match dragged {
            Some(id) if moved => self.drag.end_drag(&mut self.items, id),
            _ => {
                self.drag.cancel();
                None
            }
        };

        if let Some(reorder) = reorder {
            let (id, from, to) = (reorder.id, reorder.from, reorder.to);
            self.history.push(HistoryEntry::new(
                ActionKind::Reorder,
                move |items: &mut Vec<CanvasItem>| {
                    move_item(items, id, from);
                },
                move |items: &mut Vec<CanvasItem>| {
                    move_item(items, id, to);
                },
            ));
            self.rebuild_spatial_index();
        }
    }

    // ------------------------------------------------------------------
    // Resize
    // ------------------------------------------------------------------

    fn update_resize(&mut self, local: Point) {
        let (Some(handle), Some(state)) = (self.state.resize_handle(), self.resize.state().copied()) else {
            return;
        };
        let scale = self.transform.scale();
        if self
            .resize
            .update_resize(&mut self.items, state.item_id, local, handle, scale)
            .is_some()
        {
            if let Some(item) = find_item(&self.items, state.item_id) {
                self.spatial.insert(state.item_id, item_frame(item, &self.layout));
            }
        }
    }

    fn finish_resize(&mut self) {
        self.state.end_resize();
        let Some(start) = self.resize.end_resize() else {
            return;
        };
        let Some(item) = find_item(&self.items, start.item_id) else {
            return;
        };

        let (width, height) = item.size();
        if width == start.start_width && height == start.start_height {
            return;
        }
        let (id, old_width, old_height) = (start.item_id, start.start_width, start.start_height);
        debug!(item_id = id, width, height, "Resize committed");
        self.history.push(HistoryEntry::new(
            ActionKind::Resize,
            move |items: &mut Vec<CanvasItem>| set_item_size(items, id, old_width, old_height),
            move |items: &mut Vec<CanvasItem>| set_item_size(items, id, width, height),
        ));
        self.rebuild_spatial_index();
    }
}

pub(super) fn set_item_size(items: &mut [CanvasItem], id: ItemId, width: f64, height: f64) {
    if let Some(item) = find_item_mut(items, id) {
        item.width = width;
        item.height = height;
    }
}
