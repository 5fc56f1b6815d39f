//! What the host draws: item frames, the floating drag overlay, the
//! container transform and the cursor.

use super::Canvas;
use crate::types::{find_item, Bounds, ItemId, Point};
use crate::viewport::TransformStyle;
use serde::Serialize;

/// Where one item is drawn, in canvas space
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ItemFrame {
    pub id: ItemId,
    /// Committed slot
    pub index: usize,
    /// Slot it is drawn in; `None` for the item being dragged
    pub display_index: Option<usize>,
    pub bounds: Bounds,
    /// Drawn as the overlay instead of in the grid
    pub hidden: bool,
}

/// The dragged item following the pointer, in local screen space
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DragOverlay {
    pub id: ItemId,
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub hover_index: Option<usize>,
}

impl Canvas {
    /// Frames of every item in committed grid order, with the live reflow
    /// applied while a drag is in progress.
    pub fn frames(&self) -> Vec<ItemFrame> {
        let dragged = self.state.dragged_id();
        let is_dragging = self.state.is_dragging();

        self.items_by_index()
            .into_iter()
            .map(|item| {
                let display_index = self.drag.display_index(item, dragged, is_dragging);
                let slot = display_index.unwrap_or(item.index);
                ItemFrame {
                    id: item.id(),
                    index: item.index,
                    display_index,
                    bounds: Bounds::from_origin(self.layout.grid_position(slot), item.width, item.height),
                    hidden: display_index.is_none(),
                }
            })
            .collect()
    }

    pub fn drag_overlay(&self) -> Option<DragOverlay> {
        if !self.state.is_dragging() {
            return None;
        }
        let id = self.state.dragged_id()?;
        let item = find_item(&self.items, id)?;
        let position = self.drag.dragging_position()?;
        let scale = self.transform.scale();
        Some(DragOverlay {
            id,
            position,
            width: item.width * scale,
            height: item.height * scale,
            hover_index: self.drag.hover_index(),
        })
    }

    pub fn transform_style(&self) -> TransformStyle {
        self.transform.transform_style()
    }

    /// CSS cursor name for the current state
    pub fn cursor(&self) -> &'static str {
        self.state.state().cursor()
    }

    /// Ids of items whose frames intersect the visible area, in grid order
    pub fn visible_items(&self) -> Vec<ItemId> {
        let bounds = self.transform.viewport_bounds(&self.container);
        let mut visible: Vec<(usize, ItemId)> = self
            .spatial
            .query_rect(&bounds)
            .into_iter()
            .filter_map(|id| find_item(&self.items, id).map(|item| (item.index, id)))
            .collect();
        visible.sort_unstable();
        visible.into_iter().map(|(_, id)| id).collect()
    }

    /// Canvas-space size of the whole grid frame
    pub fn frame_size(&self) -> (f64, f64) {
        (self.layout.frame_width(), self.layout.frame_height(self.items.len()))
    }
}
