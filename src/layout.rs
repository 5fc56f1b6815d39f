//! Grid layout - maps item indices to cells in canvas space and back.
//!
//! All functions here are pure functions of the index and the layout
//! configuration. The number of items is passed in where it matters.

use crate::constants::{DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH, DEFAULT_COLS, DEFAULT_GAP, DEFAULT_PADDING};
use crate::error::{CanvasError, CanvasResult};
use crate::types::{Bounds, CanvasItem, Point};
use serde::{Deserialize, Serialize};

/// Grid geometry, all lengths in canvas units
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: usize,
    pub cell_width: f64,
    pub cell_height: f64,
    pub gap: f64,
    pub padding: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            gap: DEFAULT_GAP,
            padding: DEFAULT_PADDING,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> CanvasResult<()> {
        if self.cols == 0 {
            return Err(CanvasError::InvalidGrid("cols must be at least 1".into()));
        }
        if !(self.cell_width > 0.0 && self.cell_height > 0.0) {
            return Err(CanvasError::InvalidGrid(format!(
                "cell size must be positive, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        if !(self.gap >= 0.0 && self.padding >= 0.0) {
            return Err(CanvasError::InvalidGrid("gap and padding must not be negative".into()));
        }
        Ok(())
    }
}

/// Fixed-column grid of equally sized cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    config: GridConfig,
}

impl GridLayout {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }

    pub fn cell_width(&self) -> f64 {
        self.config.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.config.cell_height
    }

    /// Distance between the origins of horizontally adjacent cells
    #[inline]
    fn column_pitch(&self) -> f64 {
        self.config.cell_width + self.config.gap
    }

    /// Distance between the origins of vertically adjacent cells
    #[inline]
    fn row_pitch(&self) -> f64 {
        self.config.cell_height + self.config.gap
    }

    /// Number of rows needed for `item_count` items
    pub fn row_count(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.config.cols)
    }

    /// Canvas-space top-left corner of the cell at `index`
    pub fn grid_position(&self, index: usize) -> Point {
        let col = index % self.config.cols;
        let row = index / self.config.cols;
        Point::new(
            self.config.padding + col as f64 * self.column_pitch(),
            self.config.padding + row as f64 * self.row_pitch(),
        )
    }

    /// Canvas-space rectangle of the cell at `index`
    pub fn cell_rect(&self, index: usize) -> Bounds {
        Bounds::from_origin(self.grid_position(index), self.config.cell_width, self.config.cell_height)
    }

    /// Index of the cell nearest to a canvas-space point.
    ///
    /// The column is clamped into the grid and the row into the occupied
    /// rows, then the linear index is clamped to the last item, so a drop
    /// past the end lands on the last slot and never opens a gap. Returns
    /// `None` for an empty grid.
    pub fn target_index(&self, canvas_x: f64, canvas_y: f64, item_count: usize) -> Option<usize> {
        if item_count == 0 {
            return None;
        }
        let cols = self.config.cols;
        let last_row = (item_count - 1) / cols;

        let col = ((canvas_x - self.config.padding) / self.column_pitch()).round();
        let row = ((canvas_y - self.config.padding) / self.row_pitch()).round();

        let col = col.clamp(0.0, (cols - 1) as f64) as usize;
        let row = row.clamp(0.0, last_row as f64) as usize;

        Some((row * cols + col).min(item_count - 1))
    }

    /// Returns true if the cell at `index` overlaps `bounds`.
    ///
    /// Cells exactly touching an edge of the bounds count as visible.
    pub fn is_in_viewport(&self, index: usize, bounds: &Bounds) -> bool {
        self.cell_rect(index).intersects(bounds)
    }

    /// Items whose cells overlap `bounds`
    pub fn visible_items<'a>(&self, items: &'a [CanvasItem], bounds: &Bounds) -> Vec<&'a CanvasItem> {
        items
            .iter()
            .filter(|item| self.is_in_viewport(item.index, bounds))
            .collect()
    }

    /// Width of the whole grid frame including padding
    pub fn frame_width(&self) -> f64 {
        let cols = self.config.cols as f64;
        self.config.padding * 2.0 + cols * self.config.cell_width + (cols - 1.0) * self.config.gap
    }

    /// Height of the whole grid frame for `item_count` items
    pub fn frame_height(&self, item_count: usize) -> f64 {
        let rows = self.row_count(item_count);
        self.config.padding * 2.0
            + rows as f64 * self.config.cell_height
            + rows.saturating_sub(1) as f64 * self.config.gap
    }
}
