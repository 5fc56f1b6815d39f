//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestCanvasBuilder` - Builder for canvases on a small, easy-to-reason grid
//! - Event shorthands like `down()`, `move_to()`, `key_down()`
//! - Assertions on item order
//!
//! The default test grid has 4 columns of 100x100 cells, a 10 unit gap and
//! 20 units of padding, so cell `i` starts at
//! `(20 + (i % 4) * 110, 20 + (i / 4) * 110)`. With the default viewport
//! and a container at the client origin, screen and canvas coordinates are
//! the same.

#![allow(dead_code)]

use gridboard::input::{InputEvent, KeyCode, KeyEvent, MouseButton, PointerEvent, WheelEvent};
use gridboard::layout::GridConfig;
use gridboard::{Canvas, CanvasItem, CanvasSettings, ContainerRect, ItemId, Point, Viewport};

// ============================================================================
// TestCanvasBuilder
// ============================================================================

/// Builder for test canvases.
///
/// # Example
/// ```ignore
/// let canvas = TestCanvasBuilder::new()
///     .with_items(8)
///     .with_zoom(1.5)
///     .build();
/// ```
pub struct TestCanvasBuilder {
    settings: CanvasSettings,
    sizes: Vec<(f64, f64)>,
    container: ContainerRect,
    viewport: Viewport,
}

impl Default for TestCanvasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCanvasBuilder {
    pub fn new() -> Self {
        Self {
            settings: test_settings(),
            sizes: Vec::new(),
            container: ContainerRect::sized(1000.0, 800.0),
            viewport: Viewport::default(),
        }
    }

    /// Add `count` items filling their 100x100 cells.
    pub fn with_items(mut self, count: usize) -> Self {
        self.sizes.extend(std::iter::repeat_n((100.0, 100.0), count));
        self
    }

    pub fn with_item(mut self, width: f64, height: f64) -> Self {
        self.sizes.push((width, height));
        self
    }

    pub fn with_settings(mut self, f: impl FnOnce(&mut CanvasSettings)) -> Self {
        f(&mut self.settings);
        self
    }

    pub fn with_container(mut self, container: ContainerRect) -> Self {
        self.container = container;
        self
    }

    pub fn with_zoom(mut self, scale: f64) -> Self {
        self.viewport.scale = scale;
        self
    }

    pub fn with_offset(mut self, x: f64, y: f64) -> Self {
        self.viewport.x = x;
        self.viewport.y = y;
        self
    }

    pub fn build(self) -> Canvas {
        let items = self
            .sizes
            .iter()
            .enumerate()
            .map(|(i, (w, h))| CanvasItem::new(i as ItemId, i, *w, *h))
            .collect();
        let mut canvas = Canvas::with_items(self.settings, items).expect("valid test canvas");
        canvas.set_container(self.container);
        canvas.set_viewport(self.viewport);
        canvas
    }
}

/// Settings for the small test grid
pub fn test_settings() -> CanvasSettings {
    CanvasSettings {
        grid: GridConfig {
            cols: 4,
            cell_width: 100.0,
            cell_height: 100.0,
            gap: 10.0,
            padding: 20.0,
        },
        min_resize_width: 20.0,
        ..CanvasSettings::default()
    }
}

/// Canvas with `count` items on the test grid
pub fn canvas_with_items(count: usize) -> Canvas {
    TestCanvasBuilder::new().with_items(count).build()
}

/// Top-left corner of cell `index` on the test grid
pub fn cell_origin(index: usize) -> Point {
    Point::new(20.0 + (index % 4) as f64 * 110.0, 20.0 + (index / 4) as f64 * 110.0)
}

// ============================================================================
// Event shorthands
// ============================================================================

pub fn down(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown(PointerEvent::at(x, y))
}

pub fn middle_down(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerDown(PointerEvent::at(x, y).with_button(MouseButton::Middle))
}

pub fn move_to(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMove(PointerEvent::at(x, y))
}

pub fn up(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerUp(PointerEvent::at(x, y))
}

pub fn wheel(x: f64, y: f64, delta_y: f64) -> InputEvent {
    InputEvent::Wheel(WheelEvent::at(x, y, delta_y))
}

pub fn key_down(code: KeyCode) -> InputEvent {
    InputEvent::KeyDown(KeyEvent::new(code))
}

pub fn key_up(code: KeyCode) -> InputEvent {
    InputEvent::KeyUp(KeyEvent::new(code))
}

pub fn touches(points: &[(f64, f64)]) -> Vec<Point> {
    points.iter().map(|(x, y)| Point::new(*x, *y)).collect()
}

/// Dispatch a sequence of events in order.
pub fn play(canvas: &mut Canvas, events: &[InputEvent]) {
    for event in events {
        canvas.dispatch(event);
    }
}

/// Press item `from` at a point 10 units inside its cell and drop it over
/// cell `to`.
pub fn drag_item(canvas: &mut Canvas, from: usize, to: usize) {
    let start = cell_origin(from).offset(10.0, 10.0);
    let end = cell_origin(to).offset(10.0, 10.0);
    play(
        canvas,
        &[down(start.x, start.y), move_to(end.x, end.y), up(end.x, end.y)],
    );
}

// ============================================================================
// Assertions
// ============================================================================

/// Item ids in grid order
pub fn ids_by_index(canvas: &Canvas) -> Vec<ItemId> {
    canvas.items_by_index().iter().map(|item| item.id()).collect()
}

/// Index of every item, by id
pub fn indices_by_id(canvas: &Canvas) -> Vec<usize> {
    let mut items: Vec<&CanvasItem> = canvas.items().iter().collect();
    items.sort_by_key(|item| item.id());
    items.iter().map(|item| item.index).collect()
}

pub fn assert_item_count(canvas: &Canvas, expected: usize) {
    assert_eq!(
        canvas.items().len(),
        expected,
        "Expected {} items, found {}",
        expected,
        canvas.items().len()
    );
}
