//! Canvas controller - one grid of items plus every engine that moves it.
//!
//! ## Data flow
//!
//! ```text
//! InputEvent -> PointerNormalizer -> CanvasState gate -> DragSort / ImageResize
//!            -> GridLayout -> ViewportTransform -> frames / transform style
//! ```
//!
//! `dispatch` is the only entry point for input. Handlers are split by
//! concern the same way the event vocabulary is:
//!
//! - `pointer` - press, move and release (pan, drag, resize, selection)
//! - `keyboard` - keys, wheel, blur and touch
//! - `edit` - add/remove, undo/redo
//! - `output` - frames, overlay, cursor and visibility queries
//!
//! Gesture handling never fails. A gesture the state machine refuses simply
//! does not start.

mod edit;
mod keyboard;
mod output;
mod pointer;

pub use output::{DragOverlay, ItemFrame};

use crate::drag_sort::DragSort;
use crate::error::CanvasResult;
use crate::history::History;
use crate::input::{CanvasState, InputEvent, InteractionState, KeyState, PointerNormalizer};
use crate::layout::GridLayout;
use crate::constants::EVENT_BUDGET_MS;
use crate::perf::{measure, measure_and_log, PerfMonitor, ScopedTimer};
use crate::profile_function;
use crate::resize::ImageResize;
use crate::settings::CanvasSettings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use crate::spatial_index::SpatialIndex;
use crate::types::{validate_items, CanvasItem, ContainerRect, ItemId, Point};
use crate::viewport::{Viewport, ViewportTransform};
use tracing::{debug, info, warn};

/// A press on an item that has not travelled far enough to be a drag yet
#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingDrag {
    id: ItemId,
    /// Local screen position of the press
    start: Point,
}

/// Interactive image grid.
pub struct Canvas {
    items: Vec<CanvasItem>,
    next_id: ItemId,
    settings: CanvasSettings,
    layout: GridLayout,
    transform: ViewportTransform,
    container: ContainerRect,
    state: CanvasState,
    drag: DragSort,
    resize: ImageResize,
    input: PointerNormalizer,
    history: History<Vec<CanvasItem>>,
    spatial: SpatialIndex,
    perf: PerfMonitor,
    pending_drag: Option<PendingDrag>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::build(CanvasSettings::default(), Vec::new())
    }
}

impl Canvas {
    /// Empty canvas with validated settings.
    pub fn new(settings: CanvasSettings) -> CanvasResult<Self> {
        settings.validate()?;
        Ok(Self::build(settings, Vec::new()))
    }

    /// Canvas over an existing collection. Ids must be unique, sizes
    /// positive and indices a permutation of `0..len`.
    pub fn with_items(settings: CanvasSettings, items: Vec<CanvasItem>) -> CanvasResult<Self> {
        settings.validate()?;
        validate_items(&items)?;
        Ok(Self::build(settings, items))
    }

    fn build(settings: CanvasSettings, items: Vec<CanvasItem>) -> Self {
        let layout = GridLayout::new(settings.grid);
        let spatial = SpatialIndex::from_items(&items, &layout);
        let next_id = items.iter().map(|item| item.id() + 1).max().unwrap_or(0);
        info!(items = items.len(), cols = settings.grid.cols, "Canvas created");

        Self {
            next_id,
            layout,
            spatial,
            transform: ViewportTransform::new(settings.viewport),
            container: ContainerRect::default(),
            state: CanvasState::new(),
            drag: DragSort::new(settings.drag_threshold),
            resize: ImageResize::new(settings.min_resize_width),
            input: PointerNormalizer::new(settings.drag_threshold),
            history: History::new(settings.history_limit),
            perf: PerfMonitor::new(),
            pending_drag: None,
            items,
            settings,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Items in storage order. Use `items_by_index` for grid order.
    pub fn items(&self) -> &[CanvasItem] {
        &self.items
    }

    pub fn items_by_index(&self) -> Vec<&CanvasItem> {
        let mut sorted: Vec<&CanvasItem> = self.items.iter().collect();
        sorted.sort_by_key(|item| item.index);
        sorted
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.state.state()
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.state.selected_id()
    }

    pub fn key_state(&self) -> KeyState {
        self.input.key_state()
    }

    pub fn viewport(&self) -> Viewport {
        self.transform.viewport()
    }

    pub fn container(&self) -> ContainerRect {
        self.container
    }

    pub fn history(&self) -> &History<Vec<CanvasItem>> {
        &self.history
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }

    /// True while any gesture, or a press that may become one, is live
    pub fn is_busy(&self) -> bool {
        self.state.state().is_gesture() || self.pending_drag.is_some()
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn set_container(&mut self, container: ContainerRect) {
        self.container = container;
    }

    /// Replace the viewport; the scale is clamped into range.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.transform = ViewportTransform::with_viewport(self.settings.viewport, viewport);
    }

    pub fn set_zoom(&mut self, percent: f64) {
        self.transform.set_zoom(percent, &self.container);
    }

    pub fn zoom_percent(&self) -> u32 {
        self.transform.zoom_percent()
    }

    /// Center the whole grid frame in the container.
    pub fn center_content(&mut self) {
        let (width, height) = self.frame_size();
        self.transform.center_content(width, height, &self.container);
    }

    /// Pull the pan offset back so oversized content stays reachable.
    pub fn clamp_to_content(&mut self) {
        let (width, height) = self.frame_size();
        self.transform
            .clamp_viewport(&self.container, width, height, self.settings.clamp_margin);
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Feed one input event. Events must arrive in order.
    pub fn dispatch(&mut self, event: &InputEvent) {
        self.perf.begin_event(event_name(event));

        match event {
            InputEvent::PointerDown(e) => self.handle_pointer_down(e),
            InputEvent::PointerMove(e) => self.handle_pointer_move(e),
            InputEvent::PointerUp(e) => self.handle_pointer_up(e),
            InputEvent::Wheel(e) => self.handle_wheel(e),
            InputEvent::KeyDown(e) => self.handle_key_down(e),
            InputEvent::KeyUp(e) => self.handle_key_up(e),
            InputEvent::Blur => self.handle_blur(),
            InputEvent::TouchStart { touches } => self.handle_touch_start(touches),
            InputEvent::TouchMove { touches } => self.handle_touch_move(touches),
            InputEvent::TouchEnd { touches } => self.handle_touch_end(touches),
            InputEvent::Undo => {
                self.undo();
            }
            InputEvent::Redo => {
                self.redo();
            }
            InputEvent::Cancel => self.cancel(),
        }

        self.perf.end_event();
    }

    /// Abort whatever gesture is in progress.
    ///
    /// A drag leaves the model untouched, a resize puts the item back to its
    /// starting size, a pan keeps the offset reached so far.
    pub fn cancel(&mut self) {
        if self.pending_drag.take().is_some() {
            self.state.disarm_drag();
        }
        if let Some(start) = self.resize.end_resize() {
            pointer::set_item_size(&mut self.items, start.item_id, start.start_width, start.start_height);
            self.rebuild_spatial_index();
        }
        self.drag.cancel();
        self.transform.end_pan();
        self.state.cancel();
        debug!(state = ?self.state.state(), "Gesture cancelled");
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// Validate and adopt new settings. An active gesture is cancelled first
    /// since the grid under it may change.
    pub fn apply_settings(&mut self, settings: CanvasSettings) -> CanvasResult<()> {
        settings.validate()?;
        let _timer = ScopedTimer::with_default_threshold("apply_settings");
        if self.is_busy() {
            self.cancel();
        }

        self.layout = GridLayout::new(settings.grid);
        self.transform.set_config(settings.viewport);
        self.drag.set_threshold(settings.drag_threshold);
        self.input.set_drag_threshold(settings.drag_threshold);
        self.resize.set_min_width(settings.min_resize_width);
        self.history.set_max_size(settings.history_limit);
        self.settings = settings;
        self.rebuild_spatial_index();
        info!("Applied canvas settings");
        Ok(())
    }

    /// Drain the watcher and reload the file if it changed.
    ///
    /// A deleted file restores the defaults; an unreadable one keeps the
    /// current settings. Returns true when settings were applied.
    pub fn check_settings_reload(&mut self, watcher: &SettingsWatcher) -> bool {
        let mut reload = false;
        let mut deleted = false;
        while let Some(event) = watcher.poll() {
            match event {
                SettingsEvent::Created | SettingsEvent::Modified => {
                    reload = true;
                    deleted = false;
                }
                SettingsEvent::Deleted => {
                    reload = false;
                    deleted = true;
                }
                SettingsEvent::Error(e) => warn!(error = %e, "Settings watcher reported an error"),
            }
        }

        let next = if deleted {
            info!("Settings file removed, restoring defaults");
            CanvasSettings::default()
        } else if reload {
            match measure_and_log("settings_load", EVENT_BUDGET_MS, || CanvasSettings::load_from(watcher.path())) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!(error = %e, "Ignoring invalid settings file");
                    return false;
                }
            }
        } else {
            return false;
        };

        if next == self.settings {
            return false;
        }
        match self.apply_settings(next) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Settings rejected");
                false
            }
        }
    }

    fn rebuild_spatial_index(&mut self) {
        profile_function!();
        let ((), elapsed_ms) = measure(|| self.spatial.rebuild(&self.items, &self.layout));
        self.perf.record_operation("spatial_rebuild", elapsed_ms);
    }
}

fn event_name(event: &InputEvent) -> &'static str {
    match event {
        InputEvent::PointerDown(_) => "pointer_down",
        InputEvent::PointerMove(_) => "pointer_move",
        InputEvent::PointerUp(_) => "pointer_up",
        InputEvent::Wheel(_) => "wheel",
        InputEvent::KeyDown(_) => "key_down",
        InputEvent::KeyUp(_) => "key_up",
        InputEvent::Blur => "blur",
        InputEvent::TouchStart { .. } => "touch_start",
        InputEvent::TouchMove { .. } => "touch_move",
        InputEvent::TouchEnd { .. } => "touch_end",
        InputEvent::Undo => "undo",
        InputEvent::Redo => "redo",
        InputEvent::Cancel => "cancel",
    }
}
