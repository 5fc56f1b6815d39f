//! gridboard - headless interaction core for an image-grid canvas editor.
//!
//! A host feeds normalized input events to a [`Canvas`] and draws what it
//! reads back: item frames, the drag overlay, the container transform and
//! the cursor. Pan, zoom, drag-to-reorder and aspect-locked resize are
//! governed by one interaction state machine.
//!
//! ## Modules
//!
//! - `canvas` - Controller owning the items and every engine
//! - `input` - Event vocabulary, normalizer and state machine
//! - `viewport` - Pan/zoom transform and coordinate conversion
//! - `layout` - Grid cell placement and drop-target lookup
//! - `drag_sort` - Live reflow and reorder commit
//! - `resize` - Aspect-locked resize
//! - `history` - Bounded undo/redo ledger
//! - `spatial_index` - R-tree hit testing
//! - `settings`, `settings_watcher` - Configuration and hot reload
//! - `perf` - Profiling instrumentation
//! - `replay` - Scripted event playback

pub mod canvas;
pub mod constants;
pub mod drag_sort;
pub mod error;
pub mod history;
pub mod input;
pub mod layout;
pub mod perf;
pub mod replay;
pub mod resize;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod types;
pub mod viewport;

pub use canvas::{Canvas, DragOverlay, ItemFrame};
pub use error::{CanvasError, CanvasResult};
pub use input::{InputEvent, InteractionState};
pub use settings::{CanvasSettings, WheelMode};
pub use types::{Bounds, CanvasItem, ContainerRect, ItemId, Point};
pub use viewport::{TransformStyle, Viewport};
