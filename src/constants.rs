//! Crate-wide constants.
//!
//! Centralizes the layout, zoom and gesture defaults so settings, tests and
//! the controller agree on the same numbers.

// ============================================================================
// Grid Layout
// ============================================================================

/// Number of columns in the image grid
pub const DEFAULT_COLS: usize = 4;

/// Width of one grid cell in canvas units
pub const DEFAULT_CELL_WIDTH: f64 = 1728.0;

/// Height of one grid cell in canvas units
pub const DEFAULT_CELL_HEIGHT: f64 = 2304.0;

/// Gap between neighbouring cells in canvas units
pub const DEFAULT_GAP: f64 = 96.0;

/// Padding around the whole grid frame in canvas units
pub const DEFAULT_PADDING: f64 = 192.0;

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_SCALE: f64 = 0.01;

/// Maximum zoom level
pub const MAX_SCALE: f64 = 2.0;

/// Default zoom level
pub const DEFAULT_SCALE: f64 = 1.0;

/// Scale change per unit of wheel delta
pub const ZOOM_SENSITIVITY: f64 = 0.01;

/// Smallest scale change `set_zoom` will apply
pub const SET_ZOOM_EPSILON: f64 = 0.001;

/// Screen margin kept around oversized content when clamping the pan offset
pub const CLAMP_MARGIN: f64 = 200.0;

// ============================================================================
// Gestures
// ============================================================================

/// Pointer travel (screen pixels, per axis) that turns a click into a drag
pub const DRAG_THRESHOLD: f64 = 5.0;

/// Smallest width an item can be resized to, in canvas units
pub const MIN_RESIZE_WIDTH: f64 = 200.0;

/// Hit area of a resize handle around an item corner, in screen pixels
pub const RESIZE_HANDLE_HIT_SIZE: f64 = 16.0;

// ============================================================================
// History
// ============================================================================

/// Maximum undo history entries to keep
pub const MAX_HISTORY_STATES: usize = 50;

// ============================================================================
// Profiling
// ============================================================================

/// Budget for handling a single input event (one frame at 60 FPS)
pub const EVENT_BUDGET_MS: f64 = 16.67;
