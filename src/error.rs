//! Error types for the canvas core.
//!
//! Gesture handling never fails: illegal transitions, missing items and
//! absent drop targets are silent no-ops. These errors cover the ambient
//! surfaces only (settings files, file watching, initial item sets, replay
//! scripts).

use crate::types::ItemId;
use thiserror::Error;

/// Errors that can occur outside of gesture handling
#[derive(Error, Debug)]
pub enum CanvasError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File watcher could not be created or attached
    #[error("File watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Grid layout configuration is unusable
    #[error("Invalid grid config: {0}")]
    InvalidGrid(String),

    /// Viewport configuration is unusable
    #[error("Invalid viewport config: {0}")]
    InvalidViewport(String),

    /// Two items share the same id
    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),

    /// Item indices have gaps or duplicates
    #[error("Item indices are not a permutation of 0..{count}")]
    BrokenPermutation { count: usize },

    /// Generic error message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

impl From<String> for CanvasError {
    fn from(s: String) -> Self {
        CanvasError::Other(s)
    }
}

impl From<&str> for CanvasError {
    fn from(s: &str) -> Self {
        CanvasError::Other(s.to_string())
    }
}
