//! Canvas settings file.
//!
//! Settings live in `<config dir>/gridboard/settings.json`. Every field is
//! optional in the file; missing fields take their defaults. A missing or
//! invalid file never stops the canvas: `load` falls back to defaults and
//! logs a warning.

use crate::constants::{CLAMP_MARGIN, DRAG_THRESHOLD, MAX_HISTORY_STATES, MIN_RESIZE_WIDTH};
use crate::error::{CanvasError, CanvasResult};
use crate::layout::GridConfig;
use crate::viewport::ViewportConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// What a plain wheel tick does
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelMode {
    /// Zoom anchored at the pointer
    #[default]
    Zoom,
    /// Scroll the canvas; Ctrl/Meta + wheel still zooms
    Pan,
}

/// Tunables for one canvas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub grid: GridConfig,
    pub viewport: ViewportConfig,
    /// Screen pixels a pointer must travel before a press becomes a drag
    pub drag_threshold: f64,
    /// Smallest width a resize may produce, in canvas units
    pub min_resize_width: f64,
    pub history_limit: usize,
    /// Screen pixels of content kept reachable when clamping the pan
    pub clamp_margin: f64,
    pub wheel_mode: WheelMode,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            viewport: ViewportConfig::default(),
            drag_threshold: DRAG_THRESHOLD,
            min_resize_width: MIN_RESIZE_WIDTH,
            history_limit: MAX_HISTORY_STATES,
            clamp_margin: CLAMP_MARGIN,
            wheel_mode: WheelMode::Zoom,
        }
    }
}

impl CanvasSettings {
    pub fn validate(&self) -> CanvasResult<()> {
        self.grid.validate()?;
        self.viewport.validate()?;
        if !(self.drag_threshold >= 0.0) {
            return Err(CanvasError::Other(format!(
                "drag_threshold must not be negative, got {}",
                self.drag_threshold
            )));
        }
        if !(self.min_resize_width > 0.0) {
            return Err(CanvasError::Other(format!(
                "min_resize_width must be positive, got {}",
                self.min_resize_width
            )));
        }
        if self.history_limit == 0 {
            return Err(CanvasError::Other("history_limit must be at least 1".into()));
        }
        if !(self.clamp_margin >= 0.0) {
            return Err(CanvasError::Other("clamp_margin must not be negative".into()));
        }
        Ok(())
    }

    /// Read and validate a settings file.
    pub fn load_from(path: &Path) -> CanvasResult<Self> {
        let content = fs::read_to_string(path)?;
        let settings: CanvasSettings = serde_json::from_str(&content)?;
        settings.validate()?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Read settings from `path`, falling back to defaults on any problem.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Settings from the default location.
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_or_default(&path),
            None => {
                warn!("No config directory on this platform, using default settings");
                Self::default()
            }
        }
    }

    /// Write pretty JSON, creating the parent directory if needed.
    pub fn save_to(&self, path: &Path) -> CanvasResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

/// `<config dir>/gridboard/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gridboard").join("settings.json"))
}
