//! Viewport transform - pan offset, zoom scale and coordinate conversion.
//!
//! Screen space here is container-local: `(0, 0)` is the top-left corner of
//! the canvas container. Functions taking client coordinates say so and take
//! the container rectangle to convert.
//!
//! ```text
//! canvas = (screen - pan) / scale
//! screen = pan + canvas * scale
//! ```

use crate::constants::{CLAMP_MARGIN, DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, SET_ZOOM_EPSILON, ZOOM_SENSITIVITY};
use crate::error::{CanvasError, CanvasResult};
use crate::types::{Bounds, ContainerRect, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zoom limits and wheel sensitivity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_sensitivity: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_sensitivity: ZOOM_SENSITIVITY,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> CanvasResult<()> {
        if !(self.min_scale > 0.0) {
            return Err(CanvasError::InvalidViewport(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if !(self.min_scale <= self.max_scale) {
            return Err(CanvasError::InvalidViewport(format!(
                "min_scale {} exceeds max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        if !(self.zoom_sensitivity > 0.0) {
            return Err(CanvasError::InvalidViewport("zoom_sensitivity must be positive".into()));
        }
        Ok(())
    }
}

/// Pan offset (screen position of the canvas origin) and zoom factor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: DEFAULT_SCALE }
    }
}

impl Viewport {
    #[inline]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point::new((screen.x - self.x) / self.scale, (screen.y - self.y) / self.scale)
    }

    #[inline]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point::new(self.x + canvas.x * self.scale, self.y + canvas.y * self.scale)
    }
}

/// Translate + scale pair for the canvas container, origin at its top-left.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TransformStyle {
    pub translate: Point,
    pub scale: f64,
}

impl fmt::Display for TransformStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}px, {}px) scale({})",
            self.translate.x, self.translate.y, self.scale
        )
    }
}

/// Where a drag-to-pan started
#[derive(Clone, Copy, Debug, PartialEq)]
struct PanAnchor {
    pointer: Point,
    origin: Point,
}

/// Owns the viewport and every operation that moves it.
#[derive(Clone, Debug)]
pub struct ViewportTransform {
    viewport: Viewport,
    config: ViewportConfig,
    pan_anchor: Option<PanAnchor>,
}

impl ViewportTransform {
    pub fn new(config: ViewportConfig) -> Self {
        Self::with_viewport(config, Viewport::default())
    }

    /// Start from an explicit viewport; its scale is clamped into range.
    pub fn with_viewport(config: ViewportConfig, viewport: Viewport) -> Self {
        let mut transform = Self {
            viewport,
            config,
            pan_anchor: None,
        };
        transform.viewport.scale = transform.clamp_scale(viewport.scale);
        transform
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scale(&self) -> f64 {
        self.viewport.scale
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Swap the zoom limits, re-clamping the current scale.
    pub fn set_config(&mut self, config: ViewportConfig) {
        self.config = config;
        self.viewport.scale = self.clamp_scale(self.viewport.scale);
    }

    /// Zoom as a whole percentage
    pub fn zoom_percent(&self) -> u32 {
        (self.viewport.scale * 100.0).round() as u32
    }

    pub fn transform_style(&self) -> TransformStyle {
        TransformStyle {
            translate: Point::new(self.viewport.x, self.viewport.y),
            scale: self.viewport.scale,
        }
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.config.min_scale, self.config.max_scale)
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.viewport.screen_to_canvas(screen)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.viewport.canvas_to_screen(canvas)
    }

    // ------------------------------------------------------------------
    // Panning
    // ------------------------------------------------------------------

    /// Remember the pointer and pan offset at the start of a drag-to-pan.
    pub fn start_pan(&mut self, pointer: Point) {
        self.pan_anchor = Some(PanAnchor {
            pointer,
            origin: Point::new(self.viewport.x, self.viewport.y),
        });
    }

    /// Move the pan offset by the pointer travel since `start_pan`.
    pub fn update_pan(&mut self, pointer: Point) {
        let Some(anchor) = self.pan_anchor else {
            return;
        };
        self.viewport.x = anchor.origin.x + (pointer.x - anchor.pointer.x);
        self.viewport.y = anchor.origin.y + (pointer.y - anchor.pointer.y);
    }

    pub fn end_pan(&mut self) {
        self.pan_anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Scroll-style pan: content moves opposite to the delta.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.viewport.x -= delta_x;
        self.viewport.y -= delta_y;
    }

    /// Move the content with the delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.viewport.x += dx;
        self.viewport.y += dy;
    }

    /// Keep oversized content from being dragged out of view.
    ///
    /// Each axis is only restricted when the scaled content is larger than
    /// the container minus the margins; content that already fits is left
    /// where it is.
    pub fn clamp_viewport(&mut self, container: &ContainerRect, content_width: f64, content_height: f64, margin: f64) {
        let scaled_width = content_width * self.viewport.scale;
        let scaled_height = content_height * self.viewport.scale;

        if scaled_width > container.width - margin * 2.0 {
            self.viewport.x = clamp_axis(self.viewport.x, container.width, scaled_width, margin);
        }
        if scaled_height > container.height - margin * 2.0 {
            self.viewport.y = clamp_axis(self.viewport.y, container.height, scaled_height, margin);
        }
    }

    /// `clamp_viewport` with the default margin
    pub fn clamp_to_content(&mut self, container: &ContainerRect, content_width: f64, content_height: f64) {
        self.clamp_viewport(container, content_width, content_height, CLAMP_MARGIN);
    }

    // ------------------------------------------------------------------
    // Zooming
    // ------------------------------------------------------------------

    /// Zoom by a wheel delta, keeping the canvas point under the pointer fixed.
    ///
    /// `client` is in client coordinates. Returns the resulting scale. When
    /// the clamped scale does not change nothing is mutated, so repeated
    /// wheel ticks at a zoom limit leave the pan offset alone.
    pub fn zoom_at(&mut self, client: Point, delta: f64, container: &ContainerRect) -> f64 {
        let factor = 1.0 + (-delta * self.config.zoom_sensitivity);
        self.zoom_by_factor(client, factor, container)
    }

    /// Multiply the scale by `factor`, anchored at a client-space point.
    pub fn zoom_by_factor(&mut self, client: Point, factor: f64, container: &ContainerRect) -> f64 {
        let anchor = container.to_local(client);
        let new_scale = self.clamp_scale(self.viewport.scale * factor);
        self.anchored_zoom(anchor, new_scale);
        self.viewport.scale
    }

    /// Set the zoom to `percent`, anchored at the container center.
    pub fn set_zoom(&mut self, percent: f64, container: &ContainerRect) {
        let new_scale = self.clamp_scale(percent / 100.0);
        if (new_scale - self.viewport.scale).abs() < SET_ZOOM_EPSILON {
            return;
        }
        self.anchored_zoom(container.local_center(), new_scale);
    }

    /// Apply `new_scale` keeping the local screen point `anchor` fixed.
    fn anchored_zoom(&mut self, anchor: Point, new_scale: f64) {
        let old_scale = self.viewport.scale;
        if new_scale == old_scale {
            return;
        }
        let ratio = new_scale / old_scale;
        self.viewport.x = anchor.x - (anchor.x - self.viewport.x) * ratio;
        self.viewport.y = anchor.y - (anchor.y - self.viewport.y) * ratio;
        self.viewport.scale = new_scale;
        tracing::trace!(scale = new_scale, x = self.viewport.x, y = self.viewport.y, "Zoomed");
    }

    /// Center content of the given canvas size in the container.
    pub fn center_content(&mut self, content_width: f64, content_height: f64, container: &ContainerRect) {
        self.viewport.x = (container.width - content_width * self.viewport.scale) / 2.0;
        self.viewport.y = (container.height - content_height * self.viewport.scale) / 2.0;
    }

    /// The container's visible area in canvas space
    pub fn viewport_bounds(&self, container: &ContainerRect) -> Bounds {
        let top_left = self.screen_to_canvas(Point::ZERO);
        let bottom_right = self.screen_to_canvas(Point::new(container.width, container.height));
        Bounds::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

fn clamp_axis(offset: f64, container_len: f64, scaled_len: f64, margin: f64) -> f64 {
    let far = container_len - scaled_len - margin;
    let min = margin.min(far);
    let max = far.max(margin);
    offset.clamp(min, max)
}
