//! Normalized input events accepted by the canvas.
//!
//! Positions are client coordinates; the canvas converts them with its
//! container rectangle. Every type here is serde-friendly so hosts and the
//! replay script can speak the same vocabulary.

use crate::types::Point;
use serde::{Deserialize, Serialize};

/// Mouse button, numbered like DOM `MouseEvent.button`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl MouseButton {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// A pointer down/move/up
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point,
    #[serde(default)]
    pub button: Option<MouseButton>,
    /// Native alt-key flag carried by the event itself
    #[serde(default)]
    pub alt_key: bool,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            button: Some(MouseButton::Primary),
            alt_key: false,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }
}

/// A wheel tick
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    pub position: Point,
    #[serde(default)]
    pub delta_x: f64,
    pub delta_y: f64,
}

impl WheelEvent {
    pub fn at(x: f64, y: f64, delta_y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            delta_x: 0.0,
            delta_y,
        }
    }
}

/// Physical key, named like DOM `KeyboardEvent.code`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Space,
    AltLeft,
    AltRight,
    ControlLeft,
    ControlRight,
    MetaLeft,
    MetaRight,
    ShiftLeft,
    ShiftRight,
    Escape,
    KeyZ,
    KeyY,
    #[serde(other)]
    Other,
}

impl KeyCode {
    pub fn from_code(code: &str) -> Self {
        match code {
            "Space" => Self::Space,
            "AltLeft" => Self::AltLeft,
            "AltRight" => Self::AltRight,
            "ControlLeft" => Self::ControlLeft,
            "ControlRight" => Self::ControlRight,
            "MetaLeft" => Self::MetaLeft,
            "MetaRight" => Self::MetaRight,
            "ShiftLeft" => Self::ShiftLeft,
            "ShiftRight" => Self::ShiftRight,
            "Escape" => Self::Escape,
            "KeyZ" => Self::KeyZ,
            "KeyY" => Self::KeyY,
            _ => Self::Other,
        }
    }
}

/// A key down or up
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub code: KeyCode,
    /// Auto-repeat from a held key
    #[serde(default)]
    pub repeat: bool,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self { code, repeat: false }
    }

    pub fn repeated(code: KeyCode) -> Self {
        Self { code, repeat: true }
    }
}

/// Everything the canvas can be fed, in arrival order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    Wheel(WheelEvent),
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    /// Window lost focus
    Blur,
    /// Touch points currently on the surface, after the change
    TouchStart { touches: Vec<Point> },
    TouchMove { touches: Vec<Point> },
    TouchEnd { touches: Vec<Point> },
    Undo,
    Redo,
    Cancel,
}
