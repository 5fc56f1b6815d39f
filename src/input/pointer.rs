//! Pointer and keyboard normalization.
//!
//! Unifies mouse and touch input: two fingers form a pinch that yields
//! scale and pan deltas, a single finger behaves like a mouse pointer.
//! Modifier keys are tracked here, independently of the interaction state
//! machine, and dropped on window blur so a modifier released outside the
//! window does not stick.

use super::event::{KeyCode, KeyEvent, MouseButton, PointerEvent};
use crate::constants::DRAG_THRESHOLD;
use crate::types::Point;
use serde::Serialize;

/// Held modifier keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct KeyState {
    pub space: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyState {
    /// Ctrl or Meta, the platform shortcut modifier
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Two-finger gesture tracking
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchState {
    pub is_pinching: bool,
    pub last_distance: f64,
    pub last_center: Point,
    pub start_touches: Option<[Point; 2]>,
}

/// Single pointer tracking (mouse or one finger)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub is_down: bool,
    pub start: Point,
    pub current: Point,
}

/// Gesture primitives produced from touch input
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchGesture {
    PinchStart { center: Point },
    /// `scale` is relative to the previous pinch move, `pan` is the
    /// midpoint movement since then.
    Pinch { center: Point, scale: f64, pan: Point },
    PinchEnd,
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
}

impl TouchGesture {
    /// Pinch gestures own the touch sequence; the host should suppress the
    /// platform's default handling for them.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::PinchStart { .. } | Self::Pinch { .. })
    }
}

/// Normalizes raw pointer, touch and key input.
#[derive(Clone, Debug)]
pub struct PointerNormalizer {
    keys: KeyState,
    touch: TouchState,
    pointer: PointerState,
    drag_threshold: f64,
}

impl Default for PointerNormalizer {
    fn default() -> Self {
        Self::new(DRAG_THRESHOLD)
    }
}

impl PointerNormalizer {
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            keys: KeyState::default(),
            touch: TouchState::default(),
            pointer: PointerState::default(),
            drag_threshold,
        }
    }

    pub fn key_state(&self) -> KeyState {
        self.keys
    }

    pub fn touch_state(&self) -> &TouchState {
        &self.touch
    }

    pub fn pointer_state(&self) -> &PointerState {
        &self.pointer
    }

    pub fn set_drag_threshold(&mut self, threshold: f64) {
        self.drag_threshold = threshold;
    }

    // ------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------

    pub fn handle_pointer_down(&mut self, position: Point) {
        self.pointer = PointerState {
            is_down: true,
            start: position,
            current: position,
        };
    }

    pub fn handle_pointer_move(&mut self, position: Point) {
        if self.pointer.is_down {
            self.pointer.current = position;
        }
    }

    pub fn handle_pointer_up(&mut self, position: Point) {
        self.pointer.current = position;
        self.pointer.is_down = false;
    }

    /// True once the pointer travelled past the threshold on either axis
    /// since it went down.
    pub fn has_moved_beyond_threshold(&self) -> bool {
        let dx = self.pointer.current.x - self.pointer.start.x;
        let dy = self.pointer.current.y - self.pointer.start.y;
        dx.abs() > self.drag_threshold || dy.abs() > self.drag_threshold
    }

    /// Whether a pointer down should pan instead of interacting with items:
    /// middle button, held space, held alt, or the event's own alt flag.
    pub fn should_pan(&self, event: Option<&PointerEvent>) -> bool {
        let middle = event.is_some_and(|e| e.button == Some(MouseButton::Middle));
        let alt_flag = event.is_some_and(|e| e.alt_key);
        middle || self.keys.space || self.keys.alt || alt_flag
    }

    // ------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------

    /// `touches` are all points on the surface after the touch began.
    pub fn handle_touch_start(&mut self, touches: &[Point]) -> Vec<TouchGesture> {
        match touches {
            [a, b] => {
                let center = a.midpoint(*b);
                self.touch = TouchState {
                    is_pinching: true,
                    last_distance: a.distance(*b),
                    last_center: center,
                    start_touches: Some([*a, *b]),
                };
                vec![TouchGesture::PinchStart { center }]
            }
            [touch] => {
                self.handle_pointer_down(*touch);
                vec![TouchGesture::PointerDown(*touch)]
            }
            _ => Vec::new(),
        }
    }

    pub fn handle_touch_move(&mut self, touches: &[Point]) -> Vec<TouchGesture> {
        match touches {
            [a, b] if self.touch.is_pinching => {
                let distance = a.distance(*b);
                let center = a.midpoint(*b);
                let scale = if self.touch.last_distance > 0.0 {
                    distance / self.touch.last_distance
                } else {
                    1.0
                };
                let pan = self.touch.last_center.delta_to(center);

                self.touch.last_distance = distance;
                self.touch.last_center = center;
                vec![TouchGesture::Pinch { center, scale, pan }]
            }
            [touch] if self.pointer.is_down => {
                self.pointer.current = *touch;
                vec![TouchGesture::PointerMove(*touch)]
            }
            _ => Vec::new(),
        }
    }

    /// `touches` are the points still on the surface.
    pub fn handle_touch_end(&mut self, touches: &[Point]) -> Vec<TouchGesture> {
        let mut gestures = Vec::new();
        if touches.len() < 2 && self.touch.is_pinching {
            self.touch.is_pinching = false;
            self.touch.start_touches = None;
            gestures.push(TouchGesture::PinchEnd);
        }
        if touches.is_empty() && self.pointer.is_down {
            self.pointer.is_down = false;
            gestures.push(TouchGesture::PointerUp(self.pointer.current));
        }
        gestures
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    pub fn handle_key_down(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Space => {
                if !event.repeat {
                    self.keys.space = true;
                }
            }
            KeyCode::AltLeft | KeyCode::AltRight => self.keys.alt = true,
            KeyCode::ControlLeft | KeyCode::ControlRight => self.keys.ctrl = true,
            KeyCode::MetaLeft | KeyCode::MetaRight => self.keys.meta = true,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.keys.shift = true,
            _ => {}
        }
    }

    pub fn handle_key_up(&mut self, event: &KeyEvent) {
        match event.code {
            KeyCode::Space => self.keys.space = false,
            KeyCode::AltLeft | KeyCode::AltRight => self.keys.alt = false,
            KeyCode::ControlLeft | KeyCode::ControlRight => self.keys.ctrl = false,
            KeyCode::MetaLeft | KeyCode::MetaRight => self.keys.meta = false,
            KeyCode::ShiftLeft | KeyCode::ShiftRight => self.keys.shift = false,
            _ => {}
        }
    }

    /// Window lost focus: forget every held modifier.
    pub fn handle_blur(&mut self) {
        self.keys = KeyState::default();
    }
}
