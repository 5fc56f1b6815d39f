//! Keys, wheel, window blur and touch.

use super::Canvas;
use crate::input::{KeyCode, KeyEvent, PointerEvent, TouchGesture, WheelEvent};
use crate::settings::WheelMode;
use crate::types::Point;
use tracing::trace;

impl Canvas {
    pub fn handle_key_down(&mut self, event: &KeyEvent) {
        self.input.handle_key_down(event);
        let keys = self.input.key_state();

        match event.code {
            KeyCode::Space if !event.repeat => self.state.set_space_pressed(true),
            KeyCode::Escape => self.cancel(),
            KeyCode::KeyZ if keys.command() && !event.repeat => {
                if keys.shift {
                    self.redo();
                } else {
                    self.undo();
                }
            }
            KeyCode::KeyY if keys.command() && !event.repeat => {
                self.redo();
            }
            _ => {}
        }
    }

    pub fn handle_key_up(&mut self, event: &KeyEvent) {
        self.input.handle_key_up(event);
        if event.code == KeyCode::Space {
            self.state.set_space_pressed(false);
        }
    }

    /// Window lost focus: no key-up will arrive for held keys.
    pub fn handle_blur(&mut self) {
        self.input.handle_blur();
        if self.state.space_pressed() {
            self.state.set_space_pressed(false);
        }
    }

    /// Zoom at the pointer, or scroll when wheel-pan mode is on and no
    /// command modifier is held.
    pub fn handle_wheel(&mut self, event: &WheelEvent) {
        let keys = self.input.key_state();
        if self.settings.wheel_mode == WheelMode::Pan && !keys.command() {
            self.transform.pan(event.delta_x, event.delta_y);
            return;
        }
        let scale = self.transform.zoom_at(event.position, event.delta_y, &self.container);
        trace!(scale, "Wheel zoom");
    }

    // ------------------------------------------------------------------
    // Touch
    // ------------------------------------------------------------------

    pub fn handle_touch_start(&mut self, touches: &[Point]) {
        let gestures = self.input.handle_touch_start(touches);
        self.apply_touch_gestures(gestures);
    }

    pub fn handle_touch_move(&mut self, touches: &[Point]) {
        let gestures = self.input.handle_touch_move(touches);
        self.apply_touch_gestures(gestures);
    }

    pub fn handle_touch_end(&mut self, touches: &[Point]) {
        let gestures = self.input.handle_touch_end(touches);
        self.apply_touch_gestures(gestures);
    }

    fn apply_touch_gestures(&mut self, gestures: Vec<TouchGesture>) {
        for gesture in gestures {
            match gesture {
                TouchGesture::PinchStart { center } => {
                    // a second finger turns any one-finger gesture into a pinch
                    if self.is_busy() {
                        self.cancel();
                    }
                    trace!(x = center.x, y = center.y, "Pinch started");
                }
                TouchGesture::Pinch { center, scale, pan } => {
                    self.transform.zoom_by_factor(center, scale, &self.container);
                    self.transform.translate(pan.x, pan.y);
                }
                TouchGesture::PinchEnd => trace!("Pinch ended"),
                TouchGesture::PointerDown(p) => self.handle_pointer_down(&PointerEvent::at(p.x, p.y)),
                TouchGesture::PointerMove(p) => self.handle_pointer_move(&PointerEvent::at(p.x, p.y)),
                TouchGesture::PointerUp(p) => self.handle_pointer_up(&PointerEvent::at(p.x, p.y)),
            }
        }
    }
}
