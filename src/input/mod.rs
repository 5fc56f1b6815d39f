//! Input handling for the canvas.
//!
//! ## Architecture
//!
//! Raw host events are expressed as `InputEvent`s, normalized by the
//! `PointerNormalizer` (touch, modifiers, pan triggers) and gated by the
//! `CanvasState` machine before the canvas lets any engine act on them.
//!
//! ## Modules
//!
//! - `event` - Serializable input vocabulary (pointer, wheel, key, touch)
//! - `pointer` - Mouse/touch unification and modifier tracking
//! - `state` - Interaction state machine and its transition table

pub mod event;
pub mod pointer;
pub mod state;

pub use event::{InputEvent, KeyCode, KeyEvent, MouseButton, PointerEvent, WheelEvent};
pub use pointer::{KeyState, PointerNormalizer, PointerState, TouchGesture, TouchState};
pub use state::{CanvasState, InteractionState, TransitionContext, TransitionEvent};
