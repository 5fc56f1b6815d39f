//! Interaction state machine - the single authority over gesture state.
//!
//! The machine replaces scattered boolean flags with one explicit state and
//! a static transition table. Every gesture entry point asks the machine
//! first; a rejected transition means the gesture does not start.
//!
//! ## State Transitions
//!
//! ```text
//! Idle          -> ReadyToPan     (SpaceDown)
//! Idle          -> Panning        (StartPan)
//! Idle          -> DraggingImage  (StartDrag)
//! Idle          -> Resizing       (StartResize)
//! ReadyToPan    -> Idle           (SpaceUp)
//! ReadyToPan    -> Panning        (StartPan)
//! ReadyToPan    -> DraggingImage  (StartDrag)
//! ReadyToPan    -> Resizing       (StartResize)
//! Panning       -> ReadyToPan     (EndPan, space held)
//! Panning       -> Idle           (EndPan, space released)
//! Panning       -> Panning        (SpaceUp)
//! DraggingImage -> DraggingImage  (SpaceDown, SpaceUp)
//! DraggingImage -> Idle           (EndDrag, Cancel)
//! Resizing      -> Idle           (EndResize, Cancel)
//! Selecting     -> Idle           (EndSelect, Cancel)
//! ```
//!
//! Anything else is rejected: `send` returns `false` and nothing changes.

use crate::resize::ResizeHandle;
use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Discrete gesture state of one canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionState {
    /// No active gesture
    #[default]
    Idle,
    /// Space is held; the next pointer down pans
    ReadyToPan,
    /// Canvas is following the pointer
    Panning,
    /// An image is being dragged to a new slot
    DraggingImage,
    /// The selected image is being resized
    Resizing,
    /// Marquee selection
    Selecting,
}

impl InteractionState {
    pub const ALL: [InteractionState; 6] = [
        Self::Idle,
        Self::ReadyToPan,
        Self::Panning,
        Self::DraggingImage,
        Self::Resizing,
        Self::Selecting,
    ];

    /// States that represent a gesture in progress
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            Self::Panning | Self::DraggingImage | Self::Resizing | Self::Selecting
        )
    }

    /// CSS cursor name for this state
    pub fn cursor(&self) -> &'static str {
        match self {
            Self::Idle => "default",
            Self::ReadyToPan => "grab",
            Self::Panning | Self::DraggingImage => "grabbing",
            Self::Resizing => "nwse-resize",
            Self::Selecting => "crosshair",
        }
    }
}

/// Events that drive the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionEvent {
    SpaceDown,
    SpaceUp,
    StartPan,
    EndPan,
    StartDrag,
    EndDrag,
    StartResize,
    EndResize,
    Cancel,
    EndSelect,
}

impl TransitionEvent {
    pub const ALL: [TransitionEvent; 10] = [
        Self::SpaceDown,
        Self::SpaceUp,
        Self::StartPan,
        Self::EndPan,
        Self::StartDrag,
        Self::EndDrag,
        Self::StartResize,
        Self::EndResize,
        Self::Cancel,
        Self::EndSelect,
    ];
}

/// Per-event payload. `None` fields fall back to the machine's own value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionContext {
    pub space_pressed: Option<bool>,
}

impl TransitionContext {
    pub fn with_space(space_pressed: bool) -> Self {
        Self {
            space_pressed: Some(space_pressed),
        }
    }
}

/// Predicate attached to a conditional edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    SpacePressed,
}

impl Guard {
    fn holds(&self, space_pressed: bool) -> bool {
        match self {
            Guard::SpacePressed => space_pressed,
        }
    }
}

/// Destination of an edge
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    To(InteractionState),
    Guarded {
        guard: Guard,
        then: InteractionState,
        otherwise: InteractionState,
    },
}

/// One row of the transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: InteractionState,
    pub event: TransitionEvent,
    pub target: Target,
}

const fn edge(from: InteractionState, event: TransitionEvent, to: InteractionState) -> Transition {
    Transition {
        from,
        event,
        target: Target::To(to),
    }
}

use InteractionState as S;
use TransitionEvent as E;

/// The complete transition table
pub const TRANSITIONS: &[Transition] = &[
    edge(S::Idle, E::SpaceDown, S::ReadyToPan),
    edge(S::Idle, E::StartDrag, S::DraggingImage),
    edge(S::Idle, E::StartResize, S::Resizing),
    edge(S::Idle, E::StartPan, S::Panning),
    edge(S::ReadyToPan, E::SpaceUp, S::Idle),
    edge(S::ReadyToPan, E::StartPan, S::Panning),
    edge(S::ReadyToPan, E::StartDrag, S::DraggingImage),
    edge(S::ReadyToPan, E::StartResize, S::Resizing),
    Transition {
        from: S::Panning,
        event: E::EndPan,
        target: Target::Guarded {
            guard: Guard::SpacePressed,
            then: S::ReadyToPan,
            otherwise: S::Idle,
        },
    },
    // keep panning until the pointer is released
    edge(S::Panning, E::SpaceUp, S::Panning),
    edge(S::DraggingImage, E::EndDrag, S::Idle),
    edge(S::DraggingImage, E::Cancel, S::Idle),
    edge(S::DraggingImage, E::SpaceDown, S::DraggingImage),
    edge(S::DraggingImage, E::SpaceUp, S::DraggingImage),
    edge(S::Resizing, E::EndResize, S::Idle),
    edge(S::Resizing, E::Cancel, S::Idle),
    edge(S::Selecting, E::EndSelect, S::Idle),
    edge(S::Selecting, E::Cancel, S::Idle),
];

/// Look up the edge for `(from, event)`, if the table defines one.
pub fn lookup(from: InteractionState, event: TransitionEvent) -> Option<&'static Transition> {
    TRANSITIONS.iter().find(|t| t.from == from && t.event == event)
}

/// Canvas interaction state plus the identifiers gestures operate on.
#[derive(Clone, Debug, Default)]
pub struct CanvasState {
    state: InteractionState,
    selected_id: Option<ItemId>,
    dragged_id: Option<ItemId>,
    resize_handle: Option<ResizeHandle>,
    space_pressed: bool,
    has_moved: bool,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected_id
    }

    pub fn dragged_id(&self) -> Option<ItemId> {
        self.dragged_id
    }

    pub fn resize_handle(&self) -> Option<ResizeHandle> {
        self.resize_handle
    }

    pub fn space_pressed(&self) -> bool {
        self.space_pressed
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn is_idle(&self) -> bool {
        self.state == InteractionState::Idle
    }

    pub fn is_ready_to_pan(&self) -> bool {
        self.state == InteractionState::ReadyToPan
    }

    pub fn is_panning(&self) -> bool {
        self.state == InteractionState::Panning
    }

    pub fn is_dragging(&self) -> bool {
        self.state == InteractionState::DraggingImage
    }

    pub fn is_resizing(&self) -> bool {
        self.state == InteractionState::Resizing
    }

    pub fn is_selecting(&self) -> bool {
        self.state == InteractionState::Selecting
    }

    /// Attempt a transition. Returns false, changing nothing, when the
    /// table has no edge for the current state and `event`.
    pub fn send(&mut self, event: TransitionEvent, ctx: TransitionContext) -> bool {
        let Some(transition) = lookup(self.state, event) else {
            debug!(state = ?self.state, ?event, "Rejected transition");
            return false;
        };

        let next = match transition.target {
            Target::To(next) => next,
            Target::Guarded { guard, then, otherwise } => {
                let space_pressed = ctx.space_pressed.unwrap_or(self.space_pressed);
                if guard.holds(space_pressed) { then } else { otherwise }
            }
        };

        trace!(from = ?self.state, ?event, to = ?next, "Transition");
        self.state = next;
        true
    }

    /// `send` with an empty payload
    pub fn send_event(&mut self, event: TransitionEvent) -> bool {
        self.send(event, TransitionContext::default())
    }

    pub fn select(&mut self, id: ItemId) {
        self.selected_id = Some(id);
    }

    pub fn deselect(&mut self) {
        self.selected_id = None;
    }

    /// Arm a drag on pointer down, before the pointer has travelled far
    /// enough to count as a drag. No transition happens yet.
    pub fn prepare_drag(&mut self, id: ItemId) {
        self.dragged_id = Some(id);
        self.has_moved = false;
    }

    /// Drop an armed drag that never started (the press was a click).
    pub fn disarm_drag(&mut self) {
        if !self.is_dragging() {
            self.dragged_id = None;
            self.has_moved = false;
        }
    }

    /// Enter `DraggingImage`. The dragged id is only recorded if the
    /// transition is legal.
    pub fn start_drag(&mut self, id: ItemId) -> bool {
        if !self.send_event(TransitionEvent::StartDrag) {
            return false;
        }
        self.dragged_id = Some(id);
        self.has_moved = false;
        true
    }

    /// Leave the drag and report whether the item moved past the drag
    /// threshold (a reorder) or not (a click).
    pub fn end_drag(&mut self) -> bool {
        let moved = self.has_moved;
        self.dragged_id = None;
        self.has_moved = false;
        self.send_event(TransitionEvent::EndDrag);
        moved
    }

    pub fn start_resize(&mut self, handle: ResizeHandle) -> bool {
        if !self.send_event(TransitionEvent::StartResize) {
            return false;
        }
        self.resize_handle = Some(handle);
        true
    }

    pub fn end_resize(&mut self) {
        self.resize_handle = None;
        self.send_event(TransitionEvent::EndResize);
    }

    pub fn start_pan(&mut self) -> bool {
        self.send_event(TransitionEvent::StartPan)
    }

    pub fn end_pan(&mut self) -> bool {
        self.send_event(TransitionEvent::EndPan)
    }

    /// Record the space key and forward it to the machine.
    pub fn set_space_pressed(&mut self, pressed: bool) {
        self.space_pressed = pressed;
        let event = if pressed {
            TransitionEvent::SpaceDown
        } else {
            TransitionEvent::SpaceUp
        };
        self.send(event, TransitionContext::with_space(pressed));
    }

    pub fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    /// Force `Idle` and clear every gesture field, whatever the state.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.dragged_id = None;
        self.resize_handle = None;
        self.has_moved = false;
    }

    /// Abort the current gesture.
    ///
    /// Uses the table's `Cancel` edge where there is one; any other gesture
    /// state (panning) is forced back to `Idle`. `ReadyToPan` is a held
    /// modifier, not a gesture, and survives.
    pub fn cancel(&mut self) {
        if !self.send_event(TransitionEvent::Cancel) && self.state.is_gesture() {
            debug!(state = ?self.state, "Forcing cancel");
            self.state = InteractionState::Idle;
        }
        self.dragged_id = None;
        self.resize_handle = None;
        self.has_moved = false;
    }
}
