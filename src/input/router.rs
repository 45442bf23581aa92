use crate::command::Command;
use crate::engine::DrawingEngine;

use super::InputEvent;

/// Routes an input event to the engine's gesture entry points.
///
/// Leaving the surface ends the gesture like a release would, without a
/// final position.
pub fn route_event(event: &InputEvent, engine: &mut DrawingEngine) -> Option<Command> {
    match *event {
        InputEvent::PointerDown { position } => engine.on_gesture_start(position),
        InputEvent::PointerMove { position } => engine.on_gesture_move(position),
        InputEvent::PointerUp { position } => engine.on_gesture_end(Some(position)),
        InputEvent::PointerLeave { .. } => engine.on_gesture_end(None),
    }
}
