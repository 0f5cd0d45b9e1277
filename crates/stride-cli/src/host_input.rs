//! Translates frame input into controller events and per-tick input

use stride_controller::{PointerEvent, TickInput};
use stride_runtime::InputState;

/// Pointer events for this frame, in the order the controller should see them
pub fn pointer_events(input: &InputState) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    if input.is_action_just_pressed("capture") {
        events.push(PointerEvent::Button);
    }
    if input.is_action_just_pressed("cancel") {
        events.push(PointerEvent::Cancel);
    }
    let (dx, dy) = input.raw_mouse_delta();
    if dx != 0.0 || dy != 0.0 {
        events.push(PointerEvent::Motion {
            dx: dx as f32,
            dy: dy as f32,
        });
    }
    events
}

/// Sample input for one fixed tick.
///
/// A frame can run several fixed ticks; the jump press edge is only reported
/// on the first of them.
pub fn tick_input(input: &InputState, first_tick_of_frame: bool) -> TickInput {
    TickInput {
        direction: input.get_vector("move_left", "move_right", "move_forward", "move_backward"),
        jump_pressed: first_tick_of_frame && input.is_action_just_pressed("jump"),
        jump_held: input.is_action_pressed("jump"),
        sprint: input.is_action_pressed("sprint"),
        crouch: input.is_action_pressed("crouch"),
    }
}
