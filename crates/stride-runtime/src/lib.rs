//! Stride Runtime - Tick loop infrastructure
//!
//! Provides the building blocks a host uses to drive the controller:
//! - `GameClock` — fixed-timestep accumulator for deterministic physics
//! - `InputState` — keyboard and mouse input tracking with action bindings

mod clock;
mod input;

pub use clock::{GameClock, MAX_FRAME_TIME};
pub use input::{BindingsFile, InputState, Trigger};
