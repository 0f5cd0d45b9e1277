//! Per-tick controller state and input snapshot

use crate::config::ControllerConfig;
use crate::crouch::CrouchState;
use crate::locomotion::Locomotion;
use crate::look::LookState;
use serde::{Deserialize, Serialize};
use stride_core::{Vec2, Vec3};

/// Everything the controller carries from one tick to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Velocity for the host's move-and-collide step (meters/second).
    pub velocity: Vec3,
    pub look: LookState,
    pub crouch: CrouchState,
    /// Accumulated bob phase; only grows while grounded.
    pub headbob_phase: f32,
    /// Camera position relative to the head mount.
    pub camera_offset: Vec3,
    /// Rules applied on the last tick.
    pub locomotion: Locomotion,
}

impl ControllerState {
    /// Standing at rest, looking down -Z.
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            velocity: Vec3::ZERO,
            look: LookState::default(),
            crouch: CrouchState::standing(config),
            headbob_phase: 0.0,
            camera_offset: Vec3::ZERO,
            locomotion: Locomotion::default(),
        }
    }

    pub fn is_crouched(&self) -> bool {
        self.crouch.crouched
    }

    /// Head-relative camera position: crouch drop plus bob.
    pub fn camera_local_position(&self) -> Vec3 {
        self.camera_offset + Vec3::new(0.0, self.crouch.head_offset, 0.0)
    }
}

/// Input sampled by the host for one physics tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Movement axes: +x right, +y backward. Normalized by the controller.
    pub direction: Vec2,
    /// Jump went down since the previous tick.
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub sprint: bool,
    pub crouch: bool,
}

impl TickInput {
    pub fn moving(direction: Vec2) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }

    /// A fresh jump press (pressed and held).
    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self.jump_held = true;
        self
    }

    pub fn with_sprint(mut self) -> Self {
        self.sprint = true;
        self
    }

    pub fn with_crouch(mut self) -> Self {
        self.crouch = true;
        self
    }
}
