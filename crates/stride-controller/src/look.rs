//! Pointer capture and look angles.
//!
//! Yaw turns the whole body; pitch tilts only the camera and is clamped to the
//! configured limit. Pointer motion only turns the view while the pointer is
//! captured: a button press captures, the cancel action releases.

use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use stride_core::Vec3;

/// A pointer-side event delivered by the host, outside the physics tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// A pointer button was pressed.
    Button,
    /// The cancel action was triggered.
    Cancel,
    /// Relative pointer motion in pixels.
    Motion { dx: f32, dy: f32 },
}

/// Capture transition the host must mirror on its cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureChange {
    Captured,
    Released,
}

/// Look angles in radians plus the capture mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LookState {
    /// Body rotation around +Y, wrapped to [-π, π).
    pub yaw: f32,
    /// Camera rotation around its local X axis; positive looks up.
    pub pitch: f32,
    pub captured: bool,
}

impl LookState {
    /// Apply one pointer event, returning the new angles and any capture change.
    pub fn handle(
        self,
        event: PointerEvent,
        sensitivity: f32,
        pitch_limit: f32,
    ) -> (Self, Option<CaptureChange>) {
        let mut next = self;
        match event {
            PointerEvent::Button => {
                next.captured = true;
                let change = (!self.captured).then_some(CaptureChange::Captured);
                (next, change)
            }
            PointerEvent::Cancel => {
                next.captured = false;
                let change = self.captured.then_some(CaptureChange::Released);
                (next, change)
            }
            PointerEvent::Motion { dx, dy } => {
                if !self.captured || !dx.is_finite() || !dy.is_finite() {
                    return (self, None);
                }
                next.yaw = wrap_angle(self.yaw - dx * sensitivity);
                next.pitch = (self.pitch - dy * sensitivity).clamp(-pitch_limit, pitch_limit);
                (next, None)
            }
        }
    }

    /// Unit view direction. Zero yaw and pitch look down -Z.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
