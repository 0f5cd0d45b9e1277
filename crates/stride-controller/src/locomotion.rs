//! Grounded and airborne velocity rules.
//!
//! Grounded movement sets horizontal velocity directly. Airborne movement only
//! adds speed along the wish direction up to the air cap, so strafing can
//! curve a jump without letting the player accelerate freely in the air.
//! Vertical velocity is written by gravity and jumping only.

use serde::{Deserialize, Serialize};
use stride_core::{Vec2, Vec3};

/// Which set of movement rules applies this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    Grounded,
    #[default]
    Airborne,
}

impl Locomotion {
    pub fn from_floor_contact(on_floor: bool) -> Self {
        if on_floor {
            Locomotion::Grounded
        } else {
            Locomotion::Airborne
        }
    }

    pub fn is_grounded(self) -> bool {
        self == Locomotion::Grounded
    }
}

/// World-space wish direction for a 2D input and body yaw.
///
/// Input +x is right and +y is backward. The result is horizontal and either
/// unit length or zero.
pub fn wish_direction(input: Vec2, yaw: f32) -> Vec3 {
    let input = input.normalized();
    Vec3::new(input.x, 0.0, input.y).rotated_y(yaw)
}

/// Whether a jump fires this tick.
pub fn wants_jump(just_pressed: bool, held: bool, bunny_hop: bool) -> bool {
    just_pressed || (bunny_hop && held)
}

/// Replace horizontal velocity with `wish_dir * speed`, keeping vertical.
pub fn ground_move(velocity: Vec3, wish_dir: Vec3, speed: f32) -> Vec3 {
    Vec3::new(wish_dir.x * speed, velocity.y, wish_dir.z * speed)
}

/// Set vertical velocity to the jump impulse.
pub fn jump(velocity: Vec3, jump_velocity: f32) -> Vec3 {
    Vec3::new(velocity.x, jump_velocity, velocity.z)
}

/// Semi-implicit Euler gravity step.
pub fn apply_gravity(velocity: Vec3, gravity: f32, dt: f32) -> Vec3 {
    Vec3::new(velocity.x, velocity.y - gravity * dt, velocity.z)
}

/// Air-acceleration parameters, copied out of the controller config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirControl {
    pub cap: f32,
    pub accel: f32,
    pub move_speed: f32,
}

/// Accelerate toward the wish direction without exceeding the air cap.
///
/// Speed is only ever added along `wish_dir`, and only while the current
/// speed along it is below the capped wish speed.
pub fn air_accelerate(velocity: Vec3, wish_dir: Vec3, air: AirControl, dt: f32) -> Vec3 {
    let current_speed = velocity.dot(&wish_dir);
    let capped_speed = (wish_dir * air.move_speed).length().min(air.cap);
    let add_speed_till_cap = capped_speed - current_speed;
    if add_speed_till_cap <= 0.0 {
        return velocity;
    }

    let accel_speed = (air.accel * air.move_speed * dt).min(add_speed_till_cap);
    velocity + wish_dir * accel_speed
}
