//! Crouching.
//!
//! Holding crouch lowers the head and shortens the capsule. Releasing it only
//! stands the body back up when the host reports room overhead; otherwise the
//! body stays crouched and tries again next tick. Head offset and capsule
//! height approach their targets at a bounded rate.

use crate::config::ControllerConfig;
use crate::host::Host;
use serde::{Deserialize, Serialize};
use stride_core::{move_toward, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrouchState {
    pub crouched: bool,
    /// Vertical head offset from its standing mount; zero or negative.
    pub head_offset: f32,
    /// Current collision capsule height.
    pub capsule_height: f32,
}

impl CrouchState {
    pub fn standing(config: &ControllerConfig) -> Self {
        Self {
            crouched: false,
            head_offset: 0.0,
            capsule_height: config.standing_height,
        }
    }

    /// Advance one tick.
    pub fn step<H: Host>(self, wants_crouch: bool, host: &H, config: &ControllerConfig, dt: f32) -> Self {
        let crouched = if wants_crouch {
            if !self.crouched {
                log::debug!("crouch: lowering");
            }
            true
        } else if self.crouched {
            // Only the height still missing from a full stand needs room
            let rise = (config.standing_height - self.capsule_height).max(0.0);
            let blocked = host.test_move(Vec3::UP * rise);
            if blocked {
                log::debug!("crouch: stand refused, no headroom");
            } else {
                log::debug!("crouch: standing up");
            }
            blocked
        } else {
            false
        };

        let (head_target, height_target) = if crouched {
            (-config.crouch_depth, config.crouched_height())
        } else {
            (0.0, config.standing_height)
        };
        let max_delta = config.crouch_rate * dt;

        Self {
            crouched,
            head_offset: move_toward(self.head_offset, head_target, max_delta),
            capsule_height: move_toward(self.capsule_height, height_target, max_delta),
        }
    }
}
