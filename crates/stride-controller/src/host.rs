//! Queries the controller needs answered by the host's collision system

use stride_core::Vec3;

/// The host side of a controller tick.
///
/// Implemented by whatever owns the collision world (a physics engine body,
/// a test fixture). Both queries describe the body as it stands before this
/// tick's velocity is applied.
pub trait Host {
    /// Whether the body is resting on a floor.
    fn is_on_floor(&self) -> bool;

    /// Whether moving the body by `motion` from its current pose would collide.
    fn test_move(&self, motion: Vec3) -> bool;
}

/// A host with constant answers, for hosts without collision and for tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedHost {
    pub on_floor: bool,
    /// Every `test_move` reports a collision
    pub blocked: bool,
}

impl FixedHost {
    pub fn grounded() -> Self {
        Self {
            on_floor: true,
            blocked: false,
        }
    }

    pub fn airborne() -> Self {
        Self {
            on_floor: false,
            blocked: false,
        }
    }

    pub fn with_ceiling(mut self) -> Self {
        self.blocked = true;
        self
    }
}

impl Host for FixedHost {
    fn is_on_floor(&self) -> bool {
        self.on_floor
    }

    fn test_move(&self, _motion: Vec3) -> bool {
        self.blocked
    }
}

impl<H: Host + ?Sized> Host for &H {
    fn is_on_floor(&self) -> bool {
        (**self).is_on_floor()
    }

    fn test_move(&self, motion: Vec3) -> bool {
        (**self).test_move(motion)
    }
}
