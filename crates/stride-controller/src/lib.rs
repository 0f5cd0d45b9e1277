//! Stride Controller - first-person movement as a per-tick transform
//!
//! The controller owns no scene objects. Each physics tick the host hands it
//! the previous [`ControllerState`], a [`TickInput`] snapshot and a [`Host`]
//! that answers floor-contact and collision queries; it returns the next
//! state, whose velocity the host feeds into its move-and-collide step.
//!
//! - [`ControllerConfig`] — immutable tuning values, loadable from TOML
//! - [`look`] — pointer capture and yaw/pitch
//! - [`locomotion`] — grounded/airborne velocity rules
//! - [`crouch`] — crouch toggling with a ceiling check
//! - [`headbob`] — speed-driven camera bob

mod config;
mod controller;
pub mod crouch;
pub mod headbob;
mod host;
pub mod locomotion;
pub mod look;
mod state;

pub use config::ControllerConfig;
pub use controller::MovementController;
pub use host::{FixedHost, Host};
pub use locomotion::Locomotion;
pub use look::{CaptureChange, LookState, PointerEvent};
pub use state::{ControllerState, TickInput};
