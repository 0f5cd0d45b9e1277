//! Movement controller.
//!
//! This is the entry point hosts call. Pointer events are applied as they
//! arrive with [`MovementController::handle_pointer`]; once per physics tick
//! [`MovementController::step`] turns the previous state and the sampled
//! input into the next state.

use crate::config::ControllerConfig;
use crate::headbob;
use crate::host::Host;
use crate::locomotion::{self, AirControl, Locomotion};
use crate::look::{CaptureChange, PointerEvent};
use crate::state::{ControllerState, TickInput};
use stride_core::Result;

/// First-person movement controller.
///
/// # Example
///
/// ```
/// use stride_controller::{ControllerConfig, FixedHost, MovementController, TickInput};
/// use stride_core::Vec2;
///
/// let controller = MovementController::new(ControllerConfig::default()).unwrap();
/// let mut state = controller.initial_state();
///
/// // Each physics tick:
/// let input = TickInput::moving(Vec2::new(0.0, -1.0));
/// state = controller.step(state, &input, &FixedHost::grounded(), 1.0 / 60.0);
/// assert!(state.velocity.z < 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MovementController {
    config: ControllerConfig,
}

impl MovementController {
    /// Create a controller, rejecting configs with out-of-range values.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_default_config() -> Self {
        Self {
            config: ControllerConfig::default(),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn initial_state(&self) -> ControllerState {
        ControllerState::new(&self.config)
    }

    /// Apply a pointer event to the look angles.
    pub fn handle_pointer(
        &self,
        state: ControllerState,
        event: PointerEvent,
    ) -> (ControllerState, Option<CaptureChange>) {
        let (look, change) =
            state
                .look
                .handle(event, self.config.look_sensitivity, self.config.pitch_limit());
        if let Some(change) = change {
            log::debug!("pointer capture: {:?}", change);
        }
        (ControllerState { look, ..state }, change)
    }

    /// Advance one physics tick.
    ///
    /// `host` describes the body before this tick's movement. A non-positive
    /// or non-finite `dt` returns the state unchanged.
    pub fn step<H: Host>(
        &self,
        state: ControllerState,
        input: &TickInput,
        host: &H,
        dt: f32,
    ) -> ControllerState {
        if !(dt.is_finite() && dt > 0.0) {
            return state;
        }
        let config = &self.config;

        let crouch = state.crouch.step(input.crouch, host, config, dt);
        let wish_dir = locomotion::wish_direction(input.direction, state.look.yaw);

        let locomotion = Locomotion::from_floor_contact(host.is_on_floor());
        if locomotion != state.locomotion {
            log::debug!("locomotion: {:?} -> {:?}", state.locomotion, locomotion);
        }

        let mut velocity = state.velocity;
        let mut headbob_phase = state.headbob_phase;
        match locomotion {
            Locomotion::Grounded => {
                if locomotion::wants_jump(input.jump_pressed, input.jump_held, config.bunny_hop) {
                    log::debug!("jump: vy={}", config.jump_velocity);
                    velocity = locomotion::jump(velocity, config.jump_velocity);
                }
                let speed = config.ground_speed(input.sprint, crouch.crouched);
                velocity = locomotion::ground_move(velocity, wish_dir, speed);
                headbob_phase = headbob::advance_phase(headbob_phase, true, velocity.length(), dt);
            }
            Locomotion::Airborne => {
                velocity = locomotion::apply_gravity(velocity, config.gravity, dt);
                let air = AirControl {
                    cap: config.air_cap,
                    accel: config.air_accel,
                    move_speed: config.air_move_speed,
                };
                velocity = locomotion::air_accelerate(velocity, wish_dir, air, dt);
            }
        }

        ControllerState {
            velocity,
            look: state.look,
            crouch,
            headbob_phase,
            camera_offset: headbob::camera_offset(
                headbob_phase,
                config.headbob_amplitude,
                config.headbob_frequency,
            ),
            locomotion,
        }
    }
}
