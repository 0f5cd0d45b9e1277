//! Stride Physics - Rapier 3D reference host
//!
//! Runs the movement controller against real collision:
//! - `PhysicsWorld` — wraps Rapier pipeline, body/collider sets
//! - `ArenaFile` — TOML level geometry and player rig
//! - `CharacterBody` — kinematic capsule with move-and-slide and host queries
//! - `ArenaHost` — ties the three together into one tick

pub mod arena;
pub mod character;
pub mod world;

use arena::ArenaFile;
use character::CharacterBody;
use stride_controller::{ControllerConfig, ControllerState, MovementController, TickInput};
use stride_core::{Result, Vec3};
use world::PhysicsWorld;

/// A loaded arena with the player's body spawned in it
pub struct ArenaHost {
    pub physics_world: PhysicsWorld,
    pub character: CharacterBody,
}

impl ArenaHost {
    /// Build static geometry and spawn the player.
    ///
    /// `config` should come from [`ArenaFile::controller_config`] so the world
    /// and the controller agree on gravity. Fails when the arena's player rig
    /// is incomplete.
    pub fn from_arena(arena: &ArenaFile, config: &ControllerConfig) -> Result<Self> {
        let rig = arena.rig()?;

        let mut physics_world = PhysicsWorld::new(config.gravity);
        for solid in &arena.solids {
            physics_world.insert_static_box(solid.position, solid.size);
        }
        physics_world.update_query_pipeline();

        let character = CharacterBody::spawn(&mut physics_world, &rig);
        log::info!(
            "arena '{}' loaded: {} solids",
            arena.arena.name,
            arena.solids.len()
        );

        Ok(Self {
            physics_world,
            character,
        })
    }

    /// Run one controller step, then move the body and step the world
    pub fn tick(
        &mut self,
        controller: &MovementController,
        state: ControllerState,
        input: &TickInput,
        dt: f32,
    ) -> Result<ControllerState> {
        let next = controller.step(
            state,
            input,
            &self.character.as_host(&self.physics_world),
            dt,
        );

        self.character
            .set_height(&mut self.physics_world, next.crouch.capsule_height)?;
        let velocity = self.character.move_and_slide(
            &mut self.physics_world,
            next.velocity,
            next.look.yaw,
            dt,
        )?;
        self.physics_world.step(dt);

        Ok(ControllerState { velocity, ..next })
    }

    pub fn position(&self) -> Result<Vec3> {
        self.character.position(&self.physics_world)
    }

    pub fn eye_position(&self, state: &ControllerState) -> Result<Vec3> {
        self.character.eye_position(&self.physics_world, state)
    }
}
