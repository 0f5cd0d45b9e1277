//! Kinematic character body using Rapier's kinematic character controller

use crate::arena::{CameraMount, ResolvedRig};
use crate::world::PhysicsWorld;
use rapier3d::control::{CharacterAutostep, CharacterLength, KinematicCharacterController};
use rapier3d::parry::query::ShapeCastOptions;
use rapier3d::prelude::*;
use stride_controller::{ControllerState, Host};
use stride_core::{Result, StrideError, Vec3};

/// Capsule heights closer than this are treated as equal
const HEIGHT_EPSILON: f32 = 1e-4;

/// Downward reach added to every non-rising move. Rapier only reports floor
/// contact for moves that actually travel, so a body at rest needs this to
/// stay grounded.
const GROUND_SNAP: f32 = 0.05;

/// The player's collision capsule, moved with move-and-slide.
///
/// The rigid body sits at the feet; the capsule collider is offset upward by
/// half its height so crouching shrinks it toward the floor.
pub struct CharacterBody {
    /// The Rapier character controller
    controller: KinematicCharacterController,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    radius: f32,
    height: f32,
    camera: CameraMount,
    /// Floor contact from the last move
    grounded: bool,
}

impl CharacterBody {
    /// Spawn the rig's body and capsule into the world
    pub fn spawn(physics: &mut PhysicsWorld, rig: &ResolvedRig) -> Self {
        let controller = KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            autostep: Some(CharacterAutostep {
                max_height: CharacterLength::Absolute(0.3),
                min_width: CharacterLength::Absolute(0.2),
                include_dynamic_bodies: false,
            }),
            snap_to_ground: Some(CharacterLength::Absolute(0.2)),
            ..KinematicCharacterController::default()
        };

        let [x, y, z] = rig.position;
        let body = physics.insert_rigid_body(
            RigidBodyBuilder::kinematic_position_based()
                .translation(vector![x, y, z])
                .build(),
        );
        let collider = physics.insert_collider_with_parent(
            ColliderBuilder::new(capsule(rig.shape.height, rig.shape.radius))
                .translation(vector![0.0, rig.shape.height * 0.5, 0.0])
                .build(),
            body,
        );
        physics.update_query_pipeline();

        log::info!(
            "spawned character at [{}, {}, {}] (capsule r={} h={})",
            x,
            y,
            z,
            rig.shape.radius,
            rig.shape.height
        );

        Self {
            controller,
            body,
            collider,
            radius: rig.shape.radius,
            height: rig.shape.height,
            camera: rig.camera,
            grounded: false,
        }
    }

    pub fn grounded(&self) -> bool {
        self.grounded
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Feet position
    pub fn position(&self, physics: &PhysicsWorld) -> Result<Vec3> {
        let body = self.rigid_body(physics)?;
        let t = body.translation();
        Ok(Vec3::new(t.x, t.y, t.z))
    }

    /// World-space camera position for a controller state
    pub fn eye_position(&self, physics: &PhysicsWorld, state: &ControllerState) -> Result<Vec3> {
        let feet = self.position(physics)?;
        let local = state.camera_local_position().rotated_y(state.look.yaw);
        Ok(feet + Vec3::new(0.0, self.camera.height, 0.0) + local)
    }

    /// Query view over this body, answering the controller's host queries
    pub fn as_host<'a>(&'a self, physics: &'a PhysicsWorld) -> BodyHost<'a> {
        BodyHost {
            character: self,
            physics,
        }
    }

    /// Resize the capsule, keeping its bottom on the feet
    pub fn set_height(&mut self, physics: &mut PhysicsWorld, height: f32) -> Result<()> {
        if (height - self.height).abs() < HEIGHT_EPSILON {
            return Ok(());
        }
        let collider = physics
            .collider_set
            .get_mut(self.collider)
            .ok_or_else(|| StrideError::PhysicsError("character collider was removed".into()))?;
        collider.set_shape(capsule(height, self.radius));
        collider.set_position_wrt_parent(Isometry::translation(0.0, height * 0.5, 0.0));
        self.height = height;
        Ok(())
    }

    /// Move by `velocity * dt`, sliding along whatever is hit.
    ///
    /// Returns the velocity after collision: vertical speed is cancelled on
    /// landing and when the head hits a ceiling.
    pub fn move_and_slide(
        &mut self,
        physics: &mut PhysicsWorld,
        velocity: Vec3,
        yaw: f32,
        dt: f32,
    ) -> Result<Vec3> {
        let shape_pos = self.capsule_pose(physics)?;
        let shape = self.shape(physics)?;
        let desired = vector![velocity.x * dt, velocity.y * dt, velocity.z * dt];
        let mut request = desired;
        if request.y <= 0.0 {
            request.y = request.y.min(-GROUND_SNAP);
        }

        let corrected = self.controller.move_shape(
            dt,
            &physics.rigid_body_set,
            &physics.collider_set,
            &physics.query_pipeline,
            &*shape,
            &shape_pos,
            request,
            QueryFilter::default().exclude_rigid_body(self.body),
            |_| {},
        );

        if corrected.grounded != self.grounded {
            log::debug!("floor contact: {}", corrected.grounded);
        }
        self.grounded = corrected.grounded;

        let body = physics
            .get_rigid_body_mut(self.body)
            .ok_or_else(|| StrideError::PhysicsError("character body was removed".into()))?;
        let current = *body.position();
        let next = Isometry::new(
            current.translation.vector + corrected.translation,
            vector![0.0, yaw, 0.0],
        );
        body.set_next_kinematic_position(next);

        let mut result = velocity;
        let landed = self.grounded && velocity.y < 0.0;
        let bumped_head = desired.y > 0.0 && corrected.translation.y < desired.y * 0.5;
        if landed || bumped_head {
            result.y = 0.0;
        }
        Ok(result)
    }

    fn rigid_body<'a>(&self, physics: &'a PhysicsWorld) -> Result<&'a RigidBody> {
        physics
            .get_rigid_body(self.body)
            .ok_or_else(|| StrideError::PhysicsError("character body was removed".into()))
    }

    fn shape(&self, physics: &PhysicsWorld) -> Result<SharedShape> {
        physics
            .collider_set
            .get(self.collider)
            .map(|c| c.shared_shape().clone())
            .ok_or_else(|| StrideError::PhysicsError("character collider was removed".into()))
    }

    /// World pose of the capsule center
    fn capsule_pose(&self, physics: &PhysicsWorld) -> Result<Isometry<Real>> {
        let body = self.rigid_body(physics)?;
        let center = *body.translation() + vector![0.0, self.height * 0.5, 0.0];
        Ok(Isometry::new(center, Vector::zeros()))
    }

    /// Sweep the capsule along `motion` and report whether anything is in the way
    fn would_collide(&self, physics: &PhysicsWorld, motion: Vec3) -> Result<bool> {
        let pose = self.capsule_pose(physics)?;
        let shape = self.shape(physics)?;
        let hit = physics.query_pipeline.cast_shape(
            &physics.rigid_body_set,
            &physics.collider_set,
            &pose,
            &vector![motion.x, motion.y, motion.z],
            &*shape,
            ShapeCastOptions {
                max_time_of_impact: 1.0,
                target_distance: 0.0,
                // Contacts we are moving away from (the floor) do not block
                stop_at_penetration: false,
                compute_impact_geometry_on_penetration: false,
            },
            QueryFilter::default().exclude_rigid_body(self.body),
        );
        Ok(hit.is_some())
    }
}

/// Borrowed view of a [`CharacterBody`] in its world, passed to the controller
pub struct BodyHost<'a> {
    character: &'a CharacterBody,
    physics: &'a PhysicsWorld,
}

impl Host for BodyHost<'_> {
    fn is_on_floor(&self) -> bool {
        self.character.grounded
    }

    fn test_move(&self, motion: Vec3) -> bool {
        // A body that cannot be found cannot be shown to have room
        self.character
            .would_collide(self.physics, motion)
            .unwrap_or(true)
    }
}

fn capsule(height: f32, radius: f32) -> SharedShape {
    let half_height = height * 0.5 - radius;
    SharedShape::capsule_y(half_height.max(0.01), radius)
}
