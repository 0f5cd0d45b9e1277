//! Physics world wrapping Rapier 3D

use rapier3d::prelude::*;

/// Wraps Rapier's physics pipeline and body/collider sets
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with the given downward gravity
    pub fn new(gravity: f32) -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            gravity: vector![0.0, -gravity, 0.0],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Step the physics simulation by dt seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Refresh scene queries without stepping, e.g. right after building a level
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Insert a rigid body and return its handle
    pub fn insert_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Insert a collider attached to a rigid body
    pub fn insert_collider_with_parent(
        &mut self,
        collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Insert a fixed box with the given center and full size
    pub fn insert_static_box(&mut self, center: [f32; 3], size: [f32; 3]) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center[0], center[1], center[2]])
            .build();
        let handle = self.insert_rigid_body(body);
        let collider = ColliderBuilder::cuboid(size[0] * 0.5, size[1] * 0.5, size[2] * 0.5)
            .friction(0.5)
            .build();
        self.insert_collider_with_parent(collider, handle)
    }

    /// Get a rigid body by handle
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable rigid body by handle
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(9.8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_physics_world() {
        let world = PhysicsWorld::default();
        assert_eq!(world.rigid_body_set.len(), 0);
        assert_eq!(world.collider_set.len(), 0);
        assert!((world.gravity.y + 9.8).abs() < 1e-6);
    }

    #[test]
    fn test_insert_static_box() {
        let mut world = PhysicsWorld::default();
        world.insert_static_box([0.0, -0.5, 0.0], [10.0, 1.0, 10.0]);

        assert_eq!(world.rigid_body_set.len(), 1);
        assert_eq!(world.collider_set.len(), 1);
    }

    #[test]
    fn test_static_box_is_queryable() {
        let mut world = PhysicsWorld::default();
        world.insert_static_box([0.0, -0.5, 0.0], [10.0, 1.0, 10.0]);
        world.update_query_pipeline();

        let ray = Ray::new(point![0.0, 5.0, 0.0], vector![0.0, -1.0, 0.0]);
        let hit = world.query_pipeline.cast_ray(
            &world.rigid_body_set,
            &world.collider_set,
            &ray,
            100.0,
            true,
            QueryFilter::default(),
        );
        let (_, toi) = hit.expect("ray should hit the floor");
        assert!((toi - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_gravity_simulation() {
        let mut world = PhysicsWorld::default();

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, 10.0, 0.0])
            .build();
        let handle = world.insert_rigid_body(body);
        world.insert_collider_with_parent(ColliderBuilder::ball(0.5).build(), handle);

        let initial_y = world.get_rigid_body(handle).unwrap().translation().y;
        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }
        let final_y = world.get_rigid_body(handle).unwrap().translation().y;

        assert!(final_y < initial_y);
    }
}
