//! Core engine implementation
//!
//! [`PhysicsEngine`] wires the subsystems together with explicit
//! construction: the collision manager, rigid-body integrator, transform
//! store, and fixed-step driver are built from one validated config and
//! passed where they are needed, never looked up from a global registry.

use crate::core::config::{ConfigError, PhysicsConfig};
use crate::foundation::time::FixedTimestep;
use crate::physics::collider::{ColliderData, ColliderKey};
use crate::physics::collision_manager::CollisionManager;
use crate::physics::rigid_body::{RigidBodyData, RigidBodyKey, RigidBodyManager};
use crate::transform::TransformStore;

/// Top-level physics engine facade
///
/// Owns every subsystem and drives the fixed-step loop. The host application
/// feeds it wall-clock frame deltas; game and physics steps run at their
/// configured fixed rates regardless of the rendering frame rate.
pub struct PhysicsEngine {
    transforms: TransformStore,
    collisions: CollisionManager,
    rigid_bodies: RigidBodyManager,
    timestep: FixedTimestep,
}

impl PhysicsEngine {
    /// Build an engine from configuration
    pub fn new(config: PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "initializing physics engine: {:?} narrow phase, {} Hz game step, {} Hz physics step",
            config.collision_method,
            config.game_hz,
            config.physics_hz
        );

        Ok(Self {
            collisions: CollisionManager::new(&config)?,
            rigid_bodies: RigidBodyManager::new(),
            transforms: TransformStore::new(),
            timestep: FixedTimestep::new(config.game_hz, config.physics_hz),
        })
    }

    /// Advance the simulation by a wall-clock frame delta
    ///
    /// Runs zero or more game steps depending on the accumulated delta; each
    /// game step starts a collision frame and runs its physics substeps in
    /// order: collision tick, then rigid-body integration.
    pub fn advance(&mut self, frame_delta: f32) {
        let physics_delta = self.timestep.physics_delta();
        for substeps in self.timestep.advance(frame_delta) {
            self.collisions.begin_frame();
            for _ in 0..substeps {
                self.collisions.update();
                self.rigid_bodies
                    .step(physics_delta, &mut self.collisions, &mut self.transforms);
            }
        }
    }

    /// Register a collider
    pub fn add_collider(&mut self, collider: ColliderData) -> Result<ColliderKey, ConfigError> {
        self.collisions.add_collider(collider)
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, key: ColliderKey) {
        self.collisions.remove_collider(key);
    }

    /// Register a rigid body
    pub fn add_rigid_body(&mut self, body: RigidBodyData) -> Result<RigidBodyKey, ConfigError> {
        self.rigid_bodies.add_rigid_body(body, &mut self.collisions)
    }

    /// Remove a rigid body, flushing its colliders
    pub fn remove_rigid_body(&mut self, key: RigidBodyKey) {
        self.rigid_bodies.remove_rigid_body(key, &mut self.collisions);
    }

    /// Get the collision manager
    pub fn collisions(&self) -> &CollisionManager {
        &self.collisions
    }

    /// Get mutable access to the collision manager
    pub fn collisions_mut(&mut self) -> &mut CollisionManager {
        &mut self.collisions
    }

    /// Get the rigid-body manager
    pub fn rigid_bodies(&self) -> &RigidBodyManager {
        &self.rigid_bodies
    }

    /// Get mutable access to the rigid-body manager
    pub fn rigid_bodies_mut(&mut self) -> &mut RigidBodyManager {
        &mut self.rigid_bodies
    }

    /// Get the transform store
    pub fn transforms(&self) -> &TransformStore {
        &self.transforms
    }

    /// Get mutable access to the transform store
    pub fn transforms_mut(&mut self) -> &mut TransformStore {
        &mut self.transforms
    }

    /// Seconds per physics substep
    pub fn physics_delta(&self) -> f32 {
        self.timestep.physics_delta()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::physics::collider::OwnerId;
    use crate::physics::shape::Shape;
    use approx::assert_relative_eq;

    fn spawn_box(
        engine: &mut PhysicsEngine,
        center: Vec2,
        size: f32,
        build: impl FnOnce(RigidBodyData) -> RigidBodyData,
    ) -> (RigidBodyKey, crate::transform::TransformKey) {
        let collider = engine
            .add_collider(ColliderData::new(
                Shape::rectangle(center, size, size),
                "default",
                OwnerId(0),
            ))
            .unwrap();
        let transform = engine.transforms_mut().insert(center);
        let body = engine
            .add_rigid_body(build(RigidBodyData::new(transform, vec![collider])))
            .unwrap();
        (body, transform)
    }

    #[test]
    fn test_advance_runs_deterministic_substeps() {
        let config = PhysicsConfig::default().with_update_rates(60.0, 60.0);
        let mut engine = PhysicsEngine::new(config).unwrap();

        let (_, transform) = spawn_box(&mut engine, Vec2::new(0.0, 100.0), 2.0, |b| {
            b.with_velocity(Vec2::new(60.0, 0.0))
        });

        // Ten 60 Hz frames move a 60 u/s body exactly ten units.
        for _ in 0..10 {
            engine.advance(1.0 / 60.0 + 1e-5);
        }
        let position = engine.transforms().position(transform).unwrap();
        assert_relative_eq!(position.x, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_fall_and_rest_through_facade() {
        let config = PhysicsConfig::default().with_update_rates(60.0, 60.0);
        let mut engine = PhysicsEngine::new(config).unwrap();

        spawn_box(&mut engine, Vec2::new(0.0, 0.0), 10.0, |b| b.as_static());
        let (body, transform) = spawn_box(&mut engine, Vec2::new(0.0, 10.0), 2.0, |b| {
            b.with_gravity(9.8)
        });

        for _ in 0..600 {
            engine.advance(1.0 / 60.0 + 1e-5);
        }

        let position = engine.transforms().position(transform).unwrap();
        assert_relative_eq!(position.y, 6.0, epsilon = 1e-2);
        assert_eq!(engine.rigid_bodies().body(body).unwrap().velocity.y, 0.0);
    }
}
