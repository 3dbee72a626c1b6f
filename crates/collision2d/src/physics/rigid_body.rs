//! Rigid-body integration
//!
//! The fixed-timestep integrator. Each physics tick, every dynamic body gets
//! gravity applied and is then moved axis-by-axis, X before Y: move along one
//! axis, refresh that body's collisions, displace out of penetration, refresh
//! again, and zero the axis velocity when the displacement opposes it.
//!
//! The axis separation is deliberate and order-exact. Resolving a full 2D
//! displacement in one step is unstable at corners (a diagonal penetration
//! vector can push a body through a wall); sequential 1-D sweeps with an
//! intermediate re-query keep the Y step consistent with the X result.

use slotmap::SlotMap;

use crate::core::config::ConfigError;
use crate::foundation::math::{utils::sign, Axis, Vec2};
use crate::physics::collider::ColliderKey;
use crate::physics::collision_manager::CollisionManager;
use crate::transform::{TransformKey, TransformStore};

slotmap::new_key_type! {
    /// Identity of a registered rigid body
    pub struct RigidBodyKey;
}

/// Whether the integrator moves a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigidBodyType {
    /// Integrated every physics tick
    Dynamic,
    /// Collision-response target only; never moved
    Static,
}

/// Per-body integration state
#[derive(Debug, Clone)]
pub struct RigidBodyData {
    /// Handle to the body's position in the shared transform store
    pub transform: TransformKey,

    /// Static bodies keep their colliders registered but are skipped by the
    /// integrator
    pub body_type: RigidBodyType,

    /// Current velocity in units per second
    pub velocity: Vec2,

    /// Downward gravity magnitude (>= 0), applied to `velocity.y`
    pub gravity: f32,

    /// Colliders owned by this body, moved in lockstep with it
    pub colliders: Vec<ColliderKey>,

    /// Pre-zero value of any velocity axis zeroed this tick; a side channel
    /// for gameplay "did I just land" checks, valid for one tick
    pub cache_velocity: Vec2,
}

impl RigidBodyData {
    /// Create a dynamic body at rest
    pub fn new(transform: TransformKey, colliders: Vec<ColliderKey>) -> Self {
        Self {
            transform,
            body_type: RigidBodyType::Dynamic,
            velocity: Vec2::zeros(),
            gravity: 0.0,
            colliders,
            cache_velocity: Vec2::zeros(),
        }
    }

    /// Set the gravity magnitude
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Mark as an immovable collision-response target
    pub fn as_static(mut self) -> Self {
        self.body_type = RigidBodyType::Static;
        self
    }
}

/// Fixed-timestep rigid-body integrator
pub struct RigidBodyManager {
    bodies: SlotMap<RigidBodyKey, RigidBodyData>,
    /// Registration order; bodies are integrated in this order every tick
    order: Vec<RigidBodyKey>,
}

impl Default for RigidBodyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBodyManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            bodies: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Register a rigid body
    ///
    /// Requires at least one physics-enabled collider; marks every owned
    /// collider as belonging to a rigid body so other bodies displace
    /// against them.
    pub fn add_rigid_body(
        &mut self,
        body: RigidBodyData,
        collision_manager: &mut CollisionManager,
    ) -> Result<RigidBodyKey, ConfigError> {
        let has_physics_collider = body.colliders.iter().any(|&key| {
            collision_manager
                .collider(key)
                .map_or(false, |c| c.physics)
        });
        if !has_physics_collider {
            return Err(ConfigError::RigidBodyWithoutCollider);
        }

        for &key in &body.colliders {
            collision_manager.set_has_rigid_body(key, true);
        }
        let key = self.bodies.insert(body);
        self.order.push(key);
        Ok(key)
    }

    /// Tear down a rigid body, flushing its colliders from the collision
    /// manager
    pub fn remove_rigid_body(
        &mut self,
        key: RigidBodyKey,
        collision_manager: &mut CollisionManager,
    ) {
        if let Some(body) = self.bodies.remove(key) {
            self.order.retain(|&k| k != key);
            for collider in body.colliders {
                collision_manager.remove_collider(collider);
            }
        }
    }

    /// Read a body
    pub fn body(&self, key: RigidBodyKey) -> Option<&RigidBodyData> {
        self.bodies.get(key)
    }

    /// Mutate a body (velocity and gravity are public fields)
    pub fn body_mut(&mut self, key: RigidBodyKey) -> Option<&mut RigidBodyData> {
        self.bodies.get_mut(key)
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Run one physics tick over every dynamic body, in registration order
    pub fn step(
        &mut self,
        delta: f32,
        collision_manager: &mut CollisionManager,
        transforms: &mut TransformStore,
    ) {
        for &key in &self.order {
            let Some(body) = self.bodies.get_mut(key) else {
                continue;
            };
            if body.body_type == RigidBodyType::Static {
                continue;
            }

            // Gravity is one-directional: downward-positive magnitude pulls
            // velocity.y negative.
            if body.gravity > 0.0 {
                body.velocity.y -= body.gravity * delta;
            }
            body.cache_velocity = Vec2::zeros();

            for axis in Axis::ALL {
                Self::step_axis(body, axis, delta, collision_manager, transforms);
            }
        }
    }

    /// Move and resolve one body along a single axis
    fn step_axis(
        body: &mut RigidBodyData,
        axis: Axis,
        delta: f32,
        collision_manager: &mut CollisionManager,
        transforms: &mut TransformStore,
    ) {
        let travel = axis.of(body.velocity) * delta;
        if travel != 0.0 {
            let travel_vec = axis.unit() * travel;
            transforms.translate(body.transform, travel_vec);
            for &collider in &body.colliders {
                collision_manager.translate_collider(collider, travel_vec);
            }
        }

        // Keep the collision state consistent before reading penetrations;
        // the Y step must see the X step's outcome.
        for &collider in &body.colliders {
            collision_manager.refresh_collisions_for_collider(collider);
        }

        // Pick the single largest-magnitude candidate displacement; opposing
        // collisions are not summed.
        let mut displacement = 0.0f32;
        for &collider in &body.colliders {
            let is_physics = collision_manager
                .collider(collider)
                .map_or(false, |c| c.physics);
            if !is_physics {
                continue;
            }
            for collision in collision_manager.collisions_for_collider(collider) {
                let remote_resists = collision_manager
                    .collider(collision.remote)
                    .map_or(false, |r| r.physics && r.has_rigid_body);
                if !remote_resists {
                    continue;
                }
                let candidate = axis.of(collision.resolution.displacement_direction)
                    * collision.resolution.penetration;
                if candidate.abs() > displacement.abs() {
                    displacement = candidate;
                }
            }
        }

        if displacement != 0.0 {
            let displacement_vec = axis.unit() * displacement;
            transforms.translate(body.transform, displacement_vec);
            for &collider in &body.colliders {
                collision_manager.translate_collider(collider, displacement_vec);
            }
            for &collider in &body.colliders {
                collision_manager.refresh_collisions_for_collider(collider);
            }
        }

        // A displacement opposing the motion means this axis hit something
        // solid: kill the velocity, keeping the pre-zero value for one tick.
        let velocity = axis.of(body.velocity);
        if sign(displacement) != 0.0 && sign(displacement) == -sign(velocity) {
            axis.set(&mut body.cache_velocity, velocity);
            axis.set(&mut body.velocity, 0.0);
        }
    }
}
