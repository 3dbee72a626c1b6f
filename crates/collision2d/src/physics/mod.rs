//! Physics module: shapes, narrow-phase resolvers, collision orchestration,
//! and rigid-body integration
//!
//! The collision pipeline is split into two phases: a broad phase (quadtree
//! retrieval, see [`crate::spatial`]) that produces a superset of possibly
//! colliding pairs, and a narrow phase (the configured resolver) that
//! produces exact penetrations.

pub mod collider;
pub mod collision_manager;
pub mod resolvers;
pub mod rigid_body;
pub mod shape;

pub use collider::{ColliderData, ColliderKey, OwnerId};
pub use collision_manager::{Collision, CollisionManager, RayHit};
pub use resolvers::{AabbResolver, CollisionResolution, CollisionResolver, SatResolver};
pub use rigid_body::{RigidBodyData, RigidBodyKey, RigidBodyManager, RigidBodyType};
pub use shape::{Shape, ShapeKind};
