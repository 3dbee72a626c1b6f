//! # collision2d
//!
//! A 2D collision detection and rigid-body resolution engine.
//!
//! ## Features
//!
//! - **Quadtree broad phase**: self-balancing spatial index over collider
//!   bounding boxes, with fixed or dynamically tracked world bounds
//! - **Pluggable narrow phase**: axis-aligned bounding rectangle overlap or
//!   Separating Axis Theorem resolution, selected at construction
//! - **Axis-separated integration**: fixed-timestep rigid-body stepping that
//!   resolves X before Y with intermediate re-queries, preventing corner
//!   tunneling
//! - **Layer filtering**: optional symmetric layer-pair collision matrix
//! - **Deterministic stepping**: accumulator-driven fixed game and physics
//!   steps decoupled from the rendering frame rate
//!
//! ## Quick Start
//!
//! ```rust
//! use collision2d::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut engine = PhysicsEngine::new(PhysicsConfig::default())?;
//!
//!     // A static floor and a falling box.
//!     let floor_shape = Shape::rectangle(Vec2::new(0.0, 0.0), 100.0, 2.0);
//!     let floor = engine.add_collider(ColliderData::new(floor_shape, "terrain", OwnerId(0)))?;
//!     let floor_transform = engine.transforms_mut().insert(Vec2::new(0.0, 0.0));
//!     engine.add_rigid_body(RigidBodyData::new(floor_transform, vec![floor]).as_static())?;
//!
//!     let box_shape = Shape::rectangle(Vec2::new(0.0, 20.0), 2.0, 2.0);
//!     let falling = engine.add_collider(ColliderData::new(box_shape, "crate", OwnerId(1)))?;
//!     let box_transform = engine.transforms_mut().insert(Vec2::new(0.0, 20.0));
//!     engine.add_rigid_body(
//!         RigidBodyData::new(box_transform, vec![falling]).with_gravity(9.8),
//!     )?;
//!
//!     // Drive with wall-clock frame deltas; physics steps stay fixed.
//!     for _ in 0..60 {
//!         engine.advance(1.0 / 60.0);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;

pub mod debug;
pub mod foundation;
pub mod physics;
pub mod spatial;
pub mod transform;

mod engine;

pub use engine::PhysicsEngine;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{CollisionMethod, ConfigError, PhysicsConfig, QuadTreeConfig},
        foundation::{
            math::{Axis, Rect, Vec2},
            time::{FixedTimestep, Timer},
        },
        physics::{
            Collision, ColliderData, ColliderKey, CollisionManager, CollisionResolution,
            OwnerId, RigidBodyData, RigidBodyKey, RigidBodyManager, RigidBodyType, Shape,
            ShapeKind,
        },
        transform::{TransformKey, TransformStore},
        PhysicsEngine,
    };
}
