//! Collider registration data
//!
//! One [`ColliderData`] per physical collider instance; a single game object
//! may own many (a tilemap contributes one per solid tile). Colliders are
//! identified by their slotmap key, which is also the identity used by the
//! quadtree and the per-tick collision set.

use crate::physics::shape::Shape;

slotmap::new_key_type! {
    /// Identity of a registered collider
    pub struct ColliderKey;
}

/// Stable identifier of the game object that owns a collider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(pub u64);

/// Per-collider registration record
#[derive(Debug, Clone)]
pub struct ColliderData {
    /// Geometry, owned by this collider
    pub shape: Shape,

    /// Collision layer name, matched against the configured layer matrix
    pub layer: String,

    /// Owning game object
    pub owner: OwnerId,

    /// Whether this collider triggers broad/narrow phase eagerly.
    ///
    /// False for static immovable tiles that are only ever queried as remote
    /// targets of some other collider's update.
    pub update_collisions: bool,

    /// Whether this collider participates in physical displacement
    /// (false for trigger-only volumes)
    pub physics: bool,

    /// Whether this collider belongs to a registered rigid body
    pub has_rigid_body: bool,

    /// Cleared when removal is requested mid-tick; the record is dropped at
    /// the next tick boundary
    pub(crate) active: bool,
}

impl ColliderData {
    /// Create a collider with default flags: eagerly updated, physical,
    /// no rigid body
    pub fn new(shape: Shape, layer: impl Into<String>, owner: OwnerId) -> Self {
        Self {
            shape,
            layer: layer.into(),
            owner,
            update_collisions: true,
            physics: true,
            has_rigid_body: false,
            active: true,
        }
    }

    /// Mark as a passive remote target (static tiles)
    ///
    /// Passive colliders never run their own broad/narrow phase; they are
    /// only found by other colliders' queries.
    pub fn as_passive(mut self) -> Self {
        self.update_collisions = false;
        self
    }

    /// Mark as trigger-only (detected but never displaced against)
    pub fn as_trigger(mut self) -> Self {
        self.physics = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    #[test]
    fn test_builder_flags() {
        let shape = Shape::rectangle(Vec2::zeros(), 1.0, 1.0);

        let default = ColliderData::new(shape.clone(), "terrain", OwnerId(1));
        assert!(default.update_collisions && default.physics);
        assert!(!default.has_rigid_body);

        let passive = ColliderData::new(shape.clone(), "terrain", OwnerId(1)).as_passive();
        assert!(!passive.update_collisions);

        let trigger = ColliderData::new(shape, "pickup", OwnerId(2)).as_trigger();
        assert!(!trigger.physics);
    }
}
