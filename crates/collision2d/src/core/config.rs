//! # Physics Configuration
//!
//! Consolidates the engine's construction-time inputs into a single,
//! serializable structure: collision method selection, quadtree tuning,
//! optional fixed world bounds, the collision-layer matrix, and update rates.
//!
//! Configuration is validated once, up front, and every constructor that
//! consumes it returns `Result` rather than panicking; a bad config is a
//! recoverable error for the hosting game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::foundation::math::Rect;
use crate::physics::shape::ShapeKind;

/// Narrow-phase algorithm used for every collider pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionMethod {
    /// Axis-aligned bounding rectangle overlap (rectangles and circles)
    Aabb,
    /// Separating Axis Theorem (rectangles, polygons, and lines)
    Sat,
}

/// Tuning for the broad-phase quadtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadTreeConfig {
    /// Maximum subdivision depth
    pub max_levels: u32,

    /// Maximum items per node before subdivision
    pub max_items_per_node: usize,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_levels: 8,
            max_items_per_node: 8,
        }
    }
}

/// Complete configuration for the physics engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Narrow-phase collision method
    pub collision_method: CollisionMethod,

    /// Broad-phase quadtree tuning
    pub quadtree: QuadTreeConfig,

    /// Fixed world bounds; when `None` the quadtree tracks the union of all
    /// collider bounding boxes each tick
    pub world_bounds: Option<Rect>,

    /// Symmetric layer-pair matrix; when `None` every layer collides with
    /// every other layer
    pub collision_matrix: Option<Vec<(String, String)>>,

    /// Game-logic update rate in Hz
    pub game_hz: f32,

    /// Physics substep rate in Hz (may exceed `game_hz`)
    pub physics_hz: f32,
}

impl PhysicsConfig {
    /// Create a configuration with default tuning
    pub fn new(collision_method: CollisionMethod) -> Self {
        Self {
            collision_method,
            quadtree: QuadTreeConfig::default(),
            world_bounds: None,
            collision_matrix: None,
            game_hz: 60.0,
            physics_hz: 180.0,
        }
    }

    /// Set quadtree tuning
    pub fn with_quadtree(mut self, quadtree: QuadTreeConfig) -> Self {
        self.quadtree = quadtree;
        self
    }

    /// Fix the world bounds instead of tracking colliders dynamically
    pub fn with_world_bounds(mut self, bounds: Rect) -> Self {
        self.world_bounds = Some(bounds);
        self
    }

    /// Restrict collisions to the given symmetric layer pairs
    pub fn with_collision_matrix(mut self, pairs: Vec<(String, String)>) -> Self {
        self.collision_matrix = Some(pairs);
        self
    }

    /// Set game-logic and physics update rates in Hz
    pub fn with_update_rates(mut self, game_hz: f32, physics_hz: f32) -> Self {
        self.game_hz = game_hz;
        self.physics_hz = physics_hz;
        self
    }

    /// Parse a configuration from a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize this configuration to a TOML document
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quadtree.max_levels == 0 {
            return Err(ConfigError::QuadTreeDepth);
        }
        if self.quadtree.max_items_per_node == 0 {
            return Err(ConfigError::QuadTreeCapacity);
        }
        if let Some(bounds) = &self.world_bounds {
            if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
                return Err(ConfigError::DegenerateWorldBounds);
            }
        }
        if let Some(matrix) = &self.collision_matrix {
            if matrix.iter().any(|(a, b)| a.is_empty() || b.is_empty()) {
                return Err(ConfigError::EmptyMatrixLayer);
            }
        }
        if self.game_hz <= 0.0 || self.physics_hz <= 0.0 {
            return Err(ConfigError::InvalidUpdateRate);
        }
        Ok(())
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self::new(CollisionMethod::Aabb)
    }
}

/// Configuration errors
///
/// Raised once, at engine or collider construction; fatal to the component
/// being set up but recoverable by the surrounding game.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Quadtree depth of zero would make the root unsplittable
    #[error("quadtree max_levels must be at least 1")]
    QuadTreeDepth,

    /// Node capacity of zero would split forever
    #[error("quadtree max_items_per_node must be at least 1")]
    QuadTreeCapacity,

    /// Fixed world bounds with zero or negative extent
    #[error("world bounds must have positive width and height")]
    DegenerateWorldBounds,

    /// Collision matrix references an unnamed layer
    #[error("collision matrix entries must use non-empty layer names")]
    EmptyMatrixLayer,

    /// Non-positive update rate
    #[error("game and physics update rates must be positive")]
    InvalidUpdateRate,

    /// Collider shape incompatible with the configured collision method
    #[error("{kind:?} colliders are not supported by the {method:?} collision method")]
    UnsupportedShape {
        /// Shape kind of the rejected collider
        kind: ShapeKind,
        /// Collision method the engine was configured with
        method: CollisionMethod,
    },

    /// Rigid body registered without any physics collider
    #[error("a rigid body requires at least one physics-enabled collider")]
    RigidBodyWithoutCollider,

    /// TOML parse failure
    #[error("failed to parse physics configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization failure
    #[error("failed to serialize physics configuration: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PhysicsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_bounds_rejected() {
        let config = PhysicsConfig::new(CollisionMethod::Aabb)
            .with_world_bounds(Rect::new(Vec2::zeros(), Vec2::zeros()));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DegenerateWorldBounds)
        ));
    }

    #[test]
    fn test_empty_matrix_layer_rejected() {
        let config = PhysicsConfig::new(CollisionMethod::Aabb)
            .with_collision_matrix(vec![("player".into(), "".into())]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyMatrixLayer)
        ));
    }

    #[test]
    fn test_toml_parse() {
        let source = r#"
            collision_method = "Sat"
            game_hz = 60.0
            physics_hz = 120.0

            [quadtree]
            max_levels = 5
            max_items_per_node = 4
        "#;
        let config = PhysicsConfig::from_toml_str(source).unwrap();
        assert_eq!(config.collision_method, CollisionMethod::Sat);
        assert_eq!(config.quadtree.max_levels, 5);
        assert!(config.world_bounds.is_none());
    }
}
