//! Debug visualization queries
//!
//! Read-only extraction of collision state for an out-of-scope rendering
//! layer to draw as wireframe overlays: shape outlines, bounding boxes, and
//! a colliding flag per collider.

use crate::foundation::math::{Rect, Vec2};
use crate::physics::collider::ColliderKey;
use crate::physics::collision_manager::CollisionManager;
use crate::physics::shape::ShapeKind;

/// Segments used to approximate a circle outline
const CIRCLE_SEGMENTS: usize = 24;

/// Wireframe snapshot of one collider
#[derive(Debug, Clone)]
pub struct DebugShape {
    /// Collider this snapshot was taken from
    pub collider: ColliderKey,
    /// Shape kind tag
    pub kind: ShapeKind,
    /// Outline vertices, in draw order (closed loop except for lines)
    pub outline: Vec<Vec2>,
    /// Axis-aligned bounding box
    pub bounding_box: Rect,
    /// Whether the collider has at least one collision this substep
    pub colliding: bool,
}

/// Snapshot every live collider's outline for debug drawing
pub fn collect_wireframes(manager: &CollisionManager) -> Vec<DebugShape> {
    manager
        .colliders()
        .map(|(key, collider)| {
            let shape = &collider.shape;
            let outline = match shape.kind() {
                ShapeKind::Circle => circle_outline(shape.position, shape.radius()),
                _ => shape.vertices().to_vec(),
            };
            DebugShape {
                collider: key,
                kind: shape.kind(),
                outline,
                bounding_box: shape.bounding_box(),
                colliding: !manager.collisions_for_collider(key).is_empty(),
            }
        })
        .collect()
}

fn circle_outline(center: Vec2, radius: f32) -> Vec<Vec2> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / CIRCLE_SEGMENTS as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PhysicsConfig;
    use crate::physics::collider::{ColliderData, OwnerId};
    use crate::physics::shape::Shape;

    #[test]
    fn test_wireframes_cover_all_colliders() {
        let mut manager = CollisionManager::new(&PhysicsConfig::default()).unwrap();
        manager
            .add_collider(ColliderData::new(
                Shape::rectangle(Vec2::zeros(), 2.0, 2.0),
                "default",
                OwnerId(0),
            ))
            .unwrap();
        manager
            .add_collider(ColliderData::new(
                Shape::circle(Vec2::new(10.0, 0.0), 1.0),
                "default",
                OwnerId(1),
            ))
            .unwrap();
        manager.update();

        let shapes = collect_wireframes(&manager);
        assert_eq!(shapes.len(), 2);

        let circle = shapes.iter().find(|s| s.kind == ShapeKind::Circle).unwrap();
        assert_eq!(circle.outline.len(), CIRCLE_SEGMENTS);
        assert!(!circle.colliding);

        let rect = shapes.iter().find(|s| s.kind == ShapeKind::Rectangle).unwrap();
        assert_eq!(rect.outline.len(), 4);
    }
}
