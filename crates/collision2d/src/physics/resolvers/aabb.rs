//! Axis-aligned bounding rectangle resolver
//!
//! The cheap narrow phase: overlap of the two shapes' bounding rectangles,
//! resolved along the axis of minimum overlap. Suitable for unrotated
//! rectangles and circles; rotated polygons need the SAT resolver.

use crate::foundation::math::Vec2;
use crate::physics::resolvers::{separate_intervals, CollisionResolution, CollisionResolver};
use crate::physics::shape::Shape;

/// Bounding-rectangle overlap resolver
#[derive(Debug, Default)]
pub struct AabbResolver;

impl CollisionResolver for AabbResolver {
    fn resolve(&self, local: &Shape, remote: &Shape) -> Option<CollisionResolution> {
        let a = local.bounding_box();
        let b = remote.bounding_box();

        let overlap = a.overlap(&b);
        if overlap.x < 0.0 || overlap.y < 0.0 {
            return None;
        }

        let x = separate_intervals(a.min.x, a.max.x, b.min.x, b.max.x);
        let y = separate_intervals(a.min.y, a.max.y, b.min.y, b.max.y);

        let resolution = if overlap.y < overlap.x {
            CollisionResolution {
                penetration: y.penetration,
                direction: Vec2::new(0.0, y.sign),
                displacement_direction: Vec2::new(0.0, y.sign),
                contact_vertex: None,
            }
        } else if overlap.x < overlap.y {
            CollisionResolution {
                penetration: x.penetration,
                direction: Vec2::new(x.sign, 0.0),
                displacement_direction: Vec2::new(x.sign, 0.0),
                contact_vertex: None,
            }
        } else {
            // Exact tie: X stays the separation axis, with the Y sign folded
            // into the applied displacement.
            CollisionResolution {
                penetration: x.penetration,
                direction: Vec2::new(x.sign, 0.0),
                displacement_direction: Vec2::new(x.sign, y.sign).normalize(),
                contact_vertex: None,
            }
        };
        Some(resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn rect(cx: f32, cy: f32, w: f32, h: f32) -> Shape {
        Shape::rectangle(Vec2::new(cx, cy), w, h)
    }

    #[test]
    fn test_separated_returns_none() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 0.0, 10.0, 10.0);
        assert!(AabbResolver.resolve(&a, &b).is_none());
    }

    #[test]
    fn test_penetration_is_min_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(8.0, 2.0, 10.0, 10.0);

        // overlap.x = 2, overlap.y = 8
        let res = AabbResolver.resolve(&a, &b).unwrap();
        assert_relative_eq!(res.penetration, 2.0, epsilon = EPSILON);
        assert_eq!(res.direction, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_resolver_is_symmetric() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(7.0, 3.0, 8.0, 8.0);

        let ab = AabbResolver.resolve(&a, &b).unwrap();
        let ba = AabbResolver.resolve(&b, &a).unwrap();
        assert_relative_eq!(ab.penetration, ba.penetration, epsilon = EPSILON);
        assert_eq!(ab.direction, -ba.direction);
    }

    #[test]
    fn test_touching_counts_as_zero_penetration_collision() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);

        let res = AabbResolver.resolve(&a, &b).unwrap();
        assert_relative_eq!(res.penetration, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_containment_inflates_and_keeps_nearer_edge() {
        // A's x extent [2, 4] sits inside B's [0, 10]; y overlaps normally.
        let a = rect(3.0, 0.0, 2.0, 10.0);
        let b = rect(5.0, -4.0, 10.0, 4.0);

        let res = AabbResolver.resolve(&a, &b).unwrap();
        // Raw x overlap is 2, inflated by the nearer (low) boundary gap of 2.
        assert_relative_eq!(res.penetration, 4.0, epsilon = EPSILON);
        assert_eq!(res.direction, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_containment_flips_direction_for_nearer_far_gap() {
        // A's x extent [7, 9] inside B's [0, 10]: exit through the high side.
        let a = rect(8.0, 0.0, 2.0, 10.0);
        let b = rect(5.0, -4.0, 10.0, 4.0);

        let res = AabbResolver.resolve(&a, &b).unwrap();
        assert_relative_eq!(res.penetration, 3.0, epsilon = EPSILON);
        assert_eq!(res.direction, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_tie_combines_axis_signs() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(8.0, 8.0, 10.0, 10.0);

        // overlap.x == overlap.y == 2
        let res = AabbResolver.resolve(&a, &b).unwrap();
        assert_eq!(res.direction, Vec2::new(-1.0, 0.0));
        let inv_sqrt2 = 1.0 / std::f32::consts::SQRT_2;
        assert_relative_eq!(res.displacement_direction.x, -inv_sqrt2, epsilon = EPSILON);
        assert_relative_eq!(res.displacement_direction.y, -inv_sqrt2, epsilon = EPSILON);
    }

    #[test]
    fn test_circle_resolves_through_bounding_box() {
        let a = Shape::circle(Vec2::new(0.0, 0.0), 5.0);
        let b = rect(8.0, 0.0, 10.0, 20.0);

        let res = AabbResolver.resolve(&a, &b).unwrap();
        // Circle box [-5, 5] vs rect [3, 13]: overlap 2 on x.
        assert_relative_eq!(res.penetration, 2.0, epsilon = EPSILON);
        assert_eq!(res.direction, Vec2::new(-1.0, 0.0));
    }
}
