//! Separating Axis Theorem resolver
//!
//! Exact narrow phase for convex polygon shapes: two shapes are disjoint iff
//! some candidate axis exists on which their projections do not overlap. The
//! candidate set is built from both shapes' edge normals via
//! [`Shape::projection_axes`], exhaustively matched per shape kind.

use crate::foundation::math::Vec2;
use crate::physics::resolvers::{separate_intervals, CollisionResolution, CollisionResolver};
use crate::physics::shape::Shape;

/// Which shape contributed a candidate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisOwner {
    Local,
    Remote,
}

/// Separating Axis Theorem resolver for convex polygon shapes
#[derive(Debug, Default)]
pub struct SatResolver;

impl CollisionResolver for SatResolver {
    fn resolve(&self, local: &Shape, remote: &Shape) -> Option<CollisionResolution> {
        let axes: Vec<(Vec2, AxisOwner)> = local
            .projection_axes()
            .into_iter()
            .map(|axis| (axis, AxisOwner::Local))
            .chain(
                remote
                    .projection_axes()
                    .into_iter()
                    .map(|axis| (axis, AxisOwner::Remote)),
            )
            .collect();
        if axes.is_empty() {
            return None; // no polygonal axes to test
        }

        // Track the axis of minimum raw overlap; its containment-corrected
        // separation becomes the reported resolution.
        let mut best: Option<(f32, f32, f32, Vec2, AxisOwner)> = None;
        for (axis, owner) in axes {
            let (a_min, a_max) = local.project_onto(axis);
            let (b_min, b_max) = remote.project_onto(axis);

            let sep = separate_intervals(a_min, a_max, b_min, b_max);
            if sep.overlap < 0.0 {
                return None; // separating axis found
            }

            let better = best.map_or(true, |(overlap, ..)| sep.overlap < overlap);
            if better {
                best = Some((sep.overlap, sep.penetration, sep.sign, axis, owner));
            }
        }

        let (_, penetration, sign, axis, owner) = best?;
        let direction = axis * sign;
        let contact_vertex = {
            let non_owner = match owner {
                AxisOwner::Local => remote,
                AxisOwner::Remote => local,
            };
            let want_max = (owner == AxisOwner::Local) == (sign > 0.0);
            extremal_vertex(non_owner, axis, want_max)
        };

        Some(CollisionResolution {
            penetration,
            direction,
            displacement_direction: direction,
            contact_vertex,
        })
    }
}

/// Vertex achieving the min or max projection on an axis
fn extremal_vertex(shape: &Shape, axis: Vec2, want_max: bool) -> Option<Vec2> {
    let mut best: Option<(f32, Vec2)> = None;
    for &v in shape.vertices() {
        let p = v.dot(&axis);
        let better = best.map_or(true, |(bp, _)| if want_max { p > bp } else { p < bp });
        if better {
            best = Some((p, v));
        }
    }
    best.map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    const EPSILON: f32 = 1e-4;

    fn rect(cx: f32, cy: f32, w: f32, h: f32) -> Shape {
        Shape::rectangle(Vec2::new(cx, cy), w, h)
    }

    #[test]
    fn test_separated_rectangles_return_none() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(20.0, 0.0, 10.0, 10.0);
        assert!(SatResolver.resolve(&a, &b).is_none());
    }

    #[test]
    fn test_axis_aligned_rectangles_match_bounding_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(8.0, 2.0, 10.0, 10.0);

        let res = SatResolver.resolve(&a, &b).unwrap();
        assert_relative_eq!(res.penetration, 2.0, epsilon = EPSILON);
        assert_relative_eq!(res.direction.x, -1.0, epsilon = EPSILON);
        assert_relative_eq!(res.direction.y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_rotated_square_separated_where_boxes_overlap() {
        // A 45-degree square whose bounding box overlaps the other shape even
        // though the shapes themselves are disjoint: SAT must say no.
        let mut a = Shape::rectangle(Vec2::new(0.0, 0.0), 10.0, 10.0);
        a.rotation = FRAC_PI_4;
        a.update();
        let b = rect(8.0, 6.5, 4.0, 4.0);

        assert!(a.bounding_box().intersects(&b.bounding_box()));
        assert!(SatResolver.resolve(&a, &b).is_none());
    }

    #[test]
    fn test_rotated_overlap_is_detected() {
        let mut a = Shape::rectangle(Vec2::new(0.0, 0.0), 10.0, 10.0);
        a.rotation = FRAC_PI_4;
        a.update();
        let b = rect(7.0, 0.0, 4.0, 4.0);

        let res = SatResolver.resolve(&a, &b).unwrap();
        assert!(res.penetration > 0.0);
        // Pushed away from b, roughly along the rotated square's normal.
        assert!(res.direction.x < 0.0);
        assert!(res.contact_vertex.is_some());
    }

    #[test]
    fn test_touching_edges_report_zero_penetration() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 0.0, 10.0, 10.0);

        let res = SatResolver.resolve(&a, &b).unwrap();
        assert_relative_eq!(res.penetration, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_symmetric_penetration() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let mut b = Shape::rectangle(Vec2::new(6.0, 1.0), 6.0, 6.0);
        b.rotation = 0.3;
        b.update();

        let ab = SatResolver.resolve(&a, &b).unwrap();
        let ba = SatResolver.resolve(&b, &a).unwrap();
        assert_relative_eq!(ab.penetration, ba.penetration, epsilon = EPSILON);
    }

    #[test]
    fn test_contained_interval_inflates_penetration() {
        // Small square fully inside a wide slab on x, partial on y.
        let a = rect(3.0, 0.0, 2.0, 10.0);
        let b = rect(5.0, -4.0, 10.0, 4.0);

        let res = SatResolver.resolve(&a, &b).unwrap();
        assert_relative_eq!(res.penetration, 4.0, epsilon = EPSILON);
        assert_relative_eq!(res.direction.x, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_triangle_against_rectangle() {
        let triangle = Shape::polygon(
            Vec2::new(0.0, 0.0),
            vec![
                Vec2::new(0.0, 2.0),
                Vec2::new(-2.0, -2.0),
                Vec2::new(2.0, -2.0),
            ],
        );
        let b = rect(0.0, -2.5, 10.0, 2.0);

        let res = SatResolver.resolve(&triangle, &b).unwrap();
        assert!(res.penetration > 0.0);
        // Triangle sits above the slab: pushed up.
        assert!(res.direction.y > 0.0);
    }

    #[test]
    fn test_circles_have_no_axes() {
        let a = Shape::circle(Vec2::zeros(), 5.0);
        let b = Shape::circle(Vec2::new(1.0, 0.0), 5.0);
        assert!(SatResolver.resolve(&a, &b).is_none());
    }
}
