//! Collision shape primitives
//!
//! A [`Shape`] is a geometric primitive owned by the collider that created
//! it: a local-space vertex model plus a position and rotation, with derived
//! world-space vertices and a tight axis-aligned bounding box.
//!
//! Derived state is only recomputed by an explicit [`Shape::update`] call;
//! callers own the timing. Mutate position, rotation, or the vertex model,
//! then call `update()` before querying vertices or the bounding box.

use crate::foundation::math::{perpendicular, rotate, Rect, Vec2};

/// Shape kind tag used for dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Four-vertex box, may be rotated
    Rectangle,
    /// Arbitrary convex vertex model
    Polygon,
    /// Center plus radius, no vertex model
    Circle,
    /// Two-vertex segment
    Line,
}

/// Geometric primitive with derived world-space vertices and bounding box
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    /// World position of the shape's origin
    pub position: Vec2,
    /// Rotation in radians, applied before translation
    pub rotation: f32,
    model: Vec<Vec2>,
    radius: f32,
    vertices: Vec<Vec2>,
    bounding_box: Rect,
}

impl Shape {
    /// Create an axis-aligned rectangle centered on `position`
    pub fn rectangle(position: Vec2, width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let model = vec![
            Vec2::new(-hw, -hh),
            Vec2::new(-hw, hh),
            Vec2::new(hw, hh),
            Vec2::new(hw, -hh),
        ];
        Self::from_model(ShapeKind::Rectangle, position, model)
    }

    /// Create a convex polygon from a local-space vertex model
    pub fn polygon(position: Vec2, model: Vec<Vec2>) -> Self {
        Self::from_model(ShapeKind::Polygon, position, model)
    }

    /// Create a line segment between two local-space points
    pub fn line(position: Vec2, from: Vec2, to: Vec2) -> Self {
        Self::from_model(ShapeKind::Line, position, vec![from, to])
    }

    /// Create a circle
    pub fn circle(position: Vec2, radius: f32) -> Self {
        let mut shape = Self {
            kind: ShapeKind::Circle,
            position,
            rotation: 0.0,
            model: Vec::new(),
            radius,
            vertices: Vec::new(),
            bounding_box: Rect::new(position, position),
        };
        shape.update();
        shape
    }

    fn from_model(kind: ShapeKind, position: Vec2, model: Vec<Vec2>) -> Self {
        let mut shape = Self {
            kind,
            position,
            rotation: 0.0,
            vertices: Vec::with_capacity(model.len()),
            model,
            radius: 0.0,
            bounding_box: Rect::new(position, position),
        };
        shape.update();
        shape
    }

    /// Shape kind tag
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// World-space vertices as of the last `update()` (empty for circles)
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Tight AABB as of the last `update()`
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Radius (zero for non-circles)
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Replace the local-space vertex model
    ///
    /// Takes effect at the next `update()` call.
    pub fn set_model(&mut self, model: Vec<Vec2>) {
        self.model = model;
    }

    /// Recompute world vertices and the bounding box
    ///
    /// Rotation is applied before translation. For circles the bounding box
    /// is `position ± radius`.
    pub fn update(&mut self) {
        if self.kind == ShapeKind::Circle {
            let extents = Vec2::new(self.radius, self.radius);
            self.bounding_box = Rect::from_center_extents(self.position, extents);
            return;
        }

        self.vertices.clear();
        for v in &self.model {
            self.vertices.push(self.position + rotate(*v, self.rotation));
        }
        self.bounding_box = Rect::from_points(&self.vertices);
    }

    /// Candidate separating axes contributed by this shape
    ///
    /// Exhaustive per kind: a rectangle contributes its two perpendicular
    /// edge normals, a polygon one axis per unique edge normal, a line its
    /// single edge perpendicular, and a circle none (circles are rejected
    /// for SAT at collider registration).
    pub fn projection_axes(&self) -> Vec<Vec2> {
        match self.kind {
            ShapeKind::Rectangle => self
                .edge_normals()
                .take(2)
                .collect(),
            ShapeKind::Polygon => {
                let mut axes: Vec<Vec2> = Vec::new();
                for normal in self.edge_normals() {
                    // Parallel and anti-parallel normals project identically.
                    let duplicate = axes
                        .iter()
                        .any(|axis| axis.dot(&normal).abs() > 1.0 - 1e-6);
                    if !duplicate {
                        axes.push(normal);
                    }
                }
                axes
            }
            ShapeKind::Line => self.edge_normals().take(1).collect(),
            ShapeKind::Circle => Vec::new(),
        }
    }

    /// Project this shape onto a unit axis, returning the min/max interval
    pub fn project_onto(&self, axis: Vec2) -> (f32, f32) {
        if self.kind == ShapeKind::Circle {
            let center = self.position.dot(&axis);
            return (center - self.radius, center + self.radius);
        }

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for v in &self.vertices {
            let p = v.dot(&axis);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    fn edge_normals(&self) -> impl Iterator<Item = Vec2> + '_ {
        let count = self.vertices.len();
        (0..count).filter_map(move |i| {
            let edge = self.vertices[(i + 1) % count] - self.vertices[i];
            if edge.magnitude_squared() < 1e-12 {
                return None; // degenerate edge
            }
            Some(perpendicular(edge).normalize())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_rectangle_bounding_box_is_tight() {
        let shape = Shape::rectangle(Vec2::new(10.0, 5.0), 4.0, 2.0);

        let bb = shape.bounding_box();
        assert_eq!(bb.min, Vec2::new(8.0, 4.0));
        assert_eq!(bb.max, Vec2::new(12.0, 6.0));
    }

    #[test]
    fn test_rotation_applied_before_translation() {
        let mut shape = Shape::rectangle(Vec2::new(100.0, 0.0), 2.0, 2.0);
        shape.rotation = FRAC_PI_4;
        shape.update();

        // A unit half-extent square rotated 45 degrees spans sqrt(2) per side.
        let bb = shape.bounding_box();
        let expected = std::f32::consts::SQRT_2;
        assert_relative_eq!(bb.max.x - bb.min.x, 2.0 * expected, epsilon = EPSILON);
        assert_relative_eq!(bb.center().x, 100.0, epsilon = EPSILON);
    }

    #[test]
    fn test_update_is_explicit() {
        let mut shape = Shape::rectangle(Vec2::zeros(), 2.0, 2.0);
        shape.position = Vec2::new(50.0, 0.0);

        // Stale until update() is called.
        assert_eq!(shape.bounding_box().center(), Vec2::zeros());
        shape.update();
        assert_eq!(shape.bounding_box().center(), Vec2::new(50.0, 0.0));
    }

    #[test]
    fn test_circle_bounding_box() {
        let shape = Shape::circle(Vec2::new(3.0, -2.0), 1.5);

        let bb = shape.bounding_box();
        assert_eq!(bb.min, Vec2::new(1.5, -3.5));
        assert_eq!(bb.max, Vec2::new(4.5, -0.5));
        assert!(shape.vertices().is_empty());
    }

    #[test]
    fn test_axis_counts_per_kind() {
        let rect = Shape::rectangle(Vec2::zeros(), 2.0, 2.0);
        assert_eq!(rect.projection_axes().len(), 2);

        let line = Shape::line(Vec2::zeros(), Vec2::zeros(), Vec2::new(1.0, 1.0));
        assert_eq!(line.projection_axes().len(), 1);

        let circle = Shape::circle(Vec2::zeros(), 1.0);
        assert!(circle.projection_axes().is_empty());

        // A square declared as a polygon still deduplicates to 2 normals.
        let square = Shape::polygon(
            Vec2::zeros(),
            vec![
                Vec2::new(-1.0, -1.0),
                Vec2::new(-1.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, -1.0),
            ],
        );
        assert_eq!(square.projection_axes().len(), 2);

        let triangle = Shape::polygon(
            Vec2::zeros(),
            vec![Vec2::new(0.0, 1.0), Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0)],
        );
        assert_eq!(triangle.projection_axes().len(), 3);
    }

    #[test]
    fn test_projection_interval() {
        let shape = Shape::rectangle(Vec2::new(5.0, 0.0), 2.0, 2.0);

        let (min, max) = shape.project_onto(Vec2::new(1.0, 0.0));
        assert_relative_eq!(min, 4.0, epsilon = EPSILON);
        assert_relative_eq!(max, 6.0, epsilon = EPSILON);
    }
}
