//! Narrow-phase collision resolvers
//!
//! A resolver takes a broad-phase candidate pair and produces an exact
//! penetration depth and displacement direction, or no collision. The
//! algorithm is selected once at engine construction; the
//! [`CollisionResolver`] trait is the seam that lets the collision manager
//! stay agnostic of the method.
//!
//! Separation comparisons are strict: an overlap of exactly zero counts as
//! touching, not separated, so two edge-adjacent bodies report a
//! zero-penetration collision ("resting" contact).

pub mod aabb;
pub mod sat;

pub use aabb::AabbResolver;
pub use sat::SatResolver;

use crate::core::config::CollisionMethod;
use crate::foundation::math::Vec2;
use crate::physics::shape::Shape;

/// Outcome of a narrow-phase test between two overlapping shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolution {
    /// Overlap depth along the separation axis, containment-corrected
    pub penetration: f32,

    /// Unit separation axis, oriented the way the local shape must move
    pub direction: Vec2,

    /// Direction the local shape is displaced along; equal to `direction`
    /// except on an exact axis-overlap tie, where the secondary axis sign is
    /// folded in
    pub displacement_direction: Vec2,

    /// Vertex of the non-owning shape at the extremal projection on the
    /// winning axis (SAT only), kept for diagnostics
    pub contact_vertex: Option<Vec2>,
}

impl CollisionResolution {
    /// The same resolution seen from the other shape's side
    pub fn inverted(&self) -> Self {
        Self {
            penetration: self.penetration,
            direction: -self.direction,
            displacement_direction: -self.displacement_direction,
            contact_vertex: self.contact_vertex,
        }
    }
}

/// Pairwise exact-overlap test
pub trait CollisionResolver: Send + Sync {
    /// Test `local` against `remote`
    ///
    /// Returns `None` when a separating axis exists; otherwise the resolution
    /// for displacing `local` out of `remote`.
    fn resolve(&self, local: &Shape, remote: &Shape) -> Option<CollisionResolution>;
}

/// Instantiate the resolver for a configured collision method
pub fn resolver_for_method(method: CollisionMethod) -> Box<dyn CollisionResolver> {
    match method {
        CollisionMethod::Aabb => Box::new(AabbResolver),
        CollisionMethod::Sat => Box::new(SatResolver),
    }
}

/// Containment-corrected separation of two scalar intervals
///
/// `overlap` is the raw shared extent (negative when separated, zero when
/// touching). `penetration` is the distance interval A must travel along
/// `sign` to fully clear interval B: for a partial overlap this equals
/// `overlap`, and when one interval contains the other it is the overlap
/// inflated by the nearer boundary gap, with `sign` pointing at the nearer
/// boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AxisSeparation {
    pub overlap: f32,
    pub penetration: f32,
    pub sign: f32,
}

pub(crate) fn separate_intervals(a_min: f32, a_max: f32, b_min: f32, b_max: f32) -> AxisSeparation {
    let overlap = a_max.min(b_max) - a_min.max(b_min);

    // Cost of clearing B by moving A toward negative or positive infinity.
    let exit_negative = a_max - b_min;
    let exit_positive = b_max - a_min;

    let (penetration, sign) = if exit_negative <= exit_positive {
        (exit_negative, -1.0)
    } else {
        (exit_positive, 1.0)
    };

    AxisSeparation {
        overlap,
        penetration,
        sign,
    }
}
