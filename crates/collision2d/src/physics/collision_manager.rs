//! Collision orchestration
//!
//! The collision manager owns the collider registry, the broad-phase
//! quadtree, and the authoritative per-substep collision set. Each physics
//! tick it rebuilds the spatial index, then runs broad phase (quadtree
//! retrieval, filtered by the layer matrix) and narrow phase (the configured
//! resolver) for every eagerly-updated collider.
//!
//! Collisions are symmetric: detecting A against B records both `(A, B)` and
//! `(B, A)` with inverted displacement, and the mirrored entry is never
//! deduplicated away. A resolved-pair check prevents recomputing a pair from
//! the other side within the same pass.

use std::collections::HashSet;

use slotmap::SlotMap;

use crate::core::config::{CollisionMethod, ConfigError, PhysicsConfig};
use crate::foundation::math::{Rect, Vec2};
use crate::physics::collider::{ColliderData, ColliderKey};
use crate::physics::resolvers::{resolver_for_method, CollisionResolution, CollisionResolver};
use crate::physics::shape::ShapeKind;
use crate::spatial::QuadTree;

/// A detected collision, rebuilt every physics substep
#[derive(Debug, Clone, Copy)]
pub struct Collision {
    /// The collider this entry belongs to
    pub local: ColliderKey,
    /// The collider it overlaps
    pub remote: ColliderKey,
    /// Penetration and displacement for moving `local` out of `remote`
    pub resolution: CollisionResolution,
}

/// Result of a ray query against collider bounding boxes
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The collider whose bounding box was hit
    pub collider: ColliderKey,
    /// Distance from the ray origin to the entry point
    pub distance: f32,
    /// Entry point in world space
    pub point: Vec2,
}

/// Broad + narrow phase orchestrator and collider registry
pub struct CollisionManager {
    colliders: SlotMap<ColliderKey, ColliderData>,
    quadtree: QuadTree,
    resolver: Box<dyn CollisionResolver>,
    method: CollisionMethod,
    matrix: Option<HashSet<(String, String)>>,

    /// Authoritative collision set for the current substep
    collisions: Vec<Collision>,
    /// Pairs already narrow-phase tested this pass, both orders
    resolved: HashSet<(ColliderKey, ColliderKey)>,

    /// First-seen collisions accumulated across the current frame's substeps
    frame_collisions: Vec<Collision>,
    current_frame_pairs: HashSet<(ColliderKey, ColliderKey)>,
    previous_frame_pairs: HashSet<(ColliderKey, ColliderKey)>,

    /// Removals requested mid-tick, applied at the next tick boundary
    pending_removals: Vec<ColliderKey>,
}

impl CollisionManager {
    /// Create a manager from validated configuration
    pub fn new(config: &PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let bounds = config
            .world_bounds
            .unwrap_or_else(|| Rect::new(Vec2::zeros(), Vec2::zeros()));
        let quadtree = QuadTree::new(bounds, config.quadtree, config.world_bounds.is_some());

        let matrix = config.collision_matrix.as_ref().map(|pairs| {
            pairs
                .iter()
                .map(|(a, b)| ordered_pair(a, b))
                .collect::<HashSet<_>>()
        });

        Ok(Self {
            colliders: SlotMap::with_key(),
            quadtree,
            resolver: resolver_for_method(config.collision_method),
            method: config.collision_method,
            matrix,
            collisions: Vec::new(),
            resolved: HashSet::new(),
            frame_collisions: Vec::new(),
            current_frame_pairs: HashSet::new(),
            previous_frame_pairs: HashSet::new(),
            pending_removals: Vec::new(),
        })
    }

    /// Register a collider
    ///
    /// Fails when the collider's shape is not supported by the configured
    /// collision method: polygons and lines require SAT, and circles have no
    /// SAT projection axes.
    pub fn add_collider(&mut self, collider: ColliderData) -> Result<ColliderKey, ConfigError> {
        let kind = collider.shape.kind();
        let supported = match self.method {
            CollisionMethod::Aabb => {
                matches!(kind, ShapeKind::Rectangle | ShapeKind::Circle)
            }
            CollisionMethod::Sat => {
                matches!(kind, ShapeKind::Rectangle | ShapeKind::Polygon | ShapeKind::Line)
            }
        };
        if !supported {
            return Err(ConfigError::UnsupportedShape {
                kind,
                method: self.method,
            });
        }

        log::debug!("registering {:?} collider on layer {:?}", kind, collider.layer);
        Ok(self.colliders.insert(collider))
    }

    /// Request removal of a collider
    ///
    /// The collider stops participating immediately (its collision entries
    /// are purged and it is skipped by queries), but the registry slot is
    /// only freed at the next tick boundary so in-flight iteration never
    /// observes a dangling key.
    pub fn remove_collider(&mut self, key: ColliderKey) {
        if let Some(collider) = self.colliders.get_mut(key) {
            collider.active = false;
            self.pending_removals.push(key);
            self.purge_collisions_mentioning(key);
            self.current_frame_pairs
                .retain(|&(a, b)| a != key && b != key);
            self.frame_collisions
                .retain(|c| c.local != key && c.remote != key);
        }
    }

    /// Read a collider
    pub fn collider(&self, key: ColliderKey) -> Option<&ColliderData> {
        self.colliders.get(key).filter(|c| c.active)
    }

    /// Mutate a collider (typically to push updated shape geometry)
    ///
    /// The spatial index picks the change up at the next tick's rebuild;
    /// call [`CollisionManager::refresh_collisions_for_collider`] to refresh
    /// the narrow phase mid-substep.
    pub fn collider_mut(&mut self, key: ColliderKey) -> Option<&mut ColliderData> {
        self.colliders.get_mut(key).filter(|c| c.active)
    }

    /// Displace a collider's shape and recompute its derived geometry
    pub fn translate_collider(&mut self, key: ColliderKey, delta: Vec2) {
        if let Some(collider) = self.colliders.get_mut(key).filter(|c| c.active) {
            collider.shape.position += delta;
            collider.shape.update();
        }
    }

    /// Mark a collider as belonging to a rigid body
    pub(crate) fn set_has_rigid_body(&mut self, key: ColliderKey, value: bool) {
        if let Some(collider) = self.colliders.get_mut(key) {
            collider.has_rigid_body = value;
        }
    }

    /// Number of live colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.values().filter(|c| c.active).count()
    }

    /// Iterate live colliders (for debug overlays)
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderKey, &ColliderData)> {
        self.colliders.iter().filter(|(_, c)| c.active)
    }

    /// Broad-phase quadtree accessor (for debug visualization)
    pub fn quadtree(&self) -> &QuadTree {
        &self.quadtree
    }

    /// Start a new game frame
    ///
    /// Swaps the frame-level pair sets so enter/exit queries compare against
    /// the previous frame, and clears the accumulated frame collision set.
    pub fn begin_frame(&mut self) {
        std::mem::swap(&mut self.previous_frame_pairs, &mut self.current_frame_pairs);
        self.current_frame_pairs.clear();
        self.frame_collisions.clear();
    }

    /// Run one full collision tick: rebuild the index, then broad + narrow
    /// phase for every eagerly-updated collider
    pub fn update(&mut self) {
        for key in std::mem::take(&mut self.pending_removals) {
            self.colliders.remove(key);
        }

        self.quadtree.clear_items();
        self.quadtree.clear_quadrants();
        if !self.quadtree.is_fixed() {
            if let Some(bounds) = self.dynamic_bounds() {
                self.quadtree.update_bounds(bounds);
            }
        }
        for (key, collider) in &self.colliders {
            if collider.active {
                self.quadtree.add_item(key, collider.shape.bounding_box());
            }
        }

        self.collisions.clear();
        self.resolved.clear();

        let updaters: Vec<ColliderKey> = self
            .colliders
            .iter()
            .filter(|(_, c)| c.active && c.update_collisions)
            .map(|(key, _)| key)
            .collect();
        for key in updaters {
            self.update_collider_collisions(key);
        }
        log::trace!(
            "collision tick: {} colliders, {} collisions",
            self.collider_count(),
            self.collisions.len()
        );
    }

    /// Union of all live collider bounding boxes, with zero padding
    fn dynamic_bounds(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for collider in self.colliders.values().filter(|c| c.active) {
            let bb = collider.shape.bounding_box();
            bounds = Some(match bounds {
                Some(current) => current.union(&bb),
                None => bb,
            });
        }
        bounds
    }

    /// Broad-phase candidates for one collider: quadtree retrieval filtered
    /// by liveness and the layer matrix
    ///
    /// The result can contain duplicates (quadtree items are stored in every
    /// overlapping quadrant) and never contains the collider itself.
    pub fn broad_phase_candidates(&self, key: ColliderKey) -> Vec<ColliderKey> {
        let Some(local) = self.colliders.get(key).filter(|c| c.active) else {
            return Vec::new();
        };

        self.quadtree
            .retrieve(key, local.shape.bounding_box())
            .into_iter()
            .filter(|&candidate| {
                self.colliders
                    .get(candidate)
                    .map_or(false, |c| c.active && self.layers_collide(&local.layer, &c.layer))
            })
            .collect()
    }

    /// Broad + narrow phase for a single collider
    fn update_collider_collisions(&mut self, key: ColliderKey) {
        for candidate in self.broad_phase_candidates(key) {
            if self.resolved.contains(&(key, candidate)) {
                continue;
            }
            self.resolved.insert((key, candidate));
            self.resolved.insert((candidate, key));

            let resolution = match (self.colliders.get(key), self.colliders.get(candidate)) {
                (Some(local), Some(remote)) => {
                    self.resolver.resolve(&local.shape, &remote.shape)
                }
                _ => continue,
            };
            if let Some(resolution) = resolution {
                self.push_collision(key, candidate, resolution);
            }
        }
    }

    fn push_collision(&mut self, local: ColliderKey, remote: ColliderKey, resolution: CollisionResolution) {
        self.collisions.push(Collision {
            local,
            remote,
            resolution,
        });
        self.collisions.push(Collision {
            local: remote,
            remote: local,
            resolution: resolution.inverted(),
        });

        // The frame set keeps the first-seen resolution of each pair.
        if self.current_frame_pairs.insert((local, remote)) {
            self.frame_collisions.push(Collision {
                local,
                remote,
                resolution,
            });
        }
        if self.current_frame_pairs.insert((remote, local)) {
            self.frame_collisions.push(Collision {
                local: remote,
                remote: local,
                resolution: resolution.inverted(),
            });
        }
    }

    /// Incremental re-query for one collider, used mid-substep by the
    /// integrator
    ///
    /// Purges existing entries mentioning this collider and reruns broad +
    /// narrow phase for it alone. The spatial index is not rebuilt; index
    /// rebuild is once per tick, not once per substep.
    pub fn refresh_collisions_for_collider(&mut self, key: ColliderKey) {
        self.purge_collisions_mentioning(key);
        if self.colliders.get(key).map_or(false, |c| c.active) {
            self.update_collider_collisions(key);
        }
    }

    fn purge_collisions_mentioning(&mut self, key: ColliderKey) {
        self.collisions
            .retain(|c| c.local != key && c.remote != key);
        self.resolved.retain(|&(a, b)| a != key && b != key);
    }

    /// This substep's collisions for a collider (O(n) scan)
    pub fn collisions_for_collider(&self, key: ColliderKey) -> Vec<Collision> {
        self.collisions
            .iter()
            .filter(|c| c.local == key)
            .copied()
            .collect()
    }

    /// Collisions first seen during the current frame for a collider
    pub fn frame_collisions_for_collider(&self, key: ColliderKey) -> Vec<Collision> {
        self.frame_collisions
            .iter()
            .filter(|c| c.local == key)
            .copied()
            .collect()
    }

    /// Pairs that started colliding this frame
    pub fn collisions_entered(&self) -> Vec<(ColliderKey, ColliderKey)> {
        self.current_frame_pairs
            .difference(&self.previous_frame_pairs)
            .copied()
            .collect()
    }

    /// Pairs that stopped colliding this frame
    pub fn collisions_exited(&self) -> Vec<(ColliderKey, ColliderKey)> {
        self.previous_frame_pairs
            .difference(&self.current_frame_pairs)
            .copied()
            .collect()
    }

    /// Cast a ray against collider bounding boxes
    ///
    /// Returns hits sorted from closest to farthest.
    pub fn ray_cast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Vec<RayHit> {
        if direction.magnitude_squared() == 0.0 {
            return Vec::new();
        }
        let dir = direction.normalize();

        let mut hits = Vec::new();
        for (key, collider) in self.colliders.iter().filter(|(_, c)| c.active) {
            if let Some(distance) = collider.shape.bounding_box().intersect_ray(origin, dir) {
                if distance <= max_distance {
                    hits.push(RayHit {
                        collider: key,
                        distance,
                        point: origin + dir * distance,
                    });
                }
            }
        }
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }

    fn layers_collide(&self, a: &str, b: &str) -> bool {
        match &self.matrix {
            None => true,
            Some(matrix) => matrix.contains(&ordered_pair(a, b)),
        }
    }
}

/// Normalize a layer pair so the matrix is symmetric
fn ordered_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
