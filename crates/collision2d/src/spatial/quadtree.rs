//! Quadtree spatial partitioning structure
//!
//! Divides 2D space into hierarchical quadrants for broad-phase collision
//! queries. A node subdivides into 4 children when its item count exceeds a
//! threshold; an item whose bounding box straddles a split boundary is stored
//! in every overlapping child. Duplication is intentional: retrieval may
//! return the same candidate more than once and callers must not assume
//! uniqueness.

use crate::core::config::QuadTreeConfig;
use crate::foundation::math::{Rect, Vec2};
use crate::physics::collider::ColliderKey;

/// Item stored in the quadtree: a collider key plus its bounding box
#[derive(Debug, Clone, Copy)]
pub struct QuadTreeItem {
    /// Identity of the collider
    pub key: ColliderKey,
    /// Bounding box at insertion time
    pub bounds: Rect,
}

/// Single node in the quadtree hierarchy
///
/// Invariant: a node either holds items directly (leaf) or has exactly 4
/// children and zero items (split node).
#[derive(Debug, Clone)]
pub struct QuadTreeNode {
    bounds: Rect,
    level: u32,
    items: Vec<QuadTreeItem>,
    children: Option<Box<[QuadTreeNode; 4]>>,
}

impl QuadTreeNode {
    /// Create a new leaf node
    fn new(bounds: Rect, level: u32) -> Self {
        Self {
            bounds,
            level,
            items: Vec::new(),
            children: None,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// World-space bounds of this node
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Which children an item's bounds belong in, by midpoint test
    ///
    /// Not a general overlap test: each side of the item's box is compared
    /// against the split lines, inclusively on both sides, so an item whose
    /// edge lies exactly on a split line lands in the quadrants on either
    /// side of it.
    ///
    /// Quadrant layout: bit 0 = east half, bit 1 = north half.
    fn quadrant_flags(&self, bounds: &Rect) -> [bool; 4] {
        let mid = self.bounds.center();
        let west = bounds.min.x <= mid.x;
        let east = bounds.max.x >= mid.x;
        let south = bounds.min.y <= mid.y;
        let north = bounds.max.y >= mid.y;

        let flags = [
            west && south,
            east && south,
            west && north,
            east && north,
        ];
        // A well-formed box always spans at least one quadrant per axis; an
        // empty set here means the bounds are NaN or inverted.
        debug_assert!(
            flags.iter().any(|&f| f),
            "collider bounds matched no quadrant of {:?}",
            self.bounds
        );
        flags
    }

    /// Insert an item into this node or its children
    fn add_item(&mut self, item: QuadTreeItem, config: &QuadTreeConfig) {
        if !self.is_leaf() {
            let flags = self.quadrant_flags(&item.bounds);
            if let Some(children) = &mut self.children {
                for (child, &wanted) in children.iter_mut().zip(flags.iter()) {
                    if wanted {
                        child.add_item(item, config);
                    }
                }
            }
            return;
        }

        self.items.push(item);
        if self.items.len() > config.max_items_per_node && self.level < config.max_levels {
            self.split(config);
        }
    }

    /// Subdivide into 4 equal children and redistribute held items
    fn split(&mut self, config: &QuadTreeConfig) {
        let center = self.bounds.center();
        let quarter = self.bounds.extents() * 0.5;
        let child_level = self.level + 1;

        let child = |quadrant: usize| {
            let x_sign = if quadrant & 1 != 0 { 1.0 } else { -1.0 };
            let y_sign = if quadrant & 2 != 0 { 1.0 } else { -1.0 };
            let child_center = Vec2::new(
                center.x + quarter.x * x_sign,
                center.y + quarter.y * y_sign,
            );
            QuadTreeNode::new(
                Rect::from_center_extents(child_center, quarter),
                child_level,
            )
        };
        self.children = Some(Box::new([child(0), child(1), child(2), child(3)]));

        let items = std::mem::take(&mut self.items);
        for item in items {
            self.add_item(item, config);
        }
    }

    /// Collect candidate keys for an item's bounds, excluding the item itself
    fn retrieve(&self, key: ColliderKey, bounds: &Rect, results: &mut Vec<ColliderKey>) {
        if let Some(children) = &self.children {
            let flags = self.quadrant_flags(bounds);
            for (child, &wanted) in children.iter().zip(flags.iter()) {
                if wanted {
                    child.retrieve(key, bounds, results);
                }
            }
            return;
        }

        for item in &self.items {
            if item.key != key {
                results.push(item.key);
            }
        }
    }

    /// Recursively clear items, keeping the node structure
    fn clear_items(&mut self) {
        self.items.clear();
        if let Some(children) = &mut self.children {
            for child in children.iter_mut() {
                child.clear_items();
            }
        }
    }

    /// Count items in this node and all children (duplicates included)
    fn count_items(&self) -> usize {
        let mut count = self.items.len();
        if let Some(children) = &self.children {
            for child in children.iter() {
                count += child.count_items();
            }
        }
        count
    }
}

/// Quadtree spatial index over collider bounding boxes
///
/// World bounds are either fixed at construction or tracked dynamically as
/// the union of all collider boxes; in the dynamic case the owner calls
/// [`QuadTree::update_bounds`] before each rebuild.
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: QuadTreeNode,
    config: QuadTreeConfig,
    fixed_bounds: bool,
}

impl QuadTree {
    /// Create a quadtree with the given world bounds
    pub fn new(bounds: Rect, config: QuadTreeConfig, fixed_bounds: bool) -> Self {
        Self {
            root: QuadTreeNode::new(bounds, 0),
            config,
            fixed_bounds,
        }
    }

    /// Whether the world bounds are fixed
    pub fn is_fixed(&self) -> bool {
        self.fixed_bounds
    }

    /// Current world bounds
    pub fn bounds(&self) -> Rect {
        self.root.bounds
    }

    /// Insert a collider's bounding box
    pub fn add_item(&mut self, key: ColliderKey, bounds: Rect) {
        self.root.add_item(QuadTreeItem { key, bounds }, &self.config);
    }

    /// Gather broad-phase candidates for an item's bounds
    ///
    /// The result can contain the same key multiple times when the query box
    /// and a candidate share several leaves; the queried key itself is
    /// excluded by identity.
    pub fn retrieve(&self, key: ColliderKey, bounds: Rect) -> Vec<ColliderKey> {
        let mut results = Vec::new();
        self.root.retrieve(key, &bounds, &mut results);
        results
    }

    /// Remove all items, keeping the quadrant structure
    pub fn clear_items(&mut self) {
        self.root.clear_items();
    }

    /// Collapse all quadrants back to a single root leaf
    pub fn clear_quadrants(&mut self) {
        self.root.children = None;
    }

    /// Replace the world bounds (dynamic-bounds trees only)
    ///
    /// Takes effect at the next rebuild; ignored for fixed-bounds trees.
    pub fn update_bounds(&mut self, bounds: Rect) {
        if self.fixed_bounds {
            return;
        }
        self.root.bounds = bounds;
    }

    /// Root node accessor (for debug visualization)
    pub fn root(&self) -> &QuadTreeNode {
        &self.root
    }

    /// Total stored item count, duplicates included
    pub fn item_count(&self) -> usize {
        self.root.count_items()
    }
}
