//! Spatial partitioning structures for broad-phase collision queries

pub mod quadtree;

pub use quadtree::{QuadTree, QuadTreeItem, QuadTreeNode};
