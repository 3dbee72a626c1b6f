//! Shared transform store
//!
//! The source of truth for world positions. A rigid body and the component
//! that renders it both refer to the same position through a [`TransformKey`]
//! handle instead of sharing a mutable alias; the store is the single owner
//! and every mutation goes through it.

use slotmap::SlotMap;

use crate::foundation::math::Vec2;

slotmap::new_key_type! {
    /// Handle to a position slot in the [`TransformStore`]
    pub struct TransformKey;
}

/// Arena of world positions, indexed by [`TransformKey`]
#[derive(Debug, Default)]
pub struct TransformStore {
    positions: SlotMap<TransformKey, Vec2>,
}

impl TransformStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            positions: SlotMap::with_key(),
        }
    }

    /// Allocate a position slot
    pub fn insert(&mut self, position: Vec2) -> TransformKey {
        self.positions.insert(position)
    }

    /// Free a position slot
    pub fn remove(&mut self, key: TransformKey) -> Option<Vec2> {
        self.positions.remove(key)
    }

    /// Read a position
    pub fn position(&self, key: TransformKey) -> Option<Vec2> {
        self.positions.get(key).copied()
    }

    /// Overwrite a position
    pub fn set_position(&mut self, key: TransformKey, position: Vec2) {
        if let Some(slot) = self.positions.get_mut(key) {
            *slot = position;
        }
    }

    /// Displace a position by a delta
    pub fn translate(&mut self, key: TransformKey, delta: Vec2) {
        if let Some(slot) = self.positions.get_mut(key) {
            *slot += delta;
        }
    }

    /// Number of live slots
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the store has no live slots
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_translate_remove() {
        let mut store = TransformStore::new();
        let key = store.insert(Vec2::new(1.0, 2.0));

        store.translate(key, Vec2::new(0.5, -1.0));
        assert_eq!(store.position(key), Some(Vec2::new(1.5, 1.0)));

        store.remove(key);
        assert_eq!(store.position(key), None);
    }

    #[test]
    fn test_stale_key_is_inert() {
        let mut store = TransformStore::new();
        let key = store.insert(Vec2::zeros());
        store.remove(key);

        // Mutations through a stale key must not panic or resurrect the slot.
        store.translate(key, Vec2::new(1.0, 1.0));
        store.set_position(key, Vec2::new(2.0, 2.0));
        assert!(store.is_empty());
    }
}
