//! Ordered set of unique keys with O(1) removal by key.
//!
//! [`KeyList`] backs the four ARC lists (T1, T2, B1, B2). It pairs an
//! [`IntrusiveList`] of keys with an index from key to node handle, so every
//! positional operation the replacement policy needs is constant time.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>        list: IntrusiveList<K>
//!   ┌─────────┬─────────┐              head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//!   │  key A  │  id_1   │              front (most recently placed)   back
//!   │  key B  │  id_2   │
//!   │  key C  │  id_3   │
//!   └─────────┴─────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation        | Time | Notes                                 |
//! |------------------|------|---------------------------------------|
//! | `contains`       | O(1) | index lookup                          |
//! | `find`           | O(1) | returns the node handle               |
//! | `push_front`     | O(1) | repositions a key already present     |
//! | `push_back`      | O(1) | repositions a key already present     |
//! | `move_to_front`  | O(1) | by handle                             |
//! | `remove`         | O(1) | by key                                |
//! | `pop_back`       | O(1) | least recently placed key             |
//! | `iter`           | O(n) | front to back                         |
//!
//! Unlike a ghost list this set has no capacity of its own; the cache that
//! owns it enforces every size bound.
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{self, IntrusiveList};
use crate::ds::slot_arena::SlotId;

/// Ordered set of keys, front = most recently placed.
#[derive(Debug)]
pub struct KeyList<K> {
    list: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
}

impl<K> KeyList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            list: IntrusiveList::new(),
            index: FxHashMap::default(),
        }
    }

    /// Creates an empty set with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            list: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the handle of `key`'s node, if present.
    pub fn find(&self, key: &K) -> Option<SlotId> {
        self.index.get(key).copied()
    }

    /// Places `key` at the front.
    ///
    /// A key that is already present is moved to the front instead of being
    /// added twice.
    pub fn push_front(&mut self, key: K) -> SlotId {
        if let Some(id) = self.find(&key) {
            self.list.move_to_front(id);
            return id;
        }
        let id = self.list.push_front(key.clone());
        self.index.insert(key, id);
        id
    }

    /// Places `key` at the back.
    ///
    /// A key that is already present is moved to the back instead of being
    /// added twice.
    pub fn push_back(&mut self, key: K) -> SlotId {
        if let Some(id) = self.find(&key) {
            self.list.move_to_back(id);
            return id;
        }
        let id = self.list.push_back(key.clone());
        self.index.insert(key, id);
        id
    }

    /// Repositions the node `id` at the front; returns `false` for a stale handle.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        self.list.move_to_front(id)
    }

    /// Removes `key`; returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.list.remove(id);
                true
            },
            None => false,
        }
    }

    /// Removes the node `id` and returns its key.
    pub fn remove_at(&mut self, id: SlotId) -> Option<K> {
        let key = self.list.remove(id)?;
        self.index.remove(&key);
        Some(key)
    }

    /// Removes and returns the back (least recently placed) key.
    pub fn pop_back(&mut self) -> Option<K> {
        let key = self.list.pop_back()?;
        self.index.remove(&key);
        Some(key)
    }

    /// Returns the back key without removing it.
    pub fn peek_back(&self) -> Option<&K> {
        self.list.back()
    }

    pub fn front(&self) -> Option<&K> {
        self.list.front()
    }

    /// Iterates keys front to back.
    pub fn iter(&self) -> intrusive_list::Iter<'_, K> {
        self.list.iter()
    }

    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.list.len(), self.index.len());
        for (key, &id) in &self.index {
            assert!(self.list.get(id) == Some(key), "index entry points at wrong node");
        }
    }
}

impl<K> Default for KeyList<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, K> IntoIterator for &'a KeyList<K>
where
    K: Eq + Hash + Clone,
{
    type Item = &'a K;
    type IntoIter = intrusive_list::Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
