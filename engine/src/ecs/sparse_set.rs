//! The generic sparse-set index behind every component pool (spec.md §4.2).
//!
//! Grounded on the shape shared by `other_examples/670529f4_leudz-shipyard__src-sparse_set-mod.rs.rs`
//! and `other_examples/09e7a38c_xstater-xsparseset__src-lib.rs.rs`: a `sparse` array mapping
//! `id(e) -> dense position`, a packed `dense` array of full identifiers, and O(1) swap-remove.
//! [`crate::ecs::pool::Pool`] adds a parallel `values` array on top of this.

use crate::ecs::entity::{Entity, IdConfig};

/// An id -> dense-position index holding the full identifier in its dense array, so a
/// generation mismatch (a stale entity reused against a newer one occupying the same id) is
/// detectable without a second lookup.
///
/// # Invariant (membership, spec.md I4)
///
/// For every `e` with `contains(e)`: `sparse[id(e)] < dense.len() && dense[sparse[id(e)]] == e`.
#[derive(Debug)]
pub struct SparseSet<K: IdConfig> {
    sparse: Vec<usize>,
    dense: Vec<Entity<K>>,
}

impl<K: IdConfig> Default for SparseSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IdConfig> SparseSet<K> {
    #[inline]
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
        }
    }

    /// Pre-size `dense` (and `sparse`, since ids in a freshly-reserved set tend to run dense
    /// from 0) for `capacity` entries, so the first `capacity` `add`s don't reallocate.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: Vec::with_capacity(capacity),
            dense: Vec::with_capacity(capacity),
        }
    }

    /// Reserve capacity for at least `additional` more entries without reallocating.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.sparse.reserve(additional);
        self.dense.reserve(additional);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Dense-order iteration over the entities currently in the set.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Entity<K>> + '_ {
        self.dense.iter().copied()
    }

    /// The three-way membership check from spec.md §4.2: bounds-check the sparse array, then
    /// the dense position it names, then confirm the dense slot still holds exactly `e` (and
    /// not some other entity that has since reused the same id with a different generation).
    #[inline]
    pub fn contains(&self, e: Entity<K>) -> bool {
        let id = e.id();
        id < self.sparse.len()
            && self.sparse[id] < self.dense.len()
            && self.dense[self.sparse[id]] == e
    }

    /// Dense position of `e`, if present.
    #[inline]
    pub fn index_of(&self, e: Entity<K>) -> Option<usize> {
        self.contains(e).then(|| self.sparse[e.id()])
    }

    /// Insert `e`. The caller (the registry) must ensure `!contains(e)`; this is a programmer
    /// precondition, not a runtime failure mode the public API surfaces (spec.md §4.2, §7).
    pub fn add(&mut self, e: Entity<K>) {
        debug_assert!(!self.contains(e), "SparseSet::add: entity already present");

        let id = e.id();
        if id >= self.sparse.len() {
            self.sparse.resize(id + 1, 0);
        }
        self.dense.push(e);
        self.sparse[id] = self.dense.len() - 1;
    }

    /// Swap-remove `e`. Returns the dense index `e` occupied just before removal, so
    /// [`crate::ecs::pool::Pool`] can apply the identical swap to its parallel `values` array
    /// using the same `k` (spec.md §4.3: "The two swap-removes must use the same `k`, which is
    /// read before any structural change").
    ///
    /// The caller must ensure `contains(e)`.
    pub fn remove(&mut self, e: Entity<K>) -> usize {
        debug_assert!(self.contains(e), "SparseSet::remove: entity not present");

        let k = self.sparse[e.id()];
        let last = self.dense.len() - 1;
        // When `e` is the last element, `dense.swap(k, last)` is a no-op (k == last) and the
        // subsequent `sparse[id(last_entity)] = k` just re-writes `sparse[id(e)]` to the same
        // value it already held; still correct, no aliasing hazard.
        self.dense.swap(k, last);
        let moved = self.dense[k];
        self.sparse[moved.id()] = k;
        self.dense.pop();
        // The stale `sparse[id(e)]` entry (if `e != moved`) is left untouched, as spec.md
        // directs: it will fail the three-way `contains` check the next time it's read.
        k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::Preset32x20;

    type E = Entity<Preset32x20>;
    type S = SparseSet<Preset32x20>;

    #[test]
    fn new_set_is_empty() {
        let set = S::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn with_capacity_is_empty_but_pre_sized() {
        let set = S::with_capacity(64);
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn reserve_does_not_disturb_existing_contents() {
        // Given
        let mut set = S::new();
        let e = E::compose(3, 0);
        set.add(e);

        // When
        set.reserve(128);

        // Then
        assert!(set.contains(e));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn add_then_contains() {
        // Given
        let mut set = S::new();
        let e = E::compose(3, 0);

        // When
        set.add(e);

        // Then
        assert!(set.contains(e));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn contains_is_false_for_unrelated_entity() {
        let mut set = S::new();
        set.add(E::compose(3, 0));

        assert!(!set.contains(E::compose(4, 0)));
    }

    #[test]
    fn contains_is_false_for_stale_generation() {
        // Given: id 3 was added at generation 0, queried at generation 1.
        let mut set = S::new();
        set.add(E::compose(3, 0));

        // Then
        assert!(!set.contains(E::compose(3, 1)));
    }

    #[test]
    fn remove_evicts_and_fails_contains_after() {
        // Given
        let mut set = S::new();
        let e = E::compose(3, 0);
        set.add(e);

        // When
        set.remove(e);

        // Then
        assert!(!set.contains(e));
        assert!(set.is_empty());
    }

    #[test]
    fn swap_remove_reindexes_the_moved_entity() {
        // Given
        let mut set = S::new();
        let e0 = E::compose(0, 0);
        let e1 = E::compose(1, 0);
        let e2 = E::compose(2, 0);
        set.add(e0);
        set.add(e1);
        set.add(e2);

        // When: remove the first element; the last (e2) should move into its slot.
        set.remove(e0);

        // Then
        assert!(!set.contains(e0));
        assert!(set.contains(e1));
        assert!(set.contains(e2));
        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of(e2), Some(0));
    }

    #[test]
    fn removing_the_last_element_is_a_safe_self_swap() {
        // Given: only one element, so `k == last` in `remove`.
        let mut set = S::new();
        let e0 = E::compose(5, 0);
        set.add(e0);

        // When
        let k = set.remove(e0);

        // Then
        assert_eq!(k, 0);
        assert!(set.is_empty());
    }

    #[test]
    fn iter_yields_dense_order() {
        let mut set = S::new();
        let e0 = E::compose(0, 0);
        let e1 = E::compose(1, 0);
        set.add(e0);
        set.add(e1);

        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected, vec![e0, e1]);
    }

    #[test]
    fn reinsertion_after_remove_reuses_the_freed_slot() {
        // Given
        let mut set = S::new();
        let e = E::compose(2, 0);
        set.add(e);
        set.remove(e);

        // When: re-add the same id at a new generation, as the registry would after a discard.
        let e_next_gen = E::compose(2, 1);
        set.add(e_next_gen);

        // Then
        assert!(set.contains(e_next_gen));
        assert!(!set.contains(e));
    }
}
