//! Component pools: a [`SparseSet`] plus a parallel `values` array (spec.md §4.3), and the
//! type-erased handle the registry uses to multiplex pools of different component types
//! (spec.md §4.4 "Type erasure" / §9 "Heterogeneous pool map without inheritance").
//!
//! The erasure pattern is grounded on the teacher crate's `Uniques`
//! (`engine/src/ecs/storage/unique.rs`): store `Box<dyn ErasedPool<K>>` keyed by `TypeId`, and
//! recover the strongly-typed `Pool<K, C>` via a checked downcast at call sites that know `C`.
//! Cascading removal (`discard`, `remove_all`) only ever needs the erased half.

use std::any::Any;

use crate::ecs::entity::{Entity, IdConfig};
use crate::ecs::sparse_set::SparseSet;

/// Any aggregate usable as a component value. spec.md §6 calls for "any aggregate with a
/// well-defined default value and structural equality"; `Default` is only required by the
/// convenience `add`-with-default overload, so the blanket bound here is just `PartialEq +
/// 'static` and `Default` is requested per call site instead of baked into the trait — the call
/// site being [`crate::ecs::registry::Registry::add_default`], spec.md §4.4's `add<C>(e,
/// v=default)`.
pub trait Component: 'static + PartialEq {}
impl<T: 'static + PartialEq> Component for T {}

/// A sparse set specialised for one component type `C`, with `values` kept parallel to the
/// sparse set's dense array.
#[derive(Debug)]
pub struct Pool<K: IdConfig, C: Component> {
    set: SparseSet<K>,
    values: Vec<C>,
}

impl<K: IdConfig, C: Component> Default for Pool<K, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IdConfig, C: Component> Pool<K, C> {
    #[inline]
    pub fn new() -> Self {
        Self {
            set: SparseSet::new(),
            values: Vec::new(),
        }
    }

    /// Pre-size the pool for `capacity` entries, so the first `capacity` `add`s don't
    /// reallocate `values` or the underlying sparse set's arrays.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: SparseSet::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Reserve capacity for at least `additional` more entries without reallocating.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.set.reserve(additional);
        self.values.reserve(additional);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn contains(&self, e: Entity<K>) -> bool {
        self.set.contains(e)
    }

    /// Dense-order iteration over `(entity, &value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Entity<K>, &C)> {
        self.set.iter().zip(self.values.iter())
    }

    /// Append `v` to `values`, then delegate to the sparse set's `add`. Growing `values` first
    /// means a caller that aborts on allocation failure never leaves the sparse set ahead of the
    /// value array (spec.md §4.3: "a failure to grow one must prevent growing the other").
    ///
    /// Precondition: `!contains(e)`, enforced by the registry before this is ever called.
    pub fn add(&mut self, e: Entity<K>, v: C) {
        debug_assert!(!self.contains(e), "Pool::add: entity already present");
        self.values.push(v);
        self.set.add(e);
    }

    /// Precondition: `contains(e)`.
    #[inline]
    pub fn get(&self, e: Entity<K>) -> &C {
        let k = self
            .set
            .index_of(e)
            .expect("Pool::get: entity not present");
        &self.values[k]
    }

    /// Precondition: `contains(e)`.
    #[inline]
    pub fn get_mut(&mut self, e: Entity<K>) -> &mut C {
        let k = self
            .set
            .index_of(e)
            .expect("Pool::get_mut: entity not present");
        &mut self.values[k]
    }

    /// `*get_mut(e) = v`. Precondition: `contains(e)`.
    #[inline]
    pub fn modify(&mut self, e: Entity<K>, v: C) {
        *self.get_mut(e) = v;
    }

    /// Swap-remove `e`'s value, then delegate to the sparse set's `remove` using the same `k`
    /// (spec.md §4.3). Precondition: `contains(e)`.
    pub fn remove(&mut self, e: Entity<K>) {
        debug_assert!(self.contains(e), "Pool::remove: entity not present");
        let k = self
            .set
            .index_of(e)
            .expect("Pool::remove: entity not present");
        let last = self.values.len() - 1;
        self.values.swap(k, last);
        self.values.pop();
        self.set.remove(e);
    }
}

/// Type-erased capability every pool entry in the registry exposes: "remove this entity if
/// present", used only by cascading `discard` and `remove_all`, which don't know `C` at their
/// call site.
pub(crate) trait ErasedPool<K: IdConfig> {
    fn contains_erased(&self, e: Entity<K>) -> bool;
    /// Remove `e` if present. Returns whether it was present (and thus removed).
    fn remove_erased(&mut self, e: Entity<K>) -> bool;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<K: IdConfig, C: Component> ErasedPool<K> for Pool<K, C> {
    #[inline]
    fn contains_erased(&self, e: Entity<K>) -> bool {
        self.contains(e)
    }

    fn remove_erased(&mut self, e: Entity<K>) -> bool {
        if self.contains(e) {
            self.remove(e);
            true
        } else {
            false
        }
    }

    #[inline]
    fn len(&self) -> usize {
        Pool::len(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
