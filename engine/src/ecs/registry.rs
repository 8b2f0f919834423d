//! The registry: entity id allocation/recycling over an intrusive free list, plus a
//! heterogeneous map of component pools with cascading removal on discard (spec.md §5, §9).
//!
//! Grounded on the teacher crate's `entity/mod.rs::Allocator` for the allocate/recycle shape and
//! `component/registry.rs` for the "one pool per component type, created lazily on first use"
//! policy — adapted from `DashMap` to a plain `HashMap` since the registry has no concurrent
//! access story in scope (spec.md §5: "single-threaded or externally synchronised").

use std::any::TypeId;
use std::collections::HashMap;

use log::{debug, trace};

use crate::ecs::entity::{update_gen, Entity, IdConfig, Preset32x20};
use crate::ecs::error::{Error, EntityDebug, Result};
use crate::ecs::pool::{Component, ErasedPool, Pool};

/// Owns every live entity id and every component pool. `K` fixes the packed entity width; the
/// default, [`Preset32x20`], matches the documented default preset (spec.md §4.1).
pub struct Registry<K: IdConfig = Preset32x20> {
    /// One raw word per allocated slot. A live slot's raw word is `compose(i, g)` where `i` is
    /// the slot's own index. A dead slot's raw word is `compose(next_free, next_gen)`: the id
    /// subfield links to the next free slot (or `K::NULL_ID` to terminate the list), and the
    /// generation subfield holds the generation `create` will hand out the next time this slot
    /// is recycled. This is the free list "embedded directly in the entity table" called for in
    /// spec.md §9.
    table: Vec<K::Raw>,
    /// Index of the first free slot, or `K::NULL_ID` if the free list is empty.
    free_head: usize,
    /// Count of currently-live entities (table.len() minus dead slots).
    alive: usize,
    pools: HashMap<TypeId, Box<dyn ErasedPool<K>>>,
}

impl<K: IdConfig> Default for Registry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: IdConfig> Registry<K> {
    pub fn new() -> Self {
        Self {
            table: Vec::new(),
            free_head: K::NULL_ID,
            alive: 0,
            pools: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: Vec::with_capacity(capacity),
            free_head: K::NULL_ID,
            alive: 0,
            pools: HashMap::new(),
        }
    }

    /// Number of currently-live entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.alive
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alive == 0
    }

    /// Allocate a fresh entity: recycle the head of the free list if one exists, otherwise grow
    /// the table. Fails with [`Error::MaxEntitiesReached`] once `K::MAX_ENTITIES` ids are in use
    /// and the free list is empty (spec.md §4.1 "Capacity").
    pub fn create(&mut self) -> std::result::Result<Entity<K>, Error> {
        let entity = if self.free_head != K::NULL_ID {
            let id = self.free_head;
            let recycled = Entity::<K>::from_raw(self.table[id]);
            let next_free = recycled.id();
            let gen = recycled.generation();
            self.free_head = next_free;
            let e = Entity::<K>::compose(id, gen);
            self.table[id] = e.raw();
            e
        } else {
            if self.table.len() >= K::MAX_ENTITIES {
                return Err(Error::MaxEntitiesReached);
            }
            let id = self.table.len();
            let e = Entity::<K>::compose(id, 0);
            self.table.push(e.raw());
            e
        };

        self.alive += 1;
        trace!(
            "create: id={} generation={}",
            entity.id(),
            entity.generation()
        );
        Ok(entity)
    }

    /// `create()` repeated `n` times. Stops and returns the error if capacity runs out partway
    /// through; no rollback is attempted, so entities already allocated before the failure
    /// remain valid (bulk operations are not transactional across elements).
    ///
    /// `n == 0` is a caller-contract violation rather than a trivial no-op, matching the source
    /// this registry is modeled on — see DESIGN.md.
    pub fn create_n(&mut self, n: usize) -> std::result::Result<Vec<Entity<K>>, Error> {
        assert!(n > 0, "Registry::create_n: n must be greater than zero");
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.create()?);
        }
        Ok(out)
    }

    /// `true` iff `e` names a currently live entity: its id has been allocated and the table's
    /// generation for that slot matches `e`'s.
    #[inline]
    pub fn is_valid(&self, e: Entity<K>) -> bool {
        let id = e.id();
        id < self.table.len() && Entity::<K>::from_raw(self.table[id]) == e
    }

    /// `true` iff `id(e)` has ever been allocated, whether currently live or discarded
    /// (spec.md §4.4: `has_spawned(e) = id(e) < len(T)`).
    #[inline]
    pub fn has_spawned(&self, e: Entity<K>) -> bool {
        e.id() < self.table.len()
    }

    /// `id(e)`: the dense-table index `e` names. A pure projection of `e` itself; doesn't
    /// consult the entity table (spec.md §4.4 `id_of`).
    #[inline]
    pub fn id_of(&self, e: Entity<K>) -> usize {
        e.id()
    }

    /// `gen(e)`: the generation `e` itself carries, which may be stale if `e` has since been
    /// discarded and its slot recycled. A pure projection (spec.md §4.4 `gen_of`).
    #[inline]
    pub fn gen_of(&self, e: Entity<K>) -> usize {
        e.generation()
    }

    /// The generation the slot `id(e)` currently holds: the live generation if the id is in use,
    /// or the generation the next `create` on this slot will hand out if it's free. `None` if
    /// `id(e)` was never allocated (spec.md §4.4 `current_gen_of`, which "additionally requires
    /// `has_spawned`").
    pub fn current_gen_of(&self, e: Entity<K>) -> Option<usize> {
        if self.has_spawned(e) {
            Some(Entity::<K>::from_raw(self.table[e.id()]).generation())
        } else {
            None
        }
    }

    /// Invalidate `e`, push its id onto the free list with its generation advanced, and
    /// cascade-remove any components it held from every pool (spec.md §9 "Cascading removal").
    pub fn discard(&mut self, e: Entity<K>) -> std::result::Result<(), Error> {
        if !self.is_valid(e) {
            return Err(Error::InvalidEntity {
                entity: EntityDebug {
                    id: e.id(),
                    generation: e.generation(),
                },
            });
        }

        for pool in self.pools.values_mut() {
            pool.remove_erased(e);
        }

        let id = e.id();
        let next_gen = update_gen::<K>(e.generation());
        self.table[id] = Entity::<K>::compose(self.free_head, next_gen).raw();
        self.free_head = id;
        self.alive -= 1;

        debug!("discard: id={} next_generation={}", id, next_gen);
        Ok(())
    }

    /// `discard` applied to each entity in `entities`, in order. Not transactional: if element
    /// `k` fails, elements `0..k` have already been discarded and stay discarded (spec.md §4.4
    /// "Bulk overloads … apply the single-entity … form in sequence. No transactional guarantees
    /// across the batch").
    pub fn discard_each(&mut self, entities: &[Entity<K>]) -> Result<()> {
        for &e in entities {
            self.discard(e)?;
        }
        Ok(())
    }

    fn pool<C: Component>(&self) -> Option<&Pool<K, C>> {
        self.pools
            .get(&TypeId::of::<C>())
            .map(|b| b.as_any().downcast_ref::<Pool<K, C>>().expect("pool type mismatch"))
    }

    fn pool_mut<C: Component>(&mut self) -> Option<&mut Pool<K, C>> {
        self.pools
            .get_mut(&TypeId::of::<C>())
            .map(|b| b.as_any_mut().downcast_mut::<Pool<K, C>>().expect("pool type mismatch"))
    }

    fn pool_mut_or_create<C: Component>(&mut self) -> &mut Pool<K, C> {
        let type_id = TypeId::of::<C>();
        if !self.pools.contains_key(&type_id) {
            trace!("creating pool for {}", std::any::type_name::<C>());
            self.pools.insert(type_id, Box::new(Pool::<K, C>::new()));
        }
        self.pools
            .get_mut(&type_id)
            .expect("pool just inserted")
            .as_any_mut()
            .downcast_mut::<Pool<K, C>>()
            .expect("pool type mismatch")
    }

    /// Pre-size the pool for `C`, so the next `capacity` `add::<C>`s don't reallocate it. Lazily
    /// creates the pool (at `capacity`) if `C` has never been added before; otherwise reserves
    /// `capacity` additional slots on top of what's already there. Mirrors `Registry::with_capacity`'s
    /// entity-table pre-sizing for the component side (spec.md's "SUPPLEMENTED FEATURES").
    pub fn reserve_pool<C: Component>(&mut self, capacity: usize) {
        let type_id = TypeId::of::<C>();
        if !self.pools.contains_key(&type_id) {
            trace!(
                "creating pool for {} with capacity {}",
                std::any::type_name::<C>(),
                capacity
            );
            self.pools
                .insert(type_id, Box::new(Pool::<K, C>::with_capacity(capacity)));
        } else {
            self.pool_mut::<C>()
                .expect("pool just checked present")
                .reserve(capacity);
        }
    }

    fn require_valid(&self, e: Entity<K>) -> std::result::Result<(), Error> {
        if self.is_valid(e) {
            Ok(())
        } else {
            Err(Error::InvalidEntity {
                entity: EntityDebug {
                    id: e.id(),
                    generation: e.generation(),
                },
            })
        }
    }

    /// Attach a `C` value to `e`, creating the pool for `C` on first use. Fails with
    /// [`Error::EntityInPool`] if `e` already has a `C`.
    pub fn add<C: Component>(&mut self, e: Entity<K>, value: C) -> Result<()> {
        self.require_valid(e)?;
        let pool = self.pool_mut_or_create::<C>();
        if pool.contains(e) {
            return Err(Error::EntityInPool {
                entity: EntityDebug {
                    id: e.id(),
                    generation: e.generation(),
                },
            });
        }
        pool.add(e, value);
        Ok(())
    }

    /// `add::<C>(e, C::default())` — spec.md §4.4's `add<C>(e, v=default)` convenience for
    /// callers that don't have a value on hand. Fails exactly as `add` does.
    pub fn add_default<C: Component + Default>(&mut self, e: Entity<K>) -> Result<()> {
        self.add::<C>(e, C::default())
    }

    /// `add::<C>(e, value.clone())` applied to each entity in `entities`, in order. Not
    /// transactional across the batch (spec.md §4.4).
    pub fn add_each<C: Component + Clone>(&mut self, entities: &[Entity<K>], value: C) -> Result<()> {
        for &e in entities {
            self.add::<C>(e, value.clone())?;
        }
        Ok(())
    }

    /// Shared access to `e`'s `C`. Fails with [`Error::PoolDoesNotExist`] if nothing was ever
    /// added for `C`, or [`Error::EntityNotInPool`] if `e` specifically lacks one.
    pub fn get<C: Component>(&self, e: Entity<K>) -> Result<&C> {
        self.require_valid(e)?;
        let pool = self.pool::<C>().ok_or(Error::PoolDoesNotExist {
            type_id: TypeId::of::<C>(),
        })?;
        if !pool.contains(e) {
            return Err(Error::EntityNotInPool {
                entity: EntityDebug {
                    id: e.id(),
                    generation: e.generation(),
                },
            });
        }
        Ok(pool.get(e))
    }

    /// Exclusive access to `e`'s `C`.
    pub fn get_mut<C: Component>(&mut self, e: Entity<K>) -> Result<&mut C> {
        self.require_valid(e)?;
        let pool = self.pool_mut::<C>().ok_or(Error::PoolDoesNotExist {
            type_id: TypeId::of::<C>(),
        })?;
        if !pool.contains(e) {
            return Err(Error::EntityNotInPool {
                entity: EntityDebug {
                    id: e.id(),
                    generation: e.generation(),
                },
            });
        }
        Ok(pool.get_mut(e))
    }

    /// Overwrite `e`'s `C`. Shorthand for `*get_mut(e)? = value`.
    pub fn modify<C: Component>(&mut self, e: Entity<K>, value: C) -> Result<()> {
        *self.get_mut::<C>(e)? = value;
        Ok(())
    }

    /// `modify::<C>(e, value.clone())` applied to each entity in `entities`, in order. Not
    /// transactional across the batch (spec.md §4.4).
    pub fn modify_each<C: Component + Clone>(
        &mut self,
        entities: &[Entity<K>],
        value: C,
    ) -> Result<()> {
        for &e in entities {
            self.modify::<C>(e, value.clone())?;
        }
        Ok(())
    }

    /// `true` iff `e` is live and has a `C`. Unlike `get`, this never distinguishes "no pool" from
    /// "no component" — both read as `false`, matching spec.md §4.4's membership predicate.
    pub fn contains<C: Component>(&self, e: Entity<K>) -> bool {
        self.is_valid(e) && self.pool::<C>().is_some_and(|p| p.contains(e))
    }

    /// `true` iff `e` is live, has a `C`, and that `C` equals `value`. spec.md §6's
    /// value-equality overload of `contains`.
    pub fn contains_value<C: Component>(&self, e: Entity<K>, value: &C) -> bool {
        self.is_valid(e)
            && self
                .pool::<C>()
                .and_then(|p| p.contains(e).then(|| p.get(e)))
                .is_some_and(|got| got == value)
    }

    /// Detach `e`'s `C`. Fails with [`Error::PoolDoesNotExist`] / [`Error::EntityNotInPool`] as
    /// `get` does.
    pub fn remove<C: Component>(&mut self, e: Entity<K>) -> Result<()> {
        self.require_valid(e)?;
        let pool = self.pool_mut::<C>().ok_or(Error::PoolDoesNotExist {
            type_id: TypeId::of::<C>(),
        })?;
        if !pool.contains(e) {
            return Err(Error::EntityNotInPool {
                entity: EntityDebug {
                    id: e.id(),
                    generation: e.generation(),
                },
            });
        }
        pool.remove(e);
        Ok(())
    }

    /// `remove::<C>(e)` applied to each entity in `entities`, in order. Not transactional across
    /// the batch (spec.md §4.4).
    pub fn remove_each<C: Component>(&mut self, entities: &[Entity<K>]) -> Result<()> {
        for &e in entities {
            self.remove::<C>(e)?;
        }
        Ok(())
    }

    /// Strip every component `e` holds, across every pool that has ever been created, without
    /// discarding `e` itself. Fails with [`Error::InvalidEntity`] if `e` isn't live. A no-op on
    /// any pool that didn't contain `e`; pools stay in place whether or not they end up empty
    /// (spec.md §4.4: "Pools are not dropped when emptied").
    ///
    /// This is the registry-wide counterpart of [`crate::ecs::component::ComponentSet::remove_all`],
    /// which only sweeps the component types named in a particular tuple; this sweeps every pool
    /// the registry knows about, the same set `discard` cascades over.
    pub fn remove_all(&mut self, e: Entity<K>) -> Result<()> {
        self.require_valid(e)?;
        for pool in self.pools.values_mut() {
            pool.remove_erased(e);
        }
        Ok(())
    }

    /// `remove_all` applied to each entity in `entities`, in order. Not transactional across the
    /// batch (spec.md §4.4).
    pub fn remove_all_each(&mut self, entities: &[Entity<K>]) -> Result<()> {
        for &e in entities {
            self.remove_all(e)?;
        }
        Ok(())
    }

    /// Number of entities currently holding a `C`. Zero if the pool was never created.
    pub fn pool_len<C: Component>(&self) -> usize {
        self.pool::<C>().map_or(0, Pool::len)
    }

    /// Dense-order iteration over every `(entity, &C)` pair. Empty if the pool was never created.
    pub fn iter<C: Component>(&self) -> impl Iterator<Item = (Entity<K>, &C)> {
        self.pool::<C>().map(Pool::iter).into_iter().flatten()
    }
}
