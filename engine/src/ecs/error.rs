//! The closed error taxonomy for registry operations (spec.md §7).
//!
//! Five kinds, no more: a caller can always tell which of the five it hit and react
//! accordingly. Anything else a misuse of the API can produce (e.g. calling `add` twice for the
//! same entity/component pair without checking first) is a programmer precondition and panics
//! via `debug_assert!`/`assert!` instead, matching the teacher's `Executor::new` and
//! `storage/table.rs` convention of reserving `Result` for conditions a caller can legitimately
//! hit at runtime.

use std::any::TypeId;
use std::fmt;

/// Failure modes a [`crate::ecs::registry::Registry`] operation can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The entity is not currently valid: either its id was never allocated, or it was discarded
    /// and the generation on hand is stale.
    #[error("entity {entity:?} is not valid")]
    InvalidEntity { entity: EntityDebug },

    /// `add::<C>` was called for an entity that already has a `C`.
    #[error("entity {entity:?} already has a component of this type")]
    EntityInPool { entity: EntityDebug },

    /// `get`/`get_mut`/`remove`/`modify::<C>` was called for an entity that has no `C`.
    #[error("entity {entity:?} has no component of this type")]
    EntityNotInPool { entity: EntityDebug },

    /// A pool for this component type was never created (nothing was ever `add`ed to it).
    #[error("no pool has been created for this component type ({type_id:?})")]
    PoolDoesNotExist { type_id: TypeId },

    /// `create` was called while every id slot (up to the `IdConfig`'s `MAX_ENTITIES`) is live.
    #[error("maximum number of live entities reached")]
    MaxEntitiesReached,
}

/// A `Debug`-friendly snapshot of an entity's id/generation, decoupled from any particular
/// `IdConfig` so [`Error`] itself doesn't need a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDebug {
    pub id: usize,
    pub generation: usize,
}

impl fmt::Display for EntityDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(id={}, gen={})", self.id, self.generation)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
