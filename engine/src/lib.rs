//! An entity-component-system registry: recycled, generation-checked entity identifiers over
//! generic sparse-set component pools.
//!
//! See [`ecs::registry::Registry`] for the main entry point.

pub mod ecs;

pub use ecs::{Component, ComponentSet, Entity, Error, IdConfig, Registry, Result};
