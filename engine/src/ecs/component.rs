//! Bulk component operations across tuples of component types.
//!
//! [`ComponentSet`] generalises the registry's single-component `add`/`remove`/`contains` to
//! whole tuples in one call, the way the teacher crate's `component/set.rs` `Set` trait applies a
//! tuple of component values to a target. The tuple impls are generated by
//! [`crate::all_tuples!`] rather than hand-written up to arity 26.

pub use crate::ecs::pool::Component;
use crate::ecs::entity::{Entity, IdConfig};
use crate::ecs::error::Result;
use crate::ecs::registry::Registry;

/// A set of component types that can be added, removed, or queried on an entity all at once.
///
/// Implemented for every `C: Component` (a singleton set) and for tuples of `ComponentSet`
/// members up to 26 elements.
pub trait ComponentSet<K: IdConfig> {
    /// The values carried by this set, supplied to `add_all`.
    type Values;

    /// `add::<C>(e, v)` for every member of the set, in declaration order. Fails with
    /// [`crate::ecs::error::Error::EntityInPool`] on the first member the entity already has;
    /// members added before the failing one remain added (spec.md draws no atomicity guarantee
    /// across a bulk operation, only within a single pool's `add`).
    fn add_all(values: Self::Values, registry: &mut Registry<K>, e: Entity<K>) -> Result<()>;

    /// `remove::<C>(e)` for every member of the set. Fails on the first member the entity
    /// doesn't have.
    fn remove_all(registry: &mut Registry<K>, e: Entity<K>) -> Result<()>;

    /// `true` iff `e` has every member of the set.
    fn contains_all(registry: &Registry<K>, e: Entity<K>) -> bool;

    /// `true` iff `e` has at least one member of the set.
    fn contains_any(registry: &Registry<K>, e: Entity<K>) -> bool;
}

impl<K: IdConfig, C: Component> ComponentSet<K> for C {
    type Values = C;

    fn add_all(values: C, registry: &mut Registry<K>, e: Entity<K>) -> Result<()> {
        registry.add::<C>(e, values)
    }

    fn remove_all(registry: &mut Registry<K>, e: Entity<K>) -> Result<()> {
        registry.remove::<C>(e)
    }

    fn contains_all(registry: &Registry<K>, e: Entity<K>) -> bool {
        registry.contains::<C>(e)
    }

    fn contains_any(registry: &Registry<K>, e: Entity<K>) -> bool {
        registry.contains::<C>(e)
    }
}

macro_rules! tuple_component_set {
    ($($name: ident),*) => {
        impl<K: IdConfig, $($name: ComponentSet<K>),*> ComponentSet<K> for ($($name,)*) {
            type Values = ($($name::Values,)*);

            #[allow(non_snake_case)]
            fn add_all(values: Self::Values, registry: &mut Registry<K>, e: Entity<K>) -> Result<()> {
                let ($($name,)*) = values;
                $($name::add_all($name, registry, e)?;)*
                Ok(())
            }

            #[allow(non_snake_case)]
            fn remove_all(registry: &mut Registry<K>, e: Entity<K>) -> Result<()> {
                $($name::remove_all(registry, e)?;)*
                Ok(())
            }

            #[allow(non_snake_case)]
            fn contains_all(registry: &Registry<K>, e: Entity<K>) -> bool {
                $($name::contains_all(registry, e))&&*
            }

            #[allow(non_snake_case)]
            fn contains_any(registry: &Registry<K>, e: Entity<K>) -> bool {
                $($name::contains_any(registry, e))||*
            }
        }
    }
}

crate::all_tuples!(tuple_component_set);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::Preset32x20;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    struct Pos {
        x: f32,
        y: f32,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    struct Vel {
        dx: f32,
        dy: f32,
    }

    #[test]
    fn tuple_add_all_adds_every_member() {
        // Given
        let mut registry: Registry<Preset32x20> = Registry::new();
        let e = registry.create();

        // When
        <(Pos, Vel) as ComponentSet<Preset32x20>>::add_all(
            (Pos { x: 1.0, y: 1.0 }, Vel { dx: 0.0, dy: 0.0 }),
            &mut registry,
            e,
        )
        .unwrap();

        // Then
        assert!(registry.contains::<Pos>(e));
        assert!(registry.contains::<Vel>(e));
    }

    #[test]
    fn tuple_contains_all_requires_every_member() {
        let mut registry: Registry<Preset32x20> = Registry::new();
        let e = registry.create();
        registry.add(e, Pos { x: 0.0, y: 0.0 }).unwrap();

        assert!(!<(Pos, Vel) as ComponentSet<Preset32x20>>::contains_all(
            &registry, e
        ));

        registry.add(e, Vel { dx: 0.0, dy: 0.0 }).unwrap();
        assert!(<(Pos, Vel) as ComponentSet<Preset32x20>>::contains_all(
            &registry, e
        ));
    }

    #[test]
    fn tuple_contains_any_is_satisfied_by_one_member() {
        let mut registry: Registry<Preset32x20> = Registry::new();
        let e = registry.create();
        registry.add(e, Pos { x: 0.0, y: 0.0 }).unwrap();

        assert!(<(Pos, Vel) as ComponentSet<Preset32x20>>::contains_any(
            &registry, e
        ));
    }

    #[test]
    fn tuple_remove_all_removes_every_member() {
        let mut registry: Registry<Preset32x20> = Registry::new();
        let e = registry.create();
        registry.add(e, Pos { x: 0.0, y: 0.0 }).unwrap();
        registry.add(e, Vel { dx: 0.0, dy: 0.0 }).unwrap();

        <(Pos, Vel) as ComponentSet<Preset32x20>>::remove_all(&mut registry, e).unwrap();

        assert!(!registry.contains::<Pos>(e));
        assert!(!registry.contains::<Vel>(e));
    }
}
