//! Entity identifiers: a single packed integer split into an id subfield and a generation
//! ("batch") subfield.
//!
//! # Architecture
//!
//! - [`IdConfig`]: a zero-sized marker type fixing the packed width `W` and the split point `S`
//!   at compile time. Five canonical presets are provided below; a consumer crate can add a
//!   sixth with [`define_id_config!`].
//! - [`Entity`]: the packed identifier itself, generic over an `IdConfig`. Carries no more state
//!   than the raw integer — `id`/`generation`/`compose` are pure projections over it.
//!
//! Monomorphising over `IdConfig` (rather than picking the width at runtime) is deliberate: it's
//! the only way the id/generation masking compiles down to constants and the hot paths
//! (`contains`, `is_valid`) stay inlinable.

mod config;

pub use config::{IdConfig, Preset16x8, Preset32x16, Preset32x20, Preset64x32, Preset8x4};

use crate::ecs::word::Word;
use std::fmt;
use std::marker::PhantomData;

/// A packed entity identifier: the lower `K::SPLIT` bits are the id, the upper bits are the
/// generation. See the module-level docs and spec.md §3 for the bit layout.
pub struct Entity<K: IdConfig> {
    raw: K::Raw,
    _config: PhantomData<K>,
}

// Manual impls: `#[derive(...)]` would require `K: Clone`/`K: Debug`/etc, which marker types
// don't need and shouldn't be forced to provide.
impl<K: IdConfig> Clone for Entity<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}
impl<K: IdConfig> Copy for Entity<K> {}
impl<K: IdConfig> PartialEq for Entity<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}
impl<K: IdConfig> Eq for Entity<K> {}
impl<K: IdConfig> std::hash::Hash for Entity<K> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}
impl<K: IdConfig> fmt::Debug for Entity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id())
            .field("generation", &self.generation())
            .finish()
    }
}

impl<K: IdConfig> Entity<K> {
    #[inline]
    pub(crate) fn from_raw(raw: K::Raw) -> Self {
        Self {
            raw,
            _config: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn raw(self) -> K::Raw {
        self.raw
    }

    /// Compose an entity from an id and a generation. Both are masked to their respective
    /// subfield widths; out-of-range inputs are truncated rather than rejected, matching
    /// spec.md's pure total `compose(i, g)`.
    #[inline]
    pub fn compose(id: usize, generation: usize) -> Self {
        let id_part = K::Raw::from_usize(id) & K::ID_MASK;
        let gen_part = K::Raw::from_usize(generation) << K::SPLIT;
        Self::from_raw(id_part | gen_part)
    }

    /// `id(e) = e & MASK_ID` — the dense index into the entity table and component sparse
    /// arrays.
    #[inline]
    pub fn id(self) -> usize {
        (self.raw & K::ID_MASK).to_usize()
    }

    /// `gen(e) = e >> S` — the generation ("batch") counter.
    #[inline]
    pub fn generation(self) -> usize {
        (self.raw >> K::SPLIT).to_usize()
    }

    /// `true` iff `id(self) == NULL`, i.e. this entity names the reserved sentinel id rather
    /// than a real slot. A well-formed `Entity` obtained from a [`crate::ecs::registry::Registry`]
    /// is never null; this is exposed for callers implementing their own free-list-adjacent
    /// bookkeeping.
    #[inline]
    pub fn is_null_id(self) -> bool {
        self.id() == K::NULL_ID
    }
}

/// `update_gen(g) = (g + 1) mod 2^(W-S)` — wraps back to 0 after the generation field's maximum.
#[inline]
pub(crate) fn update_gen<K: IdConfig>(generation: usize) -> usize {
    let gen_mask = K::gen_mask_usize();
    (generation.wrapping_add(1)) & gen_mask
}

/// Declare a new [`IdConfig`] preset: a zero-sized marker type plus its `(W, S)` constants.
///
/// Grounded on the teacher crate's own declarative-macro pattern
/// (`engine/src/ecs/util/macros.rs`'s `all_tuples!`/`for_every_tuple!`): a macro that stamps out
/// one repetitive trait impl per invocation, so adding a sixth preset is a one-line call rather
/// than hand-written boilerplate.
///
/// `$width` must equal `<$raw as Word>::BITS` and `1 <= $split <= $width - 1`; both are enforced
/// at const-eval time, so a malformed preset fails to compile rather than misbehaving at
/// runtime (spec.md §4.1: "Violations are a build-time / construction-time error").
#[macro_export]
macro_rules! define_id_config {
    ($name:ident, $raw:ty, $width:expr, $split:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name;

        impl $crate::ecs::entity::IdConfig for $name {
            type Raw = $raw;
            const WIDTH: u32 = $width;
            const SPLIT: u32 = $split;
            const ID_MASK: $raw = ((1 as $raw) << $split) - 1;
            const NULL_ID: usize = Self::ID_MASK as usize;
        }

        const _: () = {
            assert!(
                <$raw as $crate::ecs::word::Word>::BITS == $width,
                "define_id_config!: width must match the raw integer's bit width"
            );
            assert!($split >= 1 && $split <= $width - 1, "define_id_config!: 1 <= S <= W - 1");
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_and_generation_round_trip() {
        // Given
        let e = Entity::<Preset32x20>::compose(12345, 7);

        // Then
        assert_eq!(e.id(), 12345);
        assert_eq!(e.generation(), 7);
    }

    #[test]
    fn generation_wraps_at_field_width() {
        // Given: (W=8, S=1) leaves a 7-bit generation field, max value 127.
        crate::define_id_config!(Preset8x1, u8, 8, 1);
        let max_gen = (1usize << 7) - 1;

        // When
        let wrapped = update_gen::<Preset8x1>(max_gen);

        // Then
        assert_eq!(wrapped, 0);
    }

    #[test]
    fn null_id_is_reserved_and_unreachable_via_compose_of_max_minus_one() {
        // Given: default preset (32, 20) -> NULL = 2^20 - 1
        assert_eq!(Preset32x20::NULL_ID, (1usize << 20) - 1);
    }

    #[test]
    fn entities_compare_by_full_raw_word() {
        // Given
        let a = Entity::<Preset32x20>::compose(4, 0);
        let b = Entity::<Preset32x20>::compose(4, 1);

        // Then: same id, different generation => not equal.
        assert_ne!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn compose_masks_out_of_range_id() {
        // Given: id wider than the split point gets truncated rather than rejected.
        let e = Entity::<Preset8x4>::compose(0xFF, 0);

        // Then: only the low 4 bits of the id survive.
        assert_eq!(e.id(), 0xF);
    }
}
