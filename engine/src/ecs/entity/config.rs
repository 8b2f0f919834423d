//! `(W, S)` entity-type presets.

use crate::ecs::word::Word;

/// Fixes the packed width `W` and split point `S` of an [`super::Entity`] at compile time.
///
/// Implementors are zero-sized marker types; see [`crate::define_id_config!`] to declare new
/// ones. spec.md §4.1 requires `W ∈ {8, 16, 32, 64}` and `1 ≤ S ≤ W - 1`; `define_id_config!`
/// checks both at const-eval time, so a malformed preset is a compile error rather than a
/// runtime surprise ("Violations are a build-time / construction-time error").
pub trait IdConfig: Copy + Eq + std::hash::Hash + std::fmt::Debug + 'static {
    /// The primitive integer an [`super::Entity`] packs its id/generation fields into. Its bit
    /// width is `W`.
    type Raw: Word;

    /// `W`: total bit width of the packed entity.
    const WIDTH: u32;

    /// `S`: the split point. The low `S` bits are the id, the high `W - S` bits are the
    /// generation.
    const SPLIT: u32;

    /// `(1 << S) - 1`: the mask selecting the id subfield, and simultaneously the reserved
    /// `NULL` id value in `Self::Raw`'s representation.
    const ID_MASK: Self::Raw;

    /// `NULL`, as a `usize`: the reserved id value. Equal to [`Self::ID_MASK`] widened.
    const NULL_ID: usize;

    /// Maximum number of live entities this config supports: `2^S - 1`, i.e. `NULL`.
    const MAX_ENTITIES: usize = Self::NULL_ID;

    /// `2^(W-S) - 1`: the mask selecting the generation subfield, as a `usize`.
    #[inline]
    fn gen_mask_usize() -> usize {
        let gen_bits = Self::WIDTH - Self::SPLIT;
        if gen_bits >= usize::BITS {
            usize::MAX
        } else {
            (1usize << gen_bits) - 1
        }
    }
}

crate::define_id_config!(Preset8x4, u8, 8, 4);
crate::define_id_config!(Preset16x8, u16, 16, 8);
crate::define_id_config!(Preset32x16, u32, 32, 16);
crate::define_id_config!(Preset32x20, u32, 32, 20);
crate::define_id_config!(Preset64x32, u64, 64, 32);
