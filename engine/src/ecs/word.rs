//! The primitive-integer abstraction behind [`crate::entity::IdConfig`].
//!
//! spec.md names five `(W, S)` presets and asks for the width to be monomorphised rather than
//! checked at runtime ("Compile-time polymorphism over entity width", design note). Rust has no
//! built-in way to be generic over "an unsigned integer of W bits", so this trait stands in for
//! one: it's implemented for exactly `u8`, `u16`, `u32`, and `u64`, and an [`crate::entity::IdConfig`]
//! picks one of them as its packed-id representation.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{BitAnd, BitOr, Shl, Shr};

/// An unsigned integer usable as the packed representation of an [`crate::entity::Entity`].
pub trait Word:
    Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + 'static
{
    /// Bit width of this integer type.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;

    fn from_usize(value: usize) -> Self;
    fn to_usize(self) -> usize;
    fn wrapping_add(self, rhs: Self) -> Self;
}

macro_rules! impl_word {
    ($ty:ty) => {
        impl Word for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn from_usize(value: usize) -> Self {
                value as $ty
            }

            #[inline]
            fn to_usize(self) -> usize {
                self as usize
            }

            #[inline]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$ty>::wrapping_add(self, rhs)
            }
        }
    };
}

impl_word!(u8);
impl_word!(u16);
impl_word!(u32);
impl_word!(u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_usize() {
        // Given / When / Then
        assert_eq!(u8::from_usize(200).to_usize(), 200);
        assert_eq!(u32::from_usize(70_000).to_usize(), 70_000);
    }

    #[test]
    fn wrapping_add_wraps_at_type_boundary() {
        // Given
        let max = u8::from_usize(255);

        // When
        let next = max.wrapping_add(u8::ONE);

        // Then
        assert_eq!(next, 0);
    }
}
