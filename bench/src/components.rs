//! Component types used across benchmarks, sized to be representative of real game components.
//!
//! No derive is required here: `rusty_engine`'s `Component` trait is a blanket impl over any
//! `'static + PartialEq` type.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A larger, cache-unfriendly component (256 bytes) for measuring pool overhead at size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Payload(pub [u64; 32]);

impl Default for Payload {
    fn default() -> Self {
        Self([0; 32])
    }
}
