pub mod macros;

pub mod component;
pub mod entity;
pub mod error;
pub mod pool;
pub mod registry;
pub mod sparse_set;
pub mod word;

pub use component::{Component, ComponentSet};
pub use entity::{
    Entity, IdConfig, Preset16x8, Preset32x16, Preset32x20, Preset64x32, Preset8x4,
};
pub use error::{Error, Result};
pub use registry::Registry;
