pub mod control;
pub mod dsp; // Stateless and small-state primitives
pub mod effect; // Block processors and the effect chain
pub mod error;
#[cfg(feature = "serde")]
pub mod preset; // JSON presets

pub use dsp::waveshaper::{transform, transform1, transform_in_place, transform_into};
pub use error::{Error, Result};

pub const MAX_BLOCK_SIZE: usize = 2048;
