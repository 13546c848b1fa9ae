//! Stateful processors built from the [`crate::dsp`] primitives.
//!
//! An effect is prepared once for a sample rate and block size, then handed
//! blocks of mono samples from the audio callback. Everything reachable from
//! [`Effect::process`] is allocation-free and lock-free.

/// Fixed-capacity serial chain of effects.
pub mod chain;
/// Drive, bias, soft-knee shaping, filtering and dry/wet in one stage.
pub mod distortion;

pub use chain::EffectChain;
pub use distortion::{Distortion, DistortionParams};

/// Stream format an effect is prepared for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    pub sample_rate: f32,
    pub max_block_size: usize,
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48_000.0,
            max_block_size: crate::MAX_BLOCK_SIZE,
        }
    }
}

/// Core trait for block processors.
pub trait Effect: Send {
    /// Called off the audio thread before playback starts or the format
    /// changes. May allocate.
    fn prepare(&mut self, spec: ProcessSpec);

    /// Clear any internal state (filter memories) without touching
    /// parameters.
    fn reset(&mut self);

    /// Process one block in place. Must be realtime safe.
    fn process(&mut self, block: &mut [f32]);
}

/// Allow boxed effects to be used as effects (for dynamic dispatch)
impl Effect for Box<dyn Effect> {
    fn prepare(&mut self, spec: ProcessSpec) {
        (**self).prepare(spec)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn process(&mut self, block: &mut [f32]) {
        (**self).process(block)
    }
}
