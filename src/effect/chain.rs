use log::{debug, warn};

use crate::effect::{Effect, ProcessSpec};
use crate::error::{Error, Result};

/*
Serial Effect Chain
===================

Effects run one after another on the same block, in the order they were
pushed:

  block ──→ [Effect 0] ──→ [Effect 1] ──→ ... ──→ [Effect n-1] ──→ block

Each effect processes in place, so the chain needs no scratch buffers.

The chain is sized once. Its storage is reserved up front for MAX_EFFECTS
entries, so pushing never reallocates after construction. Building the
chain happens on the control side; only `process` runs on the audio thread.
*/

/// Upper bound on effects in one chain.
pub const MAX_EFFECTS: usize = 8;

pub struct EffectChain {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectChain {
    pub fn new() -> Self {
        Self {
            effects: Vec::with_capacity(MAX_EFFECTS),
        }
    }

    /// Append an effect. Fails once [`MAX_EFFECTS`] are installed.
    pub fn push(&mut self, effect: Box<dyn Effect>) -> Result<()> {
        if self.effects.len() >= MAX_EFFECTS {
            warn!("effect chain full, dropping effect ({} max)", MAX_EFFECTS);
            return Err(Error::ChainFull {
                capacity: MAX_EFFECTS,
            });
        }

        self.effects.push(effect);
        debug!("effect chain now holds {} effect(s)", self.effects.len());
        Ok(())
    }

    /// Builder form of [`EffectChain::push`].
    pub fn with(mut self, effect: impl Effect + 'static) -> Result<Self> {
        self.push(Box::new(effect))?;
        Ok(self)
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for EffectChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for EffectChain {
    fn prepare(&mut self, spec: ProcessSpec) {
        debug!(
            "preparing {} effect(s) at {} Hz, max block {}",
            self.effects.len(),
            spec.sample_rate,
            spec.max_block_size
        );
        for effect in self.effects.iter_mut() {
            effect.prepare(spec);
        }
    }

    fn reset(&mut self) {
        for effect in self.effects.iter_mut() {
            effect.reset();
        }
    }

    fn process(&mut self, block: &mut [f32]) {
        for effect in self.effects.iter_mut() {
            effect.process(block);
        }
    }
}
