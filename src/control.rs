//! Handing parameter snapshots from a control thread to the audio thread.
//!
//! Knob moves happen on a UI or host thread while `process` runs on the
//! audio callback. Snapshots cross over through a wait-free SPSC ring buffer
//! and are applied between blocks, so a block never sees half an update.
//!
//! ```ignore
//! let (mut tx, mut rx) = param_channel(16);
//!
//! // control thread
//! tx.send(DistortionParams { drive_db: 24.0, ..Default::default() })?;
//!
//! // audio callback
//! distortion.drain_params(&mut rx);
//! distortion.process(block);
//! ```

#[cfg(feature = "rtrb")]
use log::warn;
#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer, RingBuffer};

use crate::effect::distortion::{Distortion, DistortionParams};
#[cfg(feature = "rtrb")]
use crate::error::{Error, Result};

/// Audio-side end of a parameter queue.
pub trait ParamReceiver {
    fn pop(&mut self) -> Option<DistortionParams>;

    /// Drain the queue, keeping only the newest snapshot.
    fn latest(&mut self) -> Option<DistortionParams> {
        let mut newest = None;
        while let Some(params) = self.pop() {
            newest = Some(params);
        }
        newest
    }
}

#[cfg(feature = "rtrb")]
impl ParamReceiver for Consumer<DistortionParams> {
    fn pop(&mut self) -> Option<DistortionParams> {
        Consumer::pop(self).ok()
    }
}

/// Control-side end of a parameter queue.
#[cfg(feature = "rtrb")]
pub struct ParamSender {
    tx: Producer<DistortionParams>,
}

#[cfg(feature = "rtrb")]
impl ParamSender {
    /// Queue a snapshot. Fails when the audio side has fallen behind by
    /// more than the queue capacity.
    pub fn send(&mut self, params: DistortionParams) -> Result<()> {
        self.tx.push(params).map_err(|_| {
            warn!("parameter queue full, dropping update");
            Error::QueueFull
        })
    }

    /// Free slots left in the queue.
    pub fn slots(&self) -> usize {
        self.tx.slots()
    }
}

/// Create a parameter queue holding up to `capacity` pending snapshots.
#[cfg(feature = "rtrb")]
pub fn param_channel(capacity: usize) -> (ParamSender, Consumer<DistortionParams>) {
    let (tx, rx) = RingBuffer::new(capacity.max(1));
    (ParamSender { tx }, rx)
}

impl Distortion {
    /// Apply the newest pending snapshot, if any. Call between blocks.
    ///
    /// Returns `true` when parameters changed.
    pub fn drain_params<R: ParamReceiver>(&mut self, rx: &mut R) -> bool {
        match rx.latest() {
            Some(params) => {
                self.set_params(params);
                true
            }
            None => false,
        }
    }
}
