//! Soft-knee Waveshaper
//!
//! A memoryless transfer function that passes small signals untouched, bends
//! smoothly through a "knee" around the threshold, and hard-limits anything
//! beyond it.
//!
//! # Transfer Curve
//!
//! With threshold `t` and knee fraction `k` the input magnitude axis splits
//! into three regions:
//!
//! ```text
//!   |y|
//!    t ┤            ╭─────────────  clip:   |x| >= t(1+k)  →  ±t
//!      │          ╭─╯
//!      │        ╭─╯                 knee:   t(1-k) < |x| < t(1+k)
//!      │      ╭─╯                           blend of |x| and t
//!      │    ╱
//!      │  ╱                         linear: |x| <= t(1-k)  →  x
//!    0 ┼╱─────────┬──────┬──────
//!          t(1-k)  t   t(1+k)     |x|
//! ```
//!
//! Inside the knee the position is normalized to `u` in [0, 1] and fed
//! through a blend curve `s(u)` (smootherstep by default):
//!
//!   y = sign(x) × ((1 - s) |x| + s t)
//!
//! The curve only looks at `|x|` and reapplies the sign, so it is an odd
//! function: `f(-x) = -f(x)`. Odd symmetry means a symmetric input (a sine)
//! only ever gains odd harmonics.
//!
//! # Regions and Ties
//!
//! Boundaries resolve to the outer regions: `|x| == t(1-k)` is linear and
//! `|x| == t(1+k)` is clipped. With `k = 0` the knee is empty and the curve is
//! a plain hard clipper at ±t.
//!
//! # Numeric Type
//!
//! Everything runs in `f32`. Region tests compare against knee edges rounded
//! to `f32`, so a literal like `0.3` may land a hair inside the knee rather
//! than exactly on its edge. The knee blend is continuous there, so the
//! output differs from the input by at most a few ULPs.
//!
//! # Non-finite Input
//!
//! - NaN samples pass through unchanged.
//! - ±inf samples clip to ±threshold.
//! - A NaN threshold resolves to 1.0, a NaN knee fraction to 0.0.

use crate::dsp::curve::KneeCurve;
use crate::error::{Error, Result};

/// Smallest accepted threshold.
pub const MIN_THRESHOLD: f32 = 0.01;
/// Largest accepted threshold.
pub const MAX_THRESHOLD: f32 = 1.0;
/// Largest accepted knee half-width, as a fraction of the threshold.
pub const MAX_KNEE_FRACTION: f32 = 0.49;

/// Which part of the transfer curve a magnitude falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// `|x| <= knee_start`: output equals input.
    Linear,
    /// `knee_start < |x| < knee_end`: smooth blend towards the threshold.
    Knee,
    /// `|x| >= knee_end`: output pinned to ±threshold.
    Clip,
}

/// Validated waveshaper controls plus the knee edges derived from them.
///
/// Built fresh from two raw controls whenever they change. Construction never
/// fails: out-of-range values are clamped. Invariant:
/// `0 < knee_start <= threshold <= knee_end <= 1.49 × threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveshaperParams {
    threshold: f32,
    knee_fraction: f32,
    knee_start: f32,
    knee_end: f32,
    curve: KneeCurve,
}

impl WaveshaperParams {
    pub fn new(threshold: f32, knee_fraction: f32) -> Self {
        let threshold = or_if_nan(threshold, MAX_THRESHOLD).clamp(MIN_THRESHOLD, MAX_THRESHOLD);
        let knee_fraction = or_if_nan(knee_fraction, 0.0).clamp(0.0, MAX_KNEE_FRACTION);

        Self {
            threshold,
            knee_fraction,
            knee_start: threshold * (1.0 - knee_fraction),
            knee_end: threshold * (1.0 + knee_fraction),
            curve: KneeCurve::default(),
        }
    }

    /// Swap the knee blend curve. `transform` and `transform1` always use the
    /// default smootherstep.
    pub fn with_curve(mut self, curve: KneeCurve) -> Self {
        self.curve = curve;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn knee_fraction(&self) -> f32 {
        self.knee_fraction
    }

    pub fn knee_start(&self) -> f32 {
        self.knee_start
    }

    pub fn knee_end(&self) -> f32 {
        self.knee_end
    }

    pub fn curve(&self) -> KneeCurve {
        self.curve
    }

    /// Classify a magnitude. NaN classifies as [`Region::Linear`] so it passes
    /// through untouched.
    #[inline]
    pub fn classify(&self, ax: f32) -> Region {
        if ax.is_nan() || ax <= self.knee_start {
            Region::Linear
        } else if ax >= self.knee_end {
            Region::Clip
        } else {
            Region::Knee
        }
    }

    /// Knee output magnitude for `ax` strictly inside the knee.
    ///
    /// Always lies between `ax` and the threshold. Outside the knee the
    /// normalized position is clamped, so callers get the nearest edge value.
    #[inline]
    pub fn knee(&self, ax: f32) -> f32 {
        let width = self.knee_end - self.knee_start;
        if width <= 0.0 {
            return ax.min(self.threshold);
        }

        let u = ((ax - self.knee_start) / width).clamp(0.0, 1.0);
        let s = self.curve.apply(u);
        (1.0 - s) * ax + s * self.threshold
    }

    /// Map one sample through the transfer curve.
    #[inline]
    pub fn shape(&self, x: f32) -> f32 {
        let ax = x.abs();
        match self.classify(ax) {
            Region::Linear => x,
            Region::Knee => sign(x) * self.knee(ax),
            Region::Clip => sign(x) * self.threshold,
        }
    }

    /// Shape a whole buffer in place.
    pub fn shape_buffer(&self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.shape(*sample);
        }
    }
}

impl Default for WaveshaperParams {
    fn default() -> Self {
        Self::new(MAX_THRESHOLD, 0.0)
    }
}

/// Sign with `sign(0) = +1`.
#[inline]
fn sign(x: f32) -> f32 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

#[inline]
fn or_if_nan(value: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value
    }
}

/// Shape a single sample.
#[inline]
pub fn transform1(x: f32, threshold: f32, knee_fraction: f32) -> f32 {
    WaveshaperParams::new(threshold, knee_fraction).shape(x)
}

/// Shape a buffer into a freshly allocated output of the same length.
///
/// Allocates; use [`transform_in_place`] or [`transform_into`] on the audio
/// thread.
pub fn transform(samples: &[f32], threshold: f32, knee_fraction: f32) -> Vec<f32> {
    let params = WaveshaperParams::new(threshold, knee_fraction);
    samples.iter().map(|&x| params.shape(x)).collect()
}

/// Shape `input` into a caller-owned `output` of the same length.
pub fn transform_into(
    input: &[f32],
    output: &mut [f32],
    threshold: f32,
    knee_fraction: f32,
) -> Result<()> {
    if input.len() != output.len() {
        return Err(Error::BufferLengthMismatch {
            input: input.len(),
            output: output.len(),
        });
    }

    let params = WaveshaperParams::new(threshold, knee_fraction);
    for (o, &x) in output.iter_mut().zip(input.iter()) {
        *o = params.shape(x);
    }
    Ok(())
}

/// Shape a buffer in place.
pub fn transform_in_place(buffer: &mut [f32], threshold: f32, knee_fraction: f32) {
    WaveshaperParams::new(threshold, knee_fraction).shape_buffer(buffer);
}
