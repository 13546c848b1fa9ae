//! Low-level DSP primitives used by the effect processors.
//!
//! These components are allocation-free and realtime-safe. The waveshaper is
//! stateless and can be called from any thread; the filter holds two floats
//! of state and belongs to one signal path.

/// Knee blend curves (smootherstep, smoothstep).
pub mod curve;
/// State-variable filter with lowpass and highpass responses.
pub mod filter;
/// Decibel conversion helpers.
pub mod gain;
/// Dry/wet blending.
pub mod mix;
/// Soft-knee transfer function.
pub mod waveshaper;

pub use curve::KneeCurve;
pub use waveshaper::{Region, WaveshaperParams};
