//! Benchmarks for low-level DSP primitives and the distortion stage.

mod distortion;
mod filter;
mod waveshaper;

pub use distortion::bench_distortion;
pub use filter::bench_filter;
pub use waveshaper::bench_waveshaper;
