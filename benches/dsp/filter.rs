//! Benchmarks for the state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use softknee_dsp::dsp::filter::SvFilter;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        // Post-shaper lowpass
        let mut filter = SvFilter::lowpass(12_000.0);
        filter.prepare(48_000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process(black_box(&mut buffer));
            })
        });

        // Pre-shaper highpass
        let mut filter = SvFilter::highpass(80.0);
        filter.prepare(48_000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("highpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
