//! Benchmarks for the full distortion stage.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use softknee_dsp::effect::{Distortion, DistortionParams, Effect, EffectChain, ProcessSpec};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        let spec = ProcessSpec {
            sample_rate: 48_000.0,
            max_block_size: size,
        };
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        // Single stage with default settings
        let mut dist = Distortion::new(DistortionParams::default());
        dist.prepare(spec);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("stage", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                dist.process(black_box(&mut buffer));
            })
        });

        // Two stages behind dynamic dispatch
        let mut chain = EffectChain::new()
            .with(Distortion::default())
            .and_then(|chain| chain.with(Distortion::default()))
            .expect("two effects fit in a chain");
        chain.prepare(spec);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("chain_x2", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                chain.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
