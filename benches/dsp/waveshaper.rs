//! Benchmarks for the soft-knee transfer function.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use softknee_dsp::dsp::curve::KneeCurve;
use softknee_dsp::dsp::waveshaper::{self, WaveshaperParams};

use crate::BLOCK_SIZES;

pub fn bench_waveshaper(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/waveshaper");

    for &size in BLOCK_SIZES {
        // Hot sine so every region gets hit
        let input: Vec<f32> = (0..size).map(|i| 1.2 * (i as f32 * 0.1).sin()).collect();

        // Hard clip - empty knee
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("hard", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                waveshaper::transform_in_place(
                    black_box(&mut buffer),
                    black_box(0.5),
                    black_box(0.0),
                );
            })
        });

        // Wide smootherstep knee
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("smootherstep", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                waveshaper::transform_in_place(
                    black_box(&mut buffer),
                    black_box(0.5),
                    black_box(0.4),
                );
            })
        });

        // Same knee, cubic curve
        let params = WaveshaperParams::new(0.5, 0.4).with_curve(KneeCurve::Smoothstep);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("smoothstep", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                black_box(&params).shape_buffer(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
