#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::debug;

use crate::dsp::curve::KneeCurve;
use crate::dsp::filter::{SvFilter, MAX_CUTOFF_HZ, MIN_CUTOFF_HZ};
use crate::dsp::gain::db_to_gain;
use crate::dsp::mix::blend_dry_wet;
use crate::dsp::waveshaper::WaveshaperParams;
use crate::effect::{Effect, ProcessSpec};

/*
Distortion Stage
================

The soft-knee waveshaper wrapped in the plumbing a saturation effect needs:

  in ──→ [pre HPF] ──→ (× drive) ──→ (+ bias) ──→ [shaper] ──→ (- y0)
                                                                 │
  out ←── [post LPF] ←── dry/wet ←──────────────── (× output) ←──┘

Parameters
----------

Drive (dB, 0 - 36):
  Gain into the shaper. The higher it is, the more of the signal sits in
  the knee and clip regions.

Threshold (0.01 - 1.0) / Knee (fraction of threshold):
  Shape of the transfer curve. See `dsp::waveshaper`.

Curve:
  Blend used inside the knee. Smootherstep unless a preset asks for the
  cubic smoothstep.

Bias (-0.5 - 0.5):
  DC offset added before shaping. It shifts the signal off-centre on the
  curve so positive and negative half-waves clip differently. That breaks
  odd symmetry and adds even harmonics (a warmer, "tube-ish" colour).

  The offset itself would come out as DC, so the shaped value of the bias
  alone, y0 = f(bias), is subtracted again. Silence in gives silence out.

Pre HPF / Post LPF (Hz):
  Keep rumble out of the shaper and smooth the fizz after it.

Mix (0.0 - 1.0):
  Dry/wet blend, for parallel distortion.

Output (dB):
  Trim after shaping, applied to the wet path only.

Example usage:

  let mut dist = Distortion::new(DistortionParams {
      drive_db: 12.0,
      threshold: 0.5,
      knee: 0.3,
      ..DistortionParams::default()
  });
  dist.prepare(ProcessSpec { sample_rate: 48_000.0, max_block_size: 512 });
  dist.process(&mut block);
*/

/// Lowest accepted bias.
pub const MIN_BIAS: f32 = -0.5;
/// Highest accepted bias.
pub const MAX_BIAS: f32 = 0.5;

/// Raw distortion controls as a host or preset provides them.
///
/// Values are not validated here; [`Distortion::process`] clamps whatever it
/// receives.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionParams {
    pub drive_db: f32,
    pub pre_hpf_hz: f32,
    pub threshold: f32,
    pub knee: f32,
    pub bias: f32,
    pub post_lpf_hz: f32,
    pub mix: f32,
    pub output_db: f32,
    pub curve: KneeCurve,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            drive_db: 18.0,
            pre_hpf_hz: 80.0,
            threshold: 0.7,
            knee: 0.12,
            bias: 0.08,
            post_lpf_hz: 12_000.0,
            mix: 1.0,
            output_db: -1.0,
            curve: KneeCurve::Smootherstep,
        }
    }
}

/// Everything the per-sample loop needs, derived once per block.
#[derive(Debug, Clone, Copy)]
struct BlockCoefficients {
    shaper: WaveshaperParams,
    drive: f32,
    out_gain: f32,
    mix: f32,
    bias: f32,
    dc_offset: f32,
}

impl BlockCoefficients {
    fn from_params(params: &DistortionParams) -> Self {
        let shaper =
            WaveshaperParams::new(params.threshold, params.knee).with_curve(params.curve);
        let bias = clamp_or(params.bias, MIN_BIAS, MAX_BIAS, 0.0);

        Self {
            shaper,
            drive: db_to_gain(params.drive_db),
            out_gain: db_to_gain(params.output_db),
            mix: clamp_or(params.mix, 0.0, 1.0, 1.0),
            bias,
            dc_offset: shaper.shape(bias),
        }
    }

    #[inline]
    fn process_sample(&self, dry: f32) -> f32 {
        let x = dry * self.drive;
        let wet = (self.shaper.shape(x + self.bias) - self.dc_offset) * self.out_gain;
        blend_dry_wet(dry, wet, self.mix)
    }
}

/// Clamp a control, mapping NaN to `fallback`.
#[inline]
fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Soft-knee distortion effect.
pub struct Distortion {
    params: DistortionParams,
    pre_hpf: SvFilter,
    post_lpf: SvFilter,
    spec: ProcessSpec,
}

impl Distortion {
    pub fn new(params: DistortionParams) -> Self {
        Self {
            params,
            pre_hpf: SvFilter::highpass(params.pre_hpf_hz),
            post_lpf: SvFilter::lowpass(params.post_lpf_hz),
            spec: ProcessSpec::default(),
        }
    }

    /// Replace the parameter snapshot. Takes effect on the next block.
    #[inline]
    pub fn set_params(&mut self, params: DistortionParams) {
        self.params = params;
    }

    pub fn params(&self) -> &DistortionParams {
        &self.params
    }

    pub fn spec(&self) -> ProcessSpec {
        self.spec
    }

    /// The distortion with filters bypassed, for a single sample.
    ///
    /// Useful for inspecting the static transfer curve of the current
    /// settings; the filter stages are stateful and only run in `process`.
    pub fn static_curve(&self, x: f32) -> f32 {
        BlockCoefficients::from_params(&self.params).process_sample(x)
    }
}

impl Default for Distortion {
    fn default() -> Self {
        Self::new(DistortionParams::default())
    }
}

impl Effect for Distortion {
    fn prepare(&mut self, spec: ProcessSpec) {
        debug!(
            "distortion prepared at {} Hz, max block {}",
            spec.sample_rate, spec.max_block_size
        );
        self.spec = spec;
        self.pre_hpf.prepare(spec.sample_rate);
        self.post_lpf.prepare(spec.sample_rate);
        self.pre_hpf.set_cutoff(self.params.pre_hpf_hz);
        self.post_lpf.set_cutoff(self.params.post_lpf_hz);
    }

    fn reset(&mut self) {
        self.pre_hpf.reset();
        self.post_lpf.reset();
    }

    fn process(&mut self, block: &mut [f32]) {
        if block.is_empty() {
            return;
        }

        let params = self.params;
        let coeffs = BlockCoefficients::from_params(&params);

        self.pre_hpf
            .set_cutoff(params.pre_hpf_hz.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ));
        self.post_lpf
            .set_cutoff(params.post_lpf_hz.clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ));

        self.pre_hpf.process(block);

        for sample in block.iter_mut() {
            *sample = coeffs.process_sample(*sample);
        }

        self.post_lpf.process(block);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn spec() -> ProcessSpec {
        ProcessSpec {
            sample_rate: 48_000.0,
            max_block_size: 512,
        }
    }

    fn sine(freq: f32, amplitude: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| amplitude * (TAU * freq * i as f32 / 48_000.0).sin())
            .collect()
    }

    /// Shaping only: no filtering influence, unity gains.
    fn bare(threshold: f32, knee: f32) -> DistortionParams {
        DistortionParams {
            drive_db: 0.0,
            pre_hpf_hz: MIN_CUTOFF_HZ,
            threshold,
            knee,
            bias: 0.0,
            post_lpf_hz: MAX_CUTOFF_HZ,
            mix: 1.0,
            output_db: 0.0,
            curve: KneeCurve::Smootherstep,
        }
    }

    #[test]
    fn test_defaults_match_stage_layout() {
        let params = DistortionParams::default();
        assert_eq!(params.drive_db, 18.0);
        assert_eq!(params.threshold, 0.7);
        assert_eq!(params.knee, 0.12);
        assert_eq!(params.mix, 1.0);
    }

    #[test]
    fn test_silence_stays_silent_with_bias() {
        // DC correction: f(0 + bias) - f(bias) = 0
        let mut dist = Distortion::new(DistortionParams {
            bias: 0.3,
            ..DistortionParams::default()
        });
        dist.prepare(spec());

        let mut block = vec![0.0; 256];
        dist.process(&mut block);

        assert!(block.iter().all(|s| s.abs() < 1e-6));
    }

    #[test]
    fn test_static_curve_matches_waveshaper() {
        let dist = Distortion::new(bare(0.5, 0.4));
        let shaper = WaveshaperParams::new(0.5, 0.4);
        for i in -20..=20 {
            let x = i as f32 / 10.0;
            assert!((dist.static_curve(x) - shaper.shape(x)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_curve_selects_knee_blend() {
        let cubic = Distortion::new(DistortionParams {
            curve: KneeCurve::Smoothstep,
            ..bare(0.5, 0.4)
        });
        let shaper = WaveshaperParams::new(0.5, 0.4).with_curve(KneeCurve::Smoothstep);
        let quintic = Distortion::new(bare(0.5, 0.4));

        // A quarter into the knee the two blends differ
        let x = 0.35;
        assert!((cubic.static_curve(x) - shaper.shape(x)).abs() < 1e-6);
        assert!((cubic.static_curve(x) - quintic.static_curve(x)).abs() > 1e-4);
    }

    #[test]
    fn test_drive_pushes_into_clip() {
        let dist = Distortion::new(DistortionParams {
            drive_db: 20.0,
            ..bare(0.5, 0.0)
        });
        // 0.1 × 10 = 1.0, clipped to 0.5
        assert!((dist.static_curve(0.1) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_output_gain_scales_wet_path() {
        let dist = Distortion::new(DistortionParams {
            output_db: -20.0,
            ..bare(1.0, 0.0)
        });
        assert!((dist.static_curve(0.5) - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_zero_mix_is_dry() {
        let dist = Distortion::new(DistortionParams {
            mix: 0.0,
            drive_db: 24.0,
            ..bare(0.2, 0.1)
        });
        for &x in &[-0.9, -0.3, 0.0, 0.4, 0.8] {
            assert_eq!(dist.static_curve(x), x);
        }
    }

    #[test]
    fn test_out_of_range_controls_are_clamped() {
        let dist = Distortion::new(DistortionParams {
            bias: 4.0,
            mix: 7.0,
            ..bare(0.5, 0.0)
        });
        let coeffs = BlockCoefficients::from_params(dist.params());
        assert_eq!(coeffs.bias, MAX_BIAS);
        assert_eq!(coeffs.mix, 1.0);
    }

    #[test]
    fn test_nan_controls_fall_back() {
        let coeffs = BlockCoefficients::from_params(&DistortionParams {
            bias: f32::NAN,
            mix: f32::NAN,
            ..bare(0.5, 0.0)
        });
        assert_eq!(coeffs.bias, 0.0);
        assert_eq!(coeffs.mix, 1.0);
    }

    #[test]
    fn test_process_bounds_output() {
        let mut dist = Distortion::new(DistortionParams {
            drive_db: 30.0,
            output_db: 0.0,
            bias: 0.0,
            ..DistortionParams::default()
        });
        dist.prepare(spec());

        let mut block = sine(220.0, 0.9, 2048);
        dist.process(&mut block);

        // Knee end bounds the shaper; the LPF rings by at most sum(|h|)
        let mut lpf = SvFilter::lowpass(12_000.0);
        lpf.prepare(spec().sample_rate);
        let mut lpf_gain = lpf.process_sample(1.0).abs();
        for _ in 1..4_096 {
            lpf_gain += lpf.process_sample(0.0).abs();
        }
        let ceiling = WaveshaperParams::new(0.7, 0.12).knee_end() * lpf_gain + 1e-4;
        assert!(block.iter().all(|s| s.is_finite()));
        assert!(block.iter().all(|s| s.abs() <= ceiling));
    }

    #[test]
    fn test_empty_block_is_noop() {
        let mut dist = Distortion::default();
        dist.prepare(spec());
        let mut block: [f32; 0] = [];
        dist.process(&mut block);
    }

    #[test]
    fn test_set_params_applies_on_next_block() {
        let mut dist = Distortion::new(bare(1.0, 0.0));
        dist.prepare(spec());

        dist.set_params(DistortionParams {
            mix: 0.0,
            ..bare(0.1, 0.0)
        });
        assert_eq!(dist.params().mix, 0.0);

        let mut block = sine(1_000.0, 0.8, 512);
        dist.process(&mut block);

        // Dry through the filters only: the shaper no longer clips at 0.1
        let peak = block[256..].iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        assert!(peak > 0.5, "peak {}", peak);
    }

    #[test]
    fn test_prepare_updates_spec() {
        let mut dist = Distortion::default();
        dist.prepare(ProcessSpec {
            sample_rate: 96_000.0,
            max_block_size: 128,
        });
        assert_eq!(dist.spec().sample_rate, 96_000.0);
        assert_eq!(dist.spec().max_block_size, 128);
    }
}
