use std::f32::consts::{FRAC_1_SQRT_2, PI};

/*
Tone Shaping Around the Shaper
==============================

| filter   | placed            | job                                         |
| -------- | ----------------- | ------------------------------------------- |
| high-pass| before the shaper | keep sub-bass out so lows don't mush up     |
| low-pass | after the shaper  | tame the fizzy top end the clipping creates |

Both are the same topology-preserving-transform (TPT) state-variable filter:
two trapezoidal integrators whose state survives cutoff changes without
clicks, which matters when a host automates the cutoff every block.

    g = tan(π × fc / fs)
    k = 1 / Q
*/

/// Lowest accepted cutoff in Hz.
pub const MIN_CUTOFF_HZ: f32 = 20.0;
/// Highest accepted cutoff in Hz.
pub const MAX_CUTOFF_HZ: f32 = 20_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    LowPass,
    HighPass,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct SvFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    sample_rate: f32,
    requested_hz: f32, // As asked for by the caller
    cutoff_hz: f32,    // After clamping to the band and Nyquist
    q: f32,
    filter_type: FilterType,

    g: f32,
    k: f32,
}

impl SvFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            sample_rate: 48_000.0,
            requested_hz: cutoff_hz,
            cutoff_hz,
            q: FRAC_1_SQRT_2,
            filter_type,
            g: 0.0,
            k: 0.0,
        };
        filter.update_coefficients();
        filter
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz)
    }

    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.update_coefficients();
        self.reset();
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Effective cutoff after clamping to the audible band and Nyquist.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Cutoff as last set, before clamping. Re-applied on every `prepare`.
    pub fn requested_cutoff_hz(&self) -> f32 {
        self.requested_hz
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        if cutoff_hz == self.requested_hz {
            return;
        }
        self.requested_hz = cutoff_hz;
        self.update_coefficients();
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn set_q(&mut self, q: f32) {
        self.q = q.max(0.1);
        self.update_coefficients();
    }

    fn update_coefficients(&mut self) {
        let nyquist_guard = 0.49 * self.sample_rate;
        let cutoff = if self.requested_hz.is_nan() {
            MIN_CUTOFF_HZ
        } else {
            self.requested_hz
        };
        self.cutoff_hz = cutoff
            .clamp(MIN_CUTOFF_HZ, MAX_CUTOFF_HZ)
            .min(nyquist_guard);
        self.g = (PI * self.cutoff_hz / self.sample_rate).tan();
        self.k = 1.0 / self.q;
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32) -> FilterOutputs {
        let g = self.g;
        let k = self.k;

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        let outputs = self.next_sample(sample);
        match self.filter_type {
            FilterType::LowPass => outputs.lowpass,
            FilterType::HighPass => outputs.highpass,
        }
    }

    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
