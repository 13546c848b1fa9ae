//! Decibel / linear gain conversion.

/*
Gain in Decibels
================

Level controls (drive, output) are exposed in dB because hearing is roughly
logarithmic. Internally everything multiplies by a linear factor:

    gain = 10^(dB / 20)        dB = 20 × log₁₀(gain)

    +18 dB  ≈ ×7.94   (default drive)
     +6 dB  ≈ ×2.0
      0 dB  =  ×1.0
     -1 dB  ≈ ×0.891  (default output trim)
    -20 dB  =  ×0.1
*/

/// Level reported for silence by [`gain_to_db`].
pub const SILENCE_DB: f32 = -100.0;

#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Convert a linear gain to dB, flooring at [`SILENCE_DB`].
#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    if gain <= 0.0 {
        return SILENCE_DB;
    }
    (20.0 * gain.log10()).max(SILENCE_DB)
}
