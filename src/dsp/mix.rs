//! Dry/wet blending for effect outputs.

/*
Dry/Wet Mixing
==============

An effect's processed signal ("wet") is blended back with its input ("dry"):

    output = dry × (1 - mix) + wet × mix

which rearranges to one multiply and two adds:

    output = dry + (wet - dry) × mix

  mix = 0.0  →  dry only (effect bypassed)
  mix = 0.5  →  halfway between dry and wet
  mix = 1.0  →  wet only

The weights always sum to 1.0, so blending two signals that each stay inside
[-1, 1] stays inside [-1, 1]. When the wet path adds gain (drive, output trim)
the blend can of course exceed that range.

Parallel distortion ("New York" style) relies on this: a low mix keeps the
dry transients intact while the wet path adds harmonics underneath.
*/

/// Blend a dry and a wet sample. `mix` is expected in [0, 1].
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Blend `dry` into `wet` in place. `mix` is clamped to [0, 1].
#[inline]
pub fn apply_dry_wet(dry: &[f32], wet: &mut [f32], mix: f32) {
    debug_assert_eq!(dry.len(), wet.len());

    let mix = mix.clamp(0.0, 1.0);
    if mix >= 1.0 {
        return; // 100% wet, nothing to do
    }

    for (wet_sample, &dry_sample) in wet.iter_mut().zip(dry.iter()) {
        *wet_sample = blend_dry_wet(dry_sample, *wet_sample, mix);
    }
}
