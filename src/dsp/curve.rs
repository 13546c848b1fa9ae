//! Blend curves used to bend the waveshaper knee.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Knee Blend Curves
=================

Inside the knee the waveshaper crossfades from the input magnitude to the
clip ceiling. The crossfade weight comes from one of these curves, fed with
the normalized knee position u in [0, 1].

  smoothstep    s(u) = u² (3 - 2u)
                s(0) = 0, s(1) = 1, s'(0) = s'(1) = 0

  smootherstep  s(u) = u³ (u (6u - 15) + 10)
                s(0) = 0, s(1) = 1, s' and s'' vanish at both ends

      1.0 ┤                 ╭────
          │              ╭──╯
      0.5 ┤           ╭──╯
          │        ╭──╯
      0.0 ┼────────╯
          0.0     0.5     1.0   u

Both curves are symmetric around (0.5, 0.5), so s(0.5) = 0.5 exactly.
Smootherstep is the production curve. Its flat second derivative at the
knee edges removes the faint "corner" that smoothstep still leaves in the
transfer curve's slope.
*/

/// Cubic Hermite blend, `u²(3 - 2u)`. Input is clamped to [0, 1].
#[inline]
pub fn smoothstep(u: f32) -> f32 {
    let u = u.clamp(0.0, 1.0);
    u * u * (3.0 - 2.0 * u)
}

/// Quintic blend, `u³(u(6u - 15) + 10)`. Input is clamped to [0, 1].
#[inline]
pub fn smootherstep(u: f32) -> f32 {
    let u = u.clamp(0.0, 1.0);
    u * u * u * (u * (u * 6.0 - 15.0) + 10.0)
}

/// Which blend curve shapes the knee.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KneeCurve {
    /// Quintic curve with zero slope and curvature at both knee edges.
    #[default]
    Smootherstep,
    /// Cubic curve. Cheaper, but curvature jumps at the knee edges.
    Smoothstep,
}

impl KneeCurve {
    #[inline]
    pub fn apply(self, u: f32) -> f32 {
        match self {
            KneeCurve::Smootherstep => smootherstep(u),
            KneeCurve::Smoothstep => smoothstep(u),
        }
    }
}
