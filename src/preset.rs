//! Named distortion presets stored as JSON.
//!
//! ```json
//! {
//!   "name": "Warm Bus",
//!   "description": "Gentle saturation for groups",
//!   "params": { "drive_db": 6.0, "knee": 0.4, "mix": 0.6, "curve": "smoothstep" }
//! }
//! ```
//!
//! Missing fields take the [`DistortionParams`] defaults. Range checks are
//! left to processing time, where every control is clamped; only values that
//! cannot be clamped meaningfully (NaN, infinity) are rejected by
//! [`Preset::validate`].

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dsp::curve::KneeCurve;
use crate::effect::distortion::DistortionParams;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub params: DistortionParams,
}

impl Preset {
    pub fn new(name: impl Into<String>, params: DistortionParams) -> Self {
        Self {
            name: name.into(),
            description: None,
            params,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let preset: Preset =
            serde_json::from_str(json).map_err(|e| Error::preset(e.to_string()))?;
        preset.validate()?;
        debug!("loaded preset '{}'", preset.name);
        Ok(preset)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::preset(e.to_string()))
    }

    /// Reject non-finite controls.
    pub fn validate(&self) -> Result<()> {
        let p = &self.params;
        let fields = [
            ("drive_db", p.drive_db),
            ("pre_hpf_hz", p.pre_hpf_hz),
            ("threshold", p.threshold),
            ("knee", p.knee),
            ("bias", p.bias),
            ("post_lpf_hz", p.post_lpf_hz),
            ("mix", p.mix),
            ("output_db", p.output_db),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Presets shipped with the crate.
pub fn factory_presets() -> Vec<Preset> {
    vec![
        Preset::new("Default", DistortionParams::default()),
        Preset {
            name: "Hard Clip".into(),
            description: Some("No knee, no bias: a plain clipper".into()),
            params: DistortionParams {
                drive_db: 12.0,
                threshold: 0.5,
                knee: 0.0,
                bias: 0.0,
                ..DistortionParams::default()
            },
        },
        Preset {
            name: "Warm Bus".into(),
            description: Some("Wide knee and some bias, blended in parallel".into()),
            params: DistortionParams {
                drive_db: 6.0,
                threshold: 0.8,
                knee: 0.45,
                bias: 0.15,
                mix: 0.6,
                output_db: 0.0,
                curve: KneeCurve::Smoothstep,
                ..DistortionParams::default()
            },
        },
    ]
}
