//! # Design Settings
//!
//! Default constants shared by the calculators: the rated power of a single
//! transformer core, the
//! frequency-range advisory thresholds, and the resonance offsets used when
//! recommending a resonant frequency.
//!
//! Settings are plain data. Missing fields in JSON fall back to defaults,
//! so a partial document like `{"min_range_percent": 15.0}` is valid.
//!
//! ```rust
//! use llc_core::settings::DesignSettings;
//!
//! let settings = DesignSettings::from_json_str(r#"{"min_range_percent": 15.0}"#).unwrap();
//! assert_eq!(settings.min_range_percent, 15.0);
//! assert_eq!(settings.rated_power_per_transformer_w, 1000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Design-wide default constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Maximum power a single transformer core may carry (W)
    pub rated_power_per_transformer_w: f64,

    /// Frequency ranges narrower than this get an advisory (% of f_0)
    pub min_range_percent: f64,

    /// Frequency ranges wider than this get an advisory (% of f_0)
    pub max_range_percent: f64,

    /// f_0 / f_sw when the nominal point must sit below resonance
    pub below_resonance_factor: f64,

    /// f_0 / f_sw when the nominal point must sit above resonance
    pub above_resonance_factor: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            rated_power_per_transformer_w: 1000.0,
            min_range_percent: 10.0,
            max_range_percent: 100.0,
            below_resonance_factor: 1.2,
            above_resonance_factor: 0.8,
        }
    }
}

impl DesignSettings {
    /// Parse settings from JSON, filling omitted fields with defaults.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let settings: DesignSettings = serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive(
            "rated_power_per_transformer_w",
            self.rated_power_per_transformer_w,
            "Rated power per transformer",
        )?;
        require_positive("min_range_percent", self.min_range_percent, "Minimum range")?;
        if self.max_range_percent <= self.min_range_percent {
            return Err(CalcError::invalid_input(
                "max_range_percent",
                self.max_range_percent.to_string(),
                "Maximum range must exceed minimum range",
            ));
        }
        if !(self.below_resonance_factor > 1.0) {
            return Err(CalcError::invalid_input(
                "below_resonance_factor",
                self.below_resonance_factor.to_string(),
                "Factor must exceed 1 so resonance sits above the switching point",
            ));
        }
        if !(self.above_resonance_factor > 0.0 && self.above_resonance_factor < 1.0) {
            return Err(CalcError::invalid_input(
                "above_resonance_factor",
                self.above_resonance_factor.to_string(),
                "Factor must lie in (0, 1) so resonance sits below the switching point",
            ));
        }
        Ok(())
    }
}
