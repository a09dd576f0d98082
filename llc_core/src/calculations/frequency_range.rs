//! # Switching Frequency Range
//!
//! Converts an input-voltage range and turns ratio into the switching
//! frequency range an LLC stage needs to regulate its output, checks the
//! range for design-quality problems, and recommends a resonant frequency.
//!
//! ## Method
//!
//! 1. Required gain at each input extreme:
//!    M_max = n·V_o / V_in_min (boost end), M_min = n·V_o / V_in_max (buck end)
//! 2. Solve M(F) = M for each extreme on the branch matching the gain
//!    (below resonance when M > 1, above otherwise)
//! 3. f_sw_min = F(M_max)·f_0, f_sw_max = F(M_min)·f_0
//!
//! ## Example
//!
//! ```rust
//! use llc_core::calculations::frequency_range::{
//!     calculate_frequency_range_for_llc, validate_frequency_range, FrequencyRangeInput,
//! };
//!
//! let input = FrequencyRangeInput {
//!     input_voltage_min_v: 350.0,
//!     input_voltage_max_v: 450.0,
//!     output_voltage_v: 48.0,
//!     turns_ratio: 8.0,
//!     quality_factor: 0.4,
//!     inductance_ratio: 5.0,
//!     resonant_frequency_hz: 100e3,
//! };
//!
//! let range = calculate_frequency_range_for_llc(&input).unwrap();
//! assert!(range.f_sw_min_hz < 100e3 && 100e3 < range.f_sw_max_hz);
//!
//! let validation = validate_frequency_range(&range, 10.0);
//! assert!(validation.is_valid);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::gain::{solve_frequency_ratio, ResonanceBranch};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::settings::DesignSettings;

/// Gains within this distance of unity count as operating at resonance
const RESONANCE_GAIN_TOLERANCE: f64 = 1e-9;

/// Input parameters for the frequency range calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "input_voltage_min_v": 350.0,
///   "input_voltage_max_v": 450.0,
///   "output_voltage_v": 48.0,
///   "turns_ratio": 8.0,
///   "quality_factor": 0.4,
///   "inductance_ratio": 5.0,
///   "resonant_frequency_hz": 100000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRangeInput {
    /// Minimum input voltage (V)
    pub input_voltage_min_v: f64,

    /// Maximum input voltage (V)
    pub input_voltage_max_v: f64,

    /// Output voltage referred through the transformer (V)
    pub output_voltage_v: f64,

    /// Transformer turns ratio n
    pub turns_ratio: f64,

    /// Tank quality factor Q
    pub quality_factor: f64,

    /// Inductance ratio Ln = Lm / Lr
    pub inductance_ratio: f64,

    /// Resonant frequency f_0 (Hz)
    pub resonant_frequency_hz: f64,
}

impl FrequencyRangeInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("input_voltage_min_v", self.input_voltage_min_v, "Minimum input voltage")?;
        require_positive("input_voltage_max_v", self.input_voltage_max_v, "Maximum input voltage")?;
        require_positive("output_voltage_v", self.output_voltage_v, "Output voltage")?;
        require_positive("turns_ratio", self.turns_ratio, "Turns ratio")?;
        require_positive("quality_factor", self.quality_factor, "Quality factor")?;
        require_positive("inductance_ratio", self.inductance_ratio, "Inductance ratio")?;
        require_positive("resonant_frequency_hz", self.resonant_frequency_hz, "Resonant frequency")?;
        if self.input_voltage_min_v > self.input_voltage_max_v {
            return Err(CalcError::invalid_input(
                "input_voltage_min_v",
                self.input_voltage_min_v.to_string(),
                "Minimum input voltage exceeds maximum",
            ));
        }
        Ok(())
    }

    /// Gain required at minimum input voltage
    pub fn gain_max(&self) -> f64 {
        self.turns_ratio * self.output_voltage_v / self.input_voltage_min_v
    }

    /// Gain required at maximum input voltage
    pub fn gain_min(&self) -> f64 {
        self.turns_ratio * self.output_voltage_v / self.input_voltage_max_v
    }
}

/// Switching frequency range results.
///
/// ## JSON Example
///
/// ```json
/// {
///   "f_sw_min_hz": 81058.6,
///   "f_sw_max_hz": 154254.5,
///   "resonant_frequency_hz": 100000.0,
///   "frequency_ratio_min": 0.8106,
///   "frequency_ratio_max": 1.5425,
///   "gain_max": 1.0971,
///   "gain_min": 0.8533,
///   "frequency_range_hz": 73195.9,
///   "frequency_range_percent": 73.2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyRangeResult {
    /// Switching frequency at minimum input voltage (Hz)
    pub f_sw_min_hz: f64,

    /// Switching frequency at maximum input voltage (Hz)
    pub f_sw_max_hz: f64,

    /// Resonant frequency f_0 (Hz)
    pub resonant_frequency_hz: f64,

    /// Normalized frequency F at minimum input voltage
    pub frequency_ratio_min: f64,

    /// Normalized frequency F at maximum input voltage
    pub frequency_ratio_max: f64,

    /// Gain required at minimum input voltage
    pub gain_max: f64,

    /// Gain required at maximum input voltage
    pub gain_min: f64,

    /// f_sw_max − f_sw_min (Hz)
    pub frequency_range_hz: f64,

    /// (f_sw_max − f_sw_min) / f_0 × 100
    pub frequency_range_percent: f64,
}

impl FrequencyRangeResult {
    /// Check if the range brackets the resonant frequency
    pub fn spans_resonance(&self) -> bool {
        self.f_sw_min_hz <= self.resonant_frequency_hz && self.resonant_frequency_hz <= self.f_sw_max_hz
    }

    /// Check if the low-line end needs gain above unity
    pub fn requires_boost(&self) -> bool {
        self.gain_max > 1.0
    }
}

/// Calculate the switching frequency range for an LLC stage.
///
/// # Returns
///
/// * `Ok(FrequencyRangeResult)` - Frequency range
/// * `Err(CalcError)` - If inputs are invalid or a required gain is unreachable
pub fn calculate_frequency_range_for_llc(input: &FrequencyRangeInput) -> CalcResult<FrequencyRangeResult> {
    input.validate()?;

    let q = input.quality_factor;
    let ln = input.inductance_ratio;
    let f_0 = input.resonant_frequency_hz;
    let gain_max = input.gain_max();
    let gain_min = input.gain_min();

    let frequency_ratio_min = solve_frequency_ratio(gain_max, q, ln, ResonanceBranch::for_gain(gain_max))?;
    let frequency_ratio_max = solve_frequency_ratio(gain_min, q, ln, ResonanceBranch::for_gain(gain_min))?;

    let f_sw_min_hz = frequency_ratio_min * f_0;
    let f_sw_max_hz = frequency_ratio_max * f_0;
    let frequency_range_hz = f_sw_max_hz - f_sw_min_hz;

    debug!(f_sw_min_hz, f_sw_max_hz, gain_max, gain_min, "Resolved switching frequency range");

    Ok(FrequencyRangeResult {
        f_sw_min_hz,
        f_sw_max_hz,
        resonant_frequency_hz: f_0,
        frequency_ratio_min,
        frequency_ratio_max,
        gain_max,
        gain_min,
        frequency_range_hz,
        frequency_range_percent: frequency_range_hz / f_0 * 100.0,
    })
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Design-quality advisory; the range is still usable
    Warning,
    /// The range cannot be used
    Error,
}

/// A problem found when validating a frequency range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RangeIssue {
    /// f_sw_min ≥ f_sw_max
    InvalidOrdering { f_sw_min_hz: f64, f_sw_max_hz: f64 },

    /// A frequency is zero or negative
    NonPositiveFrequency,

    /// Range too narrow for good load-transient control
    NarrowRange { range_percent: f64, minimum_percent: f64 },

    /// Range wider than a practical controller/magnetics design covers
    WideRange { range_percent: f64, maximum_percent: f64 },

    /// Boost design whose whole range sits above resonance
    CapacitiveRegionRisk { f_sw_min_hz: f64, resonant_frequency_hz: f64 },

    /// Whole range sits below resonance
    MaxBelowResonance { f_sw_max_hz: f64, resonant_frequency_hz: f64 },
}

impl RangeIssue {
    /// Severity of this issue
    pub fn severity(&self) -> Severity {
        match self {
            RangeIssue::InvalidOrdering { .. } | RangeIssue::NonPositiveFrequency => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for RangeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeIssue::InvalidOrdering { f_sw_min_hz, f_sw_max_hz } => write!(
                f,
                "Minimum frequency {:.0} Hz is not below maximum frequency {:.0} Hz",
                f_sw_min_hz, f_sw_max_hz
            ),
            RangeIssue::NonPositiveFrequency => write!(f, "Frequencies must be positive"),
            RangeIssue::NarrowRange { range_percent, minimum_percent } => write!(
                f,
                "Narrow frequency range ({:.1}% < {:.1}%) limits regulation",
                range_percent, minimum_percent
            ),
            RangeIssue::WideRange { range_percent, maximum_percent } => write!(
                f,
                "Very wide frequency range ({:.1}% > {:.1}%) may be impractical",
                range_percent, maximum_percent
            ),
            RangeIssue::CapacitiveRegionRisk { f_sw_min_hz, resonant_frequency_hz } => write!(
                f,
                "Boost required but minimum frequency {:.0} Hz is above resonance {:.0} Hz - ZVS may be lost",
                f_sw_min_hz, resonant_frequency_hz
            ),
            RangeIssue::MaxBelowResonance { f_sw_max_hz, resonant_frequency_hz } => write!(
                f,
                "Maximum frequency {:.0} Hz is below resonance {:.0} Hz",
                f_sw_max_hz, resonant_frequency_hz
            ),
        }
    }
}

/// Outcome of [`validate_frequency_range`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeValidation {
    /// No error-severity issue was found
    pub is_valid: bool,

    /// All findings, errors and warnings
    pub issues: Vec<RangeIssue>,

    /// (f_sw_max − f_sw_min) / f_0 × 100, recomputed from the frequencies
    pub range_percent: f64,

    /// f_sw_min ≤ f_0 ≤ f_sw_max
    pub spans_resonance: bool,
}

impl RangeValidation {
    /// Warning-severity findings
    pub fn warnings(&self) -> impl Iterator<Item = &RangeIssue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Warning)
    }

    /// Error-severity findings
    pub fn errors(&self) -> impl Iterator<Item = &RangeIssue> {
        self.issues.iter().filter(|i| i.severity() == Severity::Error)
    }
}

/// Validate a frequency range against a minimum acceptable width.
///
/// Problems are returned as data; nothing here fails. The wide-range limit
/// comes from [`DesignSettings::default`].
pub fn validate_frequency_range(result: &FrequencyRangeResult, min_acceptable_percent: f64) -> RangeValidation {
    validate_against(result, min_acceptable_percent, DesignSettings::default().max_range_percent)
}

/// Validate a frequency range using the thresholds in `settings`.
pub fn validate_frequency_range_with(result: &FrequencyRangeResult, settings: &DesignSettings) -> RangeValidation {
    validate_against(result, settings.min_range_percent, settings.max_range_percent)
}

fn validate_against(result: &FrequencyRangeResult, minimum_percent: f64, maximum_percent: f64) -> RangeValidation {
    let f_min = result.f_sw_min_hz;
    let f_max = result.f_sw_max_hz;
    let f_0 = result.resonant_frequency_hz;
    let range_percent = (f_max - f_min) / f_0 * 100.0;
    let mut issues = Vec::new();

    if !(f_min > 0.0 && f_max > 0.0 && f_0 > 0.0) {
        issues.push(RangeIssue::NonPositiveFrequency);
    }

    if !(f_min < f_max) {
        issues.push(RangeIssue::InvalidOrdering {
            f_sw_min_hz: f_min,
            f_sw_max_hz: f_max,
        });
    } else {
        if range_percent < minimum_percent {
            issues.push(RangeIssue::NarrowRange {
                range_percent,
                minimum_percent,
            });
        }
        if range_percent > maximum_percent {
            issues.push(RangeIssue::WideRange {
                range_percent,
                maximum_percent,
            });
        }
    }

    if f_min > f_0 && result.requires_boost() {
        issues.push(RangeIssue::CapacitiveRegionRisk {
            f_sw_min_hz: f_min,
            resonant_frequency_hz: f_0,
        });
    }

    if f_max < f_0 {
        issues.push(RangeIssue::MaxBelowResonance {
            f_sw_max_hz: f_max,
            resonant_frequency_hz: f_0,
        });
    }

    for issue in &issues {
        warn!(severity = ?issue.severity(), "{}", issue);
    }

    RangeValidation {
        is_valid: issues.iter().all(|i| i.severity() != Severity::Error),
        issues,
        range_percent,
        spans_resonance: f_min <= f_0 && f_0 <= f_max,
    }
}

/// Where the nominal operating point sits relative to resonance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingRegion {
    /// Unity gain: switch at resonance
    AtResonance,
    /// Gain above unity: switch below resonance
    BelowResonance,
    /// Gain below unity: switch above resonance
    AboveResonance,
}

impl OperatingRegion {
    /// Region that delivers `gain`
    pub fn from_gain(gain: f64) -> Self {
        if (gain - 1.0).abs() <= RESONANCE_GAIN_TOLERANCE {
            OperatingRegion::AtResonance
        } else if gain > 1.0 {
            OperatingRegion::BelowResonance
        } else {
            OperatingRegion::AboveResonance
        }
    }
}

/// Recommend a resonant frequency for a desired nominal switching frequency.
///
/// Uses the resonance offsets from [`DesignSettings::default`].
///
/// # Example
/// ```rust
/// use llc_core::calculations::frequency_range::recommend_resonant_frequency;
///
/// assert_eq!(recommend_resonant_frequency(100e3, 1.0).unwrap(), 100e3);
/// assert!(recommend_resonant_frequency(100e3, 1.1).unwrap() > 100e3);
/// assert!(recommend_resonant_frequency(100e3, 0.9).unwrap() < 100e3);
/// ```
pub fn recommend_resonant_frequency(f_sw_desired_hz: f64, gain_at_f_sw: f64) -> CalcResult<f64> {
    recommend_resonant_frequency_with(f_sw_desired_hz, gain_at_f_sw, &DesignSettings::default())
}

/// Recommend a resonant frequency using the offsets in `settings`.
pub fn recommend_resonant_frequency_with(
    f_sw_desired_hz: f64,
    gain_at_f_sw: f64,
    settings: &DesignSettings,
) -> CalcResult<f64> {
    require_positive("f_sw_desired_hz", f_sw_desired_hz, "Desired switching frequency")?;
    require_positive("gain_at_f_sw", gain_at_f_sw, "Gain at the desired switching frequency")?;

    let f_0 = match OperatingRegion::from_gain(gain_at_f_sw) {
        OperatingRegion::AtResonance => f_sw_desired_hz,
        OperatingRegion::BelowResonance => f_sw_desired_hz * settings.below_resonance_factor,
        OperatingRegion::AboveResonance => f_sw_desired_hz * settings.above_resonance_factor,
    };
    Ok(f_0)
}

/// Input for [`quick_frequency_range`]: the input voltage range is given as
/// a ± percentage around nominal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickRangeInput {
    /// Nominal input voltage (V)
    pub input_voltage_nom_v: f64,

    /// Input voltage tolerance, e.g. 20 for ±20 % (%)
    pub input_voltage_tolerance_percent: f64,

    /// Output voltage (V)
    pub output_voltage_v: f64,

    /// Transformer turns ratio n
    pub turns_ratio: f64,

    /// Tank quality factor Q
    pub quality_factor: f64,

    /// Inductance ratio Ln
    pub inductance_ratio: f64,

    /// Desired nominal switching frequency, used as f_0 (Hz)
    pub f_sw_desired_hz: f64,
}

impl QuickRangeInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("input_voltage_nom_v", self.input_voltage_nom_v, "Nominal input voltage")?;
        let p = self.input_voltage_tolerance_percent;
        if !(p >= 0.0 && p < 100.0) {
            return Err(CalcError::invalid_input(
                "input_voltage_tolerance_percent",
                p.to_string(),
                "Tolerance must be in [0, 100) percent",
            ));
        }
        Ok(())
    }

    /// Expand into the explicit-range form.
    ///
    /// V_in_min = V_nom·(1 − p), V_in_max = V_nom·(1 + p), f_0 = f_sw_desired
    pub fn to_range_input(&self) -> FrequencyRangeInput {
        let p = self.input_voltage_tolerance_percent / 100.0;
        FrequencyRangeInput {
            input_voltage_min_v: self.input_voltage_nom_v * (1.0 - p),
            input_voltage_max_v: self.input_voltage_nom_v * (1.0 + p),
            output_voltage_v: self.output_voltage_v,
            turns_ratio: self.turns_ratio,
            quality_factor: self.quality_factor,
            inductance_ratio: self.inductance_ratio,
            resonant_frequency_hz: self.f_sw_desired_hz,
        }
    }
}

/// Frequency range together with its validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickRangeResult {
    /// Resolved frequency range
    pub range: FrequencyRangeResult,

    /// Validation against the settings' thresholds
    pub validation: RangeValidation,
}

/// Frequency range from a nominal input voltage and ± tolerance.
pub fn quick_frequency_range(input: &QuickRangeInput, settings: &DesignSettings) -> CalcResult<QuickRangeResult> {
    input.validate()?;
    let range = calculate_frequency_range_for_llc(&input.to_range_input())?;
    let validation = validate_frequency_range_with(&range, settings);
    Ok(QuickRangeResult { range, validation })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> FrequencyRangeInput {
        FrequencyRangeInput {
            input_voltage_min_v: 350.0,
            input_voltage_max_v: 450.0,
            output_voltage_v: 48.0,
            turns_ratio: 8.0,
            quality_factor: 0.4,
            inductance_ratio: 5.0,
            resonant_frequency_hz: 100e3,
        }
    }

    fn test_result(f_min: f64, f_max: f64, gain_max: f64) -> FrequencyRangeResult {
        FrequencyRangeResult {
            f_sw_min_hz: f_min,
            f_sw_max_hz: f_max,
            resonant_frequency_hz: 100e3,
            frequency_ratio_min: f_min / 100e3,
            frequency_ratio_max: f_max / 100e3,
            gain_max,
            gain_min: 0.9,
            frequency_range_hz: f_max - f_min,
            frequency_range_percent: (f_max - f_min) / 100e3 * 100.0,
        }
    }

    #[test]
    fn test_reference_range() {
        let range = calculate_frequency_range_for_llc(&test_input()).unwrap();
        // M_max = 8 × 48 / 350 = 1.097 → F ≈ 0.8106
        // M_min = 8 × 48 / 450 = 0.853 → F ≈ 1.5425
        assert!((range.frequency_ratio_min - 0.8106).abs() < 1e-3);
        assert!((range.frequency_ratio_max - 1.5425).abs() < 1e-3);
        assert!(range.f_sw_min_hz < 100e3 && 100e3 < range.f_sw_max_hz);
        assert!(range.spans_resonance());
        assert!(range.requires_boost());
        assert!((range.frequency_range_percent - 73.2).abs() < 0.1);
    }

    #[test]
    fn test_gain_inverse_to_input_voltage() {
        let input = test_input();
        assert!(input.gain_max() > input.gain_min());
        let range = calculate_frequency_range_for_llc(&input).unwrap();
        assert!(range.gain_max > range.gain_min);
        assert!(range.f_sw_min_hz < range.f_sw_max_hz);
    }

    #[test]
    fn test_all_buck_design_sits_above_resonance() {
        let mut input = test_input();
        input.turns_ratio = 6.0;
        let range = calculate_frequency_range_for_llc(&input).unwrap();
        assert!(range.f_sw_min_hz > 100e3);
        assert!(!range.requires_boost());

        // Buck-only design above resonance is fine: no capacitive-region warning
        let validation = validate_frequency_range(&range, 10.0);
        assert!(validation.is_valid);
        assert!(!validation
            .issues
            .iter()
            .any(|i| matches!(i, RangeIssue::CapacitiveRegionRisk { .. })));
        // ~121 % of f_0
        assert!(validation.issues.iter().any(|i| matches!(i, RangeIssue::WideRange { .. })));
    }

    #[test]
    fn test_unreachable_boost_surfaces_error() {
        let mut input = test_input();
        input.quality_factor = 0.8;
        input.inductance_ratio = 10.0;
        let err = calculate_frequency_range_for_llc(&input).unwrap_err();
        assert_eq!(err.error_code(), "NO_REAL_ROOT");
    }

    #[test]
    fn test_invalid_input() {
        let mut input = test_input();
        input.quality_factor = 0.0;
        assert_eq!(calculate_frequency_range_for_llc(&input).unwrap_err().field(), Some("quality_factor"));

        let mut input = test_input();
        input.input_voltage_min_v = 500.0;
        assert_eq!(
            calculate_frequency_range_for_llc(&input).unwrap_err().field(),
            Some("input_voltage_min_v")
        );
    }

    #[test]
    fn test_valid_range_has_no_issues() {
        let range = calculate_frequency_range_for_llc(&test_input()).unwrap();
        let validation = validate_frequency_range(&range, 10.0);
        assert!(validation.is_valid);
        assert!(validation.issues.is_empty());
        assert!(validation.spans_resonance);
    }

    #[test]
    fn test_inverted_range_is_invalid() {
        let validation = validate_frequency_range(&test_result(120e3, 90e3, 1.1), 10.0);
        assert!(!validation.is_valid);
        assert!(validation.errors().any(|i| matches!(i, RangeIssue::InvalidOrdering { .. })));

        // Ordering is checked regardless of the other fields
        let mut result = test_result(120e3, 90e3, 0.5);
        result.frequency_range_percent = 50.0;
        result.resonant_frequency_hz = 100.0;
        assert!(!validate_frequency_range(&result, 0.0).is_valid);
    }

    #[test]
    fn test_equal_bounds_are_invalid() {
        let validation = validate_frequency_range(&test_result(100e3, 100e3, 1.0), 10.0);
        assert!(!validation.is_valid);
    }

    #[test]
    fn test_narrow_range_warns_but_stays_valid() {
        let mut input = test_input();
        input.input_voltage_min_v = 395.0;
        input.input_voltage_max_v = 405.0;
        input.output_voltage_v = 50.0;
        let range = calculate_frequency_range_for_llc(&input).unwrap();
        let validation = validate_frequency_range(&range, 10.0);
        assert!(validation.is_valid);
        assert!(validation.warnings().any(|i| matches!(i, RangeIssue::NarrowRange { .. })));
        assert!((validation.range_percent - 6.25).abs() < 0.05);
    }

    #[test]
    fn test_capacitive_region_warning() {
        // Needs boost (M_max > 1) yet the whole range is above resonance
        let validation = validate_frequency_range(&test_result(110e3, 150e3, 1.2), 10.0);
        assert!(validation.is_valid);
        assert!(validation
            .warnings()
            .any(|i| matches!(i, RangeIssue::CapacitiveRegionRisk { .. })));
    }

    #[test]
    fn test_max_below_resonance_warning() {
        let validation = validate_frequency_range(&test_result(60e3, 90e3, 1.3), 10.0);
        assert!(validation.is_valid);
        assert!(!validation.spans_resonance);
        assert!(validation
            .warnings()
            .any(|i| matches!(i, RangeIssue::MaxBelowResonance { .. })));
    }

    #[test]
    fn test_non_positive_frequency_is_error() {
        let validation = validate_frequency_range(&test_result(-10e3, 90e3, 1.3), 10.0);
        assert!(!validation.is_valid);
        assert!(validation.errors().any(|i| *i == RangeIssue::NonPositiveFrequency));
    }

    #[test]
    fn test_settings_thresholds() {
        let range = calculate_frequency_range_for_llc(&test_input()).unwrap();
        let settings = DesignSettings {
            min_range_percent: 80.0,
            max_range_percent: 200.0,
            ..DesignSettings::default()
        };
        let validation = validate_frequency_range_with(&range, &settings);
        assert!(validation.warnings().any(|i| matches!(i, RangeIssue::NarrowRange { .. })));
    }

    #[test]
    fn test_recommend_resonant_frequency() {
        assert_eq!(recommend_resonant_frequency(100e3, 1.0).unwrap(), 100e3);
        assert!((recommend_resonant_frequency(100e3, 1.2).unwrap() - 120e3).abs() < 1e-6);
        assert!((recommend_resonant_frequency(100e3, 0.8).unwrap() - 80e3).abs() < 1e-6);
        assert!(recommend_resonant_frequency(0.0, 1.0).is_err());
        assert!(recommend_resonant_frequency(100e3, -1.0).is_err());
    }

    #[test]
    fn test_recommend_with_settings() {
        let settings = DesignSettings {
            below_resonance_factor: 1.5,
            ..DesignSettings::default()
        };
        let f_0 = recommend_resonant_frequency_with(100e3, 1.05, &settings).unwrap();
        assert!((f_0 - 150e3).abs() < 1e-6);
    }

    #[test]
    fn test_operating_region() {
        assert_eq!(OperatingRegion::from_gain(1.0), OperatingRegion::AtResonance);
        assert_eq!(OperatingRegion::from_gain(1.0 + 1e-12), OperatingRegion::AtResonance);
        assert_eq!(OperatingRegion::from_gain(1.01), OperatingRegion::BelowResonance);
        assert_eq!(OperatingRegion::from_gain(0.99), OperatingRegion::AboveResonance);
    }

    #[test]
    fn test_quick_range_matches_explicit() {
        let quick = QuickRangeInput {
            input_voltage_nom_v: 400.0,
            input_voltage_tolerance_percent: 10.0,
            output_voltage_v: 48.0,
            turns_ratio: 8.0,
            quality_factor: 0.4,
            inductance_ratio: 5.0,
            f_sw_desired_hz: 100e3,
        };
        let result = quick_frequency_range(&quick, &DesignSettings::default()).unwrap();

        let p = 10.0 / 100.0;
        let explicit = calculate_frequency_range_for_llc(&FrequencyRangeInput {
            input_voltage_min_v: 400.0 * (1.0 - p),
            input_voltage_max_v: 400.0 * (1.0 + p),
            output_voltage_v: 48.0,
            turns_ratio: 8.0,
            quality_factor: 0.4,
            inductance_ratio: 5.0,
            resonant_frequency_hz: 100e3,
        })
        .unwrap();

        assert_eq!(result.range, explicit);
        assert!(result.validation.is_valid);
    }

    #[test]
    fn test_quick_range_tolerance_bounds() {
        let mut quick = QuickRangeInput {
            input_voltage_nom_v: 400.0,
            input_voltage_tolerance_percent: 100.0,
            output_voltage_v: 48.0,
            turns_ratio: 8.0,
            quality_factor: 0.4,
            inductance_ratio: 5.0,
            f_sw_desired_hz: 100e3,
        };
        let err = quick_frequency_range(&quick, &DesignSettings::default()).unwrap_err();
        assert_eq!(err.field(), Some("input_voltage_tolerance_percent"));

        quick.input_voltage_tolerance_percent = -1.0;
        assert!(quick_frequency_range(&quick, &DesignSettings::default()).is_err());
    }

    #[test]
    fn test_issue_messages() {
        let issue = RangeIssue::NarrowRange {
            range_percent: 6.25,
            minimum_percent: 10.0,
        };
        assert_eq!(issue.severity(), Severity::Warning);
        assert!(issue.to_string().starts_with("Narrow frequency range"));
        assert_eq!(RangeIssue::NonPositiveFrequency.severity(), Severity::Error);
    }

    #[test]
    fn test_validation_serialization() {
        let validation = validate_frequency_range(&test_result(120e3, 90e3, 1.1), 10.0);
        let json = serde_json::to_string(&validation).unwrap();
        assert!(json.contains("InvalidOrdering"));
        let roundtrip: RangeValidation = serde_json::from_str(&json).unwrap();
        assert_eq!(validation, roundtrip);
    }
}
