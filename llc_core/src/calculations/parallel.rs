//! # Parallel Transformer Distribution
//!
//! Splits the converter's power and currents across `ptrf` identical
//! transformer cores operated in parallel, and sizes the core count for a
//! power budget.
//!
//! ## Assumptions
//!
//! - Cores are identical and share current perfectly (no mismatch model)
//! - Aggregate currents are those of a single equivalent transformer with
//!   the uncorrected turns ratio n and magnetizing inductance L_m
//! - Each core carries exactly 1/ptrf of every aggregate current, so the
//!   per-core currents summed over all cores reproduce the aggregate
//!
//! ## Example
//!
//! ```rust
//! use llc_core::calculations::parallel::{calculate_all_currents_parallel, ParallelCurrentInput};
//!
//! let input = ParallelCurrentInput {
//!     turns_ratio: 8,
//!     output_voltage_v: 48.0,
//!     output_current_a: 20.0,
//!     magnetizing_inductance_h: 500e-6,
//!     switching_frequency_hz: 100e3,
//!     resonant_frequency_hz: 100e3,
//!     transformer_count: 2,
//! };
//!
//! let config = calculate_all_currents_parallel(&input).unwrap();
//! assert_eq!(config.turns_ratio_per_core, 4);
//! assert!((config.power_per_transformer_w - 480.0).abs() < 1e-9);
//! ```

use std::ops::Div;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::magnetics::{
    corrected_magnetizing_inductance,
    corrected_turns_ratio,
    magnetizing_current_peak,
    resonant_current_peak,
    resonant_current_rms_squared,
    secondary_current_rms,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::settings::DesignSettings;

/// Minimum number of cores that keeps each core within its rated power.
///
/// # Formula
/// - ptrf = ceil(P_total / P_rated), at least 1
///
/// # Example
/// ```rust
/// use llc_core::calculations::parallel::determine_optimal_ptrf;
///
/// assert_eq!(determine_optimal_ptrf(3000.0, 1000.0).unwrap(), 3);
/// assert_eq!(determine_optimal_ptrf(500.0, 1000.0).unwrap(), 1);
/// assert!(determine_optimal_ptrf(0.0, 1000.0).is_err());
/// ```
pub fn determine_optimal_ptrf(total_power_w: f64, rated_power_per_unit_w: f64) -> CalcResult<u32> {
    require_positive("total_power_w", total_power_w, "Total power")?;
    require_positive("rated_power_per_unit_w", rated_power_per_unit_w, "Rated power per transformer")?;

    let cores = (total_power_w / rated_power_per_unit_w).ceil();
    if cores > f64::from(u32::MAX) {
        return Err(CalcError::invalid_input(
            "total_power_w",
            total_power_w.to_string(),
            "Power budget needs more cores than can be counted",
        ));
    }
    let ptrf = (cores as u32).max(1);

    debug!(total_power_w, rated_power_per_unit_w, ptrf, "Sized parallel transformers");
    Ok(ptrf)
}

/// [`determine_optimal_ptrf`] with the rated power taken from settings.
pub fn determine_optimal_ptrf_default(total_power_w: f64, settings: &DesignSettings) -> CalcResult<u32> {
    determine_optimal_ptrf(total_power_w, settings.rated_power_per_transformer_w)
}

/// The four transformer currents an LLC stage is sized by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentSet {
    /// Peak magnetizing current (A)
    pub magnetizing_peak_a: f64,

    /// RMS resonant current (A)
    pub resonant_rms_a: f64,

    /// RMS secondary current (A)
    pub secondary_rms_a: f64,

    /// Peak resonant current (A)
    pub resonant_peak_a: f64,
}

impl Div<f64> for CurrentSet {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        CurrentSet {
            magnetizing_peak_a: self.magnetizing_peak_a / rhs,
            resonant_rms_a: self.resonant_rms_a / rhs,
            secondary_rms_a: self.secondary_rms_a / rhs,
            resonant_peak_a: self.resonant_peak_a / rhs,
        }
    }
}

impl CurrentSet {
    /// Currents as an array, in field order
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.magnetizing_peak_a,
            self.resonant_rms_a,
            self.secondary_rms_a,
            self.resonant_peak_a,
        ]
    }
}

/// Split an aggregate current set evenly across `ptrf` cores.
pub fn distribute_currents(aggregate: &CurrentSet, ptrf: u32) -> CalcResult<CurrentSet> {
    validate_transformer_count(ptrf)?;
    Ok(*aggregate / f64::from(ptrf))
}

fn validate_transformer_count(ptrf: u32) -> CalcResult<()> {
    if ptrf == 0 {
        return Err(CalcError::invalid_input(
            "transformer_count",
            "0",
            "At least one transformer is required",
        ));
    }
    Ok(())
}

/// Input parameters for parallel-core current distribution.
///
/// ## JSON Example
///
/// ```json
/// {
///   "turns_ratio": 8,
///   "output_voltage_v": 48.0,
///   "output_current_a": 20.0,
///   "magnetizing_inductance_h": 0.0005,
///   "switching_frequency_hz": 100000.0,
///   "resonant_frequency_hz": 100000.0,
///   "transformer_count": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelCurrentInput {
    /// Turns ratio of the single equivalent transformer
    pub turns_ratio: u32,

    /// Output voltage (V)
    pub output_voltage_v: f64,

    /// Total output current (A)
    pub output_current_a: f64,

    /// Total magnetizing inductance (H)
    pub magnetizing_inductance_h: f64,

    /// Switching frequency (Hz)
    pub switching_frequency_hz: f64,

    /// Resonant frequency (Hz)
    pub resonant_frequency_hz: f64,

    /// Number of parallel cores (ptrf)
    #[serde(default = "default_transformer_count")]
    pub transformer_count: u32,
}

fn default_transformer_count() -> u32 {
    1
}

impl ParallelCurrentInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.turns_ratio == 0 {
            return Err(CalcError::invalid_input("turns_ratio", "0", "Turns ratio must be at least 1"));
        }
        require_positive("output_voltage_v", self.output_voltage_v, "Output voltage")?;
        require_positive("output_current_a", self.output_current_a, "Output current")?;
        require_positive("magnetizing_inductance_h", self.magnetizing_inductance_h, "Magnetizing inductance")?;
        require_positive("switching_frequency_hz", self.switching_frequency_hz, "Switching frequency")?;
        require_positive("resonant_frequency_hz", self.resonant_frequency_hz, "Resonant frequency")?;
        validate_transformer_count(self.transformer_count)
    }

    /// Currents of the single equivalent transformer (before distribution).
    pub fn aggregate_currents(&self) -> CurrentSet {
        let n = f64::from(self.turns_ratio);
        let v_o = self.output_voltage_v;
        let i_o = self.output_current_a;
        let l_m = self.magnetizing_inductance_h;
        let f_s = self.switching_frequency_hz;
        let f_0 = self.resonant_frequency_hz;

        let magnetizing_peak_a = magnetizing_current_peak(n, v_o, l_m, f_s);

        CurrentSet {
            magnetizing_peak_a,
            resonant_rms_a: resonant_current_rms_squared(n, v_o, i_o, l_m, f_s, f_0).sqrt(),
            secondary_rms_a: secondary_current_rms(i_o, f_0, f_s),
            resonant_peak_a: resonant_current_peak(n, i_o, f_0, f_s, magnetizing_peak_a),
        }
    }
}

/// Per-core magnetics and currents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelTransformerConfig {
    /// Number of parallel cores
    pub transformer_count: u32,

    /// Per-core turns ratio n_eff = round(n / ptrf), at least 1
    pub turns_ratio_per_core: u32,

    /// Per-core magnetizing inductance L_m / ptrf (H)
    pub magnetizing_inductance_per_core_h: f64,

    /// Currents of the single equivalent transformer
    pub aggregate: CurrentSet,

    /// Currents carried by each core
    pub per_core: CurrentSet,

    /// Output current carried by each core (A)
    pub output_current_per_transformer_a: f64,

    /// Power handled by each core (W)
    pub power_per_transformer_w: f64,
}

impl ParallelTransformerConfig {
    /// Per-core currents summed over all cores
    pub fn recombined(&self) -> CurrentSet {
        let count = f64::from(self.transformer_count);
        let per_core = self.per_core;
        CurrentSet {
            magnetizing_peak_a: per_core.magnetizing_peak_a * count,
            resonant_rms_a: per_core.resonant_rms_a * count,
            secondary_rms_a: per_core.secondary_rms_a * count,
            resonant_peak_a: per_core.resonant_peak_a * count,
        }
    }
}

/// Calculate corrected magnetics and per-core currents.
///
/// # Returns
///
/// * `Ok(ParallelTransformerConfig)` - Distribution results
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate_all_currents_parallel(input: &ParallelCurrentInput) -> CalcResult<ParallelTransformerConfig> {
    input.validate()?;

    let ptrf = input.transformer_count;
    let aggregate = input.aggregate_currents();
    let per_core = distribute_currents(&aggregate, ptrf)?;
    let count = f64::from(ptrf);

    let config = ParallelTransformerConfig {
        transformer_count: ptrf,
        turns_ratio_per_core: corrected_turns_ratio(input.turns_ratio, ptrf),
        magnetizing_inductance_per_core_h: corrected_magnetizing_inductance(input.magnetizing_inductance_h, ptrf),
        aggregate,
        per_core,
        output_current_per_transformer_a: input.output_current_a / count,
        power_per_transformer_w: input.output_voltage_v * input.output_current_a / count,
    };

    debug!(
        ptrf,
        n_eff = config.turns_ratio_per_core,
        resonant_rms_per_core = config.per_core.resonant_rms_a,
        "Distributed currents across parallel transformers"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_input(ptrf: u32) -> ParallelCurrentInput {
        ParallelCurrentInput {
            turns_ratio: 8,
            output_voltage_v: 48.0,
            output_current_a: 20.0,
            magnetizing_inductance_h: 500e-6,
            switching_frequency_hz: 90e3,
            resonant_frequency_hz: 100e3,
            transformer_count: ptrf,
        }
    }

    #[test]
    fn test_optimal_ptrf() {
        assert_eq!(determine_optimal_ptrf(3000.0, 1000.0).unwrap(), 3);
        assert_eq!(determine_optimal_ptrf(2000.0, 1000.0).unwrap(), 2);
        assert_eq!(determine_optimal_ptrf(2000.1, 1000.0).unwrap(), 3);
        assert_eq!(determine_optimal_ptrf(500.0, 1000.0).unwrap(), 1);
    }

    #[test]
    fn test_optimal_ptrf_invalid() {
        assert_eq!(determine_optimal_ptrf(0.0, 1000.0).unwrap_err().field(), Some("total_power_w"));
        assert_eq!(determine_optimal_ptrf(-100.0, 1000.0).unwrap_err().field(), Some("total_power_w"));
        assert_eq!(
            determine_optimal_ptrf(1000.0, 0.0).unwrap_err().field(),
            Some("rated_power_per_unit_w")
        );
        assert!(determine_optimal_ptrf(1000.0, -5.0).is_err());
    }

    #[test]
    fn test_optimal_ptrf_from_settings() {
        let settings = DesignSettings {
            rated_power_per_transformer_w: 1500.0,
            ..DesignSettings::default()
        };
        assert_eq!(determine_optimal_ptrf_default(3200.0, &settings).unwrap(), 3);
    }

    #[test]
    fn test_single_core_is_identity() {
        for (n, l_m) in [(8_u32, 500e-6), (3, 120e-6), (17, 1.3e-3)] {
            let mut input = test_input(1);
            input.turns_ratio = n;
            input.magnetizing_inductance_h = l_m;
            let config = calculate_all_currents_parallel(&input).unwrap();
            assert_eq!(config.turns_ratio_per_core, n);
            assert_eq!(config.magnetizing_inductance_per_core_h, l_m);
            assert_eq!(config.per_core, config.aggregate);
            assert_eq!(config.output_current_per_transformer_a, input.output_current_a);
        }
    }

    #[test]
    fn test_current_balance_law() {
        for ptrf in [1_u32, 2, 3, 5] {
            let config = calculate_all_currents_parallel(&test_input(ptrf)).unwrap();
            let summed = config.recombined();
            for (sum, total) in summed.as_array().iter().zip(config.aggregate.as_array()) {
                assert_relative_eq!(*sum, total, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn test_aggregate_independent_of_core_count() {
        let one = calculate_all_currents_parallel(&test_input(1)).unwrap();
        let three = calculate_all_currents_parallel(&test_input(3)).unwrap();
        assert_eq!(one.aggregate, three.aggregate);
    }

    #[test]
    fn test_two_core_corrections() {
        let config = calculate_all_currents_parallel(&test_input(2)).unwrap();
        assert_eq!(config.turns_ratio_per_core, 4);
        assert!((config.magnetizing_inductance_per_core_h - 250e-6).abs() < 1e-15);
        assert!((config.output_current_per_transformer_a - 10.0).abs() < 1e-12);
        assert!((config.power_per_transformer_w - 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_turns_ratio_never_below_one() {
        let mut input = test_input(10);
        input.turns_ratio = 1;
        let config = calculate_all_currents_parallel(&input).unwrap();
        assert_eq!(config.turns_ratio_per_core, 1);
    }

    #[test]
    fn test_aggregate_magnetizing_current() {
        let mut input = test_input(1);
        input.switching_frequency_hz = 100e3;
        let aggregate = input.aggregate_currents();
        // (8 × 48) / (4 × 500µH × 100kHz) = 1.92 A
        assert!((aggregate.magnetizing_peak_a - 1.92).abs() < 1e-9);
        assert!(aggregate.resonant_peak_a > aggregate.magnetizing_peak_a);
    }

    #[test]
    fn test_distribute_external_currents() {
        let aggregate = CurrentSet {
            magnetizing_peak_a: 5.0,
            resonant_rms_a: 10.0,
            secondary_rms_a: 20.0,
            resonant_peak_a: 15.0,
        };
        let each = distribute_currents(&aggregate, 2).unwrap();
        assert_eq!(each.resonant_rms_a, 5.0);
        assert_eq!(each.secondary_rms_a, 10.0);
        assert_eq!(each.magnetizing_peak_a, 2.5);
        assert_eq!(each.resonant_peak_a, 7.5);
        assert!(distribute_currents(&aggregate, 0).is_err());
    }

    #[test]
    fn test_zero_transformers_rejected() {
        let err = calculate_all_currents_parallel(&test_input(0)).unwrap_err();
        assert_eq!(err.field(), Some("transformer_count"));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = test_input(2);
        input.magnetizing_inductance_h = 0.0;
        assert_eq!(
            calculate_all_currents_parallel(&input).unwrap_err().field(),
            Some("magnetizing_inductance_h")
        );

        let mut input = test_input(2);
        input.turns_ratio = 0;
        assert_eq!(calculate_all_currents_parallel(&input).unwrap_err().field(), Some("turns_ratio"));
    }

    #[test]
    fn test_rms_current_real_far_below_resonance() {
        // The overlap term never outweighs the other two
        for (l_m, f_s) in [(5e-6, 10e3), (1e-2, 10e3), (200e-6, 40e3)] {
            let mut input = test_input(1);
            input.magnetizing_inductance_h = l_m;
            input.switching_frequency_hz = f_s;
            let aggregate = input.aggregate_currents();
            assert!(aggregate.resonant_rms_a.is_finite());
            assert!(aggregate.resonant_rms_a > 0.0);
        }
    }

    #[test]
    fn test_transformer_count_defaults_to_one() {
        let json = r#"{
            "turns_ratio": 8,
            "output_voltage_v": 48.0,
            "output_current_a": 20.0,
            "magnetizing_inductance_h": 0.0005,
            "switching_frequency_hz": 100000.0,
            "resonant_frequency_hz": 100000.0
        }"#;
        let input: ParallelCurrentInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.transformer_count, 1);
    }
}
