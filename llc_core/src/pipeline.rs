//! # Design Pipeline
//!
//! Runs the calculators in dependency order for a single design point:
//!
//! ```text
//! ElectricalRequirement ──► battery ──► turns ratio, V_o + V_loss
//!                                 │
//!                                 ├──► parallel (core count, per-core currents)
//!                                 │
//!                                 └──► frequency_range ──► validation
//! ```
//!
//! The pipeline holds no state. An outer search can call [`design`] from
//! any number of threads; every call depends only on its own input.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::battery::{calculate_all_parameters, BatteryParameterSet, ElectricalRequirement};
use crate::calculations::frequency_range::{
    calculate_frequency_range_for_llc,
    recommend_resonant_frequency_with,
    validate_frequency_range_with,
    FrequencyRangeInput,
    FrequencyRangeResult,
    RangeValidation,
};
use crate::calculations::parallel::{
    calculate_all_currents_parallel,
    determine_optimal_ptrf_default,
    ParallelCurrentInput,
    ParallelTransformerConfig,
};
use crate::errors::CalcResult;
use crate::settings::DesignSettings;

/// Resonant tank parameters chosen by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankParameters {
    /// Tank quality factor Q
    pub quality_factor: f64,

    /// Inductance ratio Ln = Lm / Lr
    pub inductance_ratio: f64,

    /// Resonant frequency f_0 (Hz)
    pub resonant_frequency_hz: f64,

    /// Total magnetizing inductance (H); enables current distribution
    #[serde(default)]
    pub magnetizing_inductance_h: Option<f64>,

    /// Nominal switching frequency (Hz); enables current distribution and
    /// the resonant frequency recommendation
    #[serde(default)]
    pub switching_frequency_hz: Option<f64>,
}

/// Everything needed to evaluate one design point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlcDesignInput {
    /// Electrical requirements
    pub requirement: ElectricalRequirement,

    /// Tank parameters
    pub tank: TankParameters,

    /// Design constants
    #[serde(default)]
    pub settings: DesignSettings,
}

/// Results for one design point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlcDesignResult {
    /// Load-side parameters and turns ratio
    pub battery: BatteryParameterSet,

    /// Number of parallel transformer cores for the output power
    pub transformer_count: u32,

    /// Per-core magnetics and currents, when L_m and f_sw are known
    pub parallel: Option<ParallelTransformerConfig>,

    /// Switching frequency range over the input voltage range
    pub frequency_range: FrequencyRangeResult,

    /// Validation of the frequency range
    pub validation: RangeValidation,

    /// Suggested f_0 for the nominal switching frequency, when one is given
    pub recommended_resonant_frequency_hz: Option<f64>,
}

/// Evaluate a complete design point.
///
/// # Example
///
/// ```rust
/// use llc_core::calculations::battery::ElectricalRequirement;
/// use llc_core::pipeline::{design, LlcDesignInput, TankParameters};
/// use llc_core::settings::DesignSettings;
///
/// let input = LlcDesignInput {
///     requirement: ElectricalRequirement {
///         input_voltage_nom_v: 400.0,
///         input_voltage_min_v: 350.0,
///         input_voltage_max_v: 450.0,
///         output_voltage_v: 48.0,
///         output_power_w: 100.0,
///         efficiency_percent: 95.0,
///     },
///     tank: TankParameters {
///         quality_factor: 0.4,
///         inductance_ratio: 5.0,
///         resonant_frequency_hz: 100e3,
///         magnetizing_inductance_h: None,
///         switching_frequency_hz: None,
///     },
///     settings: DesignSettings::default(),
/// };
///
/// let result = design(&input).unwrap();
/// assert_eq!(result.battery.turns_ratio, 8);
/// assert!(result.validation.is_valid);
/// ```
pub fn design(input: &LlcDesignInput) -> CalcResult<LlcDesignResult> {
    let settings = &input.settings;
    settings.validate()?;

    let requirement = &input.requirement;
    let tank = &input.tank;

    let battery = calculate_all_parameters(requirement)?;
    let transformer_count = determine_optimal_ptrf_default(requirement.output_power_w, settings)?;

    let parallel = match (tank.magnetizing_inductance_h, tank.switching_frequency_hz) {
        (Some(l_m), Some(f_s)) => Some(calculate_all_currents_parallel(&ParallelCurrentInput {
            turns_ratio: battery.turns_ratio,
            output_voltage_v: requirement.output_voltage_v,
            output_current_a: battery.battery_current_a,
            magnetizing_inductance_h: l_m,
            switching_frequency_hz: f_s,
            resonant_frequency_hz: tank.resonant_frequency_hz,
            transformer_count,
        })?),
        _ => None,
    };

    let frequency_range = calculate_frequency_range_for_llc(&FrequencyRangeInput {
        input_voltage_min_v: requirement.input_voltage_min_v,
        input_voltage_max_v: requirement.input_voltage_max_v,
        output_voltage_v: battery.output_voltage_corrected_v,
        turns_ratio: f64::from(battery.turns_ratio),
        quality_factor: tank.quality_factor,
        inductance_ratio: tank.inductance_ratio,
        resonant_frequency_hz: tank.resonant_frequency_hz,
    })?;
    let validation = validate_frequency_range_with(&frequency_range, settings);

    let recommended_resonant_frequency_hz = match tank.switching_frequency_hz {
        Some(f_s) => {
            let nominal_gain =
                f64::from(battery.turns_ratio) * battery.output_voltage_corrected_v / requirement.input_voltage_nom_v;
            Some(recommend_resonant_frequency_with(f_s, nominal_gain, settings)?)
        }
        None => None,
    };

    debug!(
        turns_ratio = battery.turns_ratio,
        transformer_count,
        is_valid = validation.is_valid,
        "Evaluated design point"
    );

    Ok(LlcDesignResult {
        battery,
        transformer_count,
        parallel,
        frequency_range,
        validation,
        recommended_resonant_frequency_hz,
    })
}
