//! # Battery Parameter Derivation
//!
//! Derives the load-side operating point and the transformer turns ratio
//! from the converter's electrical requirements.
//!
//! ## Method
//!
//! 1. I_bat = P / V_o
//! 2. R = V_o / I_bat
//! 3. V_loss from the efficiency (pluggable, see [`VoltageLossModel`])
//! 4. n = round(V_in_nom / (V_o + V_loss)), n ≥ 1
//! 5. R_e = 8·n²·R / π²
//! 6. M_g_max, M_g_min from (V_o + V_loss) at the input voltage extremes
//!
//! ## Example
//!
//! ```rust
//! use llc_core::calculations::battery::{calculate_all_parameters, ElectricalRequirement};
//!
//! let requirement = ElectricalRequirement {
//!     input_voltage_nom_v: 400.0,
//!     input_voltage_min_v: 350.0,
//!     input_voltage_max_v: 450.0,
//!     output_voltage_v: 48.0,
//!     output_power_w: 100.0,
//!     efficiency_percent: 95.0,
//! };
//!
//! let params = calculate_all_parameters(&requirement).unwrap();
//! assert_eq!(params.turns_ratio, 8);
//! assert!(params.gain_max > params.gain_min);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::battery::{
    battery_current,
    equivalent_resistance,
    load_resistance,
    turns_ratio_corrected,
    voltage_gain_limits,
    voltage_loss,
};
use crate::errors::{require_positive, CalcError, CalcResult};

/// Electrical requirements of the converter.
///
/// ## JSON Example
///
/// ```json
/// {
///   "input_voltage_nom_v": 400.0,
///   "input_voltage_min_v": 350.0,
///   "input_voltage_max_v": 450.0,
///   "output_voltage_v": 48.0,
///   "output_power_w": 100.0,
///   "efficiency_percent": 95.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricalRequirement {
    /// Nominal input voltage (V)
    pub input_voltage_nom_v: f64,

    /// Minimum input voltage (V)
    pub input_voltage_min_v: f64,

    /// Maximum input voltage (V)
    pub input_voltage_max_v: f64,

    /// Output (battery) voltage (V)
    pub output_voltage_v: f64,

    /// Output power (W)
    pub output_power_w: f64,

    /// Converter efficiency in percent, (0, 100]
    #[serde(default = "default_efficiency_percent")]
    pub efficiency_percent: f64,
}

/// Efficiency assumed when a requirement omits one (%)
pub const DEFAULT_EFFICIENCY_PERCENT: f64 = 95.0;

fn default_efficiency_percent() -> f64 {
    DEFAULT_EFFICIENCY_PERCENT
}

impl ElectricalRequirement {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("input_voltage_nom_v", self.input_voltage_nom_v, "Nominal input voltage")?;
        require_positive("input_voltage_min_v", self.input_voltage_min_v, "Minimum input voltage")?;
        require_positive("input_voltage_max_v", self.input_voltage_max_v, "Maximum input voltage")?;
        require_positive("output_voltage_v", self.output_voltage_v, "Output voltage")?;
        require_positive("output_power_w", self.output_power_w, "Output power")?;

        if self.input_voltage_min_v > self.input_voltage_nom_v {
            return Err(CalcError::invalid_input(
                "input_voltage_min_v",
                self.input_voltage_min_v.to_string(),
                "Minimum input voltage exceeds nominal",
            ));
        }
        if self.input_voltage_nom_v > self.input_voltage_max_v {
            return Err(CalcError::invalid_input(
                "input_voltage_max_v",
                self.input_voltage_max_v.to_string(),
                "Maximum input voltage is below nominal",
            ));
        }
        if self.efficiency_percent == 0.0 {
            return Err(CalcError::invalid_input(
                "efficiency_percent",
                "0",
                "Zero efficiency makes the voltage loss undefined",
            ));
        }
        if !(self.efficiency_percent > 0.0 && self.efficiency_percent <= 100.0) {
            return Err(CalcError::invalid_input(
                "efficiency_percent",
                self.efficiency_percent.to_string(),
                "Efficiency must be in (0, 100] percent",
            ));
        }
        Ok(())
    }
}

/// Maps converter efficiency to the voltage drop reflected to the secondary.
///
/// Implementations must return 0 at 100 % efficiency and grow as efficiency
/// falls. Inputs are already validated: power, current and efficiency are
/// all strictly positive.
pub trait VoltageLossModel {
    /// Voltage loss (V) for the given operating point
    fn voltage_loss(&self, output_power_w: f64, battery_current_a: f64, efficiency_percent: f64) -> f64;
}

/// V_loss = P·(1 − η) / (I_bat·η), i.e. the loss power pushed through the
/// load current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerRatioLoss;

impl VoltageLossModel for PowerRatioLoss {
    fn voltage_loss(&self, output_power_w: f64, battery_current_a: f64, efficiency_percent: f64) -> f64 {
        voltage_loss(output_power_w, battery_current_a, efficiency_percent)
    }
}

/// Derived battery/load parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "battery_current_a": 2.083,
///   "load_resistance_ohm": 23.04,
///   "voltage_loss_v": 2.526,
///   "output_voltage_corrected_v": 50.526,
///   "turns_ratio": 8,
///   "equivalent_resistance_ohm": 1195.3,
///   "gain_max": 1.155,
///   "gain_min": 0.898
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryParameterSet {
    /// Battery/load current I_bat (A)
    pub battery_current_a: f64,

    /// Load resistance R (Ω)
    pub load_resistance_ohm: f64,

    /// Efficiency-driven voltage loss V_loss (V)
    pub voltage_loss_v: f64,

    /// Loss-corrected output voltage V_o + V_loss (V)
    pub output_voltage_corrected_v: f64,

    /// Integer turns ratio n
    pub turns_ratio: u32,

    /// Equivalent AC resistance referred to the primary R_e (Ω)
    pub equivalent_resistance_ohm: f64,

    /// Gain required at minimum input voltage
    pub gain_max: f64,

    /// Gain required at maximum input voltage
    pub gain_min: f64,
}

/// Derive all battery parameters with the default [`PowerRatioLoss`] model.
///
/// # Returns
///
/// * `Ok(BatteryParameterSet)` - Derived parameters
/// * `Err(CalcError)` - If any requirement is invalid
pub fn calculate_all_parameters(requirement: &ElectricalRequirement) -> CalcResult<BatteryParameterSet> {
    calculate_all_parameters_with(requirement, &PowerRatioLoss)
}

/// Derive all battery parameters with a caller-supplied loss model.
pub fn calculate_all_parameters_with(
    requirement: &ElectricalRequirement,
    loss_model: &impl VoltageLossModel,
) -> CalcResult<BatteryParameterSet> {
    requirement.validate()?;

    let v_out = requirement.output_voltage_v;
    let p_out = requirement.output_power_w;

    let i_bat = battery_current(p_out, v_out);
    let r_load = load_resistance(v_out, i_bat);

    let v_loss = loss_model.voltage_loss(p_out, i_bat, requirement.efficiency_percent);
    if !v_loss.is_finite() || v_loss < 0.0 {
        return Err(CalcError::calculation_failed(
            "voltage_loss",
            format!("loss model returned {}", v_loss),
        ));
    }

    let v_out_corrected = v_out + v_loss;
    let turns_ratio = turns_ratio_corrected(requirement.input_voltage_nom_v, v_out_corrected)?;
    let r_e = equivalent_resistance(turns_ratio, r_load);
    let (gain_max, gain_min) = voltage_gain_limits(
        turns_ratio,
        v_out_corrected,
        requirement.input_voltage_min_v,
        requirement.input_voltage_max_v,
    );

    debug!(
        turns_ratio,
        v_loss,
        r_e,
        gain_max,
        gain_min,
        "Derived battery parameters"
    );

    Ok(BatteryParameterSet {
        battery_current_a: i_bat,
        load_resistance_ohm: r_load,
        voltage_loss_v: v_loss,
        output_voltage_corrected_v: v_out_corrected,
        turns_ratio,
        equivalent_resistance_ohm: r_e,
        gain_max,
        gain_min,
    })
}
