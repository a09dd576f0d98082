//! # Converter Calculations
//!
//! This module contains the LLC design calculators. Each calculation
//! follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, with `validate()`)
//! - `*Result` - Calculation results (JSON-serializable)
//! - A pure calculation function returning `CalcResult<*Result>`
//!
//! ## Available Calculations
//!
//! - [`battery`] - Load-side parameters, turns ratio, gain limits
//! - [`parallel`] - Core count and per-core current distribution
//! - [`frequency_range`] - Switching frequency range, validation, f_0 recommendation

pub mod battery;
pub mod frequency_range;
pub mod parallel;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::settings::DesignSettings;

// Re-export commonly used types
pub use battery::{BatteryParameterSet, ElectricalRequirement};
pub use frequency_range::{FrequencyRangeInput, FrequencyRangeResult, QuickRangeInput, QuickRangeResult, RangeValidation};
pub use parallel::{ParallelCurrentInput, ParallelTransformerConfig};

/// Enum wrapper for all calculation inputs.
///
/// Lets a JSON consumer submit any calculation through one entry point:
///
/// ```json
/// { "type": "ParallelCurrents", "turns_ratio": 8, "output_voltage_v": 48.0, ... }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Battery/load parameter derivation
    BatteryParameters(ElectricalRequirement),
    /// Parallel transformer current distribution
    ParallelCurrents(ParallelCurrentInput),
    /// Frequency range from explicit input voltage limits
    FrequencyRange(FrequencyRangeInput),
    /// Frequency range from nominal voltage and tolerance
    QuickFrequencyRange(QuickRangeInput),
}

/// Result of running a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    BatteryParameters(BatteryParameterSet),
    ParallelCurrents(ParallelTransformerConfig),
    FrequencyRange(FrequencyRangeResult),
    QuickFrequencyRange(QuickRangeResult),
}

impl CalculationItem {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::BatteryParameters(_) => "BatteryParameters",
            CalculationItem::ParallelCurrents(_) => "ParallelCurrents",
            CalculationItem::FrequencyRange(_) => "FrequencyRange",
            CalculationItem::QuickFrequencyRange(_) => "QuickFrequencyRange",
        }
    }

    /// Run the wrapped calculation.
    pub fn run(&self, settings: &DesignSettings) -> CalcResult<CalculationOutput> {
        Ok(match self {
            CalculationItem::BatteryParameters(input) => {
                CalculationOutput::BatteryParameters(battery::calculate_all_parameters(input)?)
            }
            CalculationItem::ParallelCurrents(input) => {
                CalculationOutput::ParallelCurrents(parallel::calculate_all_currents_parallel(input)?)
            }
            CalculationItem::FrequencyRange(input) => {
                CalculationOutput::FrequencyRange(frequency_range::calculate_frequency_range_for_llc(input)?)
            }
            CalculationItem::QuickFrequencyRange(input) => {
                CalculationOutput::QuickFrequencyRange(frequency_range::quick_frequency_range(input, settings)?)
            }
        })
    }
}
