//! # Load-Side Formulas
//!
//! Battery/load quantities and their reflection to the transformer primary.
//!
//! ## Notation
//!
//! - `P` = Output power (W)
//! - `V_o` = Output voltage (V)
//! - `I_bat` = Battery/load current (A)
//! - `η` = Converter efficiency (%)
//! - `V_loss` = Efficiency-driven voltage drop reflected to the secondary (V)
//! - `n` = Primary-to-secondary turns ratio

use std::f64::consts::PI;

use crate::errors::{CalcError, CalcResult};

/// Battery/load current
///
/// # Formula
/// - I_bat = P / V_o
#[inline]
pub fn battery_current(p_out: f64, v_out: f64) -> f64 {
    p_out / v_out
}

/// Load resistance seen by the rectifier
///
/// # Formula
/// - R = V_o / I_bat
#[inline]
pub fn load_resistance(v_out: f64, i_bat: f64) -> f64 {
    v_out / i_bat
}

/// Voltage loss from converter inefficiency, power-ratio form
///
/// # Formula
/// ```text
///          P·(1 − η/100)
/// V_loss = ─────────────
///          I_bat·η/100
/// ```
///
/// Zero at 100 %, grows without bound as η → 0.
#[inline]
pub fn voltage_loss(p_out: f64, i_bat: f64, efficiency_percent: f64) -> f64 {
    let eta = efficiency_percent / 100.0;
    p_out * (1.0 - eta) / (i_bat * eta)
}

/// Integer turns ratio from the loss-corrected output voltage
///
/// # Formula
/// - n = round(V_in / (V_o + V_loss)), never below 1
///
/// Rounds half to even: 8.5 → 8, 9.5 → 10. A ratio too large for a `u32`
/// is rejected as `InvalidInput` on `input_voltage_nom_v`.
pub fn turns_ratio_corrected(v_in: f64, v_out_corrected: f64) -> CalcResult<u32> {
    let ratio = v_in / v_out_corrected;
    if ratio.round_ties_even() > f64::from(u32::MAX) {
        return Err(CalcError::invalid_input(
            "input_voltage_nom_v",
            v_in.to_string(),
            "Turns ratio does not fit in a winding count",
        ));
    }
    Ok(round_turns(ratio))
}

/// Round a real-valued turns ratio to the nearest realizable integer (≥ 1)
///
/// Saturates at `u32::MAX`; callers holding unbounded ratios go through
/// [`turns_ratio_corrected`].
#[inline]
pub fn round_turns(ratio: f64) -> u32 {
    let rounded = ratio.round_ties_even();
    if rounded < 1.0 {
        1
    } else {
        rounded as u32
    }
}

/// Equivalent AC resistance referred to the primary
///
/// # Formula
/// - R_e = 8·n²·R / π²
///
/// First-harmonic model of a full-wave rectifier feeding a resistive load.
#[inline]
pub fn equivalent_resistance(turns_ratio: u32, r_load: f64) -> f64 {
    let n = f64::from(turns_ratio);
    8.0 * n * n * r_load / (PI * PI)
}

/// Voltage gain limits at the input voltage extremes
///
/// # Formulas
/// - M_g_max = n·(V_o + V_loss) / V_in_min
/// - M_g_min = n·(V_o + V_loss) / V_in_max
///
/// # Returns
/// (M_g_max, M_g_min)
#[inline]
pub fn voltage_gain_limits(turns_ratio: u32, v_out_corrected: f64, v_in_min: f64, v_in_max: f64) -> (f64, f64) {
    let reflected = f64::from(turns_ratio) * v_out_corrected;
    (reflected / v_in_min, reflected / v_in_max)
}
