//! # Transformer Current Formulas
//!
//! Single-core current expressions for an LLC transformer operating near
//! resonance, plus the parallel-core corrections.
//!
//! ## Notation
//!
//! - `n` = Turns ratio
//! - `V_o`, `I_o` = Output voltage (V) and current (A)
//! - `L_m` = Magnetizing inductance (H)
//! - `f_s`, `f_0` = Switching and resonant frequency (Hz)
//! - `ptrf` = Number of parallel transformer cores

use std::f64::consts::{PI, SQRT_2};

use super::battery::round_turns;

/// Peak magnetizing current
///
/// # Formula
/// - I_Lm_max = n·V_o / (4·L_m·f_s)
#[inline]
pub fn magnetizing_current_peak(n: f64, v_o: f64, l_m: f64, f_s: f64) -> f64 {
    n * v_o / (4.0 * l_m * f_s)
}

/// Radicand of the RMS resonant current
///
/// ```text
/// I_Lr_rms² = 1/48·(n·V_o/(f_s·L_m))² + π²/8·(I_o/n·√(f_0/f_s))² − I_o·V_o/(2·L_m)·(1/f_s − 1/f_0)
/// ```
///
/// Non-negative for all positive inputs: as a quadratic in 1/L_m its
/// discriminant is I_o²V_o²·[(1/f_s − 1/f_0)²/4 − π²f_0/(96·f_s³)] < 0.
#[inline]
pub fn resonant_current_rms_squared(n: f64, v_o: f64, i_o: f64, l_m: f64, f_s: f64, f_0: f64) -> f64 {
    let magnetizing = (n * v_o / (f_s * l_m)).powi(2) / 48.0;
    let load = PI * PI / 8.0 * (i_o / n * (f_0 / f_s).sqrt()).powi(2);
    let overlap = i_o * v_o / l_m * 0.5 * (1.0 / f_s - 1.0 / f_0);
    magnetizing + load - overlap
}

/// Secondary RMS current
///
/// # Formula
/// - I_sec_rms = √2·π·I_o / 4 · √(f_0/f_s)
#[inline]
pub fn secondary_current_rms(i_o: f64, f_0: f64, f_s: f64) -> f64 {
    SQRT_2 * PI * i_o / 4.0 * (f_0 / f_s).sqrt()
}

/// Peak resonant current
///
/// # Formula
/// - I_Lr_max = √[(π·I_o·f_0 / (2·n·f_s))² + I_Lm_max²]
#[inline]
pub fn resonant_current_peak(n: f64, i_o: f64, f_0: f64, f_s: f64, i_lm_max: f64) -> f64 {
    (PI * i_o * f_0 / (2.0 * n * f_s)).hypot(i_lm_max)
}

/// Per-core turns ratio with `ptrf` cores in parallel
///
/// # Formula
/// - n_eff = round(n / ptrf), never below 1
#[inline]
pub fn corrected_turns_ratio(n: u32, ptrf: u32) -> u32 {
    round_turns(f64::from(n) / f64::from(ptrf))
}

/// Per-core magnetizing inductance with `ptrf` cores in parallel
///
/// # Formula
/// - L_m_eff = L_m / ptrf
#[inline]
pub fn corrected_magnetizing_inductance(l_m: f64, ptrf: u32) -> f64 {
    l_m / f64::from(ptrf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnetizing_current_peak() {
        // (8 × 48) / (4 × 500µH × 100kHz) = 1.92 A
        let i = magnetizing_current_peak(8.0, 48.0, 500e-6, 100e3);
        assert!((i - 1.92).abs() < 1e-9);
    }

    #[test]
    fn test_secondary_rms_at_resonance() {
        // √2·π·10/4 ≈ 11.107 A
        let i = secondary_current_rms(10.0, 100e3, 100e3);
        assert!((i - 11.1072).abs() < 1e-3);
    }

    #[test]
    fn test_resonant_rms_at_resonance_has_no_overlap_term() {
        let sq = resonant_current_rms_squared(8.0, 48.0, 20.0, 500e-6, 100e3, 100e3);
        let expected = (8.0_f64 * 48.0 / (100e3 * 500e-6)).powi(2) / 48.0 + PI * PI / 8.0 * (20.0_f64 / 8.0).powi(2);
        assert!((sq - expected).abs() < 1e-9);
    }

    #[test]
    fn test_resonant_peak_exceeds_magnetizing_peak() {
        let i_lm = 2.0;
        let i = resonant_current_peak(8.0, 20.0, 100e3, 100e3, i_lm);
        assert!(i > i_lm);
    }

    #[test]
    fn test_corrected_turns_ratio() {
        assert_eq!(corrected_turns_ratio(8, 1), 8);
        assert_eq!(corrected_turns_ratio(8, 2), 4);
        assert_eq!(corrected_turns_ratio(9, 2), 4); // 4.5 → 4
        assert_eq!(corrected_turns_ratio(1, 10), 1);
    }

    #[test]
    fn test_corrected_magnetizing_inductance() {
        assert_eq!(corrected_magnetizing_inductance(500e-6, 1), 500e-6);
        assert!((corrected_magnetizing_inductance(500e-6, 2) - 250e-6).abs() < 1e-15);
    }
}
