//! # LLC Converter Equations
//!
//! Closed-form formulas used by the calculators. Keeping them in one place
//! makes each expression easy to check against its reference and reuse
//! across calculation types.
//!
//! Formula functions take plain `f64`/`u32` arguments and do no validation;
//! the one exception is the gain solver, which is a calculator in its own
//! right and checks its parameters.
//!
//! ## Modules
//!
//! - [`gain`] - Tank voltage gain and the frequency-ratio solver
//! - [`battery`] - Load-side quantities and turns ratio
//! - [`magnetics`] - Transformer currents and parallel-core corrections
//!
//! ## References
//!
//! - R. W. Erickson, D. Maksimovic, Fundamentals of Power Electronics, ch. 19 (FHA)
//! - B. Yang, Topology Investigation for Front End DC/DC Power Conversion, 2003

pub mod battery;
pub mod gain;
pub mod magnetics;

pub use battery::{
    battery_current,
    equivalent_resistance,
    load_resistance,
    round_turns,
    turns_ratio_corrected,
    voltage_gain_limits,
    voltage_loss,
};

pub use gain::{
    frequency_polynomial_coefficients,
    peak_gain,
    real_cubic_roots,
    solve_frequency_ratio,
    voltage_gain,
    GainPeak,
    ResonanceBranch,
};

pub use magnetics::{
    corrected_magnetizing_inductance,
    corrected_turns_ratio,
    magnetizing_current_peak,
    resonant_current_peak,
    resonant_current_rms_squared,
    secondary_current_rms,
};
