//! # Resonant Tank Gain Equations
//!
//! First-harmonic voltage gain of a series LLC tank and the inverse problem:
//! the normalized switching frequency that produces a required gain.
//!
//! ## Notation
//!
//! - `F` = Normalized frequency f_sw / f_0
//! - `Q` = Quality factor sqrt(Lr/Cr) / R_e
//! - `Ln` = Inductance ratio Lm / Lr
//! - `M` = Normalized voltage gain (M = 1 at resonance)
//!
//! ## Gain Curve Shape
//!
//! ```text
//!   M
//!   │      ╭─╮
//!   │     ╱   ╲        below resonance: M ≥ 1 between the peak and F = 1
//! 1 ┼────╱─────●────── above resonance: M ≤ 1, falls toward 0
//!   │   ╱       ╲___
//!   │__╱             ‾‾‾───
//!   └──────────┼──────────── F
//!              1
//! ```
//!
//! The curve is not monotonic, so `M(F) = M_target` has up to two positive
//! roots. The root nearest resonance on the requested side is the inductive
//! (ZVS) operating point.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Gains within this distance of unity resolve to F = 1 exactly
pub const UNITY_GAIN_TOLERANCE: f64 = 1e-12;

/// Slack when assigning a root to one side of F = 1
const BRANCH_EPSILON: f64 = 1e-9;

/// Fixed iteration cap for bisection and golden-section searches
const SEARCH_ITERATIONS: usize = 200;

/// Relative tolerance for treating a critical point as a double root
const TANGENCY_TOLERANCE: f64 = 1e-12;

/// Which side of resonance a frequency root must lie on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResonanceBranch {
    /// F ≤ 1, gain ≥ 1 (boost operation)
    BelowResonance,
    /// F ≥ 1, gain ≤ 1 (buck operation)
    AboveResonance,
}

impl ResonanceBranch {
    /// Branch that delivers `gain` on the inductive side of the curve
    pub fn for_gain(gain: f64) -> Self {
        if gain > 1.0 {
            ResonanceBranch::BelowResonance
        } else {
            ResonanceBranch::AboveResonance
        }
    }
}

impl fmt::Display for ResonanceBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResonanceBranch::BelowResonance => write!(f, "below resonance"),
            ResonanceBranch::AboveResonance => write!(f, "above resonance"),
        }
    }
}

/// Maximum of the gain curve below resonance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GainPeak {
    /// Normalized frequency at which the peak occurs
    pub frequency_ratio: f64,
    /// Peak gain
    pub gain: f64,
}

/// Normalized FHA voltage gain of the LLC tank
///
/// # Formula
/// ```text
///                    Ln·F²
/// M(F) = ─────────────────────────────────────────
///        √[((Ln+1)·F² − 1)² + Q²·Ln²·F²·(F² − 1)²]
/// ```
///
/// M(1) = 1 for every Q and Ln.
#[inline]
pub fn voltage_gain(f_ratio: f64, q: f64, ln: f64) -> f64 {
    let f2 = f_ratio * f_ratio;
    let real = (ln + 1.0) * f2 - 1.0;
    let imag = q * ln * f_ratio * (f2 - 1.0);
    ln * f2 / (real * real + imag * imag).sqrt()
}

/// Coefficients `[c3, c2, c1, c0]` of the cubic in u = F² whose positive
/// roots satisfy M(√u) = M_target
///
/// # Formula
/// ```text
/// Q²·u³ + (a² − 2Q² − 1/M²)·u² + (Q² − 2a/Ln)·u + 1/Ln² = 0,   a = 1 + 1/Ln
/// ```
///
/// At u = 1 the polynomial equals 1 − 1/M², so u = 1 is a root exactly when M = 1.
#[inline]
pub fn frequency_polynomial_coefficients(gain_target: f64, q: f64, ln: f64) -> [f64; 4] {
    let a = 1.0 + 1.0 / ln;
    let q2 = q * q;
    [
        q2,
        a * a - 2.0 * q2 - 1.0 / (gain_target * gain_target),
        q2 - 2.0 * a / ln,
        1.0 / (ln * ln),
    ]
}

/// All real roots of `c3·u³ + c2·u² + c1·u + c0`, ascending.
///
/// The critical points of the cubic split the Cauchy bound interval into
/// monotonic pieces; each piece holds at most one root and is bisected a
/// fixed number of times. A critical point where the cubic vanishes is
/// reported as a double root.
pub fn real_cubic_roots(coefficients: [f64; 4]) -> Vec<f64> {
    let [c3, c2, c1, c0] = coefficients;
    if c3 == 0.0 || !coefficients.iter().all(|c| c.is_finite()) {
        return Vec::new();
    }

    let eval = |u: f64| ((c3 * u + c2) * u + c1) * u + c0;
    let bound = 1.0 + (c2 / c3).abs().max((c1 / c3).abs()).max((c0 / c3).abs());
    let scale = coefficients.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));

    // Derivative 3c3·u² + 2c2·u + c1
    let (a, b, c) = (3.0 * c3, 2.0 * c2, c1);
    let discriminant = b * b - 4.0 * a * c;
    let mut critical = Vec::with_capacity(2);
    if discriminant >= 0.0 {
        let s = discriminant.sqrt();
        let (x1, x2) = ((-b - s) / (2.0 * a), (-b + s) / (2.0 * a));
        critical.push(x1.min(x2));
        critical.push(x1.max(x2));
    }

    let mut breakpoints = vec![-bound];
    breakpoints.extend(critical.iter().copied().filter(|x| x.abs() < bound));
    breakpoints.push(bound);

    let mut roots: Vec<f64> = critical
        .iter()
        .copied()
        .filter(|&x| eval(x).abs() <= TANGENCY_TOLERANCE * scale)
        .collect();

    for window in breakpoints.windows(2) {
        if let Some(root) = bisect(&eval, window[0], window[1]) {
            roots.push(root);
        }
    }

    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() <= 1e-12 * (1.0 + b.abs()));
    roots
}

fn bisect(eval: &impl Fn(f64) -> f64, mut lo: f64, mut hi: f64) -> Option<f64> {
    let mut f_lo = eval(lo);
    let f_hi = eval(hi);
    if f_lo == 0.0 {
        return Some(lo);
    }
    if f_hi == 0.0 {
        return Some(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return None;
    }

    for _ in 0..SEARCH_ITERATIONS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = eval(mid);
        if f_mid == 0.0 {
            return Some(mid);
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Some(0.5 * (lo + hi))
}

/// Solve M(F) = M_target for the normalized frequency F on the given branch.
///
/// Below resonance the largest root F ≤ 1 is returned (the inductive side of
/// the gain peak); above resonance the smallest root F ≥ 1.
///
/// # Errors
/// * `InvalidInput` - any of `gain_target`, `q`, `ln` is not positive
/// * `NoRealRoot` - the gain is unreachable on that branch for this Q/Ln pair
///
/// # Example
/// ```rust
/// use llc_core::equations::gain::{solve_frequency_ratio, voltage_gain, ResonanceBranch};
///
/// let f = solve_frequency_ratio(0.8, 0.4, 5.0, ResonanceBranch::AboveResonance).unwrap();
/// assert!(f > 1.0);
/// assert!((voltage_gain(f, 0.4, 5.0) - 0.8).abs() < 1e-6);
/// ```
pub fn solve_frequency_ratio(gain_target: f64, q: f64, ln: f64, branch: ResonanceBranch) -> CalcResult<f64> {
    require_positive("gain_target", gain_target, "Target gain")?;
    require_positive("quality_factor", q, "Quality factor")?;
    require_positive("inductance_ratio", ln, "Inductance ratio")?;

    if (gain_target - 1.0).abs() <= UNITY_GAIN_TOLERANCE {
        return Ok(1.0);
    }

    let roots = real_cubic_roots(frequency_polynomial_coefficients(gain_target, q, ln));
    let ratios = roots.into_iter().filter(|u| *u > 0.0).map(f64::sqrt);

    let selected = match branch {
        ResonanceBranch::BelowResonance => ratios
            .filter(|f| *f <= 1.0 + BRANCH_EPSILON)
            .map(|f| f.min(1.0))
            .reduce(f64::max),
        ResonanceBranch::AboveResonance => ratios
            .filter(|f| *f >= 1.0 - BRANCH_EPSILON)
            .map(|f| f.max(1.0))
            .reduce(f64::min),
    };

    selected.ok_or_else(|| CalcError::no_real_root(gain_target, q, ln, branch))
}

/// Locate the gain peak on (0, 1] by golden-section search.
///
/// The peak sits below resonance for every finite Q; heavily damped tanks
/// peak barely above unity just below F = 1. This bounds the gain a boost
/// design can request.
pub fn peak_gain(q: f64, ln: f64) -> CalcResult<GainPeak> {
    require_positive("quality_factor", q, "Quality factor")?;
    require_positive("inductance_ratio", ln, "Inductance ratio")?;

    let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut x1 = hi - inv_phi * (hi - lo);
    let mut x2 = lo + inv_phi * (hi - lo);
    let mut m1 = voltage_gain(x1, q, ln);
    let mut m2 = voltage_gain(x2, q, ln);

    for _ in 0..SEARCH_ITERATIONS {
        if hi - lo <= f64::EPSILON {
            break;
        }
        if m1 < m2 {
            lo = x1;
            x1 = x2;
            m1 = m2;
            x2 = lo + inv_phi * (hi - lo);
            m2 = voltage_gain(x2, q, ln);
        } else {
            hi = x2;
            x2 = x1;
            m2 = m1;
            x1 = hi - inv_phi * (hi - lo);
            m1 = voltage_gain(x1, q, ln);
        }
    }

    let frequency_ratio = 0.5 * (lo + hi);
    Ok(GainPeak {
        frequency_ratio,
        gain: voltage_gain(frequency_ratio, q, ln),
    })
}
