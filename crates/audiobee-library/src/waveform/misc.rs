//! Miscellaneous bounded shapes built from square-root, hyperbolic and tangent
//! transforms of the centered phase.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::centered;

/// Largest centered phase at which [`tang`] still evaluates `tan`; the pole sits at 0.5.
const TANG_POLE_GUARD: f64 = 0.499;

/// Clamps `x` to `[low, high]`.
///
/// Unlike [`f64::clamp`] this never panics when `low > high`; `low` wins in that case.
pub fn clip(x: f64, low: f64, high: f64) -> f64 {
    if x < low {
        return low;
    }
    if x > high {
        return high;
    }
    x
}

/// Odd cubic approximation of a sine, `3 sqrt(3) (x - 4x^3)`.
///
/// Peaks at exactly +-1 and is C1-continuous across cycle boundaries.
pub fn cub(phase: f64) -> f64 {
    let x = centered(phase);
    3.0 * 3f64.sqrt() * (x - 4.0 * x * x * x)
}

/// Two half-ellipses glued back to back, antisymmetric around phase 0.
pub fn twine(phase: f64) -> f64 {
    let x = centered(phase);
    4.0 * x * (1.0 - 4.0 * x * x).sqrt()
}

/// Upper half circle in [0, 1] (carries a DC offset).
pub fn half_circle_dc(phase: f64) -> f64 {
    let x = centered(phase);
    (1.0 - 4.0 * x * x).sqrt()
}

/// Half circle shifted and scaled to have zero mean.
pub fn half_circle(phase: f64) -> f64 {
    let x = centered(phase);
    (1.621_138_938_277_404_4 - 6.484_555_753_109_618 * x * x).sqrt() - 1.0
}

/// Tangent squashed by `tanh`, with the linear ramp removed.
///
/// Near the pole of `tan` the shape is continued linearly instead.
pub fn tang(phase: f64) -> f64 {
    let x = centered(phase);
    if x.abs() < TANG_POLE_GUARD {
        ((PI * phase).tan().tanh() - 2.0 * x) * 3.568_650_257_703_740_4
    } else {
        7.137_300_515_407_481 * (0.5 - phase + phase.floor())
    }
}

/// Pinched triangle: flat shoulders and sharp turning points.
pub fn pinch(phase: f64) -> f64 {
    let x = centered(phase);
    (0.99 - 1.98 * (x + x).abs()).atanh().atan() * 0.826_759_351_531_941_6
}

/// Periodic tooth with adjustable `tension` (default 1).
pub fn tooth(phase: f64, tension: f64) -> f64 {
    (tension * (PI * phase).tan().powi(2)).tanh() * 2.0 - 1.0
}

/// Triangle-like shape saturated through `tanh(tension * tan(..))`.
pub fn tri(phase: f64, tension: f64) -> f64 {
    let x = centered(phase);
    (tension.abs() * (TAU * x.abs() - FRAC_PI_2).tan()).tanh()
}
