//! Sharpness-controlled families.
//!
//! Each function equals a sine (or cosine) at `sharpness = 0` and converges to a
//! hard-edged limit as `sharpness` approaches 1. Sharpness is clipped to [0, 1].
//! At exact discontinuities the limit takes the midpoint of the jump so that the
//! family stays continuous in `sharpness` at every phase.

use std::f64::consts::{PI, TAU};

use super::basic::{cosine, semisine, sine, triangle};
use super::misc::clip;
use super::{centered, fract, EPSILON};

/// Stiffness `k` in `(0, inf)` mapped from sharpness in `(0, 1)`.
fn stiffness(sharpness: f64) -> f64 {
    let u = (1.0 - sharpness) * (1.0 - sharpness);
    (1.0 - u) / u
}

/// Radius `r` in `(0, 1)` mapped from sharpness in `(0, 1)`.
fn radius(sharpness: f64) -> f64 {
    1.0 - (1.0 - sharpness) * (1.0 - sharpness)
}

/// Angle of the skewed cycle: `2 pi phase + bias (1 - cos(2 pi phase))`.
fn warp(phase: f64, bias: f64) -> f64 {
    let bias = clip(bias, EPSILON - 1.0, 1.0 - EPSILON);
    let x = TAU * phase;
    x + bias * (1.0 - x.cos())
}

/// Phase reduced to [0, 1), or `None` at the half-cycle points where the
/// sawtooth and square limits jump. Those points evaluate to 0 at every
/// sharpness.
fn off_jump(phase: f64) -> Option<f64> {
    let u = fract(phase);
    (u != 0.0 && u != 0.5).then_some(u)
}

fn sawtooth_limit(phase: f64) -> f64 {
    let x = centered(phase);
    if x == -0.5 {
        0.0
    } else {
        2.0 * x
    }
}

fn square_limit(phase: f64) -> f64 {
    let u = fract(phase);
    if u == 0.0 || u == 0.5 {
        0.0
    } else if u < 0.5 {
        1.0
    } else {
        -1.0
    }
}

/// Sine bending into a sawtooth.
pub fn soft_sawtooth(phase: f64, sharpness: f64) -> f64 {
    let s = clip(sharpness, 0.0, 1.0);
    if s == 0.0 {
        return sine(phase);
    }
    let Some(u) = off_jump(phase) else {
        return 0.0;
    };
    if s == 1.0 {
        return sawtooth_limit(u);
    }
    let r = radius(s);
    let x = TAU * u;
    (r * x.sin() / (1.0 + r * x.cos())).atan() / r.asin()
}

/// Sine bending into a square via `atan` saturation.
pub fn soft_square(phase: f64, sharpness: f64) -> f64 {
    let s = clip(sharpness, 0.0, 1.0);
    if s == 0.0 {
        return sine(phase);
    }
    let Some(u) = off_jump(phase) else {
        return 0.0;
    };
    if s == 1.0 {
        return square_limit(u);
    }
    let k = stiffness(s);
    (k * sine(u)).atan() / k.atan()
}

/// Sine bending into a square via `tanh` saturation.
pub fn soft_tanh(phase: f64, sharpness: f64) -> f64 {
    let s = clip(sharpness, 0.0, 1.0);
    if s == 0.0 {
        return sine(phase);
    }
    let Some(u) = off_jump(phase) else {
        return 0.0;
    };
    if s == 1.0 {
        return square_limit(u);
    }
    let k = stiffness(s);
    (k * sine(u)).tanh() / k.tanh()
}

/// Sine bending into a triangle.
pub fn soft_triangle(phase: f64, sharpness: f64) -> f64 {
    let s = clip(sharpness, 0.0, 1.0);
    if s == 0.0 {
        return sine(phase);
    }
    if s == 1.0 {
        return triangle(phase);
    }
    let r = radius(s);
    (r * sine(phase)).asin() / r.asin()
}

/// Cosine bending into a full-wave rectified cosine.
pub fn soft_semisine(phase: f64, sharpness: f64) -> f64 {
    let s = clip(sharpness, 0.0, 1.0);
    if s == 0.0 {
        return cosine(phase);
    }
    if s == 1.0 {
        return semisine(phase);
    }
    let a = 1.0 / stiffness(s);
    let y = (PI * phase).cos();
    let v = ((y * y + a * a).sqrt() - a) / ((1.0 + a * a).sqrt() - a);
    2.0 * v - 1.0
}

/// Skewed sine pushed through a normalized `sinh`, narrowing into spikes at the peaks.
pub fn soft_sinh(phase: f64, sharpness: f64, bias: f64) -> f64 {
    let s = clip(sharpness, 0.0, 1.0);
    let y = warp(phase, bias).sin();
    if s == 0.0 {
        return y;
    }
    if s == 1.0 {
        return if y == 1.0 {
            1.0
        } else if y == -1.0 {
            -1.0
        } else {
            0.0
        };
    }
    if y == 0.0 {
        return 0.0;
    }
    // sinh(k y) / sinh(k), rewritten to stay finite for large k.
    let k = stiffness(s);
    let ay = y.abs();
    let v = (k * (ay - 1.0)).exp() * (-2.0 * k * ay).exp_m1() / (-2.0 * k).exp_m1();
    v.copysign(y)
}

/// Double-frequency cosine pushed through a normalized `cosh`, narrowing into
/// pulses at integer phases and settling at -1 everywhere else.
pub fn soft_cosh(phase: f64, sharpness: f64) -> f64 {
    let s = clip(sharpness, 0.0, 1.0);
    let y = (PI * phase).cos();
    if s == 0.0 {
        return 2.0 * y * y - 1.0;
    }
    if s == 1.0 {
        return if y.abs() == 1.0 { 1.0 } else { -1.0 };
    }
    // (cosh(k y) - 1) / (cosh(k) - 1), rewritten to stay finite for large k.
    let k = stiffness(s);
    let ay = y.abs();
    let ratio = (-k * ay).exp_m1() / (-k).exp_m1();
    2.0 * (k * (ay - 1.0)).exp() * ratio * ratio - 1.0
}

/// Sine compressed logarithmically towards its upper half.
///
/// Has no hard-edged limit; sharpness is clipped just below 1.
pub fn soft_log(phase: f64, sharpness: f64) -> f64 {
    let s = clip(sharpness, 0.0, 1.0 - EPSILON);
    let y = sine(phase);
    if s == 0.0 {
        return y;
    }
    let k = stiffness(s);
    let u = (1.0 + y) / 2.0;
    2.0 * (k * u).ln_1p() / k.ln_1p() - 1.0
}

/// Pulse with adjustable duty cycle: [`soft_square`] over a skewed cycle.
pub fn soft_pulse(phase: f64, sharpness: f64, bias: f64) -> f64 {
    soft_square(warp(phase, bias) / TAU, sharpness)
}

/// Asymmetric triangle: [`soft_triangle`] over a skewed cycle.
pub fn soft_tent(phase: f64, sharpness: f64, bias: f64) -> f64 {
    soft_triangle(warp(phase, bias) / TAU, sharpness)
}
