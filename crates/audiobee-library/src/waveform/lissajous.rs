//! Waveforms traced as the polar angle of a Lissajous figure.
//!
//! `lissajousAB` follows the angle of the curve `(cos(A t + bias), sin(B t))`,
//! unwrapped so that the output is continuous over a cycle. `sharpness` in
//! [-1, 1] stretches one axis against the other and `bias` rotates the figure.

use std::f64::consts::{PI, TAU};

use super::misc::clip;
use super::{centered, EPSILON};

fn shape(sharpness: f64) -> f64 {
    clip(sharpness, -1.0, 1.0)
}

fn skew(bias: f64, scale: f64) -> f64 {
    scale * clip(bias, EPSILON - 1.0, 1.0 - EPSILON)
}

/// Moves the angle into the half turn that matches the sign of `x`.
fn unwrap_by_sign(x: f64, angle: f64) -> f64 {
    if x > 0.0 && angle < 0.0 {
        angle + TAU
    } else if x < 0.0 && angle > 0.0 {
        angle - TAU
    } else {
        angle
    }
}

/// 2:1 figure.
pub fn lissajous21(phase: f64, sharpness: f64, bias: f64) -> f64 {
    let s = shape(sharpness);
    let b = skew(bias, 0.5 * PI);
    let angle = ((1.0 + s) * (TAU * phase).sin()).atan2((1.0 - s) * (4.0 * PI * phase + b).cos());
    angle * 4.0 / (3.0 * PI)
}

/// 1:3 figure.
pub fn lissajous13(phase: f64, sharpness: f64, bias: f64) -> f64 {
    let x = centered(phase);
    let s = shape(sharpness);
    let b = skew(bias, PI / 6.0);
    let angle = ((1.0 + s) * (3.0 * PI * x).sin()).atan2((1.0 - s) * (PI * x + b).cos());
    angle * 2.0 / PI + 2.0 * x
}

/// 2:3 figure.
pub fn lissajous23(phase: f64, sharpness: f64, bias: f64) -> f64 {
    let x = centered(phase);
    let s = shape(sharpness);
    let b = skew(bias, PI / 6.0);
    let angle = ((1.0 + s) * (6.0 * PI * x).sin()).atan2((1.0 - s) * (4.0 * PI * x + b).cos());
    unwrap_by_sign(x, angle) * 4.0 / (5.0 * PI)
}

/// 2:5 figure.
pub fn lissajous25(phase: f64, sharpness: f64, bias: f64) -> f64 {
    let x = centered(phase);
    let s = shape(sharpness);
    let b = skew(bias, 0.1 * PI);
    let mut angle =
        ((-1.0 - s) * (10.0 * PI * x).sin()).atan2((1.0 - s) * (4.0 * PI * x + b).cos());
    if x > 0.15 && x < 0.35 && angle < 0.0 {
        angle += TAU;
    } else if x > -0.35 && x < -0.15 && angle > 0.0 {
        angle -= TAU;
    }
    angle * 4.0 / (5.0 * PI)
}

/// 3:4 figure.
pub fn lissajous34(phase: f64, sharpness: f64, bias: f64) -> f64 {
    let x = centered(phase);
    let s = shape(sharpness);
    let b = skew(bias, PI / 6.0);
    let mut angle = ((1.0 - s) * (6.0 * PI * x).sin()).atan2((1.0 + s) * (8.0 * PI * x + b).cos());
    if x > 0.1 && x < 0.4 && angle <= 0.0 {
        angle += TAU;
    } else if x > -0.4 && x < -0.1 && angle >= 0.0 {
        angle -= TAU;
    }
    angle * 4.0 / (7.0 * PI)
}

/// 3:5 figure.
pub fn lissajous35(phase: f64, sharpness: f64, bias: f64) -> f64 {
    let x = centered(phase);
    let s = shape(sharpness);
    let b = skew(bias, 0.1 * PI);
    let angle = ((1.0 + s) * (5.0 * PI * x).sin()).atan2((1.0 - s) * (3.0 * PI * x + b).cos());
    unwrap_by_sign(x, angle) / PI - x
}
