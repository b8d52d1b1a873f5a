//! Periodic waveform functions.
//!
//! All shapes take a phase measured in cycles (period 1) and return a value in
//! [-1, 1]. Families with a `sharpness` parameter morph from a sine at 0 to
//! their hard-edged limit at 1; `bias` skews the cycle where supported.

mod basic;
mod lissajous;
mod misc;
mod soft;

pub use basic::{cosine, sawtooth, semisine, sine, square, triangle};
pub use lissajous::{lissajous13, lissajous21, lissajous23, lissajous25, lissajous34, lissajous35};
pub use misc::{clip, cub, half_circle, half_circle_dc, pinch, tang, tooth, tri, twine};
pub use soft::{
    soft_cosh, soft_log, soft_pulse, soft_sawtooth, soft_semisine, soft_sinh, soft_square,
    soft_tanh, soft_tent, soft_triangle,
};

/// Keeps bias and sharpness strictly inside their open intervals.
pub(crate) const EPSILON: f64 = 1e-6;

/// Fractional part in [0, 1).
pub(crate) fn fract(phase: f64) -> f64 {
    phase - phase.floor()
}

/// Phase folded into [-0.5, 0.5).
pub(crate) fn centered(phase: f64) -> f64 {
    phase - (phase + 0.5).floor()
}
