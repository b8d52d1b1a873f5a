//! Elementary periodic shapes.
//!
//! Every shape takes a phase in cycles and is bounded in [-1, 1].

use std::f64::consts::{PI, TAU};

/// Sine wave, `sin(2 pi phase)`.
pub fn sine(phase: f64) -> f64 {
    (TAU * phase).sin()
}

/// Cosine wave, `cos(2 pi phase)`.
pub fn cosine(phase: f64) -> f64 {
    (TAU * phase).cos()
}

/// Full-wave rectified cosine rescaled to [-1, 1].
///
/// Peaks at integer phases and has cusps at half-integer phases.
pub fn semisine(phase: f64) -> f64 {
    (PI * phase).cos().abs() * 2.0 - 1.0
}

/// Rising sawtooth, zero at integer phases, jumping from 1 to -1 at half-integer phases.
pub fn sawtooth(phase: f64) -> f64 {
    2.0 * (phase - (phase + 0.5).floor())
}

/// Triangle wave aligned with [`sine`]: 0 at phase 0, 1 at 0.25, -1 at 0.75.
pub fn triangle(phase: f64) -> f64 {
    1.0 - 4.0 * (phase - (phase + 0.25).floor() - 0.25).abs()
}

/// Square wave: 1 for the first half of the cycle, -1 for the second.
pub fn square(phase: f64) -> f64 {
    if phase - phase.floor() < 0.5 {
        1.0
    } else {
        -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: [f64; 9] = [-1.1, -0.3, 0.0, 0.125, 0.25, 0.5, 0.501, 1.0, 2.9];

    #[test]
    fn test_triangle_goes_up_and_down_linearly() {
        assert_eq!(triangle(0.0), 0.0);
        assert_eq!(triangle(0.125), 0.5);
        assert_eq!(triangle(0.25), 1.0);
        assert_eq!(triangle(0.5), 0.0);
        assert_eq!(triangle(0.75), -1.0);
        assert_eq!(triangle(1.0), 0.0);
    }

    #[test]
    fn test_sawtooth_values() {
        assert_eq!(sawtooth(0.0), 0.0);
        assert_eq!(sawtooth(0.25), 0.5);
        assert_eq!(sawtooth(0.5), -1.0);
        assert_eq!(sawtooth(0.75), -0.5);
        assert_eq!(sawtooth(-0.25), -0.5);
    }

    #[test]
    fn test_square_values() {
        assert_eq!(square(0.0), 1.0);
        assert_eq!(square(0.49), 1.0);
        assert_eq!(square(0.5), -1.0);
        assert_eq!(square(-0.25), -1.0);
        assert_eq!(square(3.1), 1.0);
    }

    #[test]
    fn test_semisine_values() {
        assert!((semisine(0.0) - 1.0).abs() < 1e-12);
        assert!((semisine(0.5) + 1.0).abs() < 1e-12);
        assert!((semisine(1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_elementary_shapes_are_periodic_and_bounded() {
        let shapes: [(&str, fn(f64) -> f64); 6] = [
            ("sine", sine),
            ("cosine", cosine),
            ("semisine", semisine),
            ("sawtooth", sawtooth),
            ("triangle", triangle),
            ("square", square),
        ];
        for (name, shape) in shapes {
            for &phase in &PHASES {
                let value = shape(phase);
                assert!(
                    (-1.0..=1.0).contains(&value),
                    "{} out of range at {}: {}",
                    name,
                    phase,
                    value
                );
                assert!(
                    (value - shape(phase + 1.0)).abs() < 1e-9,
                    "{} is not periodic at {}",
                    name,
                    phase
                );
            }
        }
    }
}
