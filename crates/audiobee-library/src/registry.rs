//! Table of library functions callable from expressions.
//!
//! Every entry maps the expression-facing name to a plain function pointer
//! taking its arguments as a slice. The evaluator checks the argument count
//! against [`Arity`] before calling, so implementations may index freely below
//! `arity.min` and use [`arg_or`] for optional trailing parameters.

use crate::pitch::{frequency_to_note_number, note_number_to_frequency};
use crate::waveform::*;

/// Default sharpness for soft families.
pub const DEFAULT_SHARPNESS: f64 = 0.0;

/// Default bias for biased families.
pub const DEFAULT_BIAS: f64 = 0.0;

/// Default tension for `tooth` and `tri`.
pub const DEFAULT_TENSION: f64 = 1.0;

/// Accepted argument count range, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    pub min: usize,
    pub max: usize,
}

impl Arity {
    /// Exactly `n` arguments.
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Between `min` and `max` arguments.
    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Returns true if `count` arguments are accepted.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

/// A named library function.
#[derive(Debug, Clone, Copy)]
pub struct LibraryFunction {
    /// Name used in expressions.
    pub name: &'static str,
    /// Accepted argument counts.
    pub arity: Arity,
    /// Implementation. Receives between `arity.min` and `arity.max` arguments.
    pub call: fn(&[f64]) -> f64,
}

/// Returns `args[index]`, or `default` when the argument was omitted.
pub fn arg_or(args: &[f64], index: usize, default: f64) -> f64 {
    args.get(index).copied().unwrap_or(default)
}

const fn entry(name: &'static str, arity: Arity, call: fn(&[f64]) -> f64) -> LibraryFunction {
    LibraryFunction { name, arity, call }
}

const ONE: Arity = Arity::exactly(1);
const SHAPED: Arity = Arity::range(1, 2);
const BIASED: Arity = Arity::range(1, 3);

/// Every library function, in documentation order.
pub static LIBRARY: &[LibraryFunction] = &[
    entry("ftom", ONE, |a| frequency_to_note_number(a[0])),
    entry("mtof", ONE, |a| note_number_to_frequency(a[0])),
    entry("clip", Arity::exactly(3), |a| clip(a[0], a[1], a[2])),
    entry("sine", ONE, |a| sine(a[0])),
    entry("cosine", ONE, |a| cosine(a[0])),
    entry("semisine", ONE, |a| semisine(a[0])),
    entry("sawtooth", ONE, |a| sawtooth(a[0])),
    entry("triangle", ONE, |a| triangle(a[0])),
    entry("square", ONE, |a| square(a[0])),
    entry("cub", ONE, |a| cub(a[0])),
    entry("twine", ONE, |a| twine(a[0])),
    entry("halfCircle", ONE, |a| half_circle(a[0])),
    entry("halfCircleDC", ONE, |a| half_circle_dc(a[0])),
    entry("tang", ONE, |a| tang(a[0])),
    entry("pinch", ONE, |a| pinch(a[0])),
    entry("tooth", SHAPED, |a| tooth(a[0], arg_or(a, 1, DEFAULT_TENSION))),
    entry("tri", SHAPED, |a| tri(a[0], arg_or(a, 1, DEFAULT_TENSION))),
    entry("softSemisine", SHAPED, |a| {
        soft_semisine(a[0], arg_or(a, 1, DEFAULT_SHARPNESS))
    }),
    entry("softSawtooth", SHAPED, |a| {
        soft_sawtooth(a[0], arg_or(a, 1, DEFAULT_SHARPNESS))
    }),
    entry("softTriangle", SHAPED, |a| {
        soft_triangle(a[0], arg_or(a, 1, DEFAULT_SHARPNESS))
    }),
    entry("softSquare", SHAPED, |a| {
        soft_square(a[0], arg_or(a, 1, DEFAULT_SHARPNESS))
    }),
    entry("softSinh", BIASED, |a| {
        soft_sinh(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
    entry("softCosh", SHAPED, |a| {
        soft_cosh(a[0], arg_or(a, 1, DEFAULT_SHARPNESS))
    }),
    entry("softTanh", SHAPED, |a| {
        soft_tanh(a[0], arg_or(a, 1, DEFAULT_SHARPNESS))
    }),
    entry("softLog", SHAPED, |a| soft_log(a[0], arg_or(a, 1, DEFAULT_SHARPNESS))),
    entry("softPulse", BIASED, |a| {
        soft_pulse(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
    entry("softTent", BIASED, |a| {
        soft_tent(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
    entry("lissajous21", BIASED, |a| {
        lissajous21(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
    entry("lissajous13", BIASED, |a| {
        lissajous13(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
    entry("lissajous23", BIASED, |a| {
        lissajous23(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
    entry("lissajous25", BIASED, |a| {
        lissajous25(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
    entry("lissajous34", BIASED, |a| {
        lissajous34(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
    entry("lissajous35", BIASED, |a| {
        lissajous35(a[0], arg_or(a, 1, DEFAULT_SHARPNESS), arg_or(a, 2, DEFAULT_BIAS))
    }),
];

/// Looks up a library function by its expression-facing name.
pub fn lookup(name: &str) -> Option<&'static LibraryFunction> {
    LIBRARY.iter().find(|function| function.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = LIBRARY.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), LIBRARY.len());
        assert_eq!(LIBRARY.len(), 33);
    }

    #[test]
    fn test_lookup() {
        let function = lookup("softSawtooth").unwrap();
        assert_eq!(function.arity, Arity::range(1, 2));
        assert_eq!((function.call)(&[0.25]), sine(0.25));
        assert_eq!((function.call)(&[0.1, 1.0]), soft_sawtooth(0.1, 1.0));
        assert!(lookup("softsawtooth").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_optional_arguments_use_defaults() {
        let tooth = lookup("tooth").unwrap();
        assert_eq!((tooth.call)(&[0.2]), super::tooth(0.2, DEFAULT_TENSION));

        let pulse = lookup("softPulse").unwrap();
        assert_eq!((pulse.call)(&[0.3, 0.5]), soft_pulse(0.3, 0.5, DEFAULT_BIAS));
    }

    #[test]
    fn test_every_entry_callable_at_min_and_max_arity() {
        let args = [0.3, 0.4, 0.2];
        for function in LIBRARY {
            for count in [function.arity.min, function.arity.max] {
                let value = (function.call)(&args[..count]);
                assert!(value.is_finite(), "{} with {} args", function.name, count);
            }
        }
    }

    #[test]
    fn test_arity_display() {
        assert_eq!(Arity::exactly(1).to_string(), "1");
        assert_eq!(Arity::range(1, 3).to_string(), "1..=3");
        assert!(Arity::range(1, 3).accepts(2));
        assert!(!Arity::range(1, 3).accepts(0));
    }
}
