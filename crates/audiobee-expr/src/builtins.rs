//! Numeric built-ins available to every expression, and named constants.

use std::f64::consts::{E, PI, TAU};

use audiobee_library::{Arity, LibraryFunction};

/// Largest argument count accepted by any callable.
pub const MAX_ARGS: usize = 8;

const fn builtin(name: &'static str, arity: Arity, call: fn(&[f64]) -> f64) -> LibraryFunction {
    LibraryFunction { name, arity, call }
}

const ONE: Arity = Arity::exactly(1);
const TWO: Arity = Arity::exactly(2);
const VARIADIC: Arity = Arity::range(1, MAX_ARGS);

fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Built-in functions. These take precedence over library functions.
pub static BUILTINS: &[LibraryFunction] = &[
    builtin("sin", ONE, |a| a[0].sin()),
    builtin("cos", ONE, |a| a[0].cos()),
    builtin("tan", ONE, |a| a[0].tan()),
    builtin("asin", ONE, |a| a[0].asin()),
    builtin("acos", ONE, |a| a[0].acos()),
    builtin("atan", ONE, |a| a[0].atan()),
    builtin("atan2", TWO, |a| a[0].atan2(a[1])),
    builtin("sinh", ONE, |a| a[0].sinh()),
    builtin("cosh", ONE, |a| a[0].cosh()),
    builtin("tanh", ONE, |a| a[0].tanh()),
    builtin("asinh", ONE, |a| a[0].asinh()),
    builtin("acosh", ONE, |a| a[0].acosh()),
    builtin("atanh", ONE, |a| a[0].atanh()),
    builtin("exp", ONE, |a| a[0].exp()),
    builtin("expm1", ONE, |a| a[0].exp_m1()),
    builtin("log", ONE, |a| a[0].ln()),
    builtin("ln", ONE, |a| a[0].ln()),
    builtin("log2", ONE, |a| a[0].log2()),
    builtin("log10", ONE, |a| a[0].log10()),
    builtin("log1p", ONE, |a| a[0].ln_1p()),
    builtin("sqrt", ONE, |a| a[0].sqrt()),
    builtin("cbrt", ONE, |a| a[0].cbrt()),
    builtin("abs", ONE, |a| a[0].abs()),
    builtin("sign", ONE, |a| sign(a[0])),
    builtin("floor", ONE, |a| a[0].floor()),
    builtin("ceil", ONE, |a| a[0].ceil()),
    builtin("round", ONE, |a| a[0].round()),
    builtin("trunc", ONE, |a| a[0].trunc()),
    builtin("fract", ONE, |a| a[0] - a[0].floor()),
    builtin("min", VARIADIC, |a| a.iter().copied().fold(f64::INFINITY, f64::min)),
    builtin("max", VARIADIC, |a| {
        a.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }),
    builtin("pow", TWO, |a| a[0].powf(a[1])),
    builtin("hypot", TWO, |a| a[0].hypot(a[1])),
];

/// Resolves a function name: built-ins first, then the waveform library.
pub fn lookup_function(name: &str) -> Option<&'static LibraryFunction> {
    BUILTINS
        .iter()
        .find(|function| function.name == name)
        .or_else(|| audiobee_library::lookup(name))
}

/// Resolves a named constant.
pub fn lookup_constant(name: &str) -> Option<f64> {
    match name {
        "PI" => Some(PI),
        "TAU" => Some(TAU),
        "E" => Some(E),
        _ => None,
    }
}
