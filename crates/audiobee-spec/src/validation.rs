//! Option validation.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::options::{is_reserved_name, AudioBeeOptions, Local};

/// Names usable as expression identifiers.
const LOCAL_NAME_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

static LOCAL_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn local_name_regex() -> &'static Regex {
    LOCAL_NAME_REGEX.get_or_init(|| Regex::new(LOCAL_NAME_PATTERN).expect("invalid regex pattern"))
}

/// Validates render options.
///
/// Errors mean the render cannot start. Warnings flag options that render
/// but probably not as intended.
///
/// # Example
/// ```
/// use audiobee_spec::{AudioBeeOptions, validation::validate_options};
///
/// let options = AudioBeeOptions::builder(44_100, 44_100)
///     .velocity(1.0)
///     .frequency(440.0)
///     .build();
///
/// assert!(validate_options(&options).is_ok());
/// ```
pub fn validate_options(options: &AudioBeeOptions) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_dimensions(options, &mut result);
    validate_sweep(options, &mut result);
    validate_loop(options, &mut result);
    validate_locals(options, &mut result);

    result
}

fn validate_dimensions(options: &AudioBeeOptions, result: &mut ValidationResult) {
    if options.sample_rate == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSampleRate,
            "sample rate must be positive",
            "sample_rate",
        ));
    }
    if options.length == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidLength,
            "length must be at least one sample",
            "length",
        ));
    }
    if options.number_of_channels == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidChannelCount,
            "number of channels must be at least 1",
            "number_of_channels",
        ));
    }
}

fn validate_sweep(options: &AudioBeeOptions, result: &mut ValidationResult) {
    if options.velocities.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoVelocities,
            "at least one velocity is required",
            "velocities",
        ));
    }
    if options.frequencies.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoFrequencies,
            "at least one frequency is required",
            "frequencies",
        ));
    }

    for (i, velocity) in options.velocities.iter().enumerate() {
        if !velocity.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteValue,
                format!("velocity must be finite, got {}", velocity),
                format!("velocities[{}]", i),
            ));
        }
    }

    let quantized = options.quantize_period || options.quantize_loop_end;
    for (i, frequency) in options.frequencies.iter().enumerate() {
        if !frequency.is_finite() {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteValue,
                format!("frequency must be finite, got {}", frequency),
                format!("frequencies[{}]", i),
            ));
        } else if quantized && *frequency <= 0.0 {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::QuantizedNonPositiveFrequency,
                format!(
                    "frequency {} is not positive; quantized pitch and loop are undefined",
                    frequency
                ),
                format!("frequencies[{}]", i),
            ));
        }
    }
}

fn validate_loop(options: &AudioBeeOptions, result: &mut ValidationResult) {
    let mut finite = true;
    for (path, value) in [
        ("loop_start_t", options.loop_start_t),
        ("loop_end_t", options.loop_end_t),
    ] {
        if !value.is_finite() {
            finite = false;
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteValue,
                format!("loop time must be finite, got {}", value),
                path,
            ));
        }
    }
    if !finite {
        return;
    }

    if options.loop_end_t < options.loop_start_t {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::LoopEndBeforeStart,
            format!(
                "loop end {}s precedes loop start {}s",
                options.loop_end_t, options.loop_start_t
            ),
            "loop_end_t",
        ));
    }

    if options.sample_rate > 0 {
        let end_sample = (options.loop_end_t * f64::from(options.sample_rate)).round();
        if end_sample > options.length as f64 {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::LoopEndBeyondBuffer,
                format!(
                    "loop end at sample {} lies beyond the buffer of {} samples",
                    end_sample, options.length
                ),
                "loop_end_t",
            ));
        }
    }
}

fn validate_locals(options: &AudioBeeOptions, result: &mut ValidationResult) {
    for (name, value) in &options.locals {
        let path = format!("locals.{}", name);

        if !local_name_regex().is_match(name) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidLocalName,
                format!("'{}' is not a valid identifier", name),
                path.clone(),
            ));
        } else if is_reserved_name(name) {
            // Never bound, so its length is irrelevant.
            result.add_warning(ValidationWarning::with_path(
                WarningCode::ReservedLocalName,
                format!("'{}' is a reserved name and will be shadowed", name),
                path,
            ));
            continue;
        }

        if let Local::Sequence(values) = value {
            if values.len() != options.length {
                result.add_error(ValidationError::with_path(
                    ErrorCode::LocalLengthMismatch,
                    format!(
                        "sequence has {} values but the buffer has {} samples",
                        values.len(),
                        options.length
                    ),
                    path,
                ));
            }
        }
    }
}
