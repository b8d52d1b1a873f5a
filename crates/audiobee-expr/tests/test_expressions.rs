//! End-to-end expression evaluation over realistic audio contexts.

use std::f64::consts::TAU;

use audiobee_expr::{Context, Evaluate, ExprError, ExpressionEvaluator};

const SAMPLE_RATE: f64 = 1000.0;

fn audio_context(length: usize) -> Context {
    let period = 1.0 / SAMPLE_RATE;
    let n: Vec<f64> = (0..length).map(|i| i as f64).collect();
    let t: Vec<f64> = n.iter().map(|i| i * period).collect();

    let mut context = Context::new();
    context.insert("N", length as f64);
    context.insert("T", period);
    context.insert("n", n);
    context.insert("t", t);
    context.insert("v", 0.5);
    context.insert("f", 100.0);
    context.insert("c", 0.0);
    context
}

fn evaluate(source: &str, context: &Context, length: usize) -> Result<Vec<f64>, ExprError> {
    let mut output = vec![0.0; length];
    ExpressionEvaluator::new().evaluate(source, &mut output, context)?;
    Ok(output)
}

#[test]
fn test_decaying_sine() {
    let context = audio_context(2000);
    let output = evaluate("v * sin(TAU * f * t) * exp(-5 * t)", &context, 2000).unwrap();

    for (i, sample) in output.iter().enumerate() {
        let t = i as f64 / SAMPLE_RATE;
        let expected = 0.5 * (TAU * 100.0 * t).sin() * (-5.0 * t).exp();
        assert!((sample - expected).abs() < 1e-9, "sample {}", i);
    }
}

#[test]
fn test_library_waveform_with_parameters() {
    let context = audio_context(64);
    let output = evaluate("softSquare(f * t, 0.8) * v", &context, 64).unwrap();

    for (i, sample) in output.iter().enumerate() {
        let phase = 100.0 * (i as f64 * (1.0 / SAMPLE_RATE));
        let expected = audiobee_library::waveform::soft_square(phase, 0.8) * 0.5;
        assert!((sample - expected).abs() < 1e-12, "sample {}", i);
    }
}

#[test]
fn test_pitch_helpers_in_expressions() {
    let context = audio_context(1);
    let output = evaluate("mtof(ftom(f) + 12)", &context, 1).unwrap();
    assert!((output[0] - 200.0).abs() < 1e-9);
}

#[test]
fn test_envelope_with_conditional() {
    let context = audio_context(10).with("attack", 4.0);
    let output = evaluate("n < attack ? n / attack : 1", &context, 10).unwrap();
    assert_eq!(output[0], 0.0);
    assert_eq!(output[2], 0.5);
    assert_eq!(output[4], 1.0);
    assert_eq!(output[9], 1.0);
}

#[test]
fn test_malformed_expression_rejected() {
    let context = audio_context(10);
    let result = evaluate("v * sin(TAU * f * t * exp(-5 * t)", &context, 10);
    assert!(matches!(result, Err(ExprError::Syntax { .. })));
}
