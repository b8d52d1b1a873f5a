//! End-to-end renders through the default expression evaluator.

use std::f64::consts::PI;
use std::sync::{Arc, Mutex};

use audiobee_backend::{generate, RenderError};
use audiobee_expr::ExprError;
use audiobee_library::waveform::sine;
use audiobee_spec::AudioBeeOptions;

fn assert_close(actual: &[f64], expected: impl Fn(usize) -> f64, tolerance: f64) {
    for (i, &sample) in actual.iter().enumerate() {
        let want = expected(i);
        assert!(
            (sample - want).abs() <= tolerance,
            "sample {i}: got {sample}, expected {want}"
        );
    }
}

#[tokio::test]
async fn test_decaying_sine() {
    let progress = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&progress);
    let options = AudioBeeOptions::builder(1000, 2000)
        .velocity(0.5)
        .frequency(100.0)
        .on_progress(move |fraction| sink.lock().unwrap().push(fraction))
        .build();

    let factories = generate("v * sin(2 * PI * f * t) * exp(-5 * t)", &options)
        .await
        .unwrap();

    assert_eq!(factories.len(), 1);
    let samples = factories[0].buffer.channel_data(0).unwrap();
    assert_eq!(samples.len(), 2000);
    assert_close(
        samples,
        |i| {
            let t = i as f64 / 1000.0;
            0.5 * (2.0 * PI * 100.0 * t).sin() * (-5.0 * t).exp()
        },
        1e-9,
    );

    let progress = progress.lock().unwrap();
    assert_eq!(progress.first(), Some(&0.0));
    assert_eq!(progress.last(), Some(&1.0));
}

#[tokio::test]
async fn test_channel_index_bound_per_channel() {
    let options = AudioBeeOptions::builder(100, 5)
        .velocity(1.0)
        .frequency(1.0)
        .channels(3)
        .build();

    let factories = generate("c * 10 + n", &options).await.unwrap();

    let buffer = &factories[0].buffer;
    for channel in 0..3 {
        let expected: Vec<f64> = (0..5).map(|i| (channel * 10 + i) as f64).collect();
        assert_eq!(buffer.channel_data(channel), Some(expected.as_slice()));
    }
}

#[tokio::test]
async fn test_sweep_binds_velocity_and_frequency() {
    let options = AudioBeeOptions::builder(1000, 3)
        .velocities(vec![0.25, 1.0])
        .frequencies(vec![10.0, 20.0])
        .build();

    let factories = generate("v * f", &options).await.unwrap();

    let firsts: Vec<f64> = factories
        .iter()
        .map(|factory| factory.buffer.channel_data(0).unwrap()[0])
        .collect();
    assert_eq!(firsts, vec![2.5, 5.0, 10.0, 20.0]);
}

#[tokio::test]
async fn test_library_waveform_call() {
    let options = AudioBeeOptions::builder(1000, 64)
        .velocity(1.0)
        .frequency(100.0)
        .build();

    let factories = generate("sine(f * t)", &options).await.unwrap();

    let period = 1.0 / 1000.0;
    assert_close(
        factories[0].buffer.channel_data(0).unwrap(),
        |i| sine(100.0 * (i as f64 * period)),
        1e-12,
    );
}

#[tokio::test]
async fn test_quantized_frequency_is_used() {
    let options = AudioBeeOptions::builder(44_100, 4)
        .velocity(1.0)
        .frequency(440.0)
        .quantize_period(true)
        .build();

    let factories = generate("f", &options).await.unwrap();

    assert_eq!(factories[0].frequency, 441.0);
    assert_eq!(factories[0].buffer.channel_data(0), Some(&[441.0; 4][..]));
}

#[tokio::test]
async fn test_locals_visible_and_reserved_names_win() {
    let options = AudioBeeOptions::builder(1000, 4)
        .velocity(1.0)
        .frequency(100.0)
        .local("gain", 0.5)
        .local("ramp", vec![0.0, 1.0, 2.0, 3.0])
        .local("f", 7.0)
        .build();

    let factories = generate("gain * ramp + f", &options).await.unwrap();

    assert_eq!(
        factories[0].buffer.channel_data(0),
        Some(&[100.0, 100.5, 101.0, 101.5][..])
    );
}

#[tokio::test]
async fn test_malformed_source_rejects() {
    let options = AudioBeeOptions::builder(1000, 4)
        .velocity(1.0)
        .frequency(100.0)
        .channels(2)
        .build();

    let err = generate("sin(", &options).await.unwrap_err();

    assert!(matches!(
        err,
        RenderError::Expression {
            source: ExprError::Syntax { .. },
            ..
        }
    ));
}

#[tokio::test]
async fn test_unknown_name_rejects() {
    let options = AudioBeeOptions::builder(1000, 4)
        .velocity(1.0)
        .frequency(100.0)
        .build();

    let err = generate("amplitude * t", &options).await.unwrap_err();

    match err {
        RenderError::Expression { source, .. } => {
            assert_eq!(
                source,
                ExprError::UnknownVariable {
                    name: "amplitude".to_string()
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_division_by_zero_passes_through() {
    let options = AudioBeeOptions::builder(1000, 2)
        .velocity(1.0)
        .frequency(100.0)
        .build();

    let factories = generate("1 / n", &options).await.unwrap();

    let samples = factories[0].buffer.channel_data(0).unwrap();
    assert_eq!(samples[0], f64::INFINITY);
    assert_eq!(samples[1], 1.0);
}

#[tokio::test]
async fn test_invalid_options_reject() {
    let options = AudioBeeOptions::builder(0, 4).velocity(1.0).build();

    let err = generate("t", &options).await.unwrap_err();

    match err {
        RenderError::InvalidOptions { errors } => assert_eq!(errors.len(), 2),
        other => panic!("unexpected error: {other}"),
    }
}
