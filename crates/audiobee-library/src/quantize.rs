//! Frequency and loop-length quantization for click-free looping.

/// Rounds `frequency` to the nearest frequency whose period is a whole number
/// of samples at `sample_rate`.
///
/// The period is never shorter than one sample, so frequencies above the
/// sample rate collapse to `sample_rate` itself.
pub fn round_frequency(frequency: f64, sample_rate: f64) -> f64 {
    let period_samples = (sample_rate / frequency).round().max(1.0);
    sample_rate / period_samples
}

/// Rounds `duration` (seconds) to the nearest whole number of cycles at `frequency`.
pub fn quantize_loop_duration(duration: f64, frequency: f64) -> f64 {
    let period = 1.0 / frequency;
    (duration / period).round() * period
}
