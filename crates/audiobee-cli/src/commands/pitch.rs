//! Pitch command implementation
//!
//! Converts between frequency and note number, optionally showing the nearest
//! frequency with a whole-sample period.

use anyhow::{bail, Result};
use audiobee_library::{frequency_to_note_number, note_number_to_frequency, round_frequency};
use colored::Colorize;
use std::process::ExitCode;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Name of the nearest equal-tempered note, e.g. `A4` for note number 69.
pub fn note_name(note_number: f64) -> Option<String> {
    if !note_number.is_finite() {
        return None;
    }
    let nearest = note_number.round() as i64;
    let octave = nearest.div_euclid(12) - 1;
    let name = NOTE_NAMES[nearest.rem_euclid(12) as usize];
    Some(format!("{}{}", name, octave))
}

/// Run the pitch command
///
/// Exactly one of `hz` and `note` is given; clap enforces this for the binary.
pub fn run(hz: Option<f64>, note: Option<f64>, sample_rate: Option<u32>) -> Result<ExitCode> {
    let (frequency, note_number) = match (hz, note) {
        (Some(hz), None) => (hz, frequency_to_note_number(hz)),
        (None, Some(note)) => (note_number_to_frequency(note), note),
        _ => bail!("give exactly one of --hz and --note"),
    };
    if !(frequency.is_finite() && frequency > 0.0) {
        bail!("frequency must be positive and finite, got {}", frequency);
    }

    let name = note_name(note_number).unwrap_or_else(|| "?".to_string());
    println!(
        "{} Hz = note {:.2} ({})",
        format!("{:.3}", frequency).cyan().bold(),
        note_number,
        name
    );

    if let Some(sample_rate) = sample_rate {
        let sample_rate = f64::from(sample_rate);
        let quantized = round_frequency(frequency, sample_rate);
        println!(
            "{} {:.3} Hz ({} samples per period, {:+.2} cents)",
            "quantized:".dimmed(),
            quantized,
            (sample_rate / quantized).round(),
            1200.0 * (quantized / frequency).log2()
        );
    }
    Ok(ExitCode::SUCCESS)
}
