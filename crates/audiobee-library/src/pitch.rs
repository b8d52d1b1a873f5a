//! Conversion between frequencies and continuous note numbers.
//!
//! Note numbers follow the MIDI convention (A4 = 440 Hz = 69, twelve equal
//! steps per octave) but are real-valued, so microtonal pitches and notes
//! outside 0..=127 are representable.

/// Frequency of the reference note, in Hz.
pub const REFERENCE_FREQUENCY: f64 = 440.0;

/// Note number of the reference note.
pub const REFERENCE_NOTE: f64 = 69.0;

/// Semitones per octave.
const SEMITONES_PER_OCTAVE: f64 = 12.0;

/// Converts a frequency in Hz to a note number.
///
/// Defined for positive frequencies only; zero yields negative infinity and
/// negative input yields NaN.
pub fn frequency_to_note_number(hz: f64) -> f64 {
    (hz / REFERENCE_FREQUENCY).log2() * SEMITONES_PER_OCTAVE + REFERENCE_NOTE
}

/// Converts a note number to a frequency in Hz. Inverse of [`frequency_to_note_number`].
pub fn note_number_to_frequency(note: f64) -> f64 {
    REFERENCE_FREQUENCY * ((note - REFERENCE_NOTE) / SEMITONES_PER_OCTAVE).exp2()
}
