//! AudioBee waveform library.
//!
//! Pure, stateless building blocks for per-sample audio expressions:
//!
//! - [`waveform`]: periodic shapes over a phase measured in cycles
//! - [`pitch`]: frequency and note-number conversion
//! - [`quantize`]: sample-accurate frequency and loop-length rounding
//! - [`registry`]: the name, arity and implementation table exposed to expressions

pub mod pitch;
pub mod quantize;
pub mod registry;
pub mod waveform;

pub use pitch::{frequency_to_note_number, note_number_to_frequency};
pub use quantize::{quantize_loop_duration, round_frequency};
pub use registry::{lookup, Arity, LibraryFunction, LIBRARY};
