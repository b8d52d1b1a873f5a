//! Deterministic WAV file writer.
//!
//! Writes 16-bit PCM WAV files with no timestamps or variable metadata, so equal
//! buffers always produce equal files. The hash of the PCM payload identifies a
//! render independently of its header.

mod format;
mod pcm;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use format::WavFormat;
pub use pcm::hash_pcm;
pub use result::WavResult;
pub use writer::{interleave_to_pcm16, write_wav_to_vec, HEADER_SIZE};
