//! Rendered buffers and playback descriptors.

use crate::buffer::AudioBuffer;
use crate::error::RenderResult;
use crate::wav::WavResult;

/// One rendered buffer together with the sweep values it was rendered for.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSourceFactory {
    /// Rendered samples.
    pub buffer: AudioBuffer,
    /// Velocity the buffer was rendered with.
    pub velocity: f64,
    /// Frequency the buffer was rendered with, after quantization.
    pub frequency: f64,
    /// Loop start in seconds.
    pub loop_start_t: f64,
    /// Loop end in seconds.
    pub loop_end_t: f64,
}

impl BufferSourceFactory {
    /// Playback rate that transposes this buffer to `target_frequency`.
    pub fn playback_rate(&self, target_frequency: f64) -> f64 {
        target_frequency / self.frequency
    }

    /// Describes how to play this buffer at `target_frequency`.
    pub fn make_buffer_source(&self, target_frequency: f64) -> BufferSource<'_> {
        BufferSource {
            buffer: &self.buffer,
            playback_rate: self.playback_rate(target_frequency),
            loop_start: self.loop_start_t,
            loop_end: self.loop_end_t,
        }
    }

    /// Encodes the buffer as a 16-bit PCM WAV file.
    pub fn to_wav(&self) -> RenderResult<WavResult> {
        WavResult::from_buffer(&self.buffer)
    }
}

/// Playback parameters for one voice reading a rendered buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferSource<'a> {
    /// Buffer to read.
    pub buffer: &'a AudioBuffer,
    /// Resampling ratio; 1 plays the buffer at its rendered pitch.
    pub playback_rate: f64,
    /// Loop start in seconds of buffer time.
    pub loop_start: f64,
    /// Loop end in seconds of buffer time.
    pub loop_end: f64,
}

impl BufferSource<'_> {
    /// Returns true if the loop region is non-empty.
    pub fn has_loop(&self) -> bool {
        self.loop_end > self.loop_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> BufferSourceFactory {
        BufferSourceFactory {
            buffer: AudioBuffer::new(1, 8, 8000),
            velocity: 1.0,
            frequency: 220.0,
            loop_start_t: 0.0,
            loop_end_t: 0.001,
        }
    }

    #[test]
    fn test_playback_rate_transposes() {
        let factory = factory();
        assert_eq!(factory.playback_rate(440.0), 2.0);
        assert_eq!(factory.playback_rate(110.0), 0.5);
    }

    #[test]
    fn test_make_buffer_source() {
        let factory = factory();
        let source = factory.make_buffer_source(330.0);
        assert!(std::ptr::eq(source.buffer, &factory.buffer));
        assert_eq!(source.playback_rate, 1.5);
        assert_eq!(source.loop_end, 0.001);
        assert!(source.has_loop());
    }

    #[test]
    fn test_to_wav() {
        let wav = factory().to_wav().unwrap();
        assert_eq!(wav.channels, 1);
        assert_eq!(wav.num_samples, 8);
        assert_eq!(wav.wav_data.len(), 44 + 16);
    }
}
