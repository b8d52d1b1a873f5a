//! WAV encoding result type.

use crate::buffer::AudioBuffer;
use crate::error::{RenderError, RenderResult};

use super::format::WavFormat;
use super::pcm::hash_pcm;
use super::writer::{interleave_to_pcm16, write_wav_to_vec};

/// An encoded WAV file.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Number of channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples per channel.
    pub num_samples: usize,
}

impl WavResult {
    fn encode(format: WavFormat, pcm: Vec<u8>, num_samples: usize) -> RenderResult<Self> {
        let wav_data = write_wav_to_vec(&format, &pcm).map_err(|e| RenderError::wav(e.to_string()))?;
        Ok(Self {
            wav_data,
            pcm_hash: hash_pcm(&pcm),
            channels: format.channels,
            sample_rate: format.sample_rate,
            num_samples,
        })
    }

    /// Encodes every channel of a buffer, interleaved.
    pub fn from_buffer(buffer: &AudioBuffer) -> RenderResult<Self> {
        let channels = u16::try_from(buffer.number_of_channels()).map_err(|_| {
            RenderError::wav(format!(
                "{} channels exceed the WAV limit of {}",
                buffer.number_of_channels(),
                u16::MAX
            ))
        })?;
        if channels == 0 {
            return Err(RenderError::wav("buffer has no channels"));
        }

        let format = WavFormat::new(channels, buffer.sample_rate());
        if format.byte_rate().is_none() {
            return Err(RenderError::wav(format!(
                "{} channels at {} Hz do not fit a WAV header",
                channels,
                buffer.sample_rate()
            )));
        }

        let channel_data: Vec<&[f64]> = buffer.channels().collect();
        Self::encode(
            format,
            interleave_to_pcm16(&channel_data),
            buffer.length(),
        )
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / f64::from(self.sample_rate)
    }
}
