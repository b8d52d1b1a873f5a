//! Multi-channel sample buffer.

/// A fixed-size buffer of `f64` samples, one vector per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    length: usize,
    channels: Vec<Vec<f64>>,
}

impl AudioBuffer {
    /// Allocates a silent buffer.
    pub fn new(number_of_channels: usize, length: usize, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            length,
            channels: vec![vec![0.0; length]; number_of_channels],
        }
    }

    /// Number of channels.
    pub fn number_of_channels(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.length as f64 / f64::from(self.sample_rate)
    }

    /// Samples of one channel.
    pub fn channel_data(&self, channel: usize) -> Option<&[f64]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    /// Mutable samples of one channel.
    pub fn channel_data_mut(&mut self, channel: usize) -> Option<&mut [f64]> {
        self.channels.get_mut(channel).map(Vec::as_mut_slice)
    }

    /// All channels in order.
    pub fn channels(&self) -> impl Iterator<Item = &[f64]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Swaps in freshly rendered samples for one channel.
    ///
    /// Returns false, leaving the buffer untouched, if the channel does not
    /// exist or `samples` has the wrong length.
    pub(crate) fn replace_channel(&mut self, channel: usize, samples: Vec<f64>) -> bool {
        match self.channels.get_mut(channel) {
            Some(slot) if samples.len() == self.length => {
                *slot = samples;
                true
            }
            _ => false,
        }
    }
}
