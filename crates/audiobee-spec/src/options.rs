//! Render options.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::progress::{ProgressReporter, ProgressResult};

/// Names bound by the renderer for every evaluation. A local with one of these
/// names is shadowed by the ambient binding.
///
/// - `N`: number of samples
/// - `T`: sample period in seconds
/// - `n`: sample index sequence
/// - `t`: sample time sequence in seconds
/// - `v`: current velocity
/// - `f`: current (possibly quantized) frequency
/// - `c`: current channel index
/// - `loopStart`, `loopEnd`: loop bounds in samples
pub const RESERVED_NAMES: &[&str] = &["N", "T", "n", "t", "v", "f", "c", "loopStart", "loopEnd"];

/// Returns true if `name` is bound by the renderer.
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// A caller-supplied named value made visible to the expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Local {
    /// Same value for every sample.
    Scalar(f64),
    /// One value per sample.
    Sequence(Vec<f64>),
}

impl From<f64> for Local {
    fn from(value: f64) -> Self {
        Local::Scalar(value)
    }
}

impl From<Vec<f64>> for Local {
    fn from(values: Vec<f64>) -> Self {
        Local::Sequence(values)
    }
}

fn default_channels() -> usize {
    1
}

/// Options for one render.
///
/// A render produces one buffer for each `(velocity, frequency)` pair, each
/// holding `number_of_channels` channels of `length` samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AudioBeeOptions {
    /// Sample rate in Hz.
    pub sample_rate: u32,

    /// Number of samples per channel.
    pub length: usize,

    /// Velocities (linear gain) to sweep over; outer loop.
    pub velocities: Vec<f64>,

    /// Frequencies in Hz to sweep over; inner loop.
    pub frequencies: Vec<f64>,

    /// Channels per buffer.
    #[serde(default = "default_channels")]
    pub number_of_channels: usize,

    /// Loop start in seconds.
    #[serde(default)]
    pub loop_start_t: f64,

    /// Loop end in seconds.
    #[serde(default)]
    pub loop_end_t: f64,

    /// Round every frequency so its period is a whole number of samples.
    #[serde(default)]
    pub quantize_period: bool,

    /// Round the loop length to a whole number of periods.
    #[serde(default)]
    pub quantize_loop_end: bool,

    /// Extra names visible to the expression.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locals: BTreeMap<String, Local>,

    /// Progress callback.
    #[serde(skip)]
    pub report_progress: Option<ProgressReporter>,
}

impl AudioBeeOptions {
    /// Creates a new options builder.
    pub fn builder(sample_rate: u32, length: usize) -> OptionsBuilder {
        OptionsBuilder::new(sample_rate, length)
    }

    /// Parses options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Serializes the options to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the options to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Sample period in seconds.
    pub fn sample_period(&self) -> f64 {
        1.0 / f64::from(self.sample_rate)
    }

    /// Buffer duration in seconds.
    pub fn duration(&self) -> f64 {
        self.length as f64 * self.sample_period()
    }

    /// Number of buffers a render produces.
    pub fn pair_count(&self) -> usize {
        self.velocities.len() * self.frequencies.len()
    }

    /// Number of channel evaluations a render performs.
    pub fn total_work(&self) -> usize {
        self.pair_count() * self.number_of_channels
    }

    /// Reports progress if a callback is set.
    pub fn report(&self, fraction: f64) -> ProgressResult {
        match self.report_progress {
            Some(ref reporter) => reporter.report(fraction),
            None => Ok(()),
        }
    }
}

/// Builder for constructing [`AudioBeeOptions`].
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    options: AudioBeeOptions,
}

impl OptionsBuilder {
    /// Creates a builder for a single-channel render with no velocities or frequencies yet.
    pub fn new(sample_rate: u32, length: usize) -> Self {
        Self {
            options: AudioBeeOptions {
                sample_rate,
                length,
                velocities: Vec::new(),
                frequencies: Vec::new(),
                number_of_channels: default_channels(),
                loop_start_t: 0.0,
                loop_end_t: 0.0,
                quantize_period: false,
                quantize_loop_end: false,
                locals: BTreeMap::new(),
                report_progress: None,
            },
        }
    }

    /// Adds a velocity.
    pub fn velocity(mut self, velocity: f64) -> Self {
        self.options.velocities.push(velocity);
        self
    }

    /// Sets all velocities.
    pub fn velocities(mut self, velocities: Vec<f64>) -> Self {
        self.options.velocities = velocities;
        self
    }

    /// Adds a frequency.
    pub fn frequency(mut self, frequency: f64) -> Self {
        self.options.frequencies.push(frequency);
        self
    }

    /// Sets all frequencies.
    pub fn frequencies(mut self, frequencies: Vec<f64>) -> Self {
        self.options.frequencies = frequencies;
        self
    }

    /// Sets the number of channels.
    pub fn channels(mut self, number_of_channels: usize) -> Self {
        self.options.number_of_channels = number_of_channels;
        self
    }

    /// Sets the loop bounds in seconds.
    pub fn loop_points(mut self, start_t: f64, end_t: f64) -> Self {
        self.options.loop_start_t = start_t;
        self.options.loop_end_t = end_t;
        self
    }

    /// Enables or disables period quantization.
    pub fn quantize_period(mut self, enabled: bool) -> Self {
        self.options.quantize_period = enabled;
        self
    }

    /// Enables or disables loop length quantization.
    pub fn quantize_loop_end(mut self, enabled: bool) -> Self {
        self.options.quantize_loop_end = enabled;
        self
    }

    /// Adds a local.
    pub fn local(mut self, name: impl Into<String>, value: impl Into<Local>) -> Self {
        self.options.locals.insert(name.into(), value.into());
        self
    }

    /// Sets the progress callback.
    pub fn report_progress(mut self, reporter: ProgressReporter) -> Self {
        self.options.report_progress = Some(reporter);
        self
    }

    /// Sets an infallible progress callback.
    pub fn on_progress<F>(self, callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.report_progress(ProgressReporter::infallible(callback))
    }

    /// Builds the options.
    pub fn build(self) -> AudioBeeOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_defaults() {
        let options = AudioBeeOptions::builder(48_000, 100)
            .velocity(1.0)
            .frequency(440.0)
            .build();

        assert_eq!(options.number_of_channels, 1);
        assert_eq!(options.loop_start_t, 0.0);
        assert_eq!(options.loop_end_t, 0.0);
        assert!(!options.quantize_period);
        assert!(!options.quantize_loop_end);
        assert!(options.locals.is_empty());
        assert!(options.report_progress.is_none());
        assert_eq!(options.total_work(), 1);
    }

    #[test]
    fn test_from_json_minimal() {
        let json = r#"{
            "sample_rate": 1000,
            "length": 2000,
            "velocities": [0.5],
            "frequencies": [100, 200]
        }"#;
        let options = AudioBeeOptions::from_json(json).unwrap();

        assert_eq!(options.sample_rate, 1000);
        assert_eq!(options.length, 2000);
        assert_eq!(options.frequencies, vec![100.0, 200.0]);
        assert_eq!(options.number_of_channels, 1);
        assert_eq!(options.pair_count(), 2);
        assert_eq!(options.duration(), 2.0);
    }

    #[test]
    fn test_from_json_locals() {
        let json = r#"{
            "sample_rate": 8000,
            "length": 3,
            "velocities": [1],
            "frequencies": [440],
            "number_of_channels": 2,
            "loop_start_t": 0.25,
            "loop_end_t": 0.5,
            "quantize_period": true,
            "locals": { "index": 5, "ramp": [0, 0.5, 1] }
        }"#;
        let options = AudioBeeOptions::from_json(json).unwrap();

        assert_eq!(options.locals["index"], Local::Scalar(5.0));
        assert_eq!(options.locals["ramp"], Local::Sequence(vec![0.0, 0.5, 1.0]));
        assert!(options.quantize_period);
        assert_eq!(options.total_work(), 2);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let json = r#"{
            "sample_rate": 8000,
            "length": 3,
            "velocities": [1],
            "frequencies": [440],
            "sampleRate": 8000
        }"#;
        assert!(AudioBeeOptions::from_json(json).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let options = AudioBeeOptions::builder(44_100, 512)
            .velocities(vec![0.25, 1.0])
            .frequency(110.0)
            .channels(2)
            .loop_points(0.001, 0.01)
            .quantize_loop_end(true)
            .local("depth", 0.3)
            .on_progress(|_| {})
            .build();

        let json = options.to_json_pretty().unwrap();
        let parsed = AudioBeeOptions::from_json(&json).unwrap();

        assert_eq!(parsed.velocities, options.velocities);
        assert_eq!(parsed.loop_end_t, options.loop_end_t);
        assert_eq!(parsed.locals, options.locals);
        assert!(parsed.quantize_loop_end);
        assert!(parsed.report_progress.is_none());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("options.json");
        std::fs::write(
            &path,
            r#"{"sample_rate": 100, "length": 10, "velocities": [1], "frequencies": [5]}"#,
        )
        .unwrap();

        let options = AudioBeeOptions::from_path(&path).unwrap();
        assert_eq!(options.length, 10);

        let missing = AudioBeeOptions::from_path(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(SpecError::Io(_))));
    }

    #[test]
    fn test_reserved_names() {
        for name in ["N", "T", "n", "t", "v", "f", "c", "loopStart", "loopEnd"] {
            assert!(is_reserved_name(name));
        }
        assert!(!is_reserved_name("index"));
        assert!(!is_reserved_name("loopstart"));
    }
}
