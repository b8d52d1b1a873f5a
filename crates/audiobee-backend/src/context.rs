//! Construction of evaluation contexts.
//!
//! A render builds one base context, extends it once per (velocity,
//! frequency) pair and once more per channel. Every step produces a new
//! [`Context`]; sequences are shared between all of them.

use std::sync::Arc;

use audiobee_expr::{Context, Value};
use audiobee_library::{quantize_loop_duration, round_frequency};
use audiobee_spec::{is_reserved_name, AudioBeeOptions, Local};
use tracing::debug;

/// Builds the context shared by every task: caller locals, then `N`, `T`, `n`, `t`.
///
/// Locals using a reserved name are dropped; the renderer's own binding
/// takes their place.
pub fn base_context(options: &AudioBeeOptions) -> Context {
    let mut context = Context::new();

    for (name, local) in &options.locals {
        if is_reserved_name(name) {
            debug!(name = %name, "local shadowed by reserved name");
            continue;
        }
        let value = match local {
            Local::Scalar(value) => Value::Scalar(*value),
            Local::Sequence(values) => Value::Sequence(Arc::from(values.as_slice())),
        };
        context.insert(name.as_str(), value);
    }

    let period = options.sample_period();
    let n: Arc<[f64]> = (0..options.length).map(|i| i as f64).collect();
    let t: Arc<[f64]> = n.iter().map(|i| i * period).collect();

    context.insert("N", options.length as f64);
    context.insert("T", period);
    context.insert("n", n);
    context.insert("t", t);
    context
}

/// Sweep values for one rendered buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairPlan {
    /// Velocity.
    pub velocity: f64,
    /// Frequency after optional period quantization.
    pub frequency: f64,
    /// Loop start as a sample index.
    pub loop_start: f64,
    /// Loop end as a sample index, after optional loop quantization.
    pub loop_end: f64,
}

impl PairPlan {
    /// Applies quantization and loop placement for one (velocity, frequency) pair.
    pub fn new(options: &AudioBeeOptions, velocity: f64, frequency: f64) -> Self {
        let sample_rate = f64::from(options.sample_rate);
        let period = options.sample_period();

        let frequency = if options.quantize_period {
            round_frequency(frequency, sample_rate)
        } else {
            frequency
        };

        let loop_start = (sample_rate * options.loop_start_t).round();
        let mut loop_end = (sample_rate * options.loop_end_t).round();
        if options.quantize_loop_end {
            let duration = quantize_loop_duration((loop_end - loop_start) * period, frequency);
            loop_end = (loop_start + duration * sample_rate).round();
        }

        Self {
            velocity,
            frequency,
            loop_start,
            loop_end,
        }
    }

    /// Extends `base` with `v`, `f`, `loopStart` and `loopEnd`.
    pub fn bind(&self, base: &Context) -> Context {
        let mut context = base.clone();
        context.insert("v", self.velocity);
        context.insert("f", self.frequency);
        context.insert("loopStart", self.loop_start);
        context.insert("loopEnd", self.loop_end);
        context
    }
}

/// Extends a pair context with the channel index `c`.
pub fn channel_context(pair: &Context, channel: usize) -> Context {
    pair.with("c", channel as f64)
}
