//! Buffer generation.
//!
//! A render fans out one blocking evaluation task per (velocity, frequency,
//! channel) triple. Each task owns a clone of its pair's context and writes a
//! fresh sample vector, which is sent back to the orchestrating task and moved
//! into its buffer slot. Only the orchestrating task touches the buffers, the
//! completion count and the progress callback.
//!
//! The first failure ends the render. Tasks that have not started yet see the
//! abort flag and exit without evaluating; tasks already running finish and
//! their results are discarded.


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use audiobee_expr::{Evaluate, ExprError, ExpressionEvaluator};
use audiobee_spec::{validate_options, AudioBeeOptions};
use tokio::runtime::Builder;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::buffer::AudioBuffer;
use crate::context::{base_context, channel_context, PairPlan};
use crate::error::{RenderError, RenderResult};
use crate::factory::BufferSourceFactory;

/// Result of one channel evaluation.
struct ChannelOutcome {
    pair: usize,
    channel: usize,
    result: Result<Vec<f64>, ExprError>,
}

/// Raises the abort flag when the render returns or is dropped.
struct AbortOnDrop(Arc<AtomicBool>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Renders `source` for every (velocity, frequency) pair in `options`.
///
/// Buffers are returned velocity-major, frequency-minor, regardless of the
/// order in which channel tasks complete.
///
/// # Panics
///
/// Panics if polled outside a Tokio runtime.
pub async fn generate(
    source: &str,
    options: &AudioBeeOptions,
) -> RenderResult<Vec<BufferSourceFactory>> {
    generate_with(Arc::new(ExpressionEvaluator::new()), source, options).await
}

/// Renders `source` with a caller-supplied evaluator.
///
/// # Panics
///
/// Panics if polled outside a Tokio runtime.
pub async fn generate_with<E>(
    evaluator: Arc<E>,
    source: &str,
    options: &AudioBeeOptions,
) -> RenderResult<Vec<BufferSourceFactory>>
where
    E: Evaluate + 'static,
{
    let warnings = validate_options(options).into_result().map_err(|errors| {
        error!(count = errors.len(), "options failed validation");
        RenderError::InvalidOptions { errors }
    })?;
    for warning in &warnings {
        warn!("{}", warning);
    }

    options.report(0.0).map_err(RenderError::progress)?;

    let total = options.total_work();
    let length = options.length;
    let period = options.sample_period();
    let source: Arc<str> = Arc::from(source);
    let base = base_context(options);

    let aborted = Arc::new(AtomicBool::new(false));
    let _abort = AbortOnDrop(Arc::clone(&aborted));
    let (tx, mut rx) = mpsc::unbounded_channel::<ChannelOutcome>();
    let mut factories = Vec::with_capacity(options.pair_count());

    for &velocity in &options.velocities {
        for &frequency in &options.frequencies {
            let plan = PairPlan::new(options, velocity, frequency);
            debug!(
                velocity,
                frequency = plan.frequency,
                loop_start = plan.loop_start,
                loop_end = plan.loop_end,
                "scheduling buffer"
            );

            let pair = factories.len();
            factories.push(BufferSourceFactory {
                buffer: AudioBuffer::new(options.number_of_channels, length, options.sample_rate),
                velocity,
                frequency: plan.frequency,
                loop_start_t: plan.loop_start * period,
                loop_end_t: plan.loop_end * period,
            });

            let pair_context = plan.bind(&base);
            for channel in 0..options.number_of_channels {
                let context = channel_context(&pair_context, channel);
                let evaluator = Arc::clone(&evaluator);
                let source = Arc::clone(&source);
                let aborted = Arc::clone(&aborted);
                let tx = tx.clone();

                tokio::task::spawn_blocking(move || {
                    if aborted.load(Ordering::Acquire) {
                        return;
                    }
                    let mut samples = vec![0.0; length];
                    let result = evaluator
                        .evaluate(&source, &mut samples, &context)
                        .map(|()| samples);
                    // The receiver is gone once the render has failed.
                    let _ = tx.send(ChannelOutcome {
                        pair,
                        channel,
                        result,
                    });
                });
            }
        }
    }
    drop(tx);

    let mut completed = 0usize;
    while completed < total {
        let outcome = rx.recv().await.ok_or(RenderError::TaskLost)?;
        let factory = &mut factories[outcome.pair];

        match outcome.result {
            Ok(samples) => {
                let stored = factory.buffer.replace_channel(outcome.channel, samples);
                debug_assert!(stored, "channel result has the buffer's shape");
            }
            Err(source) => {
                error!(
                    velocity = factory.velocity,
                    frequency = factory.frequency,
                    channel = outcome.channel,
                    code = source.code(),
                    "expression failed"
                );
                return Err(RenderError::Expression {
                    velocity: factory.velocity,
                    frequency: factory.frequency,
                    channel: outcome.channel,
                    source,
                });
            }
        }

        completed += 1;
        options
            .report(completed as f64 / total as f64)
            .map_err(RenderError::progress)?;
    }

    info!(
        buffers = factories.len(),
        channels = options.number_of_channels,
        length,
        "render complete"
    );
    Ok(factories)
}

/// Renders `source` on a private current-thread runtime.
///
/// For callers without a Tokio runtime of their own. Must not be called from
/// inside one.
pub fn generate_blocking(
    source: &str,
    options: &AudioBeeOptions,
) -> RenderResult<Vec<BufferSourceFactory>> {
    let runtime = Builder::new_current_thread().build()?;
    runtime.block_on(generate(source, options))
}
