//! The evaluator seam used by the renderer.

use crate::context::Context;
use crate::error::ExprResult;
use crate::program::Program;

/// Fills an output buffer by evaluating a source expression against a context.
///
/// Implementations must be shareable across the renderer's worker threads.
pub trait Evaluate: Send + Sync {
    /// Writes one value per sample index into `output`.
    ///
    /// On error `output` may have been partially written.
    fn evaluate(&self, source: &str, output: &mut [f64], context: &Context) -> ExprResult<()>;
}

/// Default evaluator: compiles the expression for each call and runs it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    /// Creates a new evaluator.
    pub fn new() -> Self {
        Self
    }
}

impl Evaluate for ExpressionEvaluator {
    fn evaluate(&self, source: &str, output: &mut [f64], context: &Context) -> ExprResult<()> {
        Program::compile(source, context, output.len())?.run(output)
    }
}
