//! Error types for the render backend.

use audiobee_expr::ExprError;
use audiobee_spec::{BackendError, ProgressError, ValidationError};
use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during a render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The options failed validation; nothing was rendered.
    #[error("invalid options: {}", join_errors(.errors))]
    InvalidOptions {
        /// Every validation error found.
        errors: Vec<ValidationError>,
    },

    /// The expression failed for one channel.
    #[error(
        "expression failed for velocity {velocity}, frequency {frequency} Hz, channel {channel}: {source}"
    )]
    Expression {
        /// Velocity of the failing buffer.
        velocity: f64,
        /// Frequency of the failing buffer, after quantization.
        frequency: f64,
        /// Failing channel.
        channel: usize,
        /// Evaluator diagnostic.
        #[source]
        source: ExprError,
    },

    /// The progress callback returned an error.
    #[error("progress callback failed: {source}")]
    Progress {
        /// Error returned by the callback.
        #[source]
        source: ProgressError,
    },

    /// An evaluation task ended without reporting a result.
    #[error("evaluation task ended without reporting a result")]
    TaskLost,

    /// The runtime for a blocking render could not be created.
    #[error("failed to start render runtime: {0}")]
    Runtime(#[from] std::io::Error),

    /// A buffer cannot be encoded as WAV.
    #[error("cannot encode buffer as WAV: {message}")]
    Wav {
        /// Error message.
        message: String,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl RenderError {
    /// Creates a progress error.
    pub fn progress(source: ProgressError) -> Self {
        Self::Progress { source }
    }

    /// Creates a WAV encoding error.
    pub fn wav(message: impl Into<String>) -> Self {
        Self::Wav {
            message: message.into(),
        }
    }
}

impl BackendError for RenderError {
    fn code(&self) -> &'static str {
        match self {
            RenderError::InvalidOptions { .. } => "RENDER_001",
            RenderError::Expression { .. } => "RENDER_002",
            RenderError::Progress { .. } => "RENDER_003",
            RenderError::TaskLost => "RENDER_004",
            RenderError::Runtime(_) => "RENDER_005",
            RenderError::Wav { .. } => "RENDER_006",
        }
    }

    fn category(&self) -> &'static str {
        "render"
    }
}
