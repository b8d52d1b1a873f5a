//! Error types for expression parsing and evaluation.
//!
//! ## Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | X001 | Syntax error |
//! | X002 | Unknown variable |
//! | X003 | Unknown function |
//! | X004 | Wrong number of arguments |
//! | X005 | Sequence length differs from the output length |

use audiobee_spec::BackendError;
use thiserror::Error;

/// Errors from parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// X001: The source does not parse.
    #[error("X001: syntax error at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// X002: An identifier is neither bound in the context nor a constant.
    #[error("X002: unknown variable '{name}'")]
    UnknownVariable { name: String },

    /// X003: A call names neither a built-in nor a library function.
    #[error("X003: unknown function '{name}'")]
    UnknownFunction { name: String },

    /// X004: A call passes an unsupported number of arguments.
    #[error("X004: {name}() takes {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: String,
        got: usize,
    },

    /// X005: A sequence binding cannot be indexed by every output sample.
    #[error("X005: '{name}' has {got} values, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

impl ExprError {
    /// Returns the error code (e.g., "X001").
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::Syntax { .. } => "X001",
            ExprError::UnknownVariable { .. } => "X002",
            ExprError::UnknownFunction { .. } => "X003",
            ExprError::Arity { .. } => "X004",
            ExprError::LengthMismatch { .. } => "X005",
        }
    }
}

impl BackendError for ExprError {
    fn code(&self) -> &'static str {
        ExprError::code(self)
    }

    fn category(&self) -> &'static str {
        "expression"
    }
}

/// Result type for expression operations.
pub type ExprResult<T> = Result<T, ExprError>;
