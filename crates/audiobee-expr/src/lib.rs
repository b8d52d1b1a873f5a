//! AudioBee expression evaluator.
//!
//! Expressions are arithmetic over named scalars and per-sample sequences,
//! calling numeric built-ins and the waveform library:
//!
//! ```
//! use audiobee_expr::{Context, Evaluate, ExpressionEvaluator};
//!
//! let mut context = Context::new();
//! context.insert("t", vec![0.0, 0.25, 0.5, 0.75]);
//! context.insert("f", 1.0);
//!
//! let mut output = vec![0.0; 4];
//! ExpressionEvaluator::new()
//!     .evaluate("round(sine(f * t))", &mut output, &context)
//!     .unwrap();
//! assert_eq!(output, vec![0.0, 1.0, 0.0, -1.0]);
//! ```
//!
//! Names resolve against the context first, then the constants `PI`, `TAU`
//! and `E`. Function names resolve against the built-ins first, then the
//! library registry.

pub mod ast;
pub mod builtins;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod parser;
pub mod program;

pub use context::{Context, Value};
pub use error::{ExprError, ExprResult};
pub use evaluator::{Evaluate, ExpressionEvaluator};
pub use parser::parse;
pub use program::Program;
