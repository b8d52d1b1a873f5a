//! Compiled expressions.
//!
//! Compilation resolves every name against a context once, checks call arity
//! and sequence lengths, and folds sub-trees that do not depend on the sample
//! index. The resulting [`Program`] is then evaluated once per sample.

use std::sync::Arc;

use crate::ast::{is_truthy, BinaryOp, Expr};
use crate::builtins::{lookup_constant, lookup_function, MAX_ARGS};
use crate::context::{Context, Value};
use crate::error::{ExprError, ExprResult};
use crate::parser::parse;

#[derive(Debug, Clone)]
enum Node {
    Const(f64),
    Sequence(Arc<[f64]>),
    Neg(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(fn(&[f64]) -> f64, Vec<Node>),
    Conditional(Box<Node>, Box<Node>, Box<Node>),
}

impl Node {
    fn as_const(&self) -> Option<f64> {
        match self {
            Node::Const(value) => Some(*value),
            _ => None,
        }
    }

    fn eval(&self, index: usize) -> f64 {
        match self {
            Node::Const(value) => *value,
            Node::Sequence(values) => values[index],
            Node::Neg(operand) => -operand.eval(index),
            Node::Binary(op, a, b) => op.apply(a.eval(index), b.eval(index)),
            Node::Call(call, args) => {
                let mut buffer = [0.0; MAX_ARGS];
                for (slot, arg) in buffer.iter_mut().zip(args) {
                    *slot = arg.eval(index);
                }
                call(&buffer[..args.len()])
            }
            Node::Conditional(condition, then, otherwise) => {
                if is_truthy(condition.eval(index)) {
                    then.eval(index)
                } else {
                    otherwise.eval(index)
                }
            }
        }
    }
}

/// An expression bound to a context, ready to fill buffers of a fixed length.
#[derive(Debug, Clone)]
pub struct Program {
    root: Node,
    length: usize,
}

impl Program {
    /// Parses `source` and binds it to `context` for outputs of `length` samples.
    pub fn compile(source: &str, context: &Context, length: usize) -> ExprResult<Self> {
        let expr = parse(source)?;
        Self::from_expr(&expr, context, length)
    }

    /// Binds an already parsed expression.
    pub fn from_expr(expr: &Expr, context: &Context, length: usize) -> ExprResult<Self> {
        let compiler = Compiler { context, length };
        Ok(Self {
            root: compiler.compile(expr)?,
            length,
        })
    }

    /// Output length this program was compiled for.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the program was compiled for empty outputs.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the value if the expression does not depend on the sample index.
    pub fn constant(&self) -> Option<f64> {
        self.root.as_const()
    }

    /// Evaluates the sample at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`Program::len`] and the expression reads a sequence.
    pub fn sample(&self, index: usize) -> f64 {
        self.root.eval(index)
    }

    /// Fills `output` with one sample per index.
    ///
    /// Returns [`ExprError::LengthMismatch`] if `output` does not have the
    /// compiled length.
    pub fn run(&self, output: &mut [f64]) -> ExprResult<()> {
        if output.len() != self.length {
            return Err(ExprError::LengthMismatch {
                name: "output".to_string(),
                expected: self.length,
                got: output.len(),
            });
        }
        if let Some(value) = self.constant() {
            output.fill(value);
            return Ok(());
        }
        for (index, sample) in output.iter_mut().enumerate() {
            *sample = self.root.eval(index);
        }
        Ok(())
    }
}

struct Compiler<'a> {
    context: &'a Context,
    length: usize,
}

impl Compiler<'_> {
    fn compile(&self, expr: &Expr) -> ExprResult<Node> {
        match expr {
            Expr::Number(value) => Ok(Node::Const(*value)),
            Expr::Variable(name) => self.variable(name),
            Expr::Neg(operand) => {
                let operand = self.compile(operand)?;
                Ok(match operand.as_const() {
                    Some(value) => Node::Const(-value),
                    None => Node::Neg(Box::new(operand)),
                })
            }
            Expr::Binary(op, a, b) => {
                let a = self.compile(a)?;
                let b = self.compile(b)?;
                Ok(match (a.as_const(), b.as_const()) {
                    (Some(a), Some(b)) => Node::Const(op.apply(a, b)),
                    _ => Node::Binary(*op, Box::new(a), Box::new(b)),
                })
            }
            Expr::Call(name, args) => self.call(name, args),
            Expr::Conditional(condition, then, otherwise) => {
                let condition = self.compile(condition)?;
                let then = self.compile(then)?;
                let otherwise = self.compile(otherwise)?;
                Ok(match condition.as_const() {
                    Some(value) if is_truthy(value) => then,
                    Some(_) => otherwise,
                    None => {
                        Node::Conditional(Box::new(condition), Box::new(then), Box::new(otherwise))
                    }
                })
            }
        }
    }

    fn variable(&self, name: &str) -> ExprResult<Node> {
        match self.context.get(name) {
            Some(Value::Scalar(value)) => Ok(Node::Const(*value)),
            Some(Value::Sequence(values)) => {
                if values.len() < self.length {
                    return Err(ExprError::LengthMismatch {
                        name: name.to_string(),
                        expected: self.length,
                        got: values.len(),
                    });
                }
                Ok(Node::Sequence(Arc::clone(values)))
            }
            None => lookup_constant(name).map(Node::Const).ok_or_else(|| {
                ExprError::UnknownVariable {
                    name: name.to_string(),
                }
            }),
        }
    }

    fn call(&self, name: &str, args: &[Expr]) -> ExprResult<Node> {
        let function = lookup_function(name).ok_or_else(|| ExprError::UnknownFunction {
            name: name.to_string(),
        })?;
        if !function.arity.accepts(args.len()) {
            return Err(ExprError::Arity {
                name: name.to_string(),
                expected: function.arity.to_string(),
                got: args.len(),
            });
        }

        let args = args
            .iter()
            .map(|arg| self.compile(arg))
            .collect::<ExprResult<Vec<_>>>()?;

        let constants: Option<Vec<f64>> = args.iter().map(Node::as_const).collect();
        Ok(match constants {
            Some(values) => Node::Const((function.call)(&values)),
            None => Node::Call(function.call, args),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::f64::consts::TAU;

    fn context() -> Context {
        let mut context = Context::new();
        context.insert("n", vec![0.0, 1.0, 2.0, 3.0]);
        context.insert("f", 2.0);
        context
    }

    fn run(source: &str) -> ExprResult<Vec<f64>> {
        let mut output = vec![0.0; 4];
        Program::compile(source, &context(), 4)?.run(&mut output)?;
        Ok(output)
    }

    #[test]
    fn test_scalars_broadcast_and_sequences_index() {
        assert_eq!(run("n * f + 1").unwrap(), vec![1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_constant_folding() {
        let program = Program::compile("TAU * f / 2", &context(), 4).unwrap();
        assert_eq!(program.constant(), Some(TAU));

        let program = Program::compile("sin(n)", &context(), 4).unwrap();
        assert_eq!(program.constant(), None);
    }

    #[test]
    fn test_conditional_is_lazy_per_sample() {
        assert_eq!(run("n < 2 ? -1 : n").unwrap(), vec![-1.0, -1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_library_call() {
        let output = run("square(n / 4)").unwrap();
        assert_eq!(output, vec![1.0, 1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_non_finite_passes_through() {
        let output = run("1 / (n - 1)").unwrap();
        assert_eq!(output[0], -1.0);
        assert!(output[1].is_infinite());
        assert!(run("sqrt(-1 - n)").unwrap().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(
            run("x + 1"),
            Err(ExprError::UnknownVariable {
                name: "x".to_string()
            })
        );
        assert_eq!(
            run("foo(1)"),
            Err(ExprError::UnknownFunction {
                name: "foo".to_string()
            })
        );
    }

    #[test]
    fn test_arity_checked() {
        assert_eq!(
            run("sin(1, 2)"),
            Err(ExprError::Arity {
                name: "sin".to_string(),
                expected: "1".to_string(),
                got: 2
            })
        );
        assert!(matches!(run("softSinh()"), Err(ExprError::Arity { .. })));
    }

    #[test]
    fn test_short_sequence_rejected() {
        let mut context = context();
        context.insert("curve", vec![0.0, 1.0]);
        let result = Program::compile("curve", &context, 4);
        assert!(matches!(result, Err(ExprError::LengthMismatch { got: 2, .. })));
    }

    #[test]
    fn test_output_length_checked() {
        let program = Program::compile("n", &context(), 4).unwrap();
        let mut output = vec![0.0; 3];
        assert!(matches!(
            program.run(&mut output),
            Err(ExprError::LengthMismatch { expected: 4, got: 3, .. })
        ));
    }
}
