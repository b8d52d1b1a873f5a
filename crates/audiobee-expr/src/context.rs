//! Evaluation context: the names an expression can read.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A bound value.
///
/// Sequences are shared, so cloning a context never copies sample data.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Same value for every sample.
    Scalar(f64),
    /// One value per sample index.
    Sequence(Arc<[f64]>),
}

impl Value {
    /// Number of samples for a sequence, `None` for a scalar.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Scalar(_) => None,
            Value::Sequence(values) => Some(values.len()),
        }
    }

    /// Returns the scalar, if this is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(value) => Some(*value),
            Value::Sequence(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(value)
    }
}

impl From<Vec<f64>> for Value {
    fn from(values: Vec<f64>) -> Self {
        Value::Sequence(values.into())
    }
}

impl From<Arc<[f64]>> for Value {
    fn from(values: Arc<[f64]>) -> Self {
        Value::Sequence(values)
    }
}

/// Ordered mapping from names to values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    bindings: BTreeMap<String, Value>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, returning the value it replaces.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.bindings.insert(name.into(), value.into())
    }

    /// Returns a copy of this context with `name` bound to `value`.
    pub fn with(&self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut extended = self.clone();
        extended.insert(name, value);
        extended
    }

    /// Looks up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Returns true if `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates bindings in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.bindings.iter()
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
