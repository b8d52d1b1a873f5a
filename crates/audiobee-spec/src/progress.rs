//! Progress callback carried by the render options.

use std::fmt;
use std::sync::Arc;

/// Error raised by a progress callback.
pub type ProgressError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by a progress callback. An `Err` aborts the render.
pub type ProgressResult = Result<(), ProgressError>;

type Callback = dyn Fn(f64) -> ProgressResult + Send + Sync;

/// Shared handle to a progress callback.
///
/// The callback receives the completed fraction of the render in [0, 1]. It is
/// called with 0 before any work starts and with 1 once every channel has been
/// rendered; calls in between are monotonically non-decreasing.
#[derive(Clone)]
pub struct ProgressReporter {
    callback: Arc<Callback>,
}

impl ProgressReporter {
    /// Wraps a fallible callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(f64) -> ProgressResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Wraps a callback that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        Self::new(move |fraction| {
            callback(fraction);
            Ok(())
        })
    }

    /// Invokes the callback.
    pub fn report(&self, fraction: f64) -> ProgressResult {
        (self.callback)(fraction)
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProgressReporter(..)")
    }
}
