//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag of `render` and `validate`.

use audiobee_backend::RenderError;
use audiobee_spec::{BackendError, ValidationError, ValidationWarning};
use serde::{Deserialize, Serialize};

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// Validation and render errors pass their own codes through.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Options JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// No expression source
    pub const MISSING_SOURCE: &str = "CLI_003";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001", "RENDER_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Path to the offending option (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the option path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Path to the offending option (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
    /// BLAKE3 hash of the options file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
}

/// JSON output for the `render` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Whether every buffer was rendered and written
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Warnings from validation
    pub warnings: Vec<JsonWarning>,
    /// Render details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderSummary>,
}

/// Render details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSummary {
    /// Written files, velocity-major
    pub files: Vec<RenderedFile>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

/// One written WAV file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedFile {
    /// Output path
    pub path: String,
    /// Velocity
    pub velocity: f64,
    /// Frequency after quantization
    pub frequency: f64,
    /// Loop start in seconds
    pub loop_start_t: f64,
    /// Loop end in seconds
    pub loop_end_t: f64,
    /// Channel count
    pub channels: u16,
    /// Samples per channel
    pub num_samples: usize,
    /// BLAKE3 hash of the PCM payload
    pub pcm_hash: String,
}

impl RenderOutput {
    /// Creates a failed render output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}

/// Converts an [`InputError`] to a [`JsonError`].
pub fn input_error_to_json(err: &InputError) -> JsonError {
    let code = match err {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::JsonParse { .. } => error_codes::JSON_PARSE,
        InputError::MissingSource | InputError::EmptySource => error_codes::MISSING_SOURCE,
    };
    JsonError::new(code, err.to_string())
}

/// Converts a validation error to a [`JsonError`].
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let json = JsonError::new(error.code.code(), error.message.clone());
    match &error.path {
        Some(path) => json.with_path(path.clone()),
        None => json,
    }
}

/// Converts a validation warning to a [`JsonWarning`].
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warning.code.code().to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}

/// Converts a render error to JSON errors.
///
/// Invalid options expand to one entry per validation error.
pub fn render_error_to_json(err: &RenderError) -> Vec<JsonError> {
    match err {
        RenderError::InvalidOptions { errors } => {
            errors.iter().map(validation_error_to_json).collect()
        }
        other => vec![JsonError::new(other.code(), other.to_string())],
    }
}
