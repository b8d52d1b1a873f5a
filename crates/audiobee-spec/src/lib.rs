//! AudioBee render options.
//!
//! This crate defines the options record that drives a render, its JSON form,
//! validation, and the error types shared by the other AudioBee crates.
//!
//! # Example
//!
//! ```
//! use audiobee_spec::AudioBeeOptions;
//! use audiobee_spec::validation::validate_options;
//!
//! let options = AudioBeeOptions::builder(44_100, 88_200)
//!     .velocities(vec![0.5, 1.0])
//!     .frequency(261.625565)
//!     .channels(2)
//!     .loop_points(0.5, 1.5)
//!     .quantize_period(true)
//!     .quantize_loop_end(true)
//!     .build();
//!
//! let result = validate_options(&options);
//! assert!(result.is_ok());
//! assert_eq!(options.total_work(), 4);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types, and the [`BackendError`] trait
//! - [`options`]: The options record, its builder and reserved names
//! - [`progress`]: The progress callback handle
//! - [`validation`]: Option validation

pub mod error;
pub mod options;
pub mod progress;
pub mod validation;

pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use options::{is_reserved_name, AudioBeeOptions, Local, OptionsBuilder, RESERVED_NAMES};
pub use progress::{ProgressError, ProgressReporter, ProgressResult};
pub use validation::validate_options;
