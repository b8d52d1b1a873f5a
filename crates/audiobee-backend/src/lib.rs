//! AudioBee render backend
//!
//! Renders a closed-form expression into multi-channel sample buffers, one
//! buffer per (velocity, frequency) pair of a sweep.
//!
//! # Overview
//!
//! For every pair the renderer binds the sweep values, optionally snaps the
//! frequency to a whole number of samples per period and the loop to a whole
//! number of periods, then evaluates the expression once per channel on
//! Tokio's blocking pool. Progress is reported as channels complete; the
//! first failure fails the whole render.
//!
//! Every evaluation sees these names:
//!
//! | Name | Value |
//! |---|---|
//! | `N` | number of samples |
//! | `T` | sample period in seconds |
//! | `n` | sample index sequence |
//! | `t` | sample time sequence in seconds |
//! | `v` | velocity |
//! | `f` | frequency, after quantization |
//! | `loopStart`, `loopEnd` | loop bounds in samples |
//! | `c` | channel index |
//!
//! plus any caller locals that do not collide with them.
//!
//! # Example
//!
//! ```
//! use audiobee_backend::generate_blocking;
//! use audiobee_spec::AudioBeeOptions;
//!
//! let options = AudioBeeOptions::builder(1000, 100)
//!     .velocity(0.5)
//!     .frequency(100.0)
//!     .build();
//!
//! let factories = generate_blocking("v * sin(TAU * f * t)", &options).unwrap();
//! let source = factories[0].make_buffer_source(200.0);
//! assert_eq!(source.playback_rate, 2.0);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Async render entry point
//! - [`context`] - Evaluation context construction and quantization
//! - [`factory`] - Rendered buffers and playback descriptors
//! - [`wav`] - Deterministic WAV encoding

pub mod buffer;
pub mod context;
pub mod error;
pub mod factory;
pub mod generate;
pub mod wav;

pub use buffer::AudioBuffer;
pub use error::{RenderError, RenderResult};
pub use factory::{BufferSource, BufferSourceFactory};
pub use generate::{generate, generate_blocking, generate_with};
pub use wav::WavResult;
