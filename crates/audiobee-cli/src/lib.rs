//! AudioBee CLI library.
//!
//! Input loading and the command implementations behind the `audiobee` binary.

pub mod commands;
pub mod input;
