//! CLI command implementations

pub mod functions;
pub mod json_output;
pub mod pitch;
pub mod render;
pub mod validate;
