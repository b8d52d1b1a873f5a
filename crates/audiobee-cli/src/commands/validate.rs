//! Validate command implementation
//!
//! Checks an options file without rendering.

use anyhow::Result;
use audiobee_spec::{validate_options, ValidationResult};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    input_error_to_json, validation_error_to_json, validation_warning_to_json, ValidateOutput,
};
use crate::input::{load_options, LoadedOptions};

/// Run the validate command
///
/// # Arguments
/// * `options_path` - Path to the options JSON file
/// * `json_output` - Whether to print machine-readable JSON
///
/// # Returns
/// Exit code: 0 if valid, 1 if errors
pub fn run(options_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options_path)
    } else {
        run_human(options_path)
    }
}

fn run_human(options_path: &str) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), options_path);

    let LoadedOptions {
        options,
        source_hash,
    } = load_options(Path::new(options_path))?;
    println!("{} {}", "Hash:".dimmed(), source_hash);
    println!(
        "{} {} x {} buffers, {} channel(s), {} samples at {} Hz",
        "Sweep:".dimmed(),
        options.velocities.len(),
        options.frequencies.len(),
        options.number_of_channels,
        options.length,
        options.sample_rate
    );

    let result = validate_options(&options);
    print_validation_results(&result);

    if result.is_ok() {
        println!("\n{} options are valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(options_path: &str) -> Result<ExitCode> {
    let output = match load_options(Path::new(options_path)) {
        Ok(LoadedOptions {
            options,
            source_hash,
        }) => {
            let result = validate_options(&options);
            ValidateOutput {
                success: result.is_ok(),
                errors: result.errors.iter().map(validation_error_to_json).collect(),
                warnings: result
                    .warnings
                    .iter()
                    .map(validation_warning_to_json)
                    .collect(),
                source_hash: Some(source_hash),
            }
        }
        Err(e) => ValidateOutput {
            success: false,
            errors: vec![input_error_to_json(&e)],
            warnings: Vec::new(),
            source_hash: None,
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Print validation results to the console
pub(crate) fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.to_string().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.to_string().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
