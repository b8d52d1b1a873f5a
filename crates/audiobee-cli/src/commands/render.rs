//! Render command implementation
//!
//! Renders an expression over the sweep in an options file and writes one WAV
//! per (velocity, frequency) pair.

use anyhow::{Context, Result};
use audiobee_backend::{generate_blocking, BufferSourceFactory};
use audiobee_spec::{validate_options, BackendError, ProgressReporter};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

use super::json_output::{
    error_codes, input_error_to_json, render_error_to_json, validation_warning_to_json,
    JsonError, RenderOutput, RenderSummary, RenderedFile,
};
use super::validate::print_validation_results;
use crate::input::{load_options, load_source};

/// Arguments of the render command.
#[derive(Debug, Clone, Copy)]
pub struct RenderArgs<'a> {
    /// Inline expression source
    pub source: Option<&'a str>,
    /// Path to a file holding the expression source
    pub source_file: Option<&'a str>,
    /// Path to the options JSON file
    pub options_path: &'a str,
    /// Output directory (default: current directory)
    pub out_dir: Option<&'a str>,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 if every buffer was written, 1 otherwise
pub fn run(args: RenderArgs<'_>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// File name for the buffer at `index` in velocity-major order.
pub fn output_file_name(index: usize, frequency_count: usize) -> String {
    let frequency_count = frequency_count.max(1);
    format!(
        "v{}_f{}.wav",
        index / frequency_count,
        index % frequency_count
    )
}

fn run_human(args: RenderArgs<'_>) -> Result<ExitCode> {
    let start = Instant::now();

    let source = load_source(args.source, args.source_file.map(Path::new))?;
    let mut options = load_options(Path::new(args.options_path))
        .with_context(|| format!("loading options from {}", args.options_path))?
        .options;

    println!("{} {}", "Rendering:".cyan().bold(), source);

    let validation = validate_options(&options);
    print_validation_results(&validation);
    if !validation.is_ok() {
        println!(
            "\n{} {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    options.report_progress = Some(ProgressReporter::infallible(|fraction| {
        eprint!("\r  {} {:>5.1}%", "progress".dimmed(), fraction * 100.0);
    }));

    let factories = match generate_blocking(&source, &options) {
        Ok(factories) => factories,
        Err(e) => {
            eprintln!();
            println!("\n{} [{}] {}", "FAILED".red().bold(), e.code().red(), e);
            return Ok(ExitCode::from(1));
        }
    };
    eprintln!();

    let out_dir = Path::new(args.out_dir.unwrap_or("."));
    let files = write_outputs(&factories, options.frequencies.len(), out_dir)?;
    for file in &files {
        println!(
            "  {} {} v={} f={:.3} Hz loop={:.4}..{:.4}s {}",
            "+".green(),
            file.path,
            file.velocity,
            file.frequency,
            file.loop_start_t,
            file.loop_end_t,
            file.pcm_hash.dimmed()
        );
    }

    println!(
        "\n{} {} file(s) in {:.2}s",
        "SUCCESS".green().bold(),
        files.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(args: RenderArgs<'_>) -> Result<ExitCode> {
    let output = render_to_output(args);
    println!("{}", serde_json::to_string_pretty(&output)?);
    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn render_to_output(args: RenderArgs<'_>) -> RenderOutput {
    let start = Instant::now();

    let source = match load_source(args.source, args.source_file.map(Path::new)) {
        Ok(source) => source,
        Err(e) => return RenderOutput::failure(vec![input_error_to_json(&e)], Vec::new()),
    };
    let options = match load_options(Path::new(args.options_path)) {
        Ok(loaded) => loaded.options,
        Err(e) => return RenderOutput::failure(vec![input_error_to_json(&e)], Vec::new()),
    };

    let warnings = validate_options(&options)
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();

    let factories = match generate_blocking(&source, &options) {
        Ok(factories) => factories,
        Err(e) => return RenderOutput::failure(render_error_to_json(&e), warnings),
    };

    let out_dir = Path::new(args.out_dir.unwrap_or("."));
    match write_outputs(&factories, options.frequencies.len(), out_dir) {
        Ok(files) => RenderOutput {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(RenderSummary {
                files,
                duration_ms: start.elapsed().as_millis() as u64,
            }),
        },
        Err(e) => RenderOutput::failure(
            vec![JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e))],
            warnings,
        ),
    }
}

/// Writes every buffer as WAV into `out_dir`.
fn write_outputs(
    factories: &[BufferSourceFactory],
    frequency_count: usize,
    out_dir: &Path,
) -> Result<Vec<RenderedFile>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let mut files = Vec::with_capacity(factories.len());
    for (index, factory) in factories.iter().enumerate() {
        let wav = factory.to_wav()?;
        let path = out_dir.join(output_file_name(index, frequency_count));
        std::fs::write(&path, &wav.wav_data)
            .with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), hash = %wav.pcm_hash, "wrote buffer");

        files.push(RenderedFile {
            path: path.display().to_string(),
            velocity: factory.velocity,
            frequency: factory.frequency,
            loop_start_t: factory.loop_start_t,
            loop_end_t: factory.loop_end_t,
            channels: wav.channels,
            num_samples: wav.num_samples,
            pcm_hash: wav.pcm_hash,
        });
    }
    Ok(files)
}
