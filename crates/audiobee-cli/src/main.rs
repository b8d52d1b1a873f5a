//! AudioBee CLI - Render expression sweeps to WAV
//!
//! This binary provides commands for rendering, validating options and
//! inspecting the function library.

use clap::{ArgGroup, Parser, Subcommand};
use std::process::ExitCode;

use audiobee_cli::commands;
use audiobee_cli::commands::render::RenderArgs;

/// AudioBee - Expression-driven sample buffer generator
#[derive(Parser)]
#[command(name = "audiobee")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an expression for every velocity and frequency in an options file
    #[command(group(ArgGroup::new("input").required(true).args(["source", "source_file"])))]
    Render {
        /// Expression source
        #[arg(short, long)]
        source: Option<String>,

        /// File holding the expression source
        #[arg(long)]
        source_file: Option<String>,

        /// Path to the options file (JSON)
        #[arg(short, long)]
        options: String,

        /// Output directory (default: current directory)
        #[arg(short = 'd', long)]
        out_dir: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate an options file without rendering
    Validate {
        /// Path to the options file (JSON)
        #[arg(short, long)]
        options: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List the functions available to expressions
    Functions {
        /// Include numeric built-ins such as sin and exp
        #[arg(long)]
        builtins: bool,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert between frequency and note number
    #[command(group(ArgGroup::new("pitch").required(true).args(["hz", "note"])))]
    Pitch {
        /// Frequency in Hz
        #[arg(long)]
        hz: Option<f64>,

        /// Note number (69 = A4)
        #[arg(long, allow_hyphen_values = true)]
        note: Option<f64>,

        /// Also show the nearest frequency with a whole-sample period at this rate
        #[arg(long)]
        sample_rate: Option<u32>,
    },
}

fn main() -> ExitCode {
    // stdout carries command output, including --json.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            source,
            source_file,
            options,
            out_dir,
            json,
        } => commands::render::run(
            RenderArgs {
                source: source.as_deref(),
                source_file: source_file.as_deref(),
                options_path: &options,
                out_dir: out_dir.as_deref(),
            },
            json,
        ),
        Commands::Validate { options, json } => commands::validate::run(&options, json),
        Commands::Functions { builtins, json } => commands::functions::run(builtins, json),
        Commands::Pitch {
            hz,
            note,
            sample_rate,
        } => commands::pitch::run(hz, note, sample_rate),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
