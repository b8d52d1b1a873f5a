//! Loading render options and expression sources from disk.

use std::path::{Path, PathBuf};

use audiobee_spec::AudioBeeOptions;
use thiserror::Error;

/// Errors that can occur while loading inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// A file could not be read.
    #[error("failed to read '{path}': {source}")]
    FileRead {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The options file is not valid options JSON.
    #[error("invalid options JSON in '{path}': {message}")]
    JsonParse {
        /// Options file path.
        path: PathBuf,
        /// Parser message, including line and column.
        message: String,
    },

    /// Neither an inline source nor a source file was given.
    #[error("no expression source given (use --source or --source-file)")]
    MissingSource,

    /// The expression source is empty.
    #[error("expression source is empty")]
    EmptySource,
}

/// Options loaded from a file, with the hash of the file content.
#[derive(Debug)]
pub struct LoadedOptions {
    /// Parsed options.
    pub options: AudioBeeOptions,
    /// BLAKE3 hash of the options file (hex string).
    pub source_hash: String,
}

/// Reads and parses an options JSON file.
pub fn load_options(path: &Path) -> Result<LoadedOptions, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    let options = AudioBeeOptions::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(LoadedOptions {
        options,
        source_hash,
    })
}

/// Resolves the expression source from an inline string or a file.
///
/// An inline source takes precedence. Surrounding whitespace is trimmed.
pub fn load_source(inline: Option<&str>, file: Option<&Path>) -> Result<String, InputError> {
    let source = match (inline, file) {
        (Some(source), _) => source.to_string(),
        (None, Some(path)) => {
            std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
                path: path.to_path_buf(),
                source,
            })?
        }
        (None, None) => return Err(InputError::MissingSource),
    };

    let trimmed = source.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptySource);
    }
    Ok(trimmed.to_string())
}
