//! Functions command implementation
//!
//! Lists the functions an expression can call.

use anyhow::Result;
use audiobee_expr::builtins::BUILTINS;
use audiobee_library::{Arity, LibraryFunction, LIBRARY};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

/// One callable in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionInfo {
    /// Name used in expressions
    pub name: &'static str,
    /// Fewest accepted arguments
    pub min_args: usize,
    /// Most accepted arguments
    pub max_args: usize,
    /// "builtin" or "library"
    pub kind: &'static str,
}

/// Collects the listed functions, built-ins first when requested.
pub fn collect(include_builtins: bool) -> Vec<FunctionInfo> {
    let info = |kind: &'static str| {
        move |function: &LibraryFunction| FunctionInfo {
            name: function.name,
            min_args: function.arity.min,
            max_args: function.arity.max,
            kind,
        }
    };

    let builtins: &[LibraryFunction] = if include_builtins { BUILTINS } else { &[] };
    builtins
        .iter()
        .map(info("builtin"))
        .chain(LIBRARY.iter().map(info("library")))
        .collect()
}

/// Run the functions command
pub fn run(include_builtins: bool, json_output: bool) -> Result<ExitCode> {
    let functions = collect(include_builtins);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&functions)?);
        return Ok(ExitCode::SUCCESS);
    }

    let width = functions
        .iter()
        .map(|function| function.name.len())
        .max()
        .unwrap_or(0);
    let mut kind = "";
    for function in &functions {
        if function.kind != kind {
            kind = function.kind;
            println!("{}", format!("{}:", kind).cyan().bold());
        }
        let arity = Arity::range(function.min_args, function.max_args).to_string();
        println!(
            "  {:<width$}  {} {}",
            function.name,
            arity.dimmed(),
            "args".dimmed(),
            width = width
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_library_only() {
        let functions = collect(false);
        assert_eq!(functions.len(), LIBRARY.len());
        assert!(functions.iter().all(|function| function.kind == "library"));
        assert!(functions.iter().any(|function| function.name == "softSquare"));
    }

    #[test]
    fn test_collect_builtins_first() {
        let functions = collect(true);
        assert_eq!(functions.len(), BUILTINS.len() + LIBRARY.len());
        assert_eq!(functions[0].kind, "builtin");
        assert_eq!(functions.last().map(|function| function.kind), Some("library"));
    }

    #[test]
    fn test_soft_pulse_arity() {
        let pulse = collect(false)
            .into_iter()
            .find(|function| function.name == "softPulse")
            .unwrap();
        assert_eq!((pulse.min_args, pulse.max_args), (1, 3));
    }
}
