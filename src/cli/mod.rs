//! CLI support for cexpr
//!
//! Provides programmatic access to the cexpr commands so other tools can
//! evaluate expressions and run scripts the same way the binary does.

mod check;
mod convert;
mod docs;

pub use check::{
    EvalOptions, EvalResult, RunOptions, RunResult, execute_eval, execute_run, execute_tree,
    execute_vars,
};
pub use convert::{collect_bindings, json_to_bindings, parse_binding};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Expression or script did not parse
    Parse(crate::ParseError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// Unknown documentation category
    UnknownCategory(String),
    /// A variable binding that is not `NAME=NUMBER`
    InvalidBinding(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse failed with {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => {
                write!(f, "No input provided. Pass the script as an argument, use --file, or pipe it to stdin.")
            }
            CliError::UnknownCategory(c) => {
                write!(f, "Unknown category: '{}'\nRun 'cexpr docs' to see available categories.", c)
            }
            CliError::InvalidBinding(b) => {
                write!(f, "Invalid variable binding: '{}' (expected NAME=NUMBER)", b)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
