//! CLI support for guard-lang
//!
//! Provides programmatic access to the guard CLI functionality for
//! embedding in other tools.

mod check;
mod print;
mod vars;

pub use check::{execute_check, CheckOptions, CheckResult};
pub use print::{execute_print, PrintOptions, PrintStyle};
pub use vars::{execute_vars, VarsOptions};

use std::io;

use thiserror::Error;

use crate::value::UnsupportedJsonValue;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Parser error
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),
    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),
    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Bindings were valid JSON, but not an object
    #[error("Bindings must be a JSON object of variable/value pairs")]
    BindingsShape,
    /// A binding value has no guard-value counterpart
    #[error("Binding '{name}' cannot be used: {source}")]
    Binding {
        name: String,
        source: UnsupportedJsonValue,
    },
    /// Unknown print style
    #[error("Unknown style: '{0}'\nAvailable styles: canonical, pretty, tree.")]
    UnknownStyle(String),
}
