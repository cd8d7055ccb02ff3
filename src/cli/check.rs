//! Validate guards and evaluate them against JSON bindings

use std::collections::HashMap;

use super::CliError;
use crate::provider::BasicMath;
use crate::{Expression, Value};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The guard expression to check
    pub guard: String,
    /// Variable bindings as a JSON object
    pub bindings: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Guard evaluated successfully with JSON output
    Evaluated(serde_json::Value),
}

/// Execute a guard check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expression = Expression::parse(&options.guard)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let bindings = match &options.bindings {
        Some(json) => parse_bindings(json)?,
        None => HashMap::new(),
    };

    let result = expression.evaluate(&bindings, &BasicMath)?;
    Ok(CheckResult::Evaluated(serde_json::Value::from(&result)))
}

fn parse_bindings(json: &str) -> Result<HashMap<String, Value>, CliError> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Object(object) = parsed else {
        return Err(CliError::BindingsShape);
    };

    let mut bindings = HashMap::with_capacity(object.len());
    for (name, value) in &object {
        let value = Value::try_from(value).map_err(|source| CliError::Binding {
            name: name.clone(),
            source,
        })?;
        bindings.insert(name.clone(), value);
    }
    Ok(bindings)
}
