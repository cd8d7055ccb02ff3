//! Report the variables, literals, and atoms of a guard as JSON

use std::collections::HashSet;

use serde_json::json;

use super::CliError;
use crate::{Expression, LiteralKind};

/// Options for the vars command
#[derive(Debug, Clone, Default)]
pub struct VarsOptions {
    /// The guard expression to analyze
    pub guard: String,
}

/// Execute a vars operation
pub fn execute_vars(options: &VarsOptions) -> Result<serde_json::Value, CliError> {
    let expression = Expression::parse(&options.guard)?;

    Ok(json!({
        "variables": sorted(expression.variables()),
        "normal_variables": sorted(expression.normal_variables()),
        "prime_variables": sorted(expression.prime_variables()),
        "literals": {
            "boolean": sorted(expression.literal_values(LiteralKind::Boolean)),
            "integer": sorted(expression.literal_values(LiteralKind::Integer)),
            "double": sorted(expression.literal_values(LiteralKind::Double)),
            "string": sorted(expression.literal_values(LiteralKind::String)),
        },
        "atom_count": expression.atom_count(),
    }))
}

fn sorted(set: HashSet<String>) -> Vec<String> {
    let mut names: Vec<String> = set.into_iter().collect();
    names.sort();
    names
}
