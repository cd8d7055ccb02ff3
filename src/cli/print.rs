//! Render guards in the printer styles

use super::CliError;
use crate::Expression;

/// One of the three renderer styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintStyle {
    /// Compact, fully parenthesized
    #[default]
    Canonical,
    /// One line with spaces around operators
    Pretty,
    /// Multi-line, one boolean operand per line
    Tree,
}

impl PrintStyle {
    fn from_name(name: &str) -> Result<PrintStyle, CliError> {
        match name {
            "canonical" => Ok(PrintStyle::Canonical),
            "pretty" => Ok(PrintStyle::Pretty),
            "tree" => Ok(PrintStyle::Tree),
            other => Err(CliError::UnknownStyle(other.to_string())),
        }
    }
}

/// Options for the print command
#[derive(Debug, Clone, Default)]
pub struct PrintOptions {
    /// The guard expression to render
    pub guard: String,
    /// Style name: canonical, pretty, or tree
    pub style: String,
    /// Spaces around operators in the pretty style
    pub spaces: usize,
    /// Indent step in the tree style
    pub indent: usize,
}

/// Execute a print operation
pub fn execute_print(options: &PrintOptions) -> Result<String, CliError> {
    let style = PrintStyle::from_name(&options.style)?;
    let expression = Expression::parse(&options.guard)?;

    Ok(match style {
        PrintStyle::Canonical => expression.canonical(),
        PrintStyle::Pretty => expression.pretty(options.spaces),
        PrintStyle::Tree => expression.tree(options.indent),
    })
}
