//! Tree-walking evaluator.
//!
//! Walks a guard tree and folds it into a single [`Value`], resolving
//! variables and functions through the providers it is handed. Numeric
//! comparison is fuzzy within [`COMPARISON_TOLERANCE`], and dates mix
//! with date-like strings in ordering and arithmetic via
//! [`crate::datetime::normalize_to_millis`].

use std::cmp::Ordering;
use std::collections::BTreeSet;

use thiserror::Error;

use crate::ast::{Node, NodeKind, StructuralError, unquote};
use crate::datetime;
use crate::printer;
use crate::provider::{FunctionProvider, VariableProvider};
use crate::value::Value;
use crate::visit::Visitor;

/// Absolute tolerance of numeric comparison. Two numbers closer than
/// this compare equal under every comparison operator.
pub const COMPARISON_TOLERANCE: f64 = 1e-6;

/// Errors raised while evaluating a guard.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Top-level wrapper naming the canonical text of the guard that
    /// failed.
    #[error("error evaluating expression {expression}: {source}")]
    Evaluation {
        expression: String,
        source: Box<EvalError>,
    },

    #[error("cannot evaluate < {operands} >: '{op}' needs numeric operands")]
    NumericValueRequired { op: &'static str, operands: String },

    #[error("cannot evaluate < {operands} >: '{op}' needs boolean operands")]
    BooleanValueRequired { op: &'static str, operands: String },

    #[error("variable '{0}' is not bound to a value")]
    VariableNotFound(String),

    #[error("unsupported function '{name}': {reason}")]
    UnsupportedFunction { name: String, reason: String },

    /// Batch report of every referenced variable absent from a set of
    /// declared names.
    #[error("missing variables: {}", .0.iter().cloned().collect::<Vec<_>>().join(", "))]
    MissingVariables(BTreeSet<String>),

    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Equality within an absolute tolerance. Equal infinities compare
/// equal, and so do two NaNs.
pub fn fuzzy_equals(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance || a == b || (a.is_nan() && b.is_nan())
}

/// Three-way comparison on top of [`fuzzy_equals`]. NaN sorts greater
/// than every other number.
pub fn fuzzy_compare(a: f64, b: f64, tolerance: f64) -> Ordering {
    if fuzzy_equals(a, b, tolerance) {
        Ordering::Equal
    } else if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        a.is_nan().cmp(&b.is_nan())
    }
}

/// Evaluates a guard tree against the given providers.
///
/// Any failure below the root is wrapped in [`EvalError::Evaluation`]
/// carrying the canonical text of the whole guard; a malformed tree
/// surfaces its [`StructuralError`] directly.
pub fn evaluate(
    node: &Node,
    variables: &dyn VariableProvider,
    functions: &dyn FunctionProvider,
) -> Result<Value, EvalError> {
    let mut visitor = EvalVisitor {
        variables,
        functions,
    };
    let result = visitor.visit(node).map_err(|err| match err {
        structural @ EvalError::Structural(_) => structural,
        other => EvalError::Evaluation {
            expression: printer::canonical(node).unwrap_or_default(),
            source: Box::new(other),
        },
    });
    if let Err(err) = &result {
        log::debug!("guard evaluation failed: {err}");
    }
    result
}

struct EvalVisitor<'a> {
    variables: &'a dyn VariableProvider,
    functions: &'a dyn FunctionProvider,
}

impl EvalVisitor<'_> {
    fn operands(&mut self, node: &Node) -> Result<(Value, Value), EvalError> {
        let lhs = self.visit(&node.children()[0])?;
        let rhs = self.visit(&node.children()[1])?;
        Ok((lhs, rhs))
    }

    /// Operands of an ordering or arithmetic operation. When either
    /// side is a date, both sides are normalized to epoch millis so
    /// dates and date-like strings can meet numbers.
    fn numeric_operands(&mut self, node: &Node) -> Result<(Value, Value), EvalError> {
        let (lhs, rhs) = self.operands(node)?;
        if matches!(lhs, Value::Date(_)) || matches!(rhs, Value::Date(_)) {
            Ok((
                datetime::normalize_to_millis(lhs),
                datetime::normalize_to_millis(rhs),
            ))
        } else {
            Ok((lhs, rhs))
        }
    }

    fn compare(
        &mut self,
        node: &Node,
        op: &'static str,
        predicate: impl Fn(Ordering) -> bool,
    ) -> Result<Value, EvalError> {
        let (lhs, rhs) = self.numeric_operands(node)?;
        let ordering = match (&lhs, &rhs) {
            (Value::String(l), Value::String(r)) => l.cmp(r),
            _ => match (lhs.as_f64(), rhs.as_f64()) {
                (Some(l), Some(r)) => fuzzy_compare(l, r, COMPARISON_TOLERANCE),
                _ => {
                    return Err(EvalError::NumericValueRequired {
                        op,
                        operands: format!("{lhs} {op} {rhs}"),
                    });
                }
            },
        };
        Ok(Value::Boolean(predicate(ordering)))
    }

    fn arithmetic(
        &mut self,
        node: &Node,
        op: &'static str,
        apply: impl Fn(f64, f64) -> f64,
    ) -> Result<Value, EvalError> {
        let (lhs, rhs) = self.numeric_operands(node)?;
        match (lhs.as_f64(), rhs.as_f64()) {
            (Some(l), Some(r)) => Ok(Value::Double(apply(l, r))),
            _ => Err(EvalError::NumericValueRequired {
                op,
                operands: format!("{lhs} {op} {rhs}"),
            }),
        }
    }

    /// Equality never normalizes dates: a date equals another date,
    /// not a string that happens to render to the same instant.
    fn equality(&mut self, node: &Node) -> Result<bool, EvalError> {
        let (lhs, rhs) = self.operands(node)?;
        Ok(equal_values(&lhs, &rhs))
    }
}

fn equal_values(lhs: &Value, rhs: &Value) -> bool {
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(l), Some(r)) => fuzzy_equals(l, r, COMPARISON_TOLERANCE),
        _ => lhs == rhs,
    }
}

fn boolean_pair(op: &'static str, lhs: Value, rhs: Value) -> Result<(bool, bool), EvalError> {
    match (&lhs, &rhs) {
        (Value::Boolean(l), Value::Boolean(r)) => Ok((*l, *r)),
        _ => Err(EvalError::BooleanValueRequired {
            op,
            operands: format!("{lhs} {op} {rhs}"),
        }),
    }
}

impl Visitor for EvalVisitor<'_> {
    type Output = Value;
    type Error = EvalError;

    // Short-circuits on a false left side without evaluating (or type
    // checking) the right side.
    fn visit_and(&mut self, node: &Node) -> Result<Value, EvalError> {
        let lhs = self.visit(&node.children()[0])?;
        if lhs == Value::Boolean(false) {
            return Ok(Value::Boolean(false));
        }
        let rhs = self.visit(&node.children()[1])?;
        boolean_pair("&&", lhs, rhs).map(|(l, r)| Value::Boolean(l && r))
    }

    fn visit_or(&mut self, node: &Node) -> Result<Value, EvalError> {
        let lhs = self.visit(&node.children()[0])?;
        if lhs == Value::Boolean(true) {
            return Ok(Value::Boolean(true));
        }
        let rhs = self.visit(&node.children()[1])?;
        boolean_pair("||", lhs, rhs).map(|(l, r)| Value::Boolean(l || r))
    }

    fn visit_not(&mut self, node: &Node) -> Result<Value, EvalError> {
        let value = self.visit(&node.children()[0])?;
        match value {
            Value::Boolean(b) => Ok(Value::Boolean(!b)),
            other => Err(EvalError::BooleanValueRequired {
                op: "!",
                operands: format!("!{other}"),
            }),
        }
    }

    fn visit_equal(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.equality(node).map(Value::Boolean)
    }

    fn visit_not_equal(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.equality(node).map(|eq| Value::Boolean(!eq))
    }

    fn visit_less_than(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.compare(node, "<", |ord| ord == Ordering::Less)
    }

    fn visit_greater_than(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.compare(node, ">", |ord| ord == Ordering::Greater)
    }

    fn visit_at_most(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.compare(node, "<=", |ord| ord != Ordering::Greater)
    }

    fn visit_at_least(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.compare(node, ">=", |ord| ord != Ordering::Less)
    }

    fn visit_plus(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.arithmetic(node, "+", |l, r| l + r)
    }

    fn visit_minus(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.arithmetic(node, "-", |l, r| l - r)
    }

    fn visit_mult(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.arithmetic(node, "*", |l, r| l * r)
    }

    // Division follows IEEE 754: x/0 is an infinity, 0/0 is NaN.
    fn visit_div(&mut self, node: &Node) -> Result<Value, EvalError> {
        self.arithmetic(node, "/", |l, r| l / r)
    }

    fn visit_negation(&mut self, node: &Node) -> Result<Value, EvalError> {
        let value = self.visit(&node.children()[0])?;
        match value.as_f64() {
            Some(n) => Ok(Value::Double(-n)),
            None => Err(EvalError::NumericValueRequired {
                op: "-",
                operands: format!("-{value}"),
            }),
        }
    }

    fn visit_lit_null(&mut self, _node: &Node) -> Result<Value, EvalError> {
        Ok(Value::Null)
    }

    fn visit_lit_boolean(&mut self, node: &Node) -> Result<Value, EvalError> {
        match node.kind() {
            NodeKind::LitBoolean(b) => Ok(Value::Boolean(*b)),
            _ => unreachable!(),
        }
    }

    fn visit_lit_integer(&mut self, node: &Node) -> Result<Value, EvalError> {
        match node.kind() {
            NodeKind::LitInteger(n) => Ok(Value::Integer(*n)),
            _ => unreachable!(),
        }
    }

    fn visit_lit_double(&mut self, node: &Node) -> Result<Value, EvalError> {
        match node.kind() {
            NodeKind::LitDouble(n) => Ok(Value::Double(*n)),
            _ => unreachable!(),
        }
    }

    fn visit_lit_string(&mut self, node: &Node) -> Result<Value, EvalError> {
        match node.kind() {
            NodeKind::LitString(raw) => Ok(Value::String(unquote(raw).to_string())),
            _ => unreachable!(),
        }
    }

    fn visit_variable(&mut self, node: &Node) -> Result<Value, EvalError> {
        match node.kind() {
            NodeKind::Variable(name) => self.variables.value(name),
            _ => unreachable!(),
        }
    }

    fn visit_function(&mut self, node: &Node) -> Result<Value, EvalError> {
        let NodeKind::Function(name) = node.kind() else {
            unreachable!()
        };
        let mut args = Vec::with_capacity(node.children().len());
        for child in node.children() {
            // A bare variable argument goes through by name, so
            // providers can look up bindings themselves.
            if let NodeKind::Variable(ident) = child.kind() {
                args.push(Value::String(ident.clone()));
            } else {
                args.push(self.visit(child)?);
            }
        }
        self.functions.calculate(name, &args)
    }
}
