//! Variable and function resolution at the host boundary.
//!
//! Hosts hand the evaluator two capabilities: a [`VariableProvider`]
//! that turns identifiers into values, and a [`FunctionProvider`] that
//! computes named functions. Both are borrowed immutably for the
//! duration of one evaluation; any interior synchronization is the
//! implementor's concern.

use std::collections::HashMap;

use crate::evaluator::EvalError;
use crate::value::Value;

/// Resolves variable identifiers during evaluation. Names arrive
/// exactly as written in the guard, trailing prime included.
pub trait VariableProvider {
    fn value(&self, name: &str) -> Result<Value, EvalError>;
}

/// Computes host-supplied functions. Arguments arrive fully evaluated,
/// except that a bare variable argument arrives by name as a string.
pub trait FunctionProvider {
    fn calculate(&self, name: &str, args: &[Value]) -> Result<Value, EvalError>;
}

/// Map-backed provider. A key that is absent or explicitly bound to
/// null counts as not found.
impl VariableProvider for HashMap<String, Value> {
    fn value(&self, name: &str) -> Result<Value, EvalError> {
        match self.get(name) {
            None | Some(Value::Null) => Err(EvalError::VariableNotFound(name.to_string())),
            Some(value) => Ok(value.clone()),
        }
    }
}

/// The provider with no variables; every lookup fails.
pub struct NoVariables;

impl VariableProvider for NoVariables {
    fn value(&self, name: &str) -> Result<Value, EvalError> {
        Err(EvalError::VariableNotFound(name.to_string()))
    }
}

/// The provider with no functions; every call fails.
pub struct NoFunctions;

impl FunctionProvider for NoFunctions {
    fn calculate(&self, name: &str, _args: &[Value]) -> Result<Value, EvalError> {
        Err(EvalError::UnsupportedFunction {
            name: name.to_string(),
            reason: "no functions are available".to_string(),
        })
    }
}

/// `min`, `max`, and `abs` over numeric arguments. Results are always
/// doubles; a wrong name, a wrong arity, or a non-numeric argument is
/// an unsupported-function error.
pub struct BasicMath;

impl BasicMath {
    fn numeric_args(name: &str, args: &[Value]) -> Result<Vec<f64>, EvalError> {
        args.iter()
            .map(|arg| {
                arg.as_f64().ok_or_else(|| EvalError::UnsupportedFunction {
                    name: name.to_string(),
                    reason: format!("argument {arg} is not numeric"),
                })
            })
            .collect()
    }
}

impl FunctionProvider for BasicMath {
    fn calculate(&self, name: &str, args: &[Value]) -> Result<Value, EvalError> {
        match name {
            "min" | "max" => {
                if args.is_empty() {
                    return Err(EvalError::UnsupportedFunction {
                        name: name.to_string(),
                        reason: "expects at least one argument".to_string(),
                    });
                }
                let numbers = Self::numeric_args(name, args)?;
                let result = if name == "min" {
                    numbers.into_iter().fold(f64::INFINITY, f64::min)
                } else {
                    numbers.into_iter().fold(f64::NEG_INFINITY, f64::max)
                };
                Ok(Value::Double(result))
            }
            "abs" => {
                if args.len() != 1 {
                    return Err(EvalError::UnsupportedFunction {
                        name: name.to_string(),
                        reason: "expects exactly one argument".to_string(),
                    });
                }
                let numbers = Self::numeric_args(name, args)?;
                Ok(Value::Double(numbers[0].abs()))
            }
            _ => Err(EvalError::UnsupportedFunction {
                name: name.to_string(),
                reason: "unknown function".to_string(),
            }),
        }
    }
}
