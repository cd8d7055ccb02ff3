use std::fmt;

use thiserror::Error;

use crate::datetime;

/// A runtime value of the guard language.
///
/// Guards are typed: there is no implicit truthiness, and only
/// `Integer` and `Double` count as numeric. A `Date` is an
/// epoch-millisecond instant and is *not* numeric by itself; the
/// evaluator converts it to milliseconds when it meets one in an
/// ordering or arithmetic operation.
///
/// # Examples
///
/// ```
/// use guard_lang::Value;
///
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let integer = Value::Integer(42);
/// let double = Value::Double(3.14);
/// let string = Value::String("hello".to_string());
/// let date = Value::Date(1_388_574_000_000); // 2014-01-01T11:00:00.000Z
///
/// assert!(integer.is_numeric());
/// assert!(!date.is_numeric());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,

    /// Boolean (true/false)
    Boolean(bool),

    /// Integer number
    Integer(i64),

    /// Floating-point number
    Double(f64),

    /// UTF-8 string, without quotes
    String(String),

    /// Point in time as milliseconds since the Unix epoch
    Date(i64),
}

impl Value {
    /// Whether the value takes part in arithmetic and fuzzy comparison.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Double(_))
    }

    /// Get as float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Formats a double so it stays recognizable as one: a whole number
/// keeps its decimal point (`2.0`, never `2`).
pub(crate) fn fmt_double(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{}", fmt_double(*n)),
            Value::String(s) => write!(f, "{s}"),
            Value::Date(millis) => write!(f, "{}", datetime::format_utc(*millis)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// JSON arrays and objects have no guard-value counterpart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("JSON {0} values cannot be used as guard values")]
pub struct UnsupportedJsonValue(pub &'static str);

impl TryFrom<&serde_json::Value> for Value {
    type Error = UnsupportedJsonValue;

    fn try_from(json: &serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Ok(Value::Null),
            serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i))
                } else {
                    Ok(Value::Double(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Ok(Value::String(s.clone())),
            serde_json::Value::Array(_) => Err(UnsupportedJsonValue("array")),
            serde_json::Value::Object(_) => Err(UnsupportedJsonValue("object")),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Integer(n) => serde_json::Value::from(*n),
            // Non-finite doubles become JSON null, as serde_json defines.
            Value::Double(n) => serde_json::Value::from(*n),
            Value::String(s) => serde_json::Value::from(s.as_str()),
            Value::Date(millis) => serde_json::Value::from(*millis),
        }
    }
}
