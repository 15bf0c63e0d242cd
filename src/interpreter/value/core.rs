use std::fmt;

use crate::util::num::{f64_to_i64_exact, i64_to_f64};

/// Represents a runtime value in the interpreter.
///
/// Values are plain data: they are cloned into and out of scope frames and
/// never shared.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A string.
    String(String),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value (`true` or `false`).
    Boolean(bool),
    /// The absence of a value. Produced by `return;`, by uninitialized `any`
    /// variables and by natives with nothing to return.
    Null,
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl Value {
    /// The kind name used in error messages.
    ///
    /// Floats report as `number`, matching the `number` type keyword.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }

    /// Coerces the value to a boolean for logical contexts.
    ///
    /// Non-empty strings and nonzero numbers are true; null is false.
    ///
    /// # Example
    /// ```
    /// use nirvana::interpreter::value::core::Value;
    ///
    /// assert!(Value::from("0").truthiness());
    /// assert!(!Value::from("").truthiness());
    /// assert!(!Value::Float(0.0).truthiness());
    /// assert!(!Value::Null.truthiness());
    /// ```
    #[must_use]
    pub fn truthiness(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty(),
            Self::Integer(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Boolean(b) => *b,
            Self::Null => false,
        }
    }

    /// Returns the value as an integer if it is integer-like
    /// (`Integer`, or `Boolean` as 0/1).
    #[must_use]
    pub fn as_integer_like(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Boolean(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Returns the value as an integer if it can be represented exactly:
    /// integer-like values, and floats with no fractional part in range.
    #[must_use]
    pub fn as_integer_exact(&self) -> Option<i64> {
        match self {
            Self::Float(f) => f64_to_i64_exact(*f),
            _ => self.as_integer_like(),
        }
    }

    /// Promotes a numeric-like value (`Integer`, `Float`, `Boolean`) to `f64`.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => self.as_integer_like().map(i64_to_f64),
        }
    }
}

/// Significant digits kept when a float is printed.
pub const FLOAT_PRECISION: usize = 14;

/// Formats a float rounded to [`FLOAT_PRECISION`] significant digits in
/// fixed notation, then strips trailing zeros while keeping at least one
/// digit after the point.
///
/// # Example
/// ```
/// use nirvana::interpreter::value::core::format_float;
///
/// assert_eq!(format_float(10.0), "10.0");
/// assert_eq!(format_float(0.1 + 0.2), "0.3");
/// assert_eq!(format_float(-2.5), "-2.5");
/// assert_eq!(format_float(1234.1), "1234.1");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // Scientific formatting rounds to the right number of significant
    // digits; its exponent tells how many of them fall after the point.
    let scientific = format!("{value:.prec$e}", prec = FLOAT_PRECISION - 1);
    let exponent = scientific.split_once('e')
                             .and_then(|(_, exponent)| exponent.parse::<isize>().ok())
                             .unwrap_or(0);
    let decimals = (FLOAT_PRECISION - 1).checked_add_signed(-exponent).unwrap_or(0);

    let mut text = format!("{value:.decimals$}");
    if !text.contains('.') {
        text.push_str(".0");
    }
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    text
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{}", format_float(*x)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => write!(f, "null"),
        }
    }
}
