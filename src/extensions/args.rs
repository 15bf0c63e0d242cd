use crate::{
    ast::Number,
    error::NativeError,
    interpreter::{native::NativeResult, value::core::Value},
    util::num::f64_to_i64_exact,
};

/// The positional arguments of one native call.
///
/// Positions are one-based, as in error messages. Arity is checked before an
/// extension runs, so a missing required argument only shows up as a `null`
/// type error.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    function: &'static str,
    values:   &'a [Value],
}

impl<'a> Arguments<'a> {
    /// Wraps the argument slice of a call to `function`.
    #[must_use]
    pub const fn new(function: &'static str, values: &'a [Value]) -> Self {
        Self { function, values }
    }

    /// Number of supplied arguments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no arguments were supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn get(&self, position: usize) -> Option<&'a Value> {
        position.checked_sub(1).and_then(|index| self.values.get(index))
    }

    fn type_error(&self, position: usize, parameter: &str, expected: &'static str, found: &Value) -> NativeError {
        NativeError::ArgumentType { function: self.function.to_string(),
                                    position,
                                    parameter: parameter.to_string(),
                                    expected,
                                    found: found.type_name() }
    }

    /// An `InvalidArgument` error for this function.
    #[must_use]
    pub fn invalid(&self, details: impl Into<String>) -> NativeError {
        NativeError::invalid(self.function, details)
    }

    /// A required string argument.
    ///
    /// # Errors
    /// `ArgumentType` if the argument is not a string.
    pub fn string(&self, position: usize, parameter: &str) -> NativeResult<&'a str> {
        match self.get(position) {
            Some(Value::String(s)) => Ok(s.as_str()),
            other => Err(self.type_error(position, parameter, "a string", other.unwrap_or(&Value::Null))),
        }
    }

    /// An optional string argument.
    ///
    /// # Errors
    /// `ArgumentType` if the argument is present but not a string.
    pub fn string_or(&self, position: usize, parameter: &str, default: &'a str) -> NativeResult<&'a str> {
        if self.get(position).is_none() {
            return Ok(default);
        }
        self.string(position, parameter)
    }

    /// A required integer argument. Floats with no fractional part are
    /// accepted.
    ///
    /// # Errors
    /// `ArgumentType` for non-numbers, `InvalidArgument` for fractional
    /// floats.
    pub fn integer(&self, position: usize, parameter: &str) -> NativeResult<i64> {
        match self.get(position) {
            Some(Value::Integer(n)) => Ok(*n),
            Some(Value::Float(f)) => f64_to_i64_exact(*f).ok_or_else(|| {
                self.invalid(format!("Argument {position} (${parameter}) must be an integer, but got {f}."))
            }),
            other => Err(self.type_error(position, parameter, "an integer", other.unwrap_or(&Value::Null))),
        }
    }

    /// An optional integer argument.
    ///
    /// # Errors
    /// As [`Arguments::integer`] when the argument is present.
    pub fn integer_or(&self, position: usize, parameter: &str, default: i64) -> NativeResult<i64> {
        if self.get(position).is_none() {
            return Ok(default);
        }
        self.integer(position, parameter)
    }

    /// A required number argument, keeping the integer/float distinction.
    /// Booleans are rejected.
    ///
    /// # Errors
    /// `ArgumentType` for anything but integers and floats.
    pub fn number(&self, position: usize, parameter: &str) -> NativeResult<Number> {
        match self.get(position) {
            Some(Value::Integer(n)) => Ok(Number::Integer(*n)),
            Some(Value::Float(f)) => Ok(Number::Float(*f)),
            other => Err(self.type_error(position, parameter, "a number", other.unwrap_or(&Value::Null))),
        }
    }
}
