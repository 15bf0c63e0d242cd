use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, declared_type::DeclaredType},
    },
    util::num::f64_to_i64_exact,
};

/// Converts `value` into the representation `declared` stores.
///
/// - `any` accepts everything unchanged.
/// - `string` accepts only strings.
/// - `integer` accepts integers, booleans (as 0/1) and floats with no
///   fractional part that fit in 64 bits.
/// - `number` accepts integers, floats and booleans (as 0/1).
/// - `boolean` accepts booleans and the integers 0 and 1.
///
/// # Returns
/// The stored value, or the rejected value unchanged.
///
/// # Example
/// ```
/// use nirvana::interpreter::{
///     evaluator::types::coerce_to_declared,
///     value::{core::Value, declared_type::DeclaredType},
/// };
///
/// assert_eq!(coerce_to_declared(DeclaredType::Integer, Value::Float(4.0)), Ok(Value::Integer(4)));
/// assert_eq!(coerce_to_declared(DeclaredType::Integer, Value::Float(4.5)), Err(Value::Float(4.5)));
/// assert_eq!(coerce_to_declared(DeclaredType::Boolean, Value::Integer(1)), Ok(Value::Boolean(true)));
/// ```
pub fn coerce_to_declared(declared: DeclaredType, value: Value) -> Result<Value, Value> {
    match (declared, value) {
        (DeclaredType::Any, value)
        | (DeclaredType::String, value @ Value::String(_))
        | (DeclaredType::Integer, value @ Value::Integer(_))
        | (DeclaredType::Number, value @ (Value::Integer(_) | Value::Float(_)))
        | (DeclaredType::Boolean, value @ Value::Boolean(_)) => Ok(value),
        (DeclaredType::Integer | DeclaredType::Number, Value::Boolean(b)) => {
            Ok(Value::Integer(i64::from(b)))
        },
        (DeclaredType::Integer, Value::Float(f)) => {
            f64_to_i64_exact(f).map(Value::Integer).ok_or(Value::Float(f))
        },
        (DeclaredType::Boolean, Value::Integer(n @ (0 | 1))) => Ok(Value::Boolean(n == 1)),
        (_, value) => Err(value),
    }
}

/// Checks a value written to the variable or parameter `name`.
///
/// # Errors
/// Returns [`RuntimeError::TypeMismatch`] naming the variable, the declared
/// type and the kind of the rejected value.
pub fn enforce_type(name: &str,
                    declared: DeclaredType,
                    value: Value,
                    line: usize)
                    -> EvalResult<Value> {
    coerce_to_declared(declared, value).map_err(|rejected| RuntimeError::TypeMismatch {
        name: name.to_string(),
        expected: declared,
        found: rejected.type_name(),
        line,
    })
}
