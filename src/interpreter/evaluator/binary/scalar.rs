use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Builds the type error for an operator applied to unsupported operands.
pub(crate) fn operand_error(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeError { details: format!("Cannot apply '{op}' to {} and {}",
                                               left.type_name(),
                                               right.type_name()),
                              line }
}

/// Evaluates `+`, `-` or `*`.
///
/// If both operands are integer-like (`Integer` or `Boolean`), the integer
/// operation runs with overflow checking. Otherwise both operands are
/// promoted to `f64` and the float operation runs.
///
/// # Parameters
/// - `op`: The operator, used for error messages.
/// - `left`, `right`: The operands.
/// - `line`: Line number for error reporting.
/// - `integer_op`: Checked integer operation, `None` on overflow.
/// - `float_op`: The float operation.
///
/// # Returns
/// An `Integer` or a `Float`, or a type or overflow error.
pub fn arithmetic(op: BinaryOperator,
                  left: &Value,
                  right: &Value,
                  line: usize,
                  integer_op: fn(i64, i64) -> Option<i64>,
                  float_op: fn(f64, f64) -> f64)
                  -> EvalResult<Value> {
    if let (Some(a), Some(b)) = (left.as_integer_like(), right.as_integer_like()) {
        return integer_op(a, b).map(Value::Integer)
                               .ok_or(RuntimeError::IntegerOverflow { line });
    }

    let (a, b) = float_operands(op, left, right, line)?;
    Ok(Value::Float(float_op(a, b)))
}

/// Evaluates `/`.
///
/// Integer division truncates toward zero and never produces a float.
/// `i64::MIN / -1` is an overflow.
///
/// # Example
/// ```
/// use nirvana::interpreter::{evaluator::binary::scalar::divide, value::core::Value};
///
/// assert_eq!(divide(&Value::Integer(-7), &Value::Integer(2), 1).unwrap(), Value::Integer(-3));
/// assert_eq!(divide(&Value::Float(1.0), &Value::Integer(4), 1).unwrap(), Value::Float(0.25));
/// assert!(divide(&Value::Integer(1), &Value::Integer(0), 1).is_err());
/// ```
pub fn divide(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    if let (Some(a), Some(b)) = (left.as_integer_like(), right.as_integer_like()) {
        if b == 0 {
            return Err(RuntimeError::IntegerDivisionByZero { line });
        }
        return a.checked_div(b)
                .map(Value::Integer)
                .ok_or(RuntimeError::IntegerOverflow { line });
    }

    let (a, b) = float_operands(BinaryOperator::Div, left, right, line)?;
    if b == 0.0 {
        return Err(RuntimeError::FloatDivisionByZero { line });
    }
    Ok(Value::Float(a / b))
}

/// Promotes both operands to `f64`, or fails if either is not numeric-like.
pub(crate) fn float_operands(op: BinaryOperator,
                             left: &Value,
                             right: &Value,
                             line: usize)
                             -> EvalResult<(f64, f64)> {
    match (left.as_float(), right.as_float()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(operand_error(op, left, right, line)),
    }
}
