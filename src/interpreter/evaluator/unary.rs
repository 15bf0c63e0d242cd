use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a unary operation on a value.
///
/// Supported operators:
/// - `Negate`: integers (overflow-checked) and floats negate; booleans
///   become the integer `-1` or `0`.
/// - `Not`: negated truthiness, always a boolean.
///
/// # Parameters
/// - `op`: Unary operator.
/// - `value`: Input value.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The computed `Value` wrapped in `EvalResult`.
///
/// # Example
/// ```
/// use nirvana::{
///     ast::UnaryOperator,
///     interpreter::{evaluator::unary::eval_unary, value::core::Value},
/// };
///
/// let v = eval_unary(UnaryOperator::Negate, &Value::Boolean(true), 1).unwrap();
/// assert_eq!(v, Value::Integer(-1));
///
/// let v = eval_unary(UnaryOperator::Not, &Value::from(""), 1).unwrap();
/// assert_eq!(v, Value::Boolean(true));
/// ```
pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
    match op {
        UnaryOperator::Negate => match value {
            Value::Integer(n) => n.checked_neg()
                                  .map(Value::Integer)
                                  .ok_or(RuntimeError::IntegerOverflow { line }),
            Value::Float(f) => Ok(Value::Float(-f)),
            Value::Boolean(b) => Ok(Value::Integer(-i64::from(*b))),
            other => Err(RuntimeError::TypeError { details: format!("Cannot negate a value of type {}",
                                                                    other.type_name()),
                                                   line }),
        },
        UnaryOperator::Not => Ok(Value::Boolean(!value.truthiness())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negation() {
        assert_eq!(eval_unary(UnaryOperator::Negate, &Value::Integer(5), 1).unwrap(),
                   Value::Integer(-5));
        assert_eq!(eval_unary(UnaryOperator::Negate, &Value::Float(0.5), 1).unwrap(),
                   Value::Float(-0.5));
        assert_eq!(eval_unary(UnaryOperator::Negate, &Value::Boolean(false), 1).unwrap(),
                   Value::Integer(0));
    }

    #[test]
    fn negating_min_overflows() {
        assert!(matches!(eval_unary(UnaryOperator::Negate, &Value::Integer(i64::MIN), 2),
                         Err(RuntimeError::IntegerOverflow { line: 2 })));
    }

    #[test]
    fn negating_text_fails() {
        let error = eval_unary(UnaryOperator::Negate, &Value::from("x"), 1).unwrap_err();
        assert_eq!(error.to_string(),
                   "Error on line 1: Type error: Cannot negate a value of type string.");
        assert!(eval_unary(UnaryOperator::Negate, &Value::Null, 1).is_err());
    }

    #[test]
    fn not_always_yields_boolean() {
        assert_eq!(eval_unary(UnaryOperator::Not, &Value::Null, 1).unwrap(),
                   Value::Boolean(true));
        assert_eq!(eval_unary(UnaryOperator::Not, &Value::Integer(3), 1).unwrap(),
                   Value::Boolean(false));
    }
}
