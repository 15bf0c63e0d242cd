use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{binary::scalar::operand_error, core::EvalResult},
        value::core::Value,
    },
};

/// Evaluates `|`.
///
/// Both operands must be representable as `i64`: integers, booleans, or
/// floats with no fractional part.
///
/// # Example
/// ```
/// use nirvana::interpreter::{evaluator::binary::logic::bit_or, value::core::Value};
///
/// assert_eq!(bit_or(&Value::Integer(4), &Value::Float(1.0), 1).unwrap(), Value::Integer(5));
/// assert!(bit_or(&Value::Integer(4), &Value::Float(1.5), 1).is_err());
/// ```
pub fn bit_or(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match (left.as_integer_exact(), right.as_integer_exact()) {
        (Some(a), Some(b)) => Ok(Value::Integer(a | b)),
        _ => Err(operand_error(BinaryOperator::BitOr, left, right, line)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_are_bits() {
        assert_eq!(bit_or(&Value::Boolean(true), &Value::Integer(2), 1).unwrap(),
                   Value::Integer(3));
    }

    #[test]
    fn strings_are_rejected() {
        assert!(bit_or(&Value::from("1"), &Value::Integer(2), 1).is_err());
    }
}
