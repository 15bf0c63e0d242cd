use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{binary::scalar::float_operands, core::EvalResult},
        value::core::Value,
    },
};

/// Absolute tolerance for float equality.
pub const EQUALITY_TOLERANCE: f64 = 1e-6;

/// Evaluates a relational operator.
///
/// Both operands are promoted to `f64`, integers included.
///
/// # Returns
/// A `Boolean`, or a type error if either operand is not numeric-like.
pub fn compare(op: BinaryOperator,
               left: &Value,
               right: &Value,
               line: usize,
               test: fn(f64, f64) -> bool)
               -> EvalResult<Value> {
    let (a, b) = float_operands(op, left, right, line)?;
    Ok(Value::Boolean(test(a, b)))
}

/// The language's `==`.
///
/// Strings, integers and booleans of the same kind compare exactly, and
/// null equals null. Any other pair of numeric-like values is compared as
/// floats within [`EQUALITY_TOLERANCE`]. Everything else is unequal.
///
/// # Example
/// ```
/// use nirvana::interpreter::{evaluator::binary::comparison::values_equal, value::core::Value};
///
/// assert!(values_equal(&Value::Integer(1), &Value::Boolean(true)));
/// assert!(values_equal(&Value::Float(0.1 + 0.2), &Value::Float(0.3)));
/// assert!(!values_equal(&Value::from("1"), &Value::Integer(1)));
/// ```
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => match (left.as_float(), right.as_float()) {
            (Some(a), Some(b)) => (a - b).abs() < EQUALITY_TOLERANCE,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relational_operators_promote() {
        let less = compare(BinaryOperator::Less,
                           &Value::Integer(1),
                           &Value::Float(1.5),
                           1,
                           |a, b| a < b).unwrap();
        assert_eq!(less, Value::Boolean(true));

        assert!(compare(BinaryOperator::Less, &Value::from("a"), &Value::from("b"), 1, |a, b| {
            a < b
        }).is_err());
    }

    #[test]
    fn tolerance_is_strict() {
        assert!(values_equal(&Value::Float(1.0), &Value::Float(1.000_000_5)));
        assert!(!values_equal(&Value::Float(1.0), &Value::Float(1.000_002)));
    }

    #[test]
    fn large_integers_compare_exactly() {
        assert!(!values_equal(&Value::Integer(i64::MAX), &Value::Integer(i64::MAX - 1)));
    }

    #[test]
    fn null_only_equals_null() {
        assert!(values_equal(&Value::Null, &Value::Null));
        assert!(!values_equal(&Value::Null, &Value::Integer(0)));
        assert!(!values_equal(&Value::Null, &Value::from("")));
    }

    #[test]
    fn equality_is_symmetric_across_kinds() {
        let values = [Value::Integer(1),
                      Value::Float(1.0),
                      Value::Boolean(true),
                      Value::from("1"),
                      Value::Null];
        for a in &values {
            for b in &values {
                assert_eq!(values_equal(a, b), values_equal(b, a), "{a:?} vs {b:?}");
            }
        }
    }
}
