use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::{
            binary::{
                comparison::{compare, values_equal},
                logic::bit_or,
                scalar::{arithmetic, divide},
            },
            core::EvalResult,
        },
        value::core::Value,
    },
};

/// Applies a binary operator to two already evaluated operands.
///
/// This is the single dispatch point for every binary operator:
/// - `.` joins both operands in their canonical text form,
/// - `+ - * /` use integer arithmetic when both sides are integer-like and
///   float arithmetic otherwise,
/// - `< <= > >=` compare numerically as floats,
/// - `== !=` use the tolerant cross-type equality of [`values_equal`],
/// - `and` / `or` combine the truthiness of both sides,
/// - `|` is the 64-bit bitwise or of integer-representable operands.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: The left-hand value.
/// - `right`: The right-hand value.
/// - `line`: Line number for error reporting.
///
/// # Returns
/// The resulting value, or the arithmetic or type error the operator raised.
///
/// # Example
/// ```
/// use nirvana::{
///     ast::BinaryOperator,
///     interpreter::{evaluator::binary::core::eval_binary, value::core::Value},
/// };
///
/// let sum = eval_binary(BinaryOperator::Add, &Value::Integer(1), &Value::Float(0.5), 1).unwrap();
/// assert_eq!(sum, Value::Float(1.5));
///
/// let text = eval_binary(BinaryOperator::Concat, &Value::from("a"), &Value::Integer(1), 1).unwrap();
/// assert_eq!(text, Value::from("a1"));
/// ```
pub fn eval_binary(op: BinaryOperator,
                   left: &Value,
                   right: &Value,
                   line: usize)
                   -> EvalResult<Value> {
    use BinaryOperator::{
        Add, And, BitOr, Concat, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul,
        NotEqual, Or, Sub,
    };

    match op {
        Concat => Ok(Value::String(format!("{left}{right}"))),
        Add => arithmetic(op, left, right, line, i64::checked_add, |a, b| a + b),
        Sub => arithmetic(op, left, right, line, i64::checked_sub, |a, b| a - b),
        Mul => arithmetic(op, left, right, line, i64::checked_mul, |a, b| a * b),
        Div => divide(left, right, line),
        Less => compare(op, left, right, line, |a, b| a < b),
        LessEqual => compare(op, left, right, line, |a, b| a <= b),
        Greater => compare(op, left, right, line, |a, b| a > b),
        GreaterEqual => compare(op, left, right, line, |a, b| a >= b),
        Equal => Ok(Value::Boolean(values_equal(left, right))),
        NotEqual => Ok(Value::Boolean(!values_equal(left, right))),
        And => Ok(Value::Boolean(left.truthiness() && right.truthiness())),
        Or => Ok(Value::Boolean(left.truthiness() || right.truthiness())),
        BitOr => bit_or(left, right, line),
    }
}
