use std::f64::consts::PI;

use crate::{
    ast::Number,
    extensions::args::Arguments,
    interpreter::{native::NativeResult, value::core::Value},
    util::num::i64_to_f64,
};

/// Most decimal places `pi` can produce, and its default.
pub const PI_MAX_PLACES: i64 = 14;

const fn number_to_f64(n: Number) -> f64 {
    match n {
        Number::Integer(i) => i64_to_f64(i),
        Number::Float(f) => f,
    }
}

fn number_to_value(n: Number) -> Value {
    match n {
        Number::Integer(i) => Value::Integer(i),
        Number::Float(f) => Value::Float(f),
    }
}

/// Absolute value. Integers stay integers.
///
/// # Example
/// ```
/// use nirvana::{extensions::math::abs, interpreter::value::core::Value};
///
/// assert_eq!(abs(&[Value::Integer(-3)]).unwrap(), Value::Integer(3));
/// assert_eq!(abs(&[Value::Float(-0.5)]).unwrap(), Value::Float(0.5));
/// ```
pub fn abs(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("abs", args);
    match args.number(1, "value")? {
        Number::Integer(n) => {
            let overflow = || args.invalid(format!("The absolute value of {n} does not fit in an integer."));
            n.checked_abs().map(Value::Integer).ok_or_else(overflow)
        },
        Number::Float(f) => Ok(Value::Float(f.abs())),
    }
}

/// Square root, always a float.
pub fn sqrt(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("sqrt", args);
    let value = number_to_f64(args.number(1, "value")?);
    if value < 0.0 {
        return Err(args.invalid("Argument cannot be negative."));
    }
    Ok(Value::Float(value.sqrt()))
}

/// Rounds down. Integers pass through unchanged.
pub fn floor(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("floor", args);
    Ok(match args.number(1, "value")? {
        Number::Integer(n) => Value::Integer(n),
        Number::Float(f) => Value::Float(f.floor()),
    })
}

/// Rounds up. Integers pass through unchanged.
pub fn ceiling(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("ceiling", args);
    Ok(match args.number(1, "value")? {
        Number::Integer(n) => Value::Integer(n),
        Number::Float(f) => Value::Float(f.ceil()),
    })
}

/// Smallest of one or more numbers.
///
/// The result is a float if any argument is a float.
///
/// # Example
/// ```
/// use nirvana::{extensions::math::min, interpreter::value::core::Value};
///
/// assert_eq!(min(&[Value::Integer(3), Value::Integer(-1)]).unwrap(), Value::Integer(-1));
/// assert_eq!(min(&[Value::Integer(3), Value::Float(4.5)]).unwrap(), Value::Float(3.0));
/// ```
pub fn min(args: &[Value]) -> NativeResult<Value> {
    extremum(Arguments::new("min", args), less_than)
}

/// Largest of one or more numbers.
///
/// The result is a float if any argument is a float.
pub fn max(args: &[Value]) -> NativeResult<Value> {
    extremum(Arguments::new("max", args), |candidate, best| less_than(best, candidate))
}

fn less_than(a: Number, b: Number) -> bool {
    match (a, b) {
        (Number::Integer(a), Number::Integer(b)) => a < b,
        _ => number_to_f64(a) < number_to_f64(b),
    }
}

/// Folds the arguments, keeping the first value no later argument beats.
fn extremum(args: Arguments<'_>, beats: fn(Number, Number) -> bool) -> NativeResult<Value> {
    let mut best = args.number(1, "values")?;
    let mut any_float = matches!(best, Number::Float(_));

    for position in 2..=args.len() {
        let candidate = args.number(position, "values")?;
        any_float |= matches!(candidate, Number::Float(_));
        if beats(candidate, best) {
            best = candidate;
        }
    }

    if any_float {
        Ok(Value::Float(number_to_f64(best)))
    } else {
        Ok(number_to_value(best))
    }
}

/// π truncated (not rounded) to the requested number of decimal places.
///
/// # Example
/// ```
/// use nirvana::{extensions::math::pi, interpreter::value::core::Value};
///
/// assert_eq!(pi(&[Value::Integer(2)]).unwrap(), Value::Float(3.14));
/// assert_eq!(pi(&[Value::Integer(4)]).unwrap(), Value::Float(3.1415));
/// assert_eq!(pi(&[Value::Integer(0)]).unwrap(), Value::Float(3.0));
/// ```
pub fn pi(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("pi", args);
    let places = args.integer_or(1, "significant_places", PI_MAX_PLACES)?;
    if !(0..=PI_MAX_PLACES).contains(&places) {
        return Err(args.invalid(format!("Argument 1 ($significant_places) must be between 0 and {PI_MAX_PLACES}, but got {places}.")));
    }

    let digits = format!("{PI:.14}");
    // "3" plus the point and the requested digits.
    let end = match usize::try_from(places) {
        Ok(0) | Err(_) => 1,
        Ok(places) => 2 + places,
    };
    digits.get(..end)
          .and_then(|clipped| clipped.parse::<f64>().ok())
          .map(Value::Float)
          .ok_or_else(|| args.invalid("Failed to compute pi."))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::NativeError;

    #[test]
    fn abs_of_min_integer_fails() {
        assert!(matches!(abs(&[Value::Integer(i64::MIN)]), Err(NativeError::InvalidArgument { .. })));
    }

    #[test]
    fn abs_rejects_booleans() {
        assert!(matches!(abs(&[Value::Boolean(true)]), Err(NativeError::ArgumentType { .. })));
    }

    #[test]
    fn sqrt_of_negative_fails() {
        assert_eq!(sqrt(&[Value::Integer(9)]).unwrap(), Value::Float(3.0));
        assert_eq!(sqrt(&[Value::Float(-1.0)]).unwrap_err().to_string(),
                   "Function 'sqrt': Argument cannot be negative.");
    }

    #[test]
    fn rounding_keeps_kind() {
        assert_eq!(floor(&[Value::Integer(7)]).unwrap(), Value::Integer(7));
        assert_eq!(floor(&[Value::Float(-1.5)]).unwrap(), Value::Float(-2.0));
        assert_eq!(ceiling(&[Value::Float(1.2)]).unwrap(), Value::Float(2.0));
    }

    #[test]
    fn max_prefers_first_of_equals() {
        assert_eq!(max(&[Value::Integer(2), Value::Integer(9), Value::Integer(9)]).unwrap(),
                   Value::Integer(9));
        assert_eq!(max(&[Value::Float(1.5), Value::Integer(1)]).unwrap(), Value::Float(1.5));
    }

    #[test]
    fn min_compares_large_integers_exactly() {
        assert_eq!(min(&[Value::Integer(i64::MAX), Value::Integer(i64::MAX - 1)]).unwrap(),
                   Value::Integer(i64::MAX - 1));
    }

    #[test]
    fn min_rejects_strings_by_position() {
        let error = min(&[Value::Integer(1), Value::from("2")]).unwrap_err();
        assert!(matches!(error, NativeError::ArgumentType { position: 2, .. }));
    }

    #[test]
    fn pi_defaults_to_full_precision() {
        assert_eq!(pi(&[]).unwrap(), Value::Float(3.141_592_653_589_79));
        assert!(pi(&[Value::Integer(15)]).is_err());
        assert!(pi(&[Value::Integer(-1)]).is_err());
    }
}
