/// Smallest `f64` strictly above the `i64` range (`2^63`).
///
/// `i64::MAX as f64` rounds up to exactly this value, so range checks must
/// use a strict comparison against it.
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Converts an `f64` to `i64` if and only if the conversion is exact.
///
/// The value must be finite, have no fractional part and lie inside the
/// `i64` range.
///
/// ## Parameters
/// - `value`: The floating-point value to convert.
/// - `error`: The error to return if the conversion would lose information.
///
/// ## Returns
/// - `Ok(i64)`: The converted integer.
/// - `Err(error)`: If the value is fractional, non-finite or out of range.
///
/// ## Example
/// ```
/// use nirvana::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(5.0, "lossy"), Ok(5));
/// assert_eq!(f64_to_i64_checked(-3.0, "lossy"), Ok(-3));
/// assert!(f64_to_i64_checked(2.5, "lossy").is_err());
/// assert!(f64_to_i64_checked(f64::NAN, "lossy").is_err());
/// assert!(f64_to_i64_checked(1e19, "lossy").is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_checked<E>(value: f64, error: E) -> Result<i64, E> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(error);
    }
    if value < -I64_UPPER_BOUND || value >= I64_UPPER_BOUND {
        return Err(error);
    }
    Ok(value as i64)
}

/// Like [`f64_to_i64_checked`], but returns `None` instead of an error.
#[must_use]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    f64_to_i64_checked(value, ()).ok()
}

/// Promotes an `i64` to `f64`.
///
/// Values beyond `2^53` lose precision. Numeric promotion in the language is
/// defined this way, so the loss is accepted rather than reported.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}
