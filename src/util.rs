/// Numeric conversion helpers.
///
/// Checked conversions between `f64` and `i64` used by type enforcement,
/// bitwise operators and native functions. Exact conversions return a
/// `Result` or `Option`; promotions that are allowed to lose precision are
/// named as such.
pub mod num;
