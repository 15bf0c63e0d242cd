/// Dispatch of every binary operator.
pub mod core;

/// `+ - * /` with integer and float semantics.
pub mod scalar;

/// Relational operators and tolerant equality.
pub mod comparison;

/// Bitwise or.
pub mod logic;
