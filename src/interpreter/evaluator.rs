/// Binary operator evaluation logic.
///
/// Handles arithmetic, comparisons, equality, logical operators, bitwise or
/// and concatenation on already evaluated operands.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical not.
pub mod unary;

/// Core evaluation logic.
///
/// Contains the `Evaluator`, statement execution, expression dispatch and
/// the public registration API.
pub mod core;

/// The scope stack: a global frame plus one frame per active call.
pub mod scope;

/// Declared-type enforcement for variables, parameters and return values.
pub mod types;

/// Function declaration and call handling.
///
/// Handles native and user-defined calls, parameter binding with defaults,
/// frame management and return type checks.
pub mod function;
