/// Core parsing entry points.
///
/// Defines the parser result type, the expression entry point and
/// `parse_program`, which turns a token sequence into a `Program`.
pub mod core;

/// Unary, call and primary expression parsing.
///
/// Handles prefix operators, chained call suffixes, literals, identifiers and
/// parenthesized expressions.
pub mod unary;

/// Binary operator parsing.
///
/// One function per precedence level, from concatenation (loosest) to
/// multiplication (tightest). All levels are left-associative.
pub mod binary;

/// Block parsing.
pub mod block;

/// Shared parser helpers for token expectations, identifiers, type keywords
/// and comma-separated lists.
pub mod utils;

/// Statement parsing.
///
/// Echo, declarations, assignments, call statements, returns, blocks and
/// top-level function declarations.
pub mod statement;
