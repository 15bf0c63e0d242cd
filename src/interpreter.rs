/// The evaluator module executes AST nodes and produces output.
///
/// The evaluator walks the program statement by statement, keeps the frame
/// stack of variables, enforces declared types, applies operators and
/// dispatches calls to user functions and natives.
///
/// # Responsibilities
/// - Evaluates every statement and expression form.
/// - Writes `echo` output to the configured sink.
/// - Reports runtime errors such as type mismatches or division by zero.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a sequence of tokens,
/// each paired with the line it starts on. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Recognizes keywords, identifiers, literals, operators and punctuation.
/// - Skips whitespace and the three comment forms.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The native registry: host functions and constants visible to scripts.
pub mod native;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser consumes the token sequence produced by the lexer and builds
/// the `Program` the evaluator runs. It stops at the first error.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Applies operator precedence and associativity.
/// - Rejects `return` outside functions and nested function declarations.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the `Value` enum (string, integer, float, boolean and
/// null), the `DeclaredType` attached to variables, and the canonical text
/// form used by `echo` and concatenation.
pub mod value;
