//! # nirvana
//!
//! nirvana is a tree-walking interpreter for Nirvana script, a small
//! imperative scripting language with optionally typed variables, top-level
//! functions, and a library of native string and math extensions.
//! Source text is tokenized, parsed into an AST, and evaluated statement by
//! statement; `echo` output goes to any [`std::io::Write`] sink.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{io::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::Program,
    error::{Error, ParseError},
    interpreter::{
        evaluator::core::Evaluator,
        lexer::tokenize,
        native::{NativeRegistry, NativeResult},
        parser::core::parse_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums, function
/// declarations and the `Program` root. The AST is built by the parser and
/// walked by the evaluator; every node carries the line it started on.
pub mod ast;
/// Provides unified error types for every phase.
///
/// Parse, runtime, native and helper errors each have their own enum, and
/// [`error::Error`] wraps them for callers that drive whole files. Every
/// error maps onto an [`error::ErrorCategory`].
pub mod error;
/// Orchestrates lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator and value types.
/// - Holds the native registry through which scripts reach host code.
pub mod interpreter;
/// The standard native library: math and string extensions plus the
/// `MCL_*` constants their mode arguments use.
pub mod extensions;
/// Declarative wrapper functions over extensions, loaded from TOML files.
pub mod helpers;
/// File discovery and per-file driving for the command-line interface.
pub mod driver;
/// General utilities for safe numeric conversion.
///
/// Safely converts between `i64`, `usize` and `f64` without silent data
/// loss.
pub mod util;

/// Tokenizes and parses `source` into a program.
///
/// # Errors
/// The first lexical or syntax error.
///
/// # Example
/// ```
/// use nirvana::parse_source;
///
/// let program = parse_source("integer x = 1; echo x;").unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// assert!(parse_source("echo \"open").is_err());
/// ```
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;
    let program = parse_program(&tokens)?;
    debug!(tokens = tokens.len(), statements = program.statements.len(), "parsed program");
    Ok(program)
}

/// Parses and runs `source` with a fresh evaluator over `natives`, writing
/// `echo` output to `out`.
///
/// # Errors
/// The first parse or runtime error. Output written before a runtime error
/// stays in `out`.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use nirvana::{run_source, standard_registry};
///
/// let natives = Rc::new(standard_registry().unwrap());
///
/// let mut out = Vec::new();
/// run_source("string s = \"ab\"; echo uppercase(s) . 1;", Rc::clone(&natives), &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "AB1\n");
///
/// let result = run_source("echo 1 / 0;", natives, Vec::new());
/// assert!(result.is_err());
/// ```
pub fn run_source<W: Write>(source: &str, natives: Rc<NativeRegistry>, out: W) -> Result<(), Error> {
    let program = parse_source(source)?;
    Evaluator::new(natives, out).interpret(&program)?;
    Ok(())
}

/// Builds the registry every file runs against: the standard extensions and
/// their constants.
///
/// # Errors
/// `DuplicateConstant` if a constant is registered twice.
pub fn standard_registry() -> NativeResult<NativeRegistry> {
    let mut natives = NativeRegistry::new();
    extensions::register_all(&mut natives);
    extensions::register_constants(&mut natives)?;
    Ok(natives)
}
