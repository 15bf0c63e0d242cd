use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Expr, Program},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_concatenation, statement::parse_top_level_statement},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, concatenation, and recursively descends through
/// the precedence hierarchy:
///
/// ```text
/// concatenation  "."
/// or             "or"
/// and            "and"
/// bitwise or     "|"
/// equality       "==" "!="
/// comparison     "<" "<=" ">" ">="
/// term           "+" "-"
/// factor         "*" "/"
/// unary          "-" "!" "not"
/// call           primary ("(" args ")")*
/// primary        literal | identifier | "(" expression ")"
/// ```
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    parse_concatenation(tokens)
}

/// Parses a whole token sequence into a [`Program`].
///
/// Parsing stops at the first error; there is no recovery.
///
/// # Errors
/// Returns the first [`ParseError`] encountered. End-of-input errors report
/// the line of the last token.
///
/// # Example
/// ```
/// use nirvana::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("x = 1; echo x;").unwrap();
/// let program = parse_program(&tokens).unwrap();
/// assert_eq!(program.statements.len(), 2);
///
/// let tokens = tokenize("echo 1 +").unwrap();
/// assert!(parse_program(&tokens).is_err());
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Program> {
    let end_line = tokens.last().map_or(1, |(_, line)| *line);
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while iter.peek().is_some() {
        let statement =
            parse_top_level_statement(&mut iter).map_err(|error| at_end_line(error, end_line))?;
        statements.push(statement);
    }

    debug!(statements = statements.len(), "parsed program");
    Ok(Program { statements })
}

fn at_end_line(error: ParseError, end_line: usize) -> ParseError {
    match error {
        ParseError::UnexpectedEndOfInput { expected, .. } => {
            ParseError::UnexpectedEndOfInput { expected,
                                               line: end_line }
        },
        other => other,
    }
}
