use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult, value::declared_type::DeclaredType},
};

/// Builds an [`ParseError::UnexpectedToken`] for `found`.
pub(in crate::interpreter::parser) fn unexpected(expected: &str,
                                                 found: &Token,
                                                 line: usize)
                                                 -> ParseError {
    ParseError::UnexpectedToken { expected: expected.to_string(),
                                  found: found.to_string(),
                                  line }
}

/// Builds an [`ParseError::UnexpectedEndOfInput`].
///
/// The parser cannot see past the last token, so the line is left at zero
/// here and filled in by [`parse_program`](super::core::parse_program).
pub(in crate::interpreter::parser) fn end_of_input(expected: &str) -> ParseError {
    ParseError::UnexpectedEndOfInput { expected: expected.to_string(),
                                       line:     0, }
}

/// Consumes the next token, which must equal `expected`.
///
/// # Parameters
/// - `tokens`: Token iterator.
/// - `expected`: The required token.
///
/// # Returns
/// The line of the consumed token.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((token, line)) if token == expected => Ok(*line),
        Some((token, line)) => Err(unexpected(&expected.to_string(), token, *line)),
        None => Err(end_of_input(&expected.to_string())),
    }
}

/// Consumes the next token if it equals `expected`.
pub(in crate::interpreter::parser) fn accept<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if tokens.peek().is_some_and(|(token, _)| token == expected) {
        tokens.next();
        return true;
    }
    false
}

/// Parses a comma-separated list of items until a closing token.
///
/// Shared by argument lists and parameter lists. The opening token must
/// already have been consumed. An immediately encountered closing token
/// produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list.
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut items = Vec::new();
    if accept(tokens, closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((token, _)) if token == closing => break,
            Some((token, line)) => {
                return Err(unexpected(&format!("',' or {closing}"), token, *line));
            },
            None => return Err(end_of_input(&format!("',' or {closing}"))),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the input
/// ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((token, line)) => Err(unexpected("an identifier", token, *line)),
        None => Err(end_of_input("an identifier")),
    }
}

/// Parses one of the type keywords `string`, `integer`, `number` or
/// `boolean`.
pub(in crate::interpreter::parser) fn parse_type_keyword<'a, I>(tokens: &mut Peekable<I>)
                                                                -> ParseResult<DeclaredType>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((token, line)) => {
            token.declared_type()
                 .ok_or_else(|| unexpected("a type keyword", token, *line))
        },
        None => Err(end_of_input("a type keyword")),
    }
}
