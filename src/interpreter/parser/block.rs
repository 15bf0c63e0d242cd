use std::iter::Peekable;

use crate::{
    ast::Statement,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            statement::{StatementContext, parse_statement},
            utils::end_of_input,
        },
    },
};

/// Parses the statements of a block delimited by braces.
///
/// Parsing continues until a closing `}` token is encountered. Blocks do not
/// open a scope, so this only groups statements.
///
/// Grammar: `block := "{" statement* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening brace.
/// - `context`: Whether the block sits inside a function body.
///
/// # Returns
/// The statements of the block in order.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>,
                          context: StatementContext)
                          -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                return Ok(statements);
            },
            Some(_) => statements.push(parse_statement(tokens, context)?),
            None => return Err(end_of_input("'}'")),
        }
    }
}
