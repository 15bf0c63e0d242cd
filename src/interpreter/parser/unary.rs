use std::iter::Peekable;

use crate::{
    ast::{Expr, Number, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{end_of_input, expect, parse_comma_separated, unexpected},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!` and `not` (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!" | "not") unary
///            | call
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An [`Expr::UnaryOp`] or a call/primary expression.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let op = match tokens.peek() {
        Some((Token::Minus, line)) => Some((UnaryOperator::Negate, *line)),
        Some((Token::Bang | Token::Not, line)) => Some((UnaryOperator::Not, *line)),
        _ => None,
    };

    if let Some((op, line)) = op {
        tokens.next();
        let operand = parse_unary(tokens)?;
        return Ok(Expr::UnaryOp { op,
                                  operand: Box::new(operand),
                                  line });
    }

    let primary = parse_primary(tokens)?;
    parse_call_suffix(tokens, primary)
}

/// Applies zero or more argument lists to `callee`.
///
/// `f(1)(2)` parses as a call whose callee is the call `f(1)`.
///
/// Grammar: `call := primary ("(" (expression ("," expression)*)? ")")*`
pub(crate) fn parse_call_suffix<'a, I>(tokens: &mut Peekable<I>, callee: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut expr = callee;
    while let Some((Token::LParen, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
        expr = Expr::Call { callee: Box::new(expr),
                            arguments,
                            line };
    }
    Ok(expr)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar:
/// - string, number and boolean literals
/// - identifiers
/// - parenthesized expressions
///
/// # Errors
/// Returns a `ParseError` on any other token or at end of input.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let Some((token, line)) = tokens.next() else {
        return Err(end_of_input("an expression"));
    };
    let line = *line;

    match token {
        Token::Str(value) => Ok(Expr::StringLiteral { value: value.clone(),
                                                      line }),
        Token::Integer(n) => Ok(Expr::NumberLiteral { value: Number::Integer(*n),
                                                      line }),
        Token::Float(x) => Ok(Expr::NumberLiteral { value: Number::Float(*x),
                                                    line }),
        Token::Bool(value) => Ok(Expr::BooleanLiteral { value: *value,
                                                        line }),
        Token::Identifier(name) => Ok(Expr::Variable { name: name.clone(),
                                                       line }),
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;
            Ok(expr)
        },
        other => Err(unexpected("an expression", other, line)),
    }
}
