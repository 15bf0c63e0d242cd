use std::iter::Peekable;

use crate::{
    ast::{Expr, FunctionDecl, Parameter, Statement, Visibility},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            unary::parse_call_suffix,
            utils::{
                accept, end_of_input, expect, parse_comma_separated, parse_identifier,
                parse_type_keyword, unexpected,
            },
        },
        value::declared_type::DeclaredType,
    },
};

/// Where a statement appears, which decides whether `return` is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementContext {
    /// Top level of the program, or a block nested in it.
    Program,
    /// Anywhere inside a function body.
    Function,
}

/// Parses a statement at the top level of a program.
///
/// This is the only place a `function` declaration is accepted; everything
/// else is delegated to [`parse_statement`].
pub fn parse_top_level_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if let Some((Token::Function, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        return Ok(Statement::FunctionDeclaration(parse_function_declaration(tokens, line)?));
    }
    parse_statement(tokens, StatementContext::Program)
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - `echo <expr>;`
/// - `public <type> name [= <expr>];`
/// - `<type> name [= <expr>];`
/// - `return [<expr>];` (function bodies only)
/// - `name = <expr>;`
/// - `name(<args>);`
/// - `{ <statement>* }`
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
/// - `context`: Whether the statement is inside a function body.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              context: StatementContext)
                              -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let Some((token, line)) = tokens.next() else {
        return Err(end_of_input("a statement"));
    };
    let line = *line;

    if let Some(declared_type) = token.declared_type() {
        return parse_declaration(tokens, declared_type, Visibility::Local, line);
    }

    match token {
        Token::Echo => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::Semicolon)?;
            Ok(Statement::Echo { expr, line })
        },
        Token::Public => {
            let declared_type = parse_type_keyword(tokens)?;
            parse_declaration(tokens, declared_type, Visibility::Public, line)
        },
        Token::Return => {
            if context != StatementContext::Function {
                return Err(ParseError::ReturnOutsideFunction { line });
            }
            let value = if accept(tokens, &Token::Semicolon) {
                None
            } else {
                let value = parse_expression(tokens)?;
                expect(tokens, &Token::Semicolon)?;
                Some(value)
            };
            Ok(Statement::Return { value, line })
        },
        Token::LBrace => {
            let statements = parse_block(tokens, context)?;
            Ok(Statement::Block { statements, line })
        },
        Token::Identifier(name) => parse_identifier_statement(tokens, name, line),
        Token::Function => Err(ParseError::NestedFunction { line }),
        other => Err(unexpected("a statement", other, line)),
    }
}

/// Parses the rest of a declaration after its type keyword.
///
/// Grammar: `declaration := name ("=" expression)? ";"`
fn parse_declaration<'a, I>(tokens: &mut Peekable<I>,
                            declared_type: DeclaredType,
                            visibility: Visibility,
                            line: usize)
                            -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let name = parse_identifier(tokens)?;
    let initializer = if accept(tokens, &Token::Equals) {
        Some(parse_expression(tokens)?)
    } else {
        None
    };
    expect(tokens, &Token::Semicolon)?;

    Ok(Statement::Declaration { declared_type,
                                name,
                                initializer,
                                visibility,
                                line })
}

/// Parses a statement that starts with an identifier: an assignment or a
/// call.
fn parse_identifier_statement<'a, I>(tokens: &mut Peekable<I>,
                                     name: &str,
                                     line: usize)
                                     -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Equals, _)) => {
            tokens.next();
            let value = parse_expression(tokens)?;
            expect(tokens, &Token::Semicolon)?;
            Ok(Statement::Assignment { name: name.to_string(),
                                       value,
                                       line })
        },
        Some((Token::LParen, _)) => {
            let callee = Expr::Variable { name: name.to_string(),
                                          line };
            let expr = parse_call_suffix(tokens, callee)?;
            expect(tokens, &Token::Semicolon)?;
            Ok(Statement::Expression { expr, line })
        },
        Some((token, line)) => Err(unexpected("'=' or '('", token, *line)),
        None => Err(end_of_input("'=' or '('")),
    }
}

/// Parses a function declaration after the `function` keyword.
///
/// Grammar:
/// ```text
///     function := "function" name "(" (parameter ("," parameter)*)? ")"
///                 ":" type "{" statement* "}"
///     parameter := type name ("=" expression)?
/// ```
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>,
                                     line: usize)
                                     -> ParseResult<FunctionDecl>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let name = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;
    let parameters = parse_comma_separated(tokens, parse_parameter, &Token::RParen)?;
    expect(tokens, &Token::Colon)?;
    let return_type = parse_type_keyword(tokens)?;
    expect(tokens, &Token::LBrace)?;
    let body = parse_block(tokens, StatementContext::Function)?;

    Ok(FunctionDecl { name,
                      parameters,
                      return_type,
                      body,
                      line })
}

fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let declared_type = parse_type_keyword(tokens)?;
    let name = parse_identifier(tokens)?;
    let default = if accept(tokens, &Token::Equals) {
        Some(parse_expression(tokens)?)
    } else {
        None
    };

    Ok(Parameter { declared_type,
                   name,
                   default })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        ast::{Statement, Visibility},
        error::ParseError,
        interpreter::{lexer::tokenize, parser::core::parse_program, value::declared_type::DeclaredType},
    };

    fn parse(source: &str) -> Result<Vec<Statement>, ParseError> {
        let tokens = tokenize(source)?;
        parse_program(&tokens).map(|program| program.statements)
    }

    #[test]
    fn declarations() {
        let statements = parse("public integer $n = 1; string s;").unwrap();
        assert!(matches!(&statements[0],
                         Statement::Declaration { declared_type: DeclaredType::Integer,
                                                  visibility: Visibility::Public,
                                                  initializer: Some(_),
                                                  .. }));
        assert!(matches!(&statements[1],
                         Statement::Declaration { declared_type: DeclaredType::String,
                                                  visibility: Visibility::Local,
                                                  initializer: None,
                                                  .. }));
    }

    #[test]
    fn function_declaration() {
        let statements =
            parse("function add(integer a, integer b = 10): integer {\n  return a + b;\n}").unwrap();
        let Statement::FunctionDeclaration(decl) = &statements[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(decl.name, "add");
        assert_eq!(decl.parameters.len(), 2);
        assert!(decl.parameters[0].default.is_none());
        assert!(decl.parameters[1].default.is_some());
        assert_eq!(decl.return_type, DeclaredType::Integer);
        assert!(matches!(decl.body[0], Statement::Return { value: Some(_), line: 2 }));
    }

    #[test]
    fn call_and_assignment_statements() {
        let statements = parse("x = 1; f(x); { echo x; }").unwrap();
        assert!(matches!(statements[0], Statement::Assignment { .. }));
        assert!(matches!(statements[1], Statement::Expression { .. }));
        assert!(matches!(&statements[2], Statement::Block { statements, .. } if statements.len() == 1));
    }

    #[test]
    fn return_only_inside_functions() {
        assert_eq!(parse("return 1;"), Err(ParseError::ReturnOutsideFunction { line: 1 }));
        assert_eq!(parse("{\nreturn;\n}"), Err(ParseError::ReturnOutsideFunction { line: 2 }));
        assert!(parse("function f(): integer { { return 1; } }").is_ok());
    }

    #[test]
    fn functions_only_at_top_level() {
        assert_eq!(parse("{ function f(): integer { } }"),
                   Err(ParseError::NestedFunction { line: 1 }));
        assert_eq!(parse("function f(): integer { function g(): integer { } }"),
                   Err(ParseError::NestedFunction { line: 1 }));
    }

    #[test]
    fn missing_semicolon_reports_last_line() {
        assert_eq!(parse("echo 1\n+ 2"),
                   Err(ParseError::UnexpectedEndOfInput { expected: "';'".to_string(),
                                                          line:     2, }));
    }

    #[test]
    fn bare_expression_is_not_a_statement() {
        assert!(matches!(parse("1 + 2;"), Err(ParseError::UnexpectedToken { .. })));
        assert!(matches!(parse("x + 1;"), Err(ParseError::UnexpectedToken { .. })));
    }
}
