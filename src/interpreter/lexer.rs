use std::fmt;

use logos::Logos;

use crate::{error::ParseError, interpreter::value::declared_type::DeclaredType};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexError)]
pub enum Token {
    /// String literal tokens, such as `"hello\n"`, with escapes resolved.
    #[token("\"", lex_string)]
    Str(String),
    /// Float literal tokens, such as `3.14`. Digits are required on both
    /// sides of the point.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `echo`
    #[token("echo")]
    Echo,
    /// `public`
    #[token("public")]
    Public,
    /// `function`
    #[token("function")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `string`
    #[token("string")]
    TypeString,
    /// `integer`
    #[token("integer")]
    TypeInteger,
    /// `number`
    #[token("number")]
    TypeNumber,
    /// `boolean`
    #[token("boolean")]
    TypeBoolean,
    /// Identifier tokens; variable or function names such as `$total` or
    /// `add`. The sigil is part of the name.
    #[regex(r"\$?[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip, allow_greedy = true)]
    HashComment,
    /// `/* Multi line comments. */` Emitted by the lexer and dropped by
    /// [`tokenize`], so that an unterminated comment can be reported.
    #[token("/*", lex_block_comment)]
    BlockComment,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `|`
    #[token("|")]
    Pipe,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `!`
    #[token("!")]
    Bang,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,

    /// Line breaks only advance the line counter.
    #[token("\n", newline)]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns the declared type named by a type keyword token.
    #[must_use]
    pub const fn declared_type(&self) -> Option<DeclaredType> {
        match self {
            Self::TypeString => Some(DeclaredType::String),
            Self::TypeInteger => Some(DeclaredType::Integer),
            Self::TypeNumber => Some(DeclaredType::Number),
            Self::TypeBoolean => Some(DeclaredType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Str(s) => return write!(f, "string \"{s}\""),
            Self::Float(x) => return write!(f, "number {x}"),
            Self::Integer(n) => return write!(f, "integer {n}"),
            Self::Bool(b) => return write!(f, "'{b}'"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Echo => "echo",
            Self::Public => "public",
            Self::Function => "function",
            Self::Return => "return",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::TypeString => "string",
            Self::TypeInteger => "integer",
            Self::TypeNumber => "number",
            Self::TypeBoolean => "boolean",
            Self::Comment | Self::HashComment | Self::BlockComment => "comment",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Colon => ":",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Pipe => "|",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Bang => "!",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::NewLine => "newline",
            Self::Ignored => "whitespace",
        };
        write!(f, "'{text}'")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// The reason a token could not be produced.
///
/// [`tokenize`] turns these into a [`ParseError`] with the offending slice
/// and line attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    /// No token starts with this character.
    #[default]
    UnexpectedCharacter,
    /// A string literal ran to the end of input.
    UnterminatedString,
    /// A block comment ran to the end of input.
    UnterminatedComment,
    /// An integer literal does not fit in an `i64`.
    IntegerOverflow,
    /// A numeric literal could not be parsed.
    InvalidNumber,
}

impl LexError {
    fn into_parse_error(self, slice: &str, line: usize) -> ParseError {
        match self {
            Self::UnexpectedCharacter => {
                ParseError::UnexpectedCharacter { character: slice.to_string(),
                                                  line }
            },
            Self::UnterminatedString => ParseError::UnterminatedString { line },
            Self::UnterminatedComment => ParseError::UnterminatedComment { line },
            Self::IntegerOverflow => ParseError::IntegerLiteralOverflow { literal: slice.to_string(),
                                                                          line },
            Self::InvalidNumber => ParseError::InvalidNumber { literal: slice.to_string(),
                                                               line },
        }
    }
}

/// Tokenizes a whole source file.
///
/// Comments and whitespace are dropped. Each token is paired with the line on
/// which it starts.
///
/// # Errors
/// Returns the first lexical error as a [`ParseError`].
///
/// # Example
/// ```
/// use nirvana::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("echo $x; // done").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Echo, 1),
///                 (Token::Identifier("$x".to_string()), 1),
///                 (Token::Semicolon, 1)]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line - lexer.slice().matches('\n').count();
        match result {
            Ok(Token::BlockComment) => {},
            Ok(token) => tokens.push((token, line)),
            Err(error) => return Err(error.into_parse_error(lexer.slice(), line)),
        }
    }

    Ok(tokens)
}

fn newline(lex: &mut logos::Lexer<Token>) -> logos::Skip {
    lex.extras.line += 1;
    logos::Skip
}

/// Reads a string literal after its opening quote.
///
/// Recognized escapes are `\"`, `\\`, `\n` and `\t`; any other escaped
/// character is kept as is.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexError> {
    let mut value = String::new();
    let mut chars = lex.remainder().char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(offset + 1);
                return Ok(value);
            },
            '\\' => match chars.next() {
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, '\n')) => {
                    lex.extras.line += 1;
                    value.push('\n');
                },
                Some((_, other)) => value.push(other),
                None => break,
            },
            '\n' => {
                lex.extras.line += 1;
                value.push('\n');
            },
            c => value.push(c),
        }
    }

    lex.bump(lex.remainder().len());
    Err(LexError::UnterminatedString)
}

fn lex_block_comment(lex: &mut logos::Lexer<Token>) -> Result<(), LexError> {
    let remainder = lex.remainder();
    let (consumed, result) = remainder.find("*/")
                                      .map_or((remainder.len(), Err(LexError::UnterminatedComment)),
                                              |end| (end + 2, Ok(())));

    lex.extras.line += remainder[..consumed].matches('\n').count();
    lex.bump(consumed);
    result
}

fn parse_float(lex: &logos::Lexer<Token>) -> Result<f64, LexError> {
    lex.slice().parse().map_err(|_| LexError::InvalidNumber)
}

fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexError> {
    lex.slice().parse().map_err(|_| LexError::IntegerOverflow)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(kinds("echo echoes $echo"),
                   vec![Token::Echo,
                        Token::Identifier("echoes".to_string()),
                        Token::Identifier("$echo".to_string())]);
        assert_eq!(kinds("integer number string boolean"),
                   vec![Token::TypeInteger, Token::TypeNumber, Token::TypeString, Token::TypeBoolean]);
    }

    #[test]
    fn numbers_and_concatenation() {
        assert_eq!(kinds("1.5 . 2"), vec![Token::Float(1.5), Token::Dot, Token::Integer(2)]);
        assert_eq!(kinds("1.x"),
                   vec![Token::Integer(1), Token::Dot, Token::Identifier("x".to_string())]);
    }

    #[test]
    fn multi_character_operators() {
        assert_eq!(kinds("a<=b != c == d >= e"),
                   vec![Token::Identifier("a".to_string()),
                        Token::LessEqual,
                        Token::Identifier("b".to_string()),
                        Token::BangEqual,
                        Token::Identifier("c".to_string()),
                        Token::EqualEqual,
                        Token::Identifier("d".to_string()),
                        Token::GreaterEqual,
                        Token::Identifier("e".to_string())]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(kinds(r#""a\"b\\c\nd\te\q""#),
                   vec![Token::Str("a\"b\\c\nd\teq".to_string())]);
    }

    #[test]
    fn comments_are_skipped_and_lines_counted() {
        let tokens = tokenize("# one\n/* two\nthree */ echo\n// four\n;").unwrap();
        assert_eq!(tokens, vec![(Token::Echo, 3), (Token::Semicolon, 5)]);
    }

    #[test]
    fn multi_line_string_reports_its_first_line() {
        let tokens = tokenize("\n\"a\nb\" ;").unwrap();
        assert_eq!(tokens,
                   vec![(Token::Str("a\nb".to_string()), 2), (Token::Semicolon, 3)]);
    }

    #[test]
    fn lexical_errors() {
        assert_eq!(tokenize("echo \"open"), Err(ParseError::UnterminatedString { line: 1 }));
        assert_eq!(tokenize("\n/* open"), Err(ParseError::UnterminatedComment { line: 2 }));
        assert_eq!(tokenize("echo @;"),
                   Err(ParseError::UnexpectedCharacter { character: "@".to_string(),
                                                         line:      1, }));
        assert_eq!(tokenize("99999999999999999999"),
                   Err(ParseError::IntegerLiteralOverflow { literal: "99999999999999999999".to_string(),
                                                            line:    1, }));
    }
}
