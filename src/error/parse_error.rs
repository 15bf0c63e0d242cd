use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Parsing does not recover: the first error aborts the whole file.
pub enum ParseError {
    /// A character that starts no token.
    #[error("Error on line {line}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The offending input.
        character: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal with no closing quote.
    #[error("Error on line {line}: Unterminated string literal.")]
    UnterminatedString {
        /// The line the string started on.
        line: usize,
    },
    /// A `/*` comment with no closing `*/`.
    #[error("Error on line {line}: Unterminated block comment.")]
    UnterminatedComment {
        /// The line the comment started on.
        line: usize,
    },
    /// An integer literal that does not fit in 64 bits.
    #[error("Error on line {line}: Integer literal '{literal}' is too large.")]
    IntegerLiteralOverflow {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A numeric literal that could not be read.
    #[error("Error on line {line}: Invalid number literal '{literal}'.")]
    InvalidNumber {
        /// The literal as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Found a token the grammar does not allow here.
    #[error("Error on line {line}: Expected {expected}, found {found}.")]
    UnexpectedToken {
        /// What the parser was looking for.
        expected: String,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Reached the end of input in the middle of a construct.
    #[error("Error on line {line}: Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser was looking for.
        expected: String,
        /// The line of the construct that was cut off.
        line:     usize,
    },
    /// `return` used outside of a function body.
    #[error("Error on line {line}: 'return' is only allowed inside a function body.")]
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `function` used anywhere but the top level.
    #[error("Error on line {line}: Functions can only be declared at the top level.")]
    NestedFunction {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl ParseError {
    /// The source line the error refers to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnterminatedString { line }
            | Self::UnterminatedComment { line }
            | Self::IntegerLiteralOverflow { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::ReturnOutsideFunction { line }
            | Self::NestedFunction { line } => *line,
        }
    }

    /// Whether the error came from the tokenizer or from the grammar.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnexpectedCharacter { .. }
            | Self::UnterminatedString { .. }
            | Self::UnterminatedComment { .. }
            | Self::IntegerLiteralOverflow { .. }
            | Self::InvalidNumber { .. } => ErrorCategory::Lexical,
            Self::UnexpectedToken { .. }
            | Self::UnexpectedEndOfInput { .. }
            | Self::ReturnOutsideFunction { .. }
            | Self::NestedFunction { .. } => ErrorCategory::Syntax,
        }
    }
}
