pub mod helper_error;
pub mod native_error;
pub mod parse_error;
pub mod runtime_error;

use std::path::PathBuf;

pub use helper_error::HelperError;
pub use native_error::NativeError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
use thiserror::Error;

/// The error taxonomy of the language.
///
/// Every concrete error maps onto exactly one category. `Invariant` is
/// reserved for interpreter bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Malformed input at the character level.
    Lexical,
    /// Malformed input at the grammar level.
    Syntax,
    /// Declared-type or operand-type violations, including call arity.
    Type,
    /// Undefined or duplicated names.
    Name,
    /// Division by zero and integer overflow.
    Arithmetic,
    /// A native function rejected an argument value.
    Native,
    /// Reading source or writing output failed.
    Io,
    /// Invalid helper configuration.
    Config,
    /// An interpreter bug.
    Invariant,
}

#[derive(Debug, Error)]
/// Any error produced while running a source file.
pub enum Error {
    /// Lexing or parsing failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Evaluation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    /// Loading helper definitions failed.
    #[error(transparent)]
    Helper(#[from] HelperError),
    /// A source file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        /// The file that could not be read.
        path:   PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl Error {
    /// The category of the underlying error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(e) => e.category(),
            Self::Runtime(e) => e.category(),
            Self::Helper(_) => ErrorCategory::Config,
            Self::Io { .. } => ErrorCategory::Io,
        }
    }
}
