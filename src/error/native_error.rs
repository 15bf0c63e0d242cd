use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors raised by native functions and by the native registry API.
///
/// Natives have no access to source positions; the evaluator attaches the
/// call's line when it wraps one of these in `RuntimeError::Native`.
pub enum NativeError {
    /// Wrong number of arguments.
    #[error("Function '{function}' expects {expected}, but received {found}.")]
    ArgumentCount {
        /// The function name.
        function: String,
        /// Human-readable arity, such as `1 to 3 arguments`.
        expected: String,
        /// The number of arguments supplied.
        found:    usize,
    },
    /// An argument of the wrong kind.
    #[error("Function '{function}': Argument {position} (${parameter}) must be {expected}, but got value of type {found}.")]
    ArgumentType {
        /// The function name.
        function:  String,
        /// One-based argument position.
        position:  usize,
        /// The parameter name from the function's signature.
        parameter: String,
        /// The accepted kind, such as `a string`.
        expected:  &'static str,
        /// The kind actually supplied.
        found:     &'static str,
    },
    /// An argument of the right kind but an unusable value.
    #[error("Function '{function}': {details}")]
    InvalidArgument {
        /// The function name.
        function: String,
        /// What was wrong with the value.
        details:  String,
    },
    /// No native function is registered under this name.
    #[error("Undefined function '{name}'.")]
    UndefinedFunction {
        /// The requested name.
        name: String,
    },
    /// No constant is registered under this name.
    #[error("Undefined constant '{name}'.")]
    UndefinedConstant {
        /// The requested name.
        name: String,
    },
    /// A constant with this name already exists.
    #[error("Constant '{name}' is already defined.")]
    DuplicateConstant {
        /// The duplicated name.
        name: String,
    },
}

impl NativeError {
    /// Shorthand for [`NativeError::InvalidArgument`].
    pub fn invalid(function: &str, details: impl Into<String>) -> Self {
        Self::InvalidArgument { function: function.to_string(),
                                details:  details.into(), }
    }

    /// Maps the error onto the language's error taxonomy.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::ArgumentCount { .. } | Self::ArgumentType { .. } => ErrorCategory::Type,
            Self::InvalidArgument { .. } => ErrorCategory::Native,
            Self::UndefinedFunction { .. }
            | Self::UndefinedConstant { .. }
            | Self::DuplicateConstant { .. } => ErrorCategory::Name,
        }
    }
}
