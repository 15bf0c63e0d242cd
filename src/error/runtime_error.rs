use thiserror::Error;

use crate::{
    error::{ErrorCategory, NativeError},
    interpreter::value::declared_type::DeclaredType,
};

#[derive(Debug, Error)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Read of a variable that exists in neither the current nor the global
    /// frame.
    #[error("Error on line {line}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Call of a name that is neither native nor user-defined.
    #[error("Error on line {line}: Undefined function '{name}'.")]
    UndefinedFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A second declaration of a name in the same frame.
    #[error("Error on line {line}: Variable '{name}' is already declared in this scope.")]
    DuplicateDeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to define a function that already exists.
    #[error("Error on line {line}: Function '{name}' is already defined.")]
    DuplicateFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to define a function with the name of a native function.
    #[error("Error on line {line}: Cannot redefine native function '{name}'.")]
    NativeFunctionRedefinition {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value that does not satisfy a variable's or parameter's declared
    /// type.
    #[error("Error on line {line}: Type mismatch for variable '{name}'. Expected {expected}, but got value of type {found}.")]
    TypeMismatch {
        /// The variable or parameter name.
        name:     String,
        /// The declared type.
        expected: DeclaredType,
        /// The kind of the offending value.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A function returned a value that does not satisfy its return type.
    #[error("Error on line {line}: Function '{function}' must return {expected}, but returned value of type {found}.")]
    ReturnTypeMismatch {
        /// The function name.
        function: String,
        /// The declared return type.
        expected: DeclaredType,
        /// The kind of the returned value.
        found:    &'static str,
        /// The source line of the call.
        line:     usize,
    },
    /// An operator applied to operands it does not support.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The callee of a call is not a plain function name.
    #[error("Error on line {line}: Only named functions can be called.")]
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A parameter without a default received no argument.
    #[error("Error on line {line}: Missing argument for parameter '{parameter}' of function '{function}'.")]
    MissingArgument {
        /// The function name.
        function:  String,
        /// The parameter that received nothing.
        parameter: String,
        /// The source line of the call.
        line:      usize,
    },
    /// More arguments than parameters.
    #[error("Error on line {line}: Function '{function}' takes {expected} argument(s), but {found} were given.")]
    TooManyArguments {
        /// The function name.
        function: String,
        /// The number of declared parameters.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line of the call.
        line:     usize,
    },
    /// Integer division with a zero divisor.
    #[error("Error on line {line}: Integer division by zero.")]
    IntegerDivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Float division with a zero divisor.
    #[error("Error on line {line}: Float division by zero.")]
    FloatDivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic whose result does not fit in 64 bits.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    IntegerOverflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A native function failed.
    #[error("Error on line {line}: {source}")]
    Native {
        /// The native's error.
        source: NativeError,
        /// The source line of the call.
        line:   usize,
    },
    /// Writing `echo` output failed.
    #[error("Error on line {line}: Failed to write output: {source}")]
    Output {
        /// The underlying I/O error.
        source: std::io::Error,
        /// The source line of the `echo`.
        line:   usize,
    },
    /// A `return` reached the top level. The parser rejects these, so this
    /// only happens with hand-built programs.
    #[error("Error on line {line}: 'return' escaped the top level of the program.")]
    ReturnOutsideFunction {
        /// The source line of the `return`.
        line: usize,
    },
    /// Attempted to pop the global frame.
    #[error("Internal error: attempted to pop the global scope.")]
    ScopeUnderflow,
}

impl RuntimeError {
    /// Maps the error onto the language's error taxonomy.
    ///
    /// `Invariant` marks interpreter bugs rather than script errors.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedVariable { .. }
            | Self::UndefinedFunction { .. }
            | Self::DuplicateDeclaration { .. }
            | Self::DuplicateFunction { .. }
            | Self::NativeFunctionRedefinition { .. } => ErrorCategory::Name,
            Self::TypeMismatch { .. }
            | Self::ReturnTypeMismatch { .. }
            | Self::TypeError { .. }
            | Self::NotCallable { .. }
            | Self::MissingArgument { .. }
            | Self::TooManyArguments { .. } => ErrorCategory::Type,
            Self::IntegerDivisionByZero { .. }
            | Self::FloatDivisionByZero { .. }
            | Self::IntegerOverflow { .. } => ErrorCategory::Arithmetic,
            Self::Native { source, .. } => source.category(),
            Self::Output { .. } => ErrorCategory::Io,
            Self::ReturnOutsideFunction { .. } | Self::ScopeUnderflow => ErrorCategory::Invariant,
        }
    }
}
