use crate::interpreter::value::declared_type::DeclaredType;

/// A numeric literal as written in the source.
///
/// Literals without a decimal point stay integers all the way into the
/// evaluator; only literals with a fractional part are floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// A 64-bit signed integer literal, such as `42`.
    Integer(i64),
    /// A 64-bit floating-point literal, such as `2.5`.
    Float(f64),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` is a closed set: the evaluator matches on it exhaustively, so adding
/// a variant is a compile error until every consumer handles it. Each variant
/// carries the line it started on for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A string literal, escapes already resolved.
    StringLiteral {
        /// The literal text.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// An integer or float literal.
    NumberLiteral {
        /// The literal number.
        value: Number,
        /// Line number in the source code.
        line:  usize,
    },
    /// `true` or `false`.
    BooleanLiteral {
        /// The literal truth value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable (or constant) by name.
    Variable {
        /// Name of the variable, including its `$` sigil if written with one.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Binary operation, such as addition or concatenation.
    BinaryOp {
        /// The left-hand operand.
        left:  Box<Expr>,
        /// The operator.
        op:    BinaryOperator,
        /// The right-hand operand.
        right: Box<Expr>,
        /// Line number of the operator.
        line:  usize,
    },
    /// Prefix unary operation (`-x`, `!x`, `not x`).
    UnaryOp {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Expr>,
        /// Line number of the operator.
        line:    usize,
    },
    /// Function call. The callee is an arbitrary expression syntactically so
    /// that calls can chain; the evaluator only accepts a bare name.
    Call {
        /// The expression being called.
        callee:    Box<Expr>,
        /// The argument expressions, in order.
        arguments: Vec<Expr>,
        /// Line number of the opening parenthesis.
        line:      usize,
    },
}

impl Expr {
    /// Returns the line number associated with this expression.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::StringLiteral { line, .. }
            | Self::NumberLiteral { line, .. }
            | Self::BooleanLiteral { line, .. }
            | Self::Variable { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::Call { line, .. } => *line,
        }
    }
}

/// Where a declaration places its variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// `<type> name`: the innermost frame.
    Local,
    /// `public <type> name`: the global frame.
    Public,
}

/// An abstract syntax tree (AST) node representing a statement.
///
/// Statements are executed for their side effects and never produce a value
/// of their own; `Return` hands a value back to the enclosing call.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `echo <expr>;`
    Echo {
        /// The expression to print.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `[public] <type> name [= <expr>];`
    Declaration {
        /// The declared type of the variable.
        declared_type: DeclaredType,
        /// The variable name.
        name:          String,
        /// Optional initializer. Without one the type's default value is used.
        initializer:   Option<Expr>,
        /// Whether the variable goes to the global or the innermost frame.
        visibility:    Visibility,
        /// Line number in the source code.
        line:          usize,
    },
    /// `name = <expr>;`
    Assignment {
        /// The target variable name.
        name:  String,
        /// The value expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A call used as a statement, its result discarded.
    Expression {
        /// The call expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `return [<expr>];`
    Return {
        /// The returned expression; `None` returns null.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `{ <statement>* }`. Blocks do not open a new scope.
    Block {
        /// The statements in order.
        statements: Vec<Statement>,
        /// Line number of the opening brace.
        line:       usize,
    },
    /// `function name(<params>): <type> { <body> }`
    FunctionDeclaration(FunctionDecl),
}

impl Statement {
    /// Returns the line number associated with this statement.
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Echo { line, .. }
            | Self::Declaration { line, .. }
            | Self::Assignment { line, .. }
            | Self::Expression { line, .. }
            | Self::Return { line, .. }
            | Self::Block { line, .. } => *line,
            Self::FunctionDeclaration(decl) => decl.line,
        }
    }
}

/// A single typed function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// The declared type checked against the bound argument.
    pub declared_type: DeclaredType,
    /// The parameter name.
    pub name:          String,
    /// Default expression, evaluated in the callee's frame when the argument
    /// is omitted.
    pub default:       Option<Expr>,
}

/// A user-defined function.
///
/// # Example
/// ```text
/// function add(integer a, integer b = 10): integer {
///     return a + b;
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The function name.
    pub name:        String,
    /// The parameters in declaration order.
    pub parameters:  Vec<Parameter>,
    /// The declared return type.
    pub return_type: DeclaredType,
    /// The statements of the function body block.
    pub body:        Vec<Statement>,
    /// Line number of the `function` keyword.
    pub line:        usize,
}

/// The root of a parsed source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// String concatenation (`.`)
    Concat,
    /// Logical or (`or`)
    Or,
    /// Logical and (`and`)
    And,
    /// Bitwise or (`|`)
    BitOr,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`!x` or `not x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, BitOr, Concat, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul,
            NotEqual, Or, Sub,
        };
        let operator = match self {
            Concat => ".",
            Or => "or",
            And => "and",
            BitOr => "|",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}
