use std::{collections::HashMap, io::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Expr, FunctionDecl, Number, Program, Statement, Visibility},
    error::{NativeError, RuntimeError},
    interpreter::{
        evaluator::{
            binary::core::eval_binary,
            scope::{Binding, GLOBAL, ScopeStack},
            types::enforce_type,
            unary::eval_unary,
        },
        native::{NativeRegistry, NativeResult},
        value::{core::Value, declared_type::DeclaredType},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `Return` travels up through blocks until the enclosing function call
/// consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Control continues with the next statement.
    Normal,
    /// A `return` ran, carrying its value.
    Return(Value),
}

/// Walks a parsed [`Program`] and executes it.
///
/// The evaluator owns the scope stack and the function table. Function
/// declarations are borrowed from the AST, which therefore has to outlive
/// the evaluator. `echo` output goes to `out`.
///
/// ## Usage
///
/// Create one evaluator per source file over a shared [`NativeRegistry`],
/// then call [`Evaluator::interpret`].
///
/// ```
/// use std::rc::Rc;
///
/// use nirvana::{
///     interpreter::{evaluator::core::Evaluator, native::NativeRegistry},
///     parse_source,
/// };
///
/// let program = parse_source("x = 1; y = 2; echo x + y;").unwrap();
/// let mut evaluator = Evaluator::new(Rc::new(NativeRegistry::new()), Vec::new());
/// evaluator.interpret(&program).unwrap();
///
/// assert_eq!(evaluator.into_output(), b"3\n");
/// ```
pub struct Evaluator<'ast, W: Write> {
    pub(crate) scopes:    ScopeStack,
    pub(crate) functions: HashMap<String, &'ast FunctionDecl>,
    pub(crate) natives:   Rc<NativeRegistry>,
    out:                  W,
}

impl<'ast, W: Write> Evaluator<'ast, W> {
    /// Creates an evaluator with an empty function table.
    ///
    /// Every constant in `natives` is declared in the global frame, typed
    /// after its value.
    ///
    /// # Parameters
    /// - `natives`: The native functions and constants scripts can use.
    /// - `out`: Sink for `echo` output.
    #[must_use]
    pub fn new(natives: Rc<NativeRegistry>, out: W) -> Self {
        let mut scopes = ScopeStack::new();
        for (name, value) in natives.constants() {
            scopes.declare(GLOBAL,
                           name,
                           Binding { value:         value.clone(),
                                     declared_type: DeclaredType::of_value(value), });
        }

        Self { scopes,
               functions: HashMap::new(),
               natives,
               out }
    }

    /// Registers a native function for this evaluator only.
    ///
    /// The shared registry is copied on first write, so other evaluators over
    /// the same registry are unaffected.
    pub fn register_native_function<F>(&mut self, name: &str, function: F)
        where F: Fn(&[Value]) -> NativeResult<Value> + 'static
    {
        Rc::make_mut(&mut self.natives).register_native_function(name, function);
    }

    /// Declares a constant in the global frame.
    ///
    /// # Errors
    /// Returns [`NativeError::DuplicateConstant`] if the global frame already
    /// holds the name.
    pub fn register_constant(&mut self, name: &str, value: Value) -> NativeResult<()> {
        let declared_type = DeclaredType::of_value(&value);
        if self.scopes.declare(GLOBAL, name, Binding { value, declared_type }) {
            Ok(())
        } else {
            Err(NativeError::DuplicateConstant { name: name.to_string() })
        }
    }

    /// Reads a name from the global frame.
    ///
    /// # Errors
    /// Returns [`NativeError::UndefinedConstant`] if it is not there.
    pub fn get_constant(&self, name: &str) -> NativeResult<Value> {
        self.scopes
            .get_in(GLOBAL, name)
            .map(|binding| binding.value.clone())
            .ok_or_else(|| NativeError::UndefinedConstant { name: name.to_string() })
    }

    /// Calls a native function by name.
    ///
    /// # Errors
    /// Returns [`NativeError::UndefinedFunction`] if there is none, or the
    /// function's own error.
    pub fn call_native_function_by_name(&self, name: &str, args: &[Value]) -> NativeResult<Value> {
        self.natives.call_native_function_by_name(name, args)
    }

    /// Executes the top-level statements of `program` in order.
    ///
    /// Stops at the first runtime error. Output already written by earlier
    /// `echo` statements stays written.
    ///
    /// # Errors
    /// The first [`RuntimeError`] raised by any statement.
    pub fn interpret(&mut self, program: &'ast Program) -> EvalResult<()> {
        debug!(statements = program.statements.len(), "interpreting program");

        for statement in &program.statements {
            if let Flow::Return(_) = self.exec_statement(statement)? {
                return Err(RuntimeError::ReturnOutsideFunction { line: statement.line_number() });
            }
        }

        debug!(depth = self.scopes.depth(), "program finished");
        Ok(())
    }

    /// Number of frames on the scope stack. It is 1 whenever no call is in
    /// progress.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// The output sink.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Consumes the evaluator and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Executes one statement.
    ///
    /// # Returns
    /// [`Flow::Return`] if a `return` ran, otherwise [`Flow::Normal`].
    pub(crate) fn exec_statement(&mut self, statement: &'ast Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Echo { expr, line } => {
                let value = self.eval(expr)?;
                writeln!(self.out, "{value}").map_err(|source| RuntimeError::Output { source,
                                                                                      line: *line })?;
                Ok(Flow::Normal)
            },
            Statement::Declaration { declared_type,
                                     name,
                                     initializer,
                                     visibility,
                                     line, } => {
                self.declare_variable(*declared_type,
                                      name,
                                      initializer.as_ref(),
                                      *visibility,
                                      *line)?;
                Ok(Flow::Normal)
            },
            Statement::Assignment { name, value, line } => {
                self.assign(name, value, *line)?;
                Ok(Flow::Normal)
            },
            Statement::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            },
            Statement::Block { statements, .. } => self.exec_block(statements),
            Statement::FunctionDeclaration(decl) => {
                self.declare_function(decl)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Executes statements in order in the current frame, stopping at the
    /// first `return`.
    pub(crate) fn exec_block(&mut self, statements: &'ast [Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let flow @ Flow::Return(_) = self.exec_statement(statement)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Declares a typed variable.
    ///
    /// The duplicate check runs before the initializer is evaluated.
    fn declare_variable(&mut self,
                        declared_type: DeclaredType,
                        name: &str,
                        initializer: Option<&'ast Expr>,
                        visibility: Visibility,
                        line: usize)
                        -> EvalResult<()> {
        let frame = match visibility {
            Visibility::Public => GLOBAL,
            Visibility::Local => self.scopes.innermost(),
        };
        if self.scopes.is_declared_in(frame, name) {
            return Err(RuntimeError::DuplicateDeclaration { name: name.to_string(),
                                                            line });
        }

        let value = match initializer {
            Some(expr) => {
                let value = self.eval(expr)?;
                enforce_type(name, declared_type, value, line)?
            },
            None => declared_type.default_value(),
        };

        // The initializer may itself have declared the name, e.g. through a
        // call that runs `public` declarations.
        if !self.scopes.declare(frame, name, Binding { value, declared_type }) {
            return Err(RuntimeError::DuplicateDeclaration { name: name.to_string(),
                                                            line });
        }
        Ok(())
    }

    /// Assigns to a visible variable, or creates an `any` variable in the
    /// innermost frame if the name is unknown.
    fn assign(&mut self, name: &str, expr: &'ast Expr, line: usize) -> EvalResult<()> {
        let value = self.eval(expr)?;

        let Some(frame) = self.scopes.resolve(name) else {
            // TODO: decide whether an unknown name inside a function body
            // should be rejected instead of silently becoming a local.
            self.scopes.declare(self.scopes.innermost(),
                                name,
                                Binding { value,
                                          declared_type: DeclaredType::Any });
            return Ok(());
        };

        let binding = self.scopes
                          .get_mut(frame, name)
                          .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                                           line })?;
        binding.value = enforce_type(name, binding.declared_type, value, line)?;
        Ok(())
    }

    /// Evaluates an expression to a value.
    ///
    /// Operands are evaluated left to right, and both sides of every binary
    /// operator are always evaluated.
    pub(crate) fn eval(&mut self, expr: &'ast Expr) -> EvalResult<Value> {
        match expr {
            Expr::StringLiteral { value, .. } => Ok(Value::String(value.clone())),
            Expr::NumberLiteral { value, .. } => Ok(match value {
                                                     Number::Integer(n) => Value::Integer(*n),
                                                     Number::Float(f) => Value::Float(*f),
                                                 }),
            Expr::BooleanLiteral { value, .. } => Ok(Value::Boolean(*value)),
            Expr::Variable { name, line } => {
                self.scopes
                    .get(name)
                    .map(|binding| binding.value.clone())
                    .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone(),
                                                                     line: *line, })
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                eval_binary(*op, &left, &right, *line)
            },
            Expr::UnaryOp { op, operand, line } => {
                let operand = self.eval(operand)?;
                eval_unary(*op, &operand, *line)
            },
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{error::ErrorCategory, parse_source};

    fn run(source: &str) -> (EvalResult<()>, String, usize) {
        let program = parse_source(source).unwrap();
        let mut evaluator = Evaluator::new(Rc::new(NativeRegistry::new()), Vec::new());
        let result = evaluator.interpret(&program);
        let depth = evaluator.scope_depth();
        (result, String::from_utf8(evaluator.into_output()).unwrap(), depth)
    }

    #[test]
    fn echo_writes_one_line_per_statement() {
        let (result, output, _) = run("echo 1; echo \"two\"; echo 3.0;");
        assert!(result.is_ok());
        assert_eq!(output, "1\ntwo\n3.0\n");
    }

    #[test]
    fn declarations_use_type_defaults() {
        let (result, output, _) = run("string s; integer i; number n; boolean b; echo s . i . n . b;");
        assert!(result.is_ok());
        assert_eq!(output, "00.0false\n");
    }

    #[test]
    fn duplicate_declaration_in_same_frame() {
        let (result, _, _) = run("integer x = 1;\ninteger x = 2;");
        assert!(matches!(result,
                         Err(RuntimeError::DuplicateDeclaration { ref name, line: 2 }) if name == "x"));
    }

    #[test]
    fn assignment_keeps_declared_type() {
        let (result, output, _) = run("integer n = 1; n = 4.0; echo n; n = true; echo n;");
        assert!(result.is_ok());
        assert_eq!(output, "4\n1\n");

        let (result, _, _) = run("boolean b; b = 2;");
        assert_eq!(result.unwrap_err().category(), ErrorCategory::Type);
    }

    #[test]
    fn undeclared_assignment_is_dynamic() {
        let (result, output, _) = run("x = 1; x = \"now a string\"; echo x;");
        assert!(result.is_ok());
        assert_eq!(output, "now a string\n");
    }

    #[test]
    fn undefined_variable() {
        let (result, _, _) = run("echo\n missing;");
        assert!(matches!(result, Err(RuntimeError::UndefinedVariable { line: 2, .. })));
    }

    #[test]
    fn constants_are_typed_globals() {
        let mut natives = NativeRegistry::new();
        natives.register_constant("LIMIT", Value::Integer(3)).unwrap();
        let program = parse_source("echo LIMIT; LIMIT = \"x\";").unwrap();
        let mut evaluator = Evaluator::new(Rc::new(natives), Vec::new());

        let error = evaluator.interpret(&program).unwrap_err();
        assert!(matches!(error, RuntimeError::TypeMismatch { expected: DeclaredType::Integer, .. }));
        assert_eq!(evaluator.get_constant("LIMIT"), Ok(Value::Integer(3)));
        assert_eq!(evaluator.register_constant("LIMIT", Value::Null),
                   Err(NativeError::DuplicateConstant { name: "LIMIT".to_string() }));
        assert_eq!(evaluator.get_constant("NOPE"),
                   Err(NativeError::UndefinedConstant { name: "NOPE".to_string() }));
    }

    #[test]
    fn evaluator_natives_do_not_leak_into_shared_registry() {
        let shared = Rc::new(NativeRegistry::new());
        let mut evaluator = Evaluator::new(Rc::clone(&shared), Vec::new());
        evaluator.register_native_function("local", |_| Ok(Value::Null));

        assert_eq!(evaluator.call_native_function_by_name("local", &[]), Ok(Value::Null));
        assert!(!shared.contains("local"));
    }

    #[test]
    fn hand_built_top_level_return_is_an_invariant_violation() {
        let program = Program { statements: vec![Statement::Return { value: None, line: 7 }] };
        let mut evaluator = Evaluator::new(Rc::new(NativeRegistry::new()), Vec::new());

        let error = evaluator.interpret(&program).unwrap_err();
        assert!(matches!(error, RuntimeError::ReturnOutsideFunction { line: 7 }));
        assert_eq!(error.category(), ErrorCategory::Invariant);
    }
}
