use std::io::Write;

use tracing::{debug, trace};

use crate::{
    ast::{Expr, FunctionDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, Evaluator, Flow},
            scope::Binding,
            types::{coerce_to_declared, enforce_type},
        },
        value::core::Value,
    },
};

impl<'ast, W: Write> Evaluator<'ast, W> {
    /// Adds a user function to the function table.
    ///
    /// A function name may not shadow a native function, and may not be
    /// declared twice.
    pub(crate) fn declare_function(&mut self, decl: &'ast FunctionDecl) -> EvalResult<()> {
        if self.natives.contains(&decl.name) {
            return Err(RuntimeError::NativeFunctionRedefinition { name: decl.name.clone(),
                                                                  line: decl.line, });
        }
        if self.functions.contains_key(&decl.name) {
            return Err(RuntimeError::DuplicateFunction { name: decl.name.clone(),
                                                         line: decl.line, });
        }

        debug!(name = %decl.name, parameters = decl.parameters.len(), "declared function");
        self.functions.insert(decl.name.clone(), decl);
        Ok(())
    }

    /// Evaluates a call expression.
    ///
    /// The callee must be a bare name. Arguments are evaluated left to right
    /// in the caller's frame. Native functions are looked up before user
    /// functions.
    ///
    /// # Parameters
    /// - `callee`: The called expression.
    /// - `arguments`: Argument expressions.
    /// - `line`: Line number of the call.
    ///
    /// # Returns
    /// The function's result.
    pub(crate) fn eval_call(&mut self,
                            callee: &'ast Expr,
                            arguments: &'ast [Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let Expr::Variable { name, .. } = callee else {
            return Err(RuntimeError::NotCallable { line });
        };

        let args = arguments.iter()
                            .map(|argument| self.eval(argument))
                            .collect::<EvalResult<Vec<_>>>()?;
        trace!(name = %name, arguments = args.len(), "call");

        if let Some(native) = self.natives.get(name) {
            return native(&args).map_err(|source| RuntimeError::Native { source, line });
        }

        let decl = self.functions
                       .get(name.as_str())
                       .copied()
                       .ok_or_else(|| RuntimeError::UndefinedFunction { name: name.clone(),
                                                                        line })?;
        self.call_user_function(decl, args, line)
    }

    /// Runs a user function in a fresh frame.
    ///
    /// The frame is popped whether the body succeeded or failed.
    fn call_user_function(&mut self,
                          decl: &'ast FunctionDecl,
                          args: Vec<Value>,
                          line: usize)
                          -> EvalResult<Value> {
        if args.len() > decl.parameters.len() {
            return Err(RuntimeError::TooManyArguments { function: decl.name.clone(),
                                                        expected: decl.parameters.len(),
                                                        found: args.len(),
                                                        line });
        }

        self.scopes.push();
        let result = self.run_function(decl, args, line);
        self.scopes.pop()?;
        result
    }

    /// Binds parameters, executes the body and checks the return value.
    ///
    /// Must run inside the function's own frame: defaults are evaluated
    /// there, after the earlier parameters have been bound.
    fn run_function(&mut self,
                    decl: &'ast FunctionDecl,
                    args: Vec<Value>,
                    line: usize)
                    -> EvalResult<Value> {
        let mut args = args.into_iter();
        for parameter in &decl.parameters {
            let value = match (args.next(), &parameter.default) {
                (Some(value), _) => value,
                (None, Some(default)) => self.eval(default)?,
                (None, None) => {
                    return Err(RuntimeError::MissingArgument { function: decl.name.clone(),
                                                               parameter: parameter.name.clone(),
                                                               line });
                },
            };
            let value = enforce_type(&parameter.name, parameter.declared_type, value, line)?;

            let frame = self.scopes.innermost();
            let binding = Binding { value,
                                    declared_type: parameter.declared_type };
            if !self.scopes.declare(frame, &parameter.name, binding) {
                return Err(RuntimeError::DuplicateDeclaration { name: parameter.name.clone(),
                                                                line: decl.line, });
            }
        }

        let value = match self.exec_block(&decl.body)? {
            Flow::Return(value) => value,
            Flow::Normal => return Ok(decl.return_type.default_value()),
        };

        let mismatch = |rejected: Value| RuntimeError::ReturnTypeMismatch { function: decl.name.clone(),
                                                                            expected: decl.return_type,
                                                                            found: rejected.type_name(),
                                                                            line };
        coerce_to_declared(decl.return_type, value).map_err(mismatch)
    }
}
