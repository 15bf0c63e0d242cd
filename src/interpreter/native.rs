use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    rc::Rc,
};

use tracing::trace;

use crate::{error::NativeError, interpreter::value::core::Value};

/// Result type returned by native functions.
pub type NativeResult<T> = Result<T, NativeError>;

/// A host-provided callable exposed to scripts by name.
///
/// Natives check their own arity and argument types.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> NativeResult<Value>>;

/// The native functions and constants available to scripts.
///
/// Built once before interpretation, then shared by every evaluator that
/// runs over it. Cloning is cheap: callables are reference counted.
#[derive(Clone, Default)]
pub struct NativeRegistry {
    functions: HashMap<String, NativeFn>,
    constants: BTreeMap<String, Value>,
}

impl NativeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function` under `name`, replacing any earlier entry.
    ///
    /// # Example
    /// ```
    /// use nirvana::interpreter::{native::NativeRegistry, value::core::Value};
    ///
    /// let mut natives = NativeRegistry::new();
    /// natives.register_native_function("answer", |_| Ok(Value::Integer(42)));
    ///
    /// let result = natives.call_native_function_by_name("answer", &[]).unwrap();
    /// assert_eq!(result, Value::Integer(42));
    /// ```
    pub fn register_native_function<F>(&mut self, name: &str, function: F)
        where F: Fn(&[Value]) -> NativeResult<Value> + 'static
    {
        trace!(name, "registering native function");
        self.functions.insert(name.to_string(), Rc::new(function));
    }

    /// Registers a constant that every evaluator seeds into its global frame.
    ///
    /// # Errors
    /// Returns [`NativeError::DuplicateConstant`] if the name is taken.
    pub fn register_constant(&mut self, name: &str, value: Value) -> NativeResult<()> {
        if self.constants.contains_key(name) {
            return Err(NativeError::DuplicateConstant { name: name.to_string() });
        }
        self.constants.insert(name.to_string(), value);
        Ok(())
    }

    /// Looks up a constant.
    ///
    /// # Errors
    /// Returns [`NativeError::UndefinedConstant`] if there is none.
    pub fn get_constant(&self, name: &str) -> NativeResult<Value> {
        self.constants
            .get(name)
            .cloned()
            .ok_or_else(|| NativeError::UndefinedConstant { name: name.to_string() })
    }

    /// Calls a native function by name.
    ///
    /// # Errors
    /// Returns [`NativeError::UndefinedFunction`] if there is none, or the
    /// function's own error.
    pub fn call_native_function_by_name(&self, name: &str, args: &[Value]) -> NativeResult<Value> {
        let function = self.get(name)
                           .ok_or_else(|| NativeError::UndefinedFunction { name: name.to_string() })?;
        function(args)
    }

    /// Returns the callable registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<NativeFn> {
        self.functions.get(name).cloned()
    }

    /// Whether a native function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Names of all registered native functions, sorted.
    #[must_use]
    pub fn function_names(&self) -> Vec<&str> {
        let mut names = self.functions.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// All registered constants in name order.
    pub fn constants(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.constants.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeRegistry")
         .field("functions", &self.function_names())
         .field("constants", &self.constants)
         .finish()
    }
}
