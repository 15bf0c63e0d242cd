use std::collections::HashMap;

use tracing::trace;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, declared_type::DeclaredType},
    },
};

/// Index of the global frame. It is created with the stack and never popped.
pub const GLOBAL: usize = 0;

/// A variable slot: its current value and the type fixed at declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// The current value.
    pub value:         Value,
    /// The declared type every later write is checked against.
    pub declared_type: DeclaredType,
}

/// The stack of variable frames.
///
/// Frame 0 holds globals and constants. Each user-function call pushes one
/// frame and pops it on return. Name resolution looks only at the innermost
/// frame and then the global frame: a function never sees its caller's
/// locals.
///
/// Writes go through a frame index obtained from [`ScopeStack::resolve`] and
/// a fresh lookup, so no reference into a frame outlives a push or pop.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<HashMap<String, Binding>>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Creates a stack holding only the global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![HashMap::new()] }
    }

    /// Number of frames, the global one included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Index of the most recently pushed frame.
    #[must_use]
    pub fn innermost(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Pushes an empty frame for a function activation.
    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
        trace!(depth = self.frames.len(), "pushed frame");
    }

    /// Pops the innermost frame.
    ///
    /// # Errors
    /// Returns [`RuntimeError::ScopeUnderflow`] if only the global frame is
    /// left.
    pub fn pop(&mut self) -> EvalResult<()> {
        if self.frames.len() <= 1 {
            return Err(RuntimeError::ScopeUnderflow);
        }
        self.frames.pop();
        trace!(depth = self.frames.len(), "popped frame");
        Ok(())
    }

    /// Finds the frame holding `name`: the innermost frame first, then the
    /// global frame.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<usize> {
        [self.innermost(), GLOBAL].into_iter()
                                  .find(|&index| self.is_declared_in(index, name))
    }

    /// Reads a visible binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.resolve(name).and_then(|index| self.get_in(index, name))
    }

    /// Reads a binding from a specific frame.
    #[must_use]
    pub fn get_in(&self, frame: usize, name: &str) -> Option<&Binding> {
        self.frames.get(frame).and_then(|frame| frame.get(name))
    }

    /// Mutable access to a binding in a specific frame.
    pub fn get_mut(&mut self, frame: usize, name: &str) -> Option<&mut Binding> {
        self.frames.get_mut(frame).and_then(|frame| frame.get_mut(name))
    }

    /// Whether `name` is declared directly in `frame`.
    #[must_use]
    pub fn is_declared_in(&self, frame: usize, name: &str) -> bool {
        self.frames.get(frame).is_some_and(|frame| frame.contains_key(name))
    }

    /// Adds a binding to `frame`.
    ///
    /// Returns `false` without changing anything if the name is already
    /// declared in that frame.
    pub fn declare(&mut self, frame: usize, name: &str, binding: Binding) -> bool {
        let Some(frame) = self.frames.get_mut(frame) else {
            return false;
        };
        if frame.contains_key(name) {
            return false;
        }
        frame.insert(name.to_string(), binding);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(n: i64) -> Binding {
        Binding { value:         Value::Integer(n),
                  declared_type: DeclaredType::Any, }
    }

    #[test]
    fn global_frame_cannot_be_popped() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        assert!(scopes.pop().is_ok());
        assert!(matches!(scopes.pop(), Err(RuntimeError::ScopeUnderflow)));
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn resolution_skips_intermediate_frames() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.declare(GLOBAL, "g", binding(1)));
        scopes.push();
        assert!(scopes.declare(scopes.innermost(), "caller_local", binding(2)));
        scopes.push();

        assert_eq!(scopes.resolve("g"), Some(GLOBAL));
        assert_eq!(scopes.resolve("caller_local"), None);
    }

    #[test]
    fn innermost_shadows_global() {
        let mut scopes = ScopeStack::new();
        scopes.declare(GLOBAL, "x", binding(1));
        scopes.push();
        scopes.declare(scopes.innermost(), "x", binding(2));

        assert_eq!(scopes.get("x"), Some(&binding(2)));
        scopes.pop().unwrap();
        assert_eq!(scopes.get("x"), Some(&binding(1)));
    }

    #[test]
    fn duplicate_in_same_frame_is_refused() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.declare(GLOBAL, "x", binding(1)));
        assert!(!scopes.declare(GLOBAL, "x", binding(2)));
        assert_eq!(scopes.get("x"), Some(&binding(1)));
    }
}
