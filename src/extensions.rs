/// The extension table, arity checks and registration.
pub mod core;

/// Typed access to native function arguments.
///
/// Converts positional `Value`s into the Rust types an extension works with
/// and produces uniform `NativeError`s naming the function, the argument
/// position and the parameter.
pub mod args;

/// Numeric extensions: `abs`, `sqrt`, `floor`, `ceiling`, `min`, `max` and
/// `pi`.
pub mod math;

/// String extensions: `trim`, `pad`, `uppercase`, `contains`, `reverse`,
/// `wrap`, `ascii` and `character`, plus their mode constants.
pub mod text;

pub use self::core::{EXTENSION_FUNCTIONS, register_all, register_constants};
