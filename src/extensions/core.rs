use tracing::debug;

use crate::{
    error::NativeError,
    extensions::{
        math,
        text::{
            self, MCL_PAD_LEFT, MCL_PAD_RIGHT, MCL_TRIM_ALL, MCL_TRIM_ENDS, MCL_TRIM_LEFT,
            MCL_TRIM_MIDDLE, MCL_TRIM_RIGHT, MCL_UPPERCASE_ALTERNATING, MCL_UPPERCASE_EVERYTHING,
            MCL_UPPERCASE_FIRST, MCL_UPPERCASE_TITLE, MCL_UPPERCASE_TOGGLE,
        },
    },
    interpreter::{
        native::{NativeRegistry, NativeResult},
        value::core::Value,
    },
};

/// Type alias for extension function handlers.
///
/// An extension receives the evaluated arguments, already checked against
/// its arity.
type ExtensionFn = fn(&[Value]) -> NativeResult<Value>;

/// Specifies the allowed number of arguments for an extension.
///
/// - `Exact(n)` means the extension must receive exactly `n` arguments.
/// - `Range(min, max)` accepts any count from `min` to `max` inclusive.
/// - `AtLeast(n)` accepts `n` or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Between the two bounds, inclusive.
    Range(usize, usize),
    /// At least this many arguments.
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub const fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::Range(min, max) => min <= n && n <= max,
            Self::AtLeast(min) => n >= min,
        }
    }

    /// Human-readable form used in argument count errors.
    #[must_use]
    pub fn describe(self) -> String {
        let plural = |n: usize| if n == 1 { "argument" } else { "arguments" };
        match self {
            Self::Exact(n) => format!("exactly {n} {}", plural(n)),
            Self::Range(min, max) => format!("{min} to {max} arguments"),
            Self::AtLeast(n) => format!("at least {n} {}", plural(n)),
        }
    }
}

/// Defines extension functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the extension.
///
/// The macro produces:
/// - `ExtensionDef` (internal metadata),
/// - `EXTENSION_TABLE` (static table for registration),
/// - `EXTENSION_FUNCTIONS` (public list of extension names).
macro_rules! extension_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        #[derive(Clone, Copy)]
        struct ExtensionDef {
            name:  &'static str,
            arity: Arity,
            func:  ExtensionFn,
        }
        static EXTENSION_TABLE: &[ExtensionDef] = &[
            $(
                ExtensionDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of every standard extension function.
        pub const EXTENSION_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

extension_functions! {
    "abs"       => { arity: Arity::Exact(1), func: math::abs },
    "sqrt"      => { arity: Arity::Exact(1), func: math::sqrt },
    "floor"     => { arity: Arity::Exact(1), func: math::floor },
    "ceiling"   => { arity: Arity::Exact(1), func: math::ceiling },
    "min"       => { arity: Arity::AtLeast(1), func: math::min },
    "max"       => { arity: Arity::AtLeast(1), func: math::max },
    "pi"        => { arity: Arity::Range(0, 1), func: math::pi },
    "trim"      => { arity: Arity::Range(1, 3), func: text::trim },
    "pad"       => { arity: Arity::Range(2, 4), func: text::pad },
    "uppercase" => { arity: Arity::Range(1, 2), func: text::uppercase },
    "contains"  => { arity: Arity::Exact(2), func: text::contains },
    "reverse"   => { arity: Arity::AtLeast(1), func: text::reverse },
    "wrap"      => { arity: Arity::Range(1, 2), func: text::wrap },
    "ascii"     => { arity: Arity::Exact(1), func: text::ascii },
    "character" => { arity: Arity::Exact(1), func: text::character },
}

/// Script-visible constants for the extension mode arguments.
const CONSTANTS: &[(&str, i64)] = &[("MCL_TRIM_LEFT", MCL_TRIM_LEFT),
                                    ("MCL_TRIM_RIGHT", MCL_TRIM_RIGHT),
                                    ("MCL_TRIM_MIDDLE", MCL_TRIM_MIDDLE),
                                    ("MCL_TRIM_ENDS", MCL_TRIM_ENDS),
                                    ("MCL_TRIM_ALL", MCL_TRIM_ALL),
                                    ("MCL_PAD_LEFT", MCL_PAD_LEFT),
                                    ("MCL_PAD_RIGHT", MCL_PAD_RIGHT),
                                    ("MCL_UPPERCASE_EVERYTHING", MCL_UPPERCASE_EVERYTHING),
                                    ("MCL_UPPERCASE_TITLE", MCL_UPPERCASE_TITLE),
                                    ("MCL_UPPERCASE_FIRST", MCL_UPPERCASE_FIRST),
                                    ("MCL_UPPERCASE_ALTERNATING", MCL_UPPERCASE_ALTERNATING),
                                    ("MCL_UPPERCASE_TOGGLE", MCL_UPPERCASE_TOGGLE)];

/// Registers every standard extension function.
///
/// Each registered callable checks its arity before running the extension.
///
/// # Example
/// ```
/// use nirvana::{
///     extensions::register_all,
///     interpreter::{native::NativeRegistry, value::core::Value},
/// };
///
/// let mut natives = NativeRegistry::new();
/// register_all(&mut natives);
///
/// let result = natives.call_native_function_by_name("abs", &[Value::Integer(-2)]).unwrap();
/// assert_eq!(result, Value::Integer(2));
/// assert!(natives.call_native_function_by_name("abs", &[]).is_err());
/// ```
pub fn register_all(natives: &mut NativeRegistry) {
    for &ExtensionDef { name, arity, func } in EXTENSION_TABLE {
        natives.register_native_function(name, move |args| {
                   if !arity.check(args.len()) {
                       return Err(NativeError::ArgumentCount { function: name.to_string(),
                                                               expected: arity.describe(),
                                                               found:    args.len(), });
                   }
                   func(args)
               });
    }
    debug!(count = EXTENSION_TABLE.len(), "registered extension functions");
}

/// Registers the `MCL_*` constants.
///
/// # Errors
/// `DuplicateConstant` if one of the names is already registered.
pub fn register_constants(natives: &mut NativeRegistry) -> NativeResult<()> {
    for &(name, value) in CONSTANTS {
        natives.register_constant(name, Value::Integer(value))?;
    }
    Ok(())
}
