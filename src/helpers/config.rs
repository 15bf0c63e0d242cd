use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;

use crate::{
    error::HelperError,
    interpreter::{
        native::NativeRegistry,
        value::{core::Value, declared_type::DeclaredType},
    },
};

/// The raw contents of a helper file.
///
/// ```toml
/// name = "shout"
/// extension = "uppercase"
/// parameters = ["<string>", "[MCL_UPPERCASE_EVERYTHING]"]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct HelperFile {
    /// The script-visible function name.
    pub name:       Option<String>,
    /// The native function the helper forwards to.
    pub extension:  Option<String>,
    /// Parameter specs in extension argument order.
    #[serde(default)]
    pub parameters: Vec<String>,
    /// Keys the loader does not know about. They are reported and ignored.
    #[serde(flatten)]
    pub unknown:    BTreeMap<String, toml::Value>,
}

/// How one extension argument is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSpec {
    /// `<type>`: the caller must pass a value of this type.
    Required(DeclaredType),
    /// `[default]`: the caller may pass a value, otherwise the default is
    /// used.
    Optional(Value),
    /// Any other spec: always this value, never supplied by callers.
    Fixed(Value),
}

impl ParameterSpec {
    /// Parses a parameter spec. Defaults and fixed values are literals or
    /// names of registered constants, resolved now.
    ///
    /// # Errors
    /// `UnknownType` for `<...>` naming no type, `UnresolvedValue` for a
    /// value that is neither a literal nor a known constant.
    ///
    /// # Example
    /// ```
    /// use std::path::Path;
    ///
    /// use nirvana::{
    ///     helpers::config::ParameterSpec,
    ///     interpreter::{
    ///         native::NativeRegistry,
    ///         value::{core::Value, declared_type::DeclaredType},
    ///     },
    /// };
    ///
    /// let natives = NativeRegistry::new();
    /// let path = Path::new("shout.toml");
    ///
    /// assert_eq!(ParameterSpec::parse("<string>", &natives, path).unwrap(),
    ///            ParameterSpec::Required(DeclaredType::String));
    /// assert_eq!(ParameterSpec::parse("[3]", &natives, path).unwrap(),
    ///            ParameterSpec::Optional(Value::Integer(3)));
    /// assert_eq!(ParameterSpec::parse("\"-\"", &natives, path).unwrap(),
    ///            ParameterSpec::Fixed(Value::from("-")));
    /// ```
    pub fn parse(spec: &str, natives: &NativeRegistry, path: &Path) -> Result<Self, HelperError> {
        let spec = spec.trim();

        if let Some(type_name) = spec.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
            return match DeclaredType::from_keyword(type_name) {
                Some(declared) => Ok(Self::Required(declared)),
                None => Err(HelperError::UnknownType { path: path.to_path_buf(),
                                                       spec: spec.to_string(), }),
            };
        }

        let (text, wrap): (&str, fn(Value) -> Self) =
            match spec.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
                Some(inner) if !inner.is_empty() => (inner, Self::Optional),
                _ => (spec, Self::Fixed),
            };

        resolve_value(text, natives).map(wrap)
                                    .ok_or_else(|| HelperError::UnresolvedValue { path: path.to_path_buf(),
                                                                                  spec: spec.to_string(), })
    }
}

/// Resolves a default or fixed value: a quoted string, `true`/`false`, an
/// integer, a finite float, or the name of a registered constant.
fn resolve_value(text: &str, natives: &NativeRegistry) -> Option<Value> {
    if let Some(quoted) = text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        return Some(Value::String(unescape(quoted)));
    }
    match text {
        "true" => return Some(Value::Boolean(true)),
        "false" => return Some(Value::Boolean(false)),
        _ => {},
    }
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::Integer(n));
    }
    if let Ok(f) = text.parse::<f64>()
       && f.is_finite()
    {
        return Some(Value::Float(f));
    }
    natives.get_constant(text).ok()
}

/// Resolves the escapes string literals support. Unknown escapes keep the
/// escaped character.
fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}
