use std::fmt;

use crate::interpreter::value::core::Value;

/// The declared type attached to a variable, parameter or return value.
///
/// `Any` is the dynamic type given to variables created by plain assignment;
/// the other four correspond to the `string`, `integer`, `number` and
/// `boolean` keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeclaredType {
    /// No static constraint.
    #[default]
    Any,
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`: integer or float.
    Number,
    /// `boolean`
    Boolean,
}

impl DeclaredType {
    /// Parses a type keyword as it appears in source or helper configuration.
    ///
    /// # Example
    /// ```
    /// use nirvana::interpreter::value::declared_type::DeclaredType;
    ///
    /// assert_eq!(DeclaredType::from_keyword("number"), Some(DeclaredType::Number));
    /// assert_eq!(DeclaredType::from_keyword("any"), None);
    /// ```
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// The value a variable of this type holds when declared without an
    /// initializer, and the value a function returns when it falls off the
    /// end of its body.
    #[must_use]
    pub fn default_value(self) -> Value {
        match self {
            Self::Any => Value::Null,
            Self::String => Value::String(String::new()),
            Self::Integer => Value::Integer(0),
            Self::Number => Value::Float(0.0),
            Self::Boolean => Value::Boolean(false),
        }
    }

    /// The declared type inferred for a constant from its value.
    #[must_use]
    pub const fn of_value(value: &Value) -> Self {
        match value {
            Value::String(_) => Self::String,
            Value::Integer(_) => Self::Integer,
            Value::Float(_) => Self::Number,
            Value::Boolean(_) => Self::Boolean,
            Value::Null => Self::Any,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        };
        write!(f, "{name}")
    }
}
