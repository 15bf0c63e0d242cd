use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    error::{HelperError, NativeError},
    extensions::core::Arity,
    helpers::config::{HelperFile, ParameterSpec},
    interpreter::{
        native::{NativeFn, NativeRegistry, NativeResult},
        value::{core::Value, declared_type::DeclaredType},
    },
    util::num::f64_to_i64_exact,
};

/// A validated helper, ready to be registered.
#[derive(Debug, Clone, PartialEq)]
pub struct HelperDefinition {
    /// The script-visible name.
    pub name:       String,
    /// The extension the helper forwards to.
    pub extension:  String,
    /// One spec per extension argument.
    pub parameters: Vec<ParameterSpec>,
}

impl HelperDefinition {
    fn count(&self, pick: fn(&ParameterSpec) -> bool) -> usize {
        self.parameters.iter().filter(|spec| pick(spec)).count()
    }

    /// How many arguments a caller may pass.
    #[must_use]
    pub fn arity(&self) -> Arity {
        let required = self.count(|spec| matches!(spec, ParameterSpec::Required(_)));
        let optional = self.count(|spec| matches!(spec, ParameterSpec::Optional(_)));
        Arity::Range(required, required + optional)
    }
}

/// Loads every `*.toml` file directly inside `dir` as a helper and registers
/// it in `natives`.
///
/// Files are processed in name order. Helpers may wrap any function already
/// in the registry, including helpers from earlier files.
///
/// # Returns
/// The number of helpers registered.
///
/// # Errors
/// The first [`HelperError`]; helpers from earlier files stay registered.
pub fn load_helpers(dir: &Path, natives: &mut NativeRegistry) -> Result<usize, HelperError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let is_toml = entry.path().extension().is_some_and(|ext| ext == "toml");
        if entry.file_type().is_file() && is_toml {
            paths.push(entry.into_path());
        }
    }

    for path in &paths {
        let definition = read_helper(path, natives)?;
        register_helper(definition, path, natives)?;
    }
    debug!(dir = %dir.display(), count = paths.len(), "loaded helpers");
    Ok(paths.len())
}

/// Reads and validates one helper file.
///
/// # Errors
/// Any [`HelperError`] except `Walk` and `DuplicateHelper`.
pub fn read_helper(path: &Path, natives: &NativeRegistry) -> Result<HelperDefinition, HelperError> {
    let text = fs::read_to_string(path).map_err(|source| HelperError::Io { path: path.to_path_buf(),
                                                                              source })?;
    let file: HelperFile = toml::from_str(&text).map_err(|source| HelperError::Toml { path: path.to_path_buf(),
                                                                                        source })?;

    for key in file.unknown.keys() {
        warn!(path = %path.display(), key = %key, "ignoring unknown key in helper file");
    }

    let name = required_field(file.name, "name", path)?;
    let extension = required_field(file.extension, "extension", path)?;

    let mut parameters = Vec::with_capacity(file.parameters.len());
    let mut seen_optional = false;
    for raw in &file.parameters {
        let spec = ParameterSpec::parse(raw, natives, path)?;
        match spec {
            ParameterSpec::Required(_) if seen_optional => {
                return Err(HelperError::RequiredAfterOptional { path: path.to_path_buf(),
                                                                spec: raw.trim().to_string(), });
            },
            ParameterSpec::Optional(_) => seen_optional = true,
            _ => {},
        }
        parameters.push(spec);
    }

    Ok(HelperDefinition { name, extension, parameters })
}

fn required_field(value: Option<String>, field: &'static str, path: &Path) -> Result<String, HelperError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(HelperError::MissingField { path: path.to_path_buf(),
                                             field }),
    }
}

/// Registers `definition` as a native function forwarding to its extension.
///
/// # Errors
/// `UnknownExtension` if the target is not registered, `DuplicateHelper` if
/// the helper's name is taken.
pub fn register_helper(definition: HelperDefinition,
                       path: &Path,
                       natives: &mut NativeRegistry)
                       -> Result<(), HelperError> {
    let target = natives.get(&definition.extension)
                        .ok_or_else(|| HelperError::UnknownExtension { path:      PathBuf::from(path),
                                                                       extension: definition.extension.clone(), })?;
    if natives.contains(&definition.name) {
        return Err(HelperError::DuplicateHelper { path: path.to_path_buf(),
                                                  name: definition.name });
    }

    debug!(name = %definition.name,
           extension = %definition.extension,
           parameters = definition.parameters.len(),
           "registering helper");
    let name = definition.name.clone();
    natives.register_native_function(&name, move |args| call_helper(&definition, &target, args));
    Ok(())
}

/// Builds the extension's argument list from a helper call and forwards it.
fn call_helper(definition: &HelperDefinition, target: &NativeFn, args: &[Value]) -> NativeResult<Value> {
    let arity = definition.arity();
    if !arity.check(args.len()) {
        return Err(NativeError::ArgumentCount { function: definition.name.clone(),
                                                expected: arity.describe(),
                                                found:    args.len(), });
    }

    let mut supplied = args.iter().enumerate();
    let mut forwarded = Vec::with_capacity(definition.parameters.len());
    for spec in &definition.parameters {
        let value = match spec {
            ParameterSpec::Required(declared) => match supplied.next() {
                Some((index, value)) => check_argument(definition, *declared, index + 1, value)?,
                None => return Err(NativeError::invalid(&definition.name, "Missing required argument.")),
            },
            ParameterSpec::Optional(default) => match supplied.next() {
                Some((_, value)) => value.clone(),
                None => default.clone(),
            },
            ParameterSpec::Fixed(value) => value.clone(),
        };
        forwarded.push(value);
    }

    target(&forwarded)
}

/// Checks a required argument against its declared type. Integral floats
/// pass as integers.
fn check_argument(definition: &HelperDefinition,
                  declared: DeclaredType,
                  position: usize,
                  value: &Value)
                  -> NativeResult<Value> {
    let accepted = match (declared, value) {
        (DeclaredType::String, Value::String(_))
        | (DeclaredType::Integer, Value::Integer(_))
        | (DeclaredType::Number, Value::Integer(_) | Value::Float(_))
        | (DeclaredType::Boolean, Value::Boolean(_))
        | (DeclaredType::Any, _) => Some(value.clone()),
        (DeclaredType::Integer, Value::Float(f)) => f64_to_i64_exact(*f).map(Value::Integer),
        _ => None,
    };

    accepted.ok_or_else(|| NativeError::ArgumentType { function:  definition.name.clone(),
                                                       position,
                                                       parameter: format!("arg{position}"),
                                                       expected:  expected_kind(declared),
                                                       found:     value.type_name(), })
}

const fn expected_kind(declared: DeclaredType) -> &'static str {
    match declared {
        DeclaredType::String => "a string",
        DeclaredType::Integer => "an integer",
        DeclaredType::Number => "a number",
        DeclaredType::Boolean => "a boolean",
        DeclaredType::Any => "a value",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::extensions::{register_all, register_constants};

    fn registry() -> NativeRegistry {
        let mut natives = NativeRegistry::new();
        register_all(&mut natives);
        register_constants(&mut natives).unwrap();
        natives
    }

    fn define(name: &str, extension: &str, parameters: &[&str], natives: &NativeRegistry) -> HelperDefinition {
        let path = Path::new("inline.toml");
        let parameters = parameters.iter()
                                   .map(|raw| ParameterSpec::parse(raw, natives, path).unwrap())
                                   .collect();
        HelperDefinition { name:      name.to_string(),
                           extension: extension.to_string(),
                           parameters }
    }

    #[test]
    fn arity_counts_required_and_optional() {
        let natives = registry();
        let definition = define("h", "pad", &["<string>", "<integer>", "[\"*\"]", "MCL_PAD_LEFT"], &natives);
        assert_eq!(definition.arity(), Arity::Range(2, 3));
    }

    #[test]
    fn helper_fills_defaults_and_fixed_values() {
        let mut natives = registry();
        let definition = define("stars", "pad", &["<string>", "<integer>", "[\"*\"]", "MCL_PAD_LEFT"], &natives);
        register_helper(definition, Path::new("stars.toml"), &mut natives).unwrap();

        let padded = natives.call_native_function_by_name("stars", &[Value::from("ab"), Value::Integer(4)])
                            .unwrap();
        assert_eq!(padded, Value::from("**ab"));

        let padded = natives.call_native_function_by_name("stars",
                                                          &[Value::from("ab"),
                                                            Value::Float(3.0),
                                                            Value::from("-")])
                            .unwrap();
        assert_eq!(padded, Value::from("-ab"));
    }

    #[test]
    fn helper_checks_count_and_types() {
        let mut natives = registry();
        let definition = define("shout", "uppercase", &["<string>", "MCL_UPPERCASE_EVERYTHING"], &natives);
        register_helper(definition, Path::new("shout.toml"), &mut natives).unwrap();

        let error = natives.call_native_function_by_name("shout", &[]).unwrap_err();
        assert_eq!(error.to_string(), "Function 'shout' expects 1 to 1 arguments, but received 0.");

        let error = natives.call_native_function_by_name("shout", &[Value::Integer(1)]).unwrap_err();
        assert_eq!(error.to_string(),
                   "Function 'shout': Argument 1 ($arg1) must be a string, but got value of type integer.");
    }

    #[test]
    fn unknown_extension_and_duplicates() {
        let mut natives = registry();
        let missing = define("h", "nope", &[], &natives);
        assert!(matches!(register_helper(missing, Path::new("h.toml"), &mut natives),
                         Err(HelperError::UnknownExtension { .. })));

        let clash = define("abs", "sqrt", &["<number>"], &natives);
        assert!(matches!(register_helper(clash, Path::new("abs.toml"), &mut natives),
                         Err(HelperError::DuplicateHelper { .. })));
    }
}
