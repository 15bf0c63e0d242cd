use std::{fs, rc::Rc};

use nirvana::{
    error::{Error, HelperError},
    helpers::load_helpers,
    interpreter::native::NativeRegistry,
    run_source, standard_registry,
};
use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

fn helper_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

fn load(files: &[(&str, &str)]) -> (Result<usize, HelperError>, NativeRegistry) {
    let dir = helper_dir(files);
    let mut natives = standard_registry().unwrap();
    let result = load_helpers(dir.path(), &mut natives);
    (result, natives)
}

fn run(natives: NativeRegistry, src: &str) -> Result<String, Error> {
    let mut out = Vec::new();
    run_source(src, Rc::new(natives), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn helpers_are_callable_from_scripts() {
    let (result, natives) =
        load(&[("shout.toml",
                "name = \"shout\"\nextension = \"uppercase\"\nparameters = [\"<string>\", \"[MCL_UPPERCASE_EVERYTHING]\"]\n"),
               ("zeros.toml",
                "name = \"zeros\"\nextension = \"pad\"\nparameters = [\"<string>\", \"<integer>\", \"\\\"0\\\"\", \"MCL_PAD_LEFT\"]\n"),
               ("notes.txt", "not a helper")]);
    assert_eq!(result.unwrap(), 2);

    let output = run(natives,
                     "echo shout(\"hey\");\n\
                      echo shout(\"hey\", MCL_UPPERCASE_FIRST);\n\
                      echo zeros(\"7\", 3);")
             .unwrap();
    assert_eq!(output, "HEY\nHey\n007\n");
}

#[test]
fn helpers_can_wrap_earlier_helpers() {
    let (result, natives) =
        load(&[("a_stars.toml", "name = \"stars\"\nextension = \"pad\"\nparameters = [\"<string>\", \"<integer>\", \"\\\"*\\\"\"]\n"),
               ("b_banner.toml", "name = \"banner\"\nextension = \"stars\"\nparameters = [\"<string>\", \"5\"]\n")]);
    assert_eq!(result.unwrap(), 2);
    assert_eq!(run(natives, "echo banner(\"ab\");").unwrap(), "ab***\n");
}

#[test]
fn helper_calls_check_arguments() {
    let (result, natives) =
        load(&[("shout.toml", "name = \"shout\"\nextension = \"uppercase\"\nparameters = [\"<string>\"]\n")]);
    result.unwrap();

    let error = run(natives.clone(), "echo shout();").unwrap_err();
    assert_eq!(error.to_string(),
               "Error on line 1: Function 'shout' expects 1 to 1 arguments, but received 0.");

    let error = run(natives, "echo shout(true);").unwrap_err();
    assert_eq!(error.to_string(),
               "Error on line 1: Function 'shout': Argument 1 ($arg1) must be a string, but got value of type boolean.");
}

#[test]
fn invalid_helper_files_are_rejected() {
    let (result, _) = load(&[("bad.toml", "name = \"x\"\n")]);
    assert!(matches!(result, Err(HelperError::MissingField { field: "extension", .. })));

    let (result, _) = load(&[("bad.toml", "name = \"x\"\nextension = \"nope\"\n")]);
    assert!(matches!(result, Err(HelperError::UnknownExtension { .. })));

    let (result, _) = load(&[("bad.toml", "name = \"abs\"\nextension = \"sqrt\"\n")]);
    assert!(matches!(result, Err(HelperError::DuplicateHelper { .. })));

    let (result, _) = load(&[("bad.toml", "name = \"x\"\nextension = \"pad\"\nparameters = [\"[1]\", \"<string>\"]\n")]);
    assert!(matches!(result, Err(HelperError::RequiredAfterOptional { .. })));

    let (result, _) = load(&[("bad.toml", "name = \"x\"\nextension = \"pad\"\nparameters = [\"[UNKNOWN]\"]\n")]);
    assert!(matches!(result, Err(HelperError::UnresolvedValue { .. })));

    let (result, _) = load(&[("bad.toml", "name = [1]\n")]);
    assert!(matches!(result, Err(HelperError::Toml { .. })));
}

#[test]
fn unknown_keys_are_ignored() {
    let (result, natives) =
        load(&[("flip.toml", "name = \"flip\"\nextension = \"reverse\"\nparameters = [\"<string>\"]\nauthor = \"someone\"\n")]);
    assert_eq!(result.unwrap(), 1);
    assert_eq!(run(natives, "echo flip(\"abc\");").unwrap(), "cba\n");
}
