use std::{fs, path::Path, rc::Rc};

use nirvana::{run_source, standard_registry};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn scripts_match_expected_output() {
    let natives = Rc::new(standard_registry().unwrap());
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").sort_by_file_name()
                                     .into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "nv"))
    {
        let path = entry.path();
        let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = read_expected(&path.with_extension("out"));

        let mut out = Vec::new();
        if let Err(e) = run_source(&source, Rc::clone(&natives), &mut out) {
            panic!("Script {path:?} failed: {e}");
        }
        assert_eq!(String::from_utf8(out).unwrap(), expected, "output of {path:?}");
        count += 1;
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn read_expected(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Missing expected output {path:?}: {e}"))
}
