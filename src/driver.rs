use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::{
    error::Error,
    interpreter::{evaluator::core::Evaluator, native::NativeRegistry},
    parse_source,
};

/// The pattern used when none is given on the command line.
pub const DEFAULT_PATTERN: &str = "bin/*.nv";

/// Matches a file name against a pattern where `*` matches any run of
/// characters and `?` exactly one.
///
/// # Example
/// ```
/// use nirvana::driver::wildcard_match;
///
/// assert!(wildcard_match("*.nv", "hello.nv"));
/// assert!(wildcard_match("test?.nv", "test1.nv"));
/// assert!(!wildcard_match("*.nv", "hello.nvx"));
/// ```
#[must_use]
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pattern = pattern.chars().collect::<Vec<_>>();
    let name = name.chars().collect::<Vec<_>>();

    let (mut p, mut n) = (0, 0);
    // Position of the last `*` and the name index it was tried at.
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, n));
                p += 1;
            },
            Some(&c) if c == '?' || c == name[n] => {
                p += 1;
                n += 1;
            },
            _ => match backtrack {
                Some((star, tried)) => {
                    p = star + 1;
                    n = tried + 1;
                    backtrack = Some((star, tried + 1));
                },
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

fn has_wildcard(text: &str) -> bool {
    text.contains(['*', '?'])
}

/// Expands command-line patterns into a sorted, de-duplicated list of files.
///
/// A pattern without wildcards names a file directly. Otherwise only its
/// file-name part may contain wildcards, matched against the files directly
/// inside its directory. Patterns matching nothing are reported with
/// `warn!`.
#[must_use]
pub fn discover_files(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for pattern in patterns {
        let before = files.len();
        let path = Path::new(pattern);
        let file_pattern = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();

        if has_wildcard(file_pattern) {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let entries = WalkDir::new(dir).min_depth(1).max_depth(1).into_iter().filter_map(Result::ok);
            for entry in entries {
                let matches = entry.file_name().to_str().is_some_and(|name| wildcard_match(file_pattern, name));
                if entry.file_type().is_file() && matches {
                    files.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            files.push(path.to_path_buf());
        }

        if files.len() == before {
            warn!(pattern = %pattern, "no files match pattern");
        }
    }

    files.sort();
    files.dedup();
    debug!(count = files.len(), "discovered source files");
    files
}

/// Reads, parses and runs one file with a fresh evaluator over `natives`.
///
/// With `dump_ast` set, the parsed program is printed to stderr first.
///
/// # Errors
/// [`Error::Io`] if the file cannot be read, otherwise the first parse or
/// runtime error.
pub fn run_file<W: Write>(path: &Path, natives: &Rc<NativeRegistry>, dump_ast: bool, out: W) -> Result<(), Error> {
    let source = fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(),
                                                                          source })?;
    let program = parse_source(&source)?;
    if dump_ast {
        eprintln!("{program:#?}");
    }

    debug!(path = %path.display(), "running file");
    Evaluator::new(Rc::clone(natives), out).interpret(&program)?;
    Ok(())
}

/// The one-line report printed for a file that failed.
///
/// # Example
/// ```
/// use std::path::Path;
///
/// use nirvana::{driver::failure_message, parse_source};
///
/// let error = parse_source("echo @;").unwrap_err().into();
/// assert_eq!(failure_message(Path::new("a.nv"), &error),
///            "Parser/Lexer Error in 'a.nv': Error on line 1: Unexpected character '@'.");
/// ```
#[must_use]
pub fn failure_message(path: &Path, error: &Error) -> String {
    let kind = match error {
        Error::Parse(_) => "Parser/Lexer Error",
        Error::Runtime(_) => "Runtime Error",
        Error::Helper(_) => "Helper Error",
        Error::Io { .. } => "I/O Error",
    };
    format!("{kind} in '{}': {error}", path.display())
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn wildcards() {
        assert!(wildcard_match("*", ""));
        assert!(wildcard_match("*", "anything"));
        assert!(wildcard_match("a*b*c", "axxbyyc"));
        assert!(wildcard_match("a*c", "abcbc"));
        assert!(wildcard_match("???", "abc"));
        assert!(!wildcard_match("???", "ab"));
        assert!(!wildcard_match("a*c", "abcb"));
        assert!(wildcard_match("exact.nv", "exact.nv"));
        assert!(!wildcard_match("exact.nv", "Exact.nv"));
    }

    #[test]
    fn discovery_sorts_and_filters() {
        let dir = tempdir().unwrap();
        for name in ["b.nv", "a.nv", "c.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }
        fs::create_dir(dir.path().join("nested.nv")).unwrap();

        let pattern = dir.path().join("*.nv").to_string_lossy().into_owned();
        let direct = dir.path().join("a.nv").to_string_lossy().into_owned();
        let files = discover_files(&[pattern, direct]);

        assert_eq!(files, vec![dir.path().join("a.nv"), dir.path().join("b.nv")]);
    }

    #[test]
    fn unmatched_patterns_yield_nothing() {
        let dir = tempdir().unwrap();
        let pattern = dir.path().join("*.nv").to_string_lossy().into_owned();
        let missing = dir.path().join("missing.nv").to_string_lossy().into_owned();
        assert!(discover_files(&[pattern, missing]).is_empty());
    }

    #[test]
    fn run_file_reports_each_phase() {
        let dir = tempdir().unwrap();
        let natives = Rc::new(crate::standard_registry().unwrap());

        let good = dir.path().join("good.nv");
        fs::write(&good, "echo abs(-2);").unwrap();
        let mut out = Vec::new();
        run_file(&good, &natives, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2\n");

        let bad = dir.path().join("bad.nv");
        fs::write(&bad, "echo 1;\necho missing;").unwrap();
        let error = run_file(&bad, &natives, false, Vec::new()).unwrap_err();
        assert_eq!(failure_message(Path::new("bad.nv"), &error),
                   "Runtime Error in 'bad.nv': Error on line 2: Undefined variable 'missing'.");

        let error = run_file(&dir.path().join("absent.nv"), &natives, false, Vec::new()).unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
    }
}
