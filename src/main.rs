use std::{io, path::PathBuf, process::ExitCode, rc::Rc};

use clap::Parser;
use nirvana::{
    driver::{DEFAULT_PATTERN, discover_files, failure_message, run_file},
    helpers::load_helpers,
    standard_registry,
};
use tracing_subscriber::EnvFilter;

/// nirvana runs Nirvana script files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Files or file-name wildcards (`*`, `?`) to run, in sorted order.
    /// Defaults to `bin/*.nv`.
    patterns: Vec<String>,

    /// Directory of helper definitions (`*.toml`) to load before running.
    #[arg(long, value_name = "DIR")]
    helpers: Option<PathBuf>,

    /// Print each parsed program to stderr before running it.
    #[arg(long)]
    dump_ast: bool,

    /// Keep running the remaining files after one fails.
    #[arg(long)]
    keep_going: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();

    let mut natives = match standard_registry() {
        Ok(natives) => natives,
        Err(e) => {
            eprintln!("Failed to set up the standard library: {e}");
            return ExitCode::FAILURE;
        },
    };
    if let Some(dir) = &args.helpers
       && let Err(e) = load_helpers(dir, &mut natives)
    {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    let natives = Rc::new(natives);

    let patterns = if args.patterns.is_empty() {
        vec![DEFAULT_PATTERN.to_string()]
    } else {
        args.patterns
    };
    let files = discover_files(&patterns);
    if files.is_empty() {
        eprintln!("No source files found.");
        return ExitCode::FAILURE;
    }

    let mut failed = false;
    for file in &files {
        if let Err(e) = run_file(file, &natives, args.dump_ast, io::stdout().lock()) {
            eprintln!("{}", failure_message(file, &e));
            failed = true;
            if !args.keep_going {
                break;
            }
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
