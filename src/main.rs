//! The plang interpreter CLI.
//!
//! Runs a source file, checks it for parse errors only, or drops into an
//! interactive REPL when no file is given. Delegates the actual pipeline
//! work to the `driver` module, which wraps the `plang` library crate.

use std::path::PathBuf;

use clap::Parser;

mod diagnostics;
mod driver;
mod repl;

use plang::config::Config;

/// Command-line interface for the plang interpreter.
#[derive(Parser)]
#[command(name = "plang")]
#[command(version, about = "Interpreter for a line-oriented, plain-English scripting language", long_about = None)]
struct Cli {
    /// Source file to run. Omit to start an interactive REPL.
    file: Option<PathBuf>,

    /// Parse the file without running it; exit 0 if it parses cleanly.
    #[arg(long)]
    check: bool,

    /// Maximum iterations any single loop may run before the interpreter
    /// aborts it as a runaway loop.
    #[arg(long, default_value_t = plang::config::DEFAULT_MAX_LOOP_ITERATIONS)]
    max_loop_iterations: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let config = Config {
        max_loop_iterations: cli.max_loop_iterations,
    };

    let Some(file) = cli.file else {
        if let Err(err) = repl::run(config) {
            eprintln!("repl error: {err}");
            std::process::exit(1);
        }
        return;
    };

    if cli.check {
        match driver::check(&file) {
            Ok(()) => std::process::exit(0),
            Err(err) => report_and_exit(&file, &err),
        }
    }

    if let Err(err) = driver::run(&file, config) {
        report_and_exit(&file, &err);
    }
}

fn report_and_exit(file: &std::path::Path, error: &driver::CompileError) -> ! {
    let source = std::fs::read_to_string(file).unwrap_or_default();
    diagnostics::report_error(&file.display().to_string(), &source, error);
    std::process::exit(1);
}
