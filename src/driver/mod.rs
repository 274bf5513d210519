//! Top-level driver: wires source text through the lex → parse → interpret
//! pipeline for both one-shot file execution and the `--check` flag.

use std::path::Path;

use plang::ast::Program;
use plang::config::Config;
use plang::interpreter::RuntimeError;
use plang::lexer::{LexError, Lexer};
use plang::parser::{FrontError, ParseError};

/// A failure from any stage of the pipeline.
#[derive(Debug)]
pub enum CompileError {
    Lexical(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
    Io { path: String, source: std::io::Error },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Lexical(e) => write!(f, "{e}"),
            CompileError::Parse(e) => write!(f, "{e}"),
            CompileError::Runtime(e) => write!(f, "{e}"),
            CompileError::Io { path, source } => write!(f, "failed to read '{path}': {source}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<FrontError> for CompileError {
    fn from(err: FrontError) -> Self {
        match err {
            FrontError::Lex(e) => CompileError::Lexical(e),
            FrontError::Parse(e) => CompileError::Parse(e),
        }
    }
}

impl From<RuntimeError> for CompileError {
    fn from(err: RuntimeError) -> Self {
        CompileError::Runtime(err)
    }
}

fn read_source(path: &Path) -> Result<String, CompileError> {
    std::fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Parses `source` into a [`Program`], without running it.
pub fn parse(source: &str) -> Result<Program, CompileError> {
    tracing::debug!(bytes = source.len(), "parsing source");
    plang::parser::parse_source(source).map_err(CompileError::from)
}

/// Parses the file at `path`, reporting a parse-only result — used by
/// `--check`.
pub fn check(path: &Path) -> Result<(), CompileError> {
    let source = read_source(path)?;
    parse(&source)?;
    Ok(())
}

/// Parses and runs the file at `path` against a fresh environment.
pub fn run(path: &Path, config: Config) -> Result<(), CompileError> {
    let source = read_source(path)?;
    let program = parse(&source)?;
    tracing::info!(path = %path.display(), statements = program.len(), "running program");
    plang::interpreter::run_program(&program, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_line_accurate_error() {
        let err = parse("sett x to 1\n").unwrap_err();
        match err {
            CompileError::Parse(e) => assert_eq!(e.line, 1),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn check_rejects_missing_file() {
        let err = check(Path::new("/nonexistent/path/to/a/file.txt")).unwrap_err();
        assert!(matches!(err, CompileError::Io { .. }));
    }
}
