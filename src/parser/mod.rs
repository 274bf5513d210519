//! Parser for the plain-English statement language.
//!
//! This module turns the line-classified token stream produced by
//! [`crate::lexer`] into a [`Program`]. It implements the statement grammar
//! only: expression and condition text is captured as raw [`crate::ast::ExprSrc`]
//! and left to [`crate::expr`] to tokenize and build a tree, on demand, each
//! time the interpreter evaluates it.
//!
//! # Module Structure
//!
//! - [`error`] - Parse error types
//! - `helpers` - Token navigation, prefix/suffix stripping, and list splitting
//! - `stmt` - Statement dispatch and per-form builders
//!
//! # See Also
//!
//! * [`crate::lexer`] - Produces the token stream consumed here
//! * [`crate::ast`] - Defines the AST types produced here
//! * [`crate::interpreter`] - Walks the resulting [`Program`]

mod error;
mod helpers;
mod stmt;

pub use error::{ParseError, ParseErrorKind};

use crate::ast::Program;
use crate::lexer::{LexError, Lexer};
use helpers::Parser;

/// Either stage of the front end — lexing or parsing — can fail; callers
/// that only care whether the whole program loaded need just one error type.
#[derive(Debug)]
pub enum FrontError {
    Lex(LexError),
    Parse(ParseError),
}

impl std::fmt::Display for FrontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontError::Lex(e) => write!(f, "{e}"),
            FrontError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FrontError {}

impl From<LexError> for FrontError {
    fn from(err: LexError) -> Self {
        FrontError::Lex(err)
    }
}

impl From<ParseError> for FrontError {
    fn from(err: ParseError) -> Self {
        FrontError::Parse(err)
    }
}

/// Lexes and parses a complete source string into a [`Program`].
pub fn parse_source(source: &str) -> Result<Program, FrontError> {
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse_program()?;
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StmtKind;

    #[test]
    fn parses_minimal_program() {
        let program = parse_source("set x to 1\nsay x\n").unwrap();
        assert_eq!(program.len(), 2);
        assert!(matches!(program[0].kind, StmtKind::Assign { .. }));
        assert!(matches!(program[1].kind, StmtKind::Say { .. }));
    }

    #[test]
    fn reports_unknown_statement_with_suggestion() {
        let err = parse_source("sett x to 1\n").unwrap_err();
        match err {
            FrontError::Parse(e) => {
                assert_eq!(e.kind, ParseErrorKind::UnknownStatement);
                assert_eq!(e.suggestion.as_deref(), Some("set"));
            }
            FrontError::Lex(_) => panic!("expected parse error"),
        }
    }

    #[test]
    fn reports_missing_closer() {
        let err = parse_source("if 1 is 1 then\nsay 1\n").unwrap_err();
        assert!(matches!(err, FrontError::Parse(e) if e.kind == ParseErrorKind::MissingCloser));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let program = parse_source("# a comment\n\nsay 1\n").unwrap();
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn parses_if_otherwise_if_otherwise_chain() {
        let src = "if x is 1 then\nsay \"a\"\notherwise if x is 2 then\nsay \"b\"\notherwise\nsay \"c\"\nend if\n";
        let program = parse_source(src).unwrap();
        assert_eq!(program.len(), 1);
        match &program[0].kind {
            StmtKind::If { branches, else_body } => {
                assert_eq!(branches.len(), 2);
                assert!(else_body.is_some());
            }
            other => panic!("expected If, got {other:?}"),
        }
    }

    #[test]
    fn parses_nested_blocks() {
        let src = "repeat 3 times\nif x is 1 then\nsay \"one\"\nend if\nend repeat\n";
        let program = parse_source(src).unwrap();
        match &program[0].kind {
            StmtKind::RepeatCount { body, .. } => {
                assert_eq!(body.len(), 1);
                assert!(matches!(body[0].kind, StmtKind::If { .. }));
            }
            other => panic!("expected RepeatCount, got {other:?}"),
        }
    }

    #[test]
    fn parses_define_with_params_and_call() {
        let program = parse_source("define square with n\nreturn n * n\nend define\nsay call square with 4\n").unwrap();
        match &program[0].kind {
            StmtKind::DefineFn { name, params, .. } => {
                assert_eq!(name, "square");
                assert_eq!(params, &vec!["n".to_string()]);
            }
            other => panic!("expected DefineFn, got {other:?}"),
        }
        assert!(matches!(program[1].kind, StmtKind::Say { .. }));
    }
}
