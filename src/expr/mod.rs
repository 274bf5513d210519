//! The embedded expression, comparison, and call sub-language.
//!
//! Statements in [`crate::ast`] hold raw expression text rather than a
//! pre-built tree. This module tokenizes and parses that text into an
//! [`Expr`] on demand; [`crate::interpreter`] evaluates the resulting tree
//! against its scope stack. Nothing here is cached across calls, so a loop
//! condition or count is re-lexed and re-parsed every time it's evaluated.

mod ast;
mod error;
mod lexer;
mod parser;
mod token;

pub use ast::{BinOp, Expr, UnOp};
pub use error::{ExprError, ExprErrorKind};

/// Tokenizes and parses `src` into an expression tree.
pub fn parse_expr(src: &str) -> Result<Expr, ExprError> {
    let toks = lexer::tokenize(src)?;
    parser::parse(toks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_expression_end_to_end() {
        let expr = parse_expr("1 + 2").unwrap();
        assert!(matches!(expr, Expr::Binary(BinOp::Add, _, _)));
    }

    #[test]
    fn reports_syntax_error() {
        assert!(parse_expr("1 +").is_err());
    }
}
