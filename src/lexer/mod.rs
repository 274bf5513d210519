//! Line lexer for the plain-English source language.
//!
//! This module provides the [`Lexer`] struct which splits source text into
//! physical lines and classifies each one as a [`crate::token::TokenKind::Statement`],
//! [`crate::token::TokenKind::Comment`], or [`crate::token::TokenKind::Blank`].
//!
//! # Overview
//!
//! The lexer does no per-word tokenization: it treats each statement line as
//! an opaque phrase and leaves decomposition to the parser. It:
//! - discards a leading UTF-8 byte-order mark, if present
//! - rejects embedded NUL characters anywhere in the source
//! - splits on `\n`, preserving original 1-based line numbers
//! - trims each line and classifies it
//!
//! Comment and blank lines are retained in the token stream (not discarded)
//! so that later line numbers stay accurate; the parser skips them via
//! [`crate::token::Token::is_trivia`].
//!
//! # Module Structure
//!
//! - [`error`] - Error type for lexical analysis
//!
//! # See Also
//!
//! * [`crate::token`] - Token type definitions
//! * [`crate::parser`] - Parser that consumes the token stream

mod error;

pub use error::LexError;

use crate::token::{Token, TokenKind};

/// Splits source text into line-classified tokens.
pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input }
    }

    /// Tokenizes the entire input into one [`Token`] per physical line.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the input contains a NUL character.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let stripped = self.input.strip_prefix('\u{FEFF}').unwrap_or(self.input);

        let mut tokens = Vec::new();
        for (idx, raw_line) in stripped.split('\n').enumerate() {
            let line = idx + 1;
            let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

            if raw_line.contains('\0') {
                return Err(LexError::null_byte(line));
            }

            let trimmed = raw_line.trim();
            let kind = if trimmed.is_empty() {
                TokenKind::Blank
            } else if trimmed.starts_with('#') {
                TokenKind::Comment
            } else {
                TokenKind::Statement
            };

            tokens.push(Token::new(line, kind, trimmed));
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statement_comment_and_blank() {
        let tokens = Lexer::new("set x to 1\n# a comment\n\nsay x").tokenize().unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].kind, TokenKind::Statement);
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].text, "set x to 1");
        assert_eq!(tokens[1].kind, TokenKind::Comment);
        assert_eq!(tokens[1].text, "# a comment");
        assert_eq!(tokens[2].kind, TokenKind::Blank);
        assert_eq!(tokens[2].text, "");
        assert_eq!(tokens[3].kind, TokenKind::Statement);
        assert_eq!(tokens[3].line, 4);
    }

    #[test]
    fn strips_leading_bom() {
        let tokens = Lexer::new("\u{FEFF}say 1").tokenize().unwrap();
        assert_eq!(tokens[0].text, "say 1");
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let tokens = Lexer::new("say 1\r\nsay 2").tokenize().unwrap();
        assert_eq!(tokens[0].text, "say 1");
        assert_eq!(tokens[1].text, "say 2");
    }

    #[test]
    fn rejects_null_byte() {
        let err = Lexer::new("say 1\nsay \02").tokenize().unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let tokens = Lexer::new("   say x   ").tokenize().unwrap();
        assert_eq!(tokens[0].text, "say x");
    }

    #[test]
    fn blank_line_is_whitespace_only() {
        let tokens = Lexer::new("   \t  ").tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Blank);
    }
}
