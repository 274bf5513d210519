//! Line classifications produced by the lexer.

/// The classification of a single physical source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A line carrying an executable statement phrase.
    Statement,
    /// A line whose trimmed text starts with `#`.
    Comment,
    /// A line that is empty once trimmed.
    Blank,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_equality() {
        assert_eq!(TokenKind::Statement, TokenKind::Statement);
        assert_ne!(TokenKind::Statement, TokenKind::Comment);
    }
}
