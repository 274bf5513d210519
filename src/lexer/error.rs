//! Lexical analysis error types.

/// An error raised while splitting source text into lines.
///
/// The only thing that can go wrong at this stage is a control character the
/// language refuses to carry through as statement text.
#[derive(Debug)]
pub struct LexError {
    /// The 1-based line on which the disallowed character was found.
    pub line: usize,
    /// A human-readable description of the error.
    pub message: String,
}

impl LexError {
    pub fn null_byte(line: usize) -> Self {
        LexError {
            line,
            message: "source contains a null character".to_string(),
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}
