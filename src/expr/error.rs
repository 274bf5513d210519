//! Error type produced while tokenizing, parsing, or evaluating an
//! expression. The caller (always a statement in [`crate::interpreter`])
//! attaches the enclosing line number when converting this into a
//! [`crate::interpreter::RuntimeError`].

/// The structural reason an expression failed, independent of source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprErrorKind {
    UndefinedName,
    TypeMismatch,
    DivisionByZero,
    BadIndex,
    ArityMismatch,
    Syntax,
}

#[derive(Debug, Clone)]
pub struct ExprError {
    pub kind: ExprErrorKind,
    pub message: String,
}

impl ExprError {
    pub fn new(kind: ExprErrorKind, message: impl Into<String>) -> Self {
        ExprError {
            kind,
            message: message.into(),
        }
    }

    pub fn undefined_name(name: &str) -> Self {
        Self::new(ExprErrorKind::UndefinedName, format!("undefined name '{name}'"))
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ExprErrorKind::TypeMismatch, message)
    }

    pub fn division_by_zero() -> Self {
        Self::new(ExprErrorKind::DivisionByZero, "division by zero")
    }

    pub fn bad_index(message: impl Into<String>) -> Self {
        Self::new(ExprErrorKind::BadIndex, message)
    }

    pub fn arity_mismatch(message: impl Into<String>) -> Self {
        Self::new(ExprErrorKind::ArityMismatch, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ExprErrorKind::Syntax, message)
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExprError {}
