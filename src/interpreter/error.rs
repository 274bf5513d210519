//! Runtime error types raised while executing a parsed program.

use crate::expr::ExprErrorKind;

/// The structural reason a program failed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable,
    TypeMismatch,
    DivisionByZero,
    ListRemoveMissing,
    ArityMismatch,
    ReturnOutsideFunction,
    LoopCtrlOutsideLoop,
    RunawayLoop,
    BadIndex,
}

/// An error raised while executing a statement or evaluating an expression,
/// always carrying the 1-based line of the statement that triggered it.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub line: usize,
    pub message: String,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, line: usize, message: impl Into<String>) -> Self {
        RuntimeError {
            kind,
            line,
            message: message.into(),
        }
    }

    pub fn undefined_variable(line: usize, name: &str) -> Self {
        Self::new(
            RuntimeErrorKind::UndefinedVariable,
            line,
            format!("undefined variable '{name}'"),
        )
    }

    pub fn type_mismatch(line: usize, message: impl Into<String>) -> Self {
        Self::new(RuntimeErrorKind::TypeMismatch, line, message)
    }

    pub fn division_by_zero(line: usize) -> Self {
        Self::new(RuntimeErrorKind::DivisionByZero, line, "division by zero")
    }

    pub fn list_remove_missing(line: usize, target: &str) -> Self {
        Self::new(
            RuntimeErrorKind::ListRemoveMissing,
            line,
            format!("value not found in list '{target}'"),
        )
    }

    pub fn arity_mismatch(line: usize, message: impl Into<String>) -> Self {
        Self::new(RuntimeErrorKind::ArityMismatch, line, message)
    }

    pub fn return_outside_function(line: usize) -> Self {
        Self::new(
            RuntimeErrorKind::ReturnOutsideFunction,
            line,
            "'return' used outside a function",
        )
    }

    pub fn loop_ctrl_outside_loop(line: usize, word: &str) -> Self {
        Self::new(
            RuntimeErrorKind::LoopCtrlOutsideLoop,
            line,
            format!("'{word}' used outside a loop"),
        )
    }

    pub fn runaway_loop(line: usize, cap: u64) -> Self {
        Self::new(
            RuntimeErrorKind::RunawayLoop,
            line,
            format!("loop exceeded the maximum of {cap} iterations"),
        )
    }

    pub fn bad_index(line: usize, message: impl Into<String>) -> Self {
        Self::new(RuntimeErrorKind::BadIndex, line, message)
    }

    /// Lifts an expression-evaluation error into a runtime error at `line`,
    /// the line of the statement that asked for the expression's value.
    pub fn from_expr_error(line: usize, err: crate::expr::ExprError) -> Self {
        let kind = match err.kind {
            ExprErrorKind::UndefinedName => RuntimeErrorKind::UndefinedVariable,
            ExprErrorKind::TypeMismatch => RuntimeErrorKind::TypeMismatch,
            ExprErrorKind::DivisionByZero => RuntimeErrorKind::DivisionByZero,
            ExprErrorKind::BadIndex => RuntimeErrorKind::BadIndex,
            ExprErrorKind::ArityMismatch => RuntimeErrorKind::ArityMismatch,
            ExprErrorKind::Syntax => RuntimeErrorKind::TypeMismatch,
        };
        RuntimeError::new(kind, line, err.message)
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.line, self.message)
    }
}

impl std::error::Error for RuntimeError {}
