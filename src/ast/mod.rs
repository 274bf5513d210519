//! Abstract Syntax Tree definitions for the plain-English source language.
//!
//! The AST is produced by [`crate::parser`] and consumed by [`crate::interpreter`].
//! Unlike a conventional expression-tree AST, expression and condition text
//! is stored as raw [`ExprSrc`] (text + line) rather than as a pre-built tree:
//! the parser validates brackets and quotes for early diagnostics but leaves
//! tree-building to [`crate::expr`], which the interpreter invokes each time
//! a value is needed.
//!
//! # Module Structure
//!
//! - [`stmt`] - Statement nodes, [`ExprSrc`], and [`Program`]
//!
//! # See Also
//!
//! * [`crate::parser`] - Produces the AST from tokens
//! * [`crate::interpreter`] - Walks the AST

mod stmt;

pub use stmt::{ExprSrc, IfBranch, LoopCtrlKind, MathOp, Program, Stmt, StmtKind};
