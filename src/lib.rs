//! Library crate for the plang interpreter: lexing, parsing, the embedded
//! expression language, and the tree-walking interpreter.
//!
//! The `driver`, `diagnostics`, and REPL live in the `plang` binary crate
//! (`src/main.rs` and friends) rather than here, the way a CLI-only concern
//! sits outside the reusable library.
//!
//! # Modules
//!
//! - [`token`] - Token types produced by the line lexer
//! - [`lexer`] - Splits source text into classified lines
//! - [`ast`] - Statement AST produced by the parser
//! - [`parser`] - Recursive descent statement parser
//! - [`expr`] - Embedded expression sub-language (tokenizer + parser)
//! - [`interpreter`] - Tree-walking evaluator over the AST
//! - [`aliases`] - Canonical statement phrases and typo suggestions
//! - [`config`] - Runtime configuration (loop-safety cap)
//!
//! # Example
//!
//! ```no_run
//! use plang::config::Config;
//! use plang::parser::parse_source;
//! use plang::interpreter::run_program;
//!
//! let source = "set x to 10\nsay x\n";
//! let program = parse_source(source).expect("parse error");
//! run_program(&program, Config::default()).expect("runtime error");
//! ```

pub mod aliases;
pub mod ast;
pub mod config;
pub mod expr;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;
