//! Tree-walking interpreter.
//!
//! Walks the AST produced by [`crate::parser`] against a scope stack,
//! evaluating expressions through [`crate::expr`]. Control flow
//! (`return`/`stop`/`skip`) is modeled as an explicit [`control::Flow`]
//! result rather than Rust panics, since nothing here should ever abort the
//! process on ordinary user-program behavior.
//!
//! # Module Structure
//!
//! - [`value`] - Runtime value representation
//! - [`env`] - Scope stack
//! - [`control`] - `Flow` signal type for return/break/continue
//! - [`error`] - `RuntimeError` taxonomy
//! - [`builtins`] - Fixed table of built-in callables
//! - `eval` - Expression evaluation (adds `impl Interpreter` methods)
//!
//! # See Also
//!
//! * [`crate::ast`] - AST walked by this module
//! * [`crate::expr`] - Embedded expression language evaluated here

pub mod builtins;
pub mod control;
pub mod env;
pub mod error;
pub mod value;

mod eval;

pub use control::Flow;
pub use error::{RuntimeError, RuntimeErrorKind};
pub use value::Value;

use std::rc::Rc;

use crate::ast::{IfBranch, LoopCtrlKind, MathOp, Program, Stmt, StmtKind};
use crate::config::Config;

use env::Env;
use value::{Callable, UserFn};

/// Executes a parsed program to completion against a fresh environment.
pub fn run_program(program: &Program, config: Config) -> Result<(), RuntimeError> {
    let mut interp = Interpreter::new(config);
    match interp.exec_block(program)? {
        Flow::Return(_) => Err(RuntimeError::return_outside_function(
            program.last().map(|s| s.line).unwrap_or(1),
        )),
        Flow::Break => Err(RuntimeError::loop_ctrl_outside_loop(
            program.last().map(|s| s.line).unwrap_or(1),
            "stop",
        )),
        Flow::Continue => Err(RuntimeError::loop_ctrl_outside_loop(
            program.last().map(|s| s.line).unwrap_or(1),
            "skip",
        )),
        Flow::Normal => Ok(()),
    }
}

pub struct Interpreter {
    env: Env,
    config: Config,
}

impl Interpreter {
    pub fn new(config: Config) -> Self {
        let mut env = Env::new();
        for name in builtins::NAMES {
            env.define_local(name, Value::Callable(Callable::Builtin(name.to_string())));
        }
        Interpreter { env, config }
    }

    /// Gives a REPL session direct access to the persistent global
    /// environment between submissions.
    pub fn env_mut(&mut self) -> &mut Env {
        &mut self.env
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Flow, RuntimeError> {
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Normal => {}
                other => return Ok(other),
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        tracing::trace!(line = stmt.line, "executing statement");
        match &stmt.kind {
            StmtKind::Assign { target, expr } => {
                let value = self.eval_src(expr)?;
                self.env.set(target, value);
                Ok(Flow::Normal)
            }
            StmtKind::Say { expr } => {
                let value = self.eval_src(expr)?;
                println!("{}", value.display());
                Ok(Flow::Normal)
            }
            StmtKind::Ask { prompt, target } => {
                use std::io::Write;
                let prompt_value = self.eval_src(prompt)?;
                print!("{}", prompt_value.display());
                std::io::stdout().flush().ok();
                let mut line = String::new();
                std::io::stdin()
                    .read_line(&mut line)
                    .map_err(|e| RuntimeError::type_mismatch(stmt.line, format!("failed to read input: {e}")))?;
                let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
                self.env.set(target, Value::Str(trimmed));
                Ok(Flow::Normal)
            }
            StmtKind::MathMut { op, target, operand } => self.exec_math_mut(*op, target, operand, stmt.line),
            StmtKind::ListCreate { target } => {
                self.env.set(target, Value::new_list(Vec::new()));
                Ok(Flow::Normal)
            }
            StmtKind::ListRemove { target, value } => self.exec_list_remove(target, value, stmt.line),
            StmtKind::If { branches, else_body } => self.exec_if(branches, else_body),
            StmtKind::RepeatCount { count, body } => self.exec_repeat_count(count, body, stmt.line),
            StmtKind::RepeatWhile { condition, body } => self.exec_repeat_while(condition, body),
            StmtKind::ForEach { var, iterable, body } => self.exec_for_each(var, iterable, body, stmt.line),
            StmtKind::DefineFn { name, params, body } => {
                let user_fn = UserFn {
                    name: name.clone(),
                    params: params.clone(),
                    body: body.clone(),
                };
                self.env.set(name, Value::Callable(Callable::User(Rc::new(user_fn))));
                Ok(Flow::Normal)
            }
            StmtKind::CallStmt { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_src(arg)?);
                }
                self.call_named(name, values, stmt.line)?;
                Ok(Flow::Normal)
            }
            StmtKind::Return { expr } => {
                let value = match expr {
                    Some(e) => self.eval_src(e)?,
                    None => Value::Nothing,
                };
                Ok(Flow::Return(value))
            }
            StmtKind::LoopCtrl { kind } => Ok(match kind {
                LoopCtrlKind::Break => Flow::Break,
                LoopCtrlKind::Continue => Flow::Continue,
            }),
            StmtKind::ExprStmt { expr } => {
                self.eval_src(expr)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn exec_math_mut(
        &mut self,
        op: MathOp,
        target: &str,
        operand: &crate::ast::ExprSrc,
        line: usize,
    ) -> Result<Flow, RuntimeError> {
        let current = self
            .env
            .get(target)
            .ok_or_else(|| RuntimeError::undefined_variable(line, target))?;
        let operand_value = self.eval_src(operand)?;

        if op == MathOp::Add {
            if let Value::List(items) = &current {
                items.borrow_mut().push(operand_value);
                return Ok(Flow::Normal);
            }
        }

        let a = current
            .as_f64()
            .ok_or_else(|| RuntimeError::type_mismatch(line, format!("'{target}' is not a number")))?;
        let b = operand_value
            .as_f64()
            .ok_or_else(|| RuntimeError::type_mismatch(line, "operand is not a number"))?;

        let result = match op {
            MathOp::Add => a + b,
            MathOp::Sub => a - b,
            MathOp::Mul => a * b,
            MathOp::Div => {
                if b == 0.0 {
                    return Err(RuntimeError::division_by_zero(line));
                }
                a / b
            }
        };

        let value = if matches!(current, Value::Int(_)) && matches!(operand_value, Value::Int(_)) && result.fract() == 0.0
        {
            Value::Int(result as i64)
        } else {
            Value::Float(result)
        };
        self.env.set(target, value);
        Ok(Flow::Normal)
    }

    fn exec_list_remove(&mut self, target: &str, value: &crate::ast::ExprSrc, line: usize) -> Result<Flow, RuntimeError> {
        let list = self
            .env
            .get(target)
            .ok_or_else(|| RuntimeError::undefined_variable(line, target))?;
        let Value::List(items) = list else {
            return Err(RuntimeError::type_mismatch(line, format!("'{target}' is not a list")));
        };
        let needle = self.eval_src(value)?;
        let mut items = items.borrow_mut();
        let pos = items.iter().position(|v| v.equals(&needle));
        match pos {
            Some(idx) => {
                items.remove(idx);
                Ok(Flow::Normal)
            }
            None => Err(RuntimeError::list_remove_missing(line, target)),
        }
    }

    fn exec_if(&mut self, branches: &[IfBranch], else_body: &Option<Vec<Stmt>>) -> Result<Flow, RuntimeError> {
        for branch in branches {
            let condition = self.eval_src(&branch.condition)?;
            if condition.is_truthy() {
                return self.exec_block(&branch.body);
            }
        }
        if let Some(body) = else_body {
            return self.exec_block(body);
        }
        Ok(Flow::Normal)
    }

    fn check_loop_cap(&self, counter: u64, line: usize) -> Result<(), RuntimeError> {
        if counter > self.config.max_loop_iterations {
            return Err(RuntimeError::runaway_loop(line, self.config.max_loop_iterations));
        }
        Ok(())
    }

    fn exec_repeat_count(&mut self, count: &crate::ast::ExprSrc, body: &[Stmt], line: usize) -> Result<Flow, RuntimeError> {
        let total = match self.eval_src(count)? {
            Value::Int(n) => n,
            other => {
                return Err(RuntimeError::type_mismatch(
                    line,
                    format!("repeat count must be an integer, got {}", other.type_name()),
                ))
            }
        };

        let mut counter: u64 = 0;
        for _ in 0..total {
            counter += 1;
            self.check_loop_cap(counter, line)?;
            match self.exec_block(body)? {
                Flow::Break => break,
                Flow::Continue => continue,
                Flow::Return(v) => return Ok(Flow::Return(v)),
                Flow::Normal => {}
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_repeat_while(&mut self, condition: &crate::ast::ExprSrc, body: &[Stmt]) -> Result<Flow, RuntimeError> {
        let mut counter: u64 = 0;
        loop {
            let cond_value = self.eval_src(condition)?;
            if !cond_value.is_truthy() {
                break;
            }
            counter += 1;
            self.check_loop_cap(counter, condition.line)?;
            match self.exec_block(body)? {
                Flow::Break => break,
                Flow::Continue => continue,
                Flow::Return(v) => return Ok(Flow::Return(v)),
                Flow::Normal => {}
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_for_each(
        &mut self,
        var: &str,
        iterable: &crate::ast::ExprSrc,
        body: &[Stmt],
        line: usize,
    ) -> Result<Flow, RuntimeError> {
        let elements: Vec<Value> = match self.eval_src(iterable)? {
            Value::List(items) => items.borrow().clone(),
            Value::Str(s) => s.chars().map(|c| Value::Str(c.to_string())).collect(),
            other => {
                return Err(RuntimeError::type_mismatch(
                    line,
                    format!("cannot iterate over {}", other.type_name()),
                ))
            }
        };

        let mut counter: u64 = 0;
        for element in elements {
            counter += 1;
            self.check_loop_cap(counter, line)?;
            self.env.define_local(var, element);
            match self.exec_block(body)? {
                Flow::Break => break,
                Flow::Continue => continue,
                Flow::Return(v) => return Ok(Flow::Return(v)),
                Flow::Normal => {}
            }
        }
        Ok(Flow::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_source;

    fn run(src: &str) -> Result<(), RuntimeError> {
        let program = parse_source(src).expect("parse error in test fixture");
        run_program(&program, Config::default())
    }

    #[test]
    fn assign_and_math_mut() {
        let program = parse_source("set x to 1\nadd 2 to x\n").unwrap();
        let mut interp = Interpreter::new(Config::default());
        interp.exec_block(&program).unwrap();
        assert!(matches!(interp.env.get("x"), Some(Value::Int(3))));
    }

    #[test]
    fn list_create_add_remove() {
        let program = parse_source("create list nums\nadd 5 to nums\nadd 8 to nums\nremove 5 from nums\n").unwrap();
        let mut interp = Interpreter::new(Config::default());
        interp.exec_block(&program).unwrap();
        match interp.env.get("nums") {
            Some(Value::List(items)) => {
                let items = items.borrow();
                assert_eq!(items.len(), 1);
                assert!(matches!(items[0], Value::Int(8)));
            }
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn function_locals_do_not_leak_to_globals() {
        let program = parse_source(
            "define f with n\nset local_var to n\nreturn local_var\nend define\nset result to call f with 5\n",
        )
        .unwrap();
        let mut interp = Interpreter::new(Config::default());
        interp.exec_block(&program).unwrap();
        assert!(interp.env.get("local_var").is_none());
        assert!(matches!(interp.env.get("result"), Some(Value::Int(5))));
    }

    #[test]
    fn arity_mismatch_is_a_runtime_error() {
        let program = parse_source("define f with n\nreturn n\nend define\nsay call f with 1 and 2\n").unwrap();
        let err = run_program(&program, Config::default()).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::ArityMismatch);
    }

    #[test]
    fn runaway_loop_is_detected() {
        let program = parse_source("set x to 0\nrepeat while 1 is at least 0\nadd 1 to x\nend repeat\n").unwrap();
        let config = Config { max_loop_iterations: 10 };
        let err = run_program(&program, config).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::RunawayLoop);
    }

    #[test]
    fn stop_outside_loop_is_a_runtime_error() {
        let err = run("stop\n").unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::LoopCtrlOutsideLoop);
    }
}
