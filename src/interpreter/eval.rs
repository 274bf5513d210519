//! Expression evaluation: walks an [`Expr`] tree against the interpreter's
//! scope stack and built-in table.

use std::rc::Rc;

use crate::ast::ExprSrc;
use crate::expr::{self, BinOp, Expr, UnOp};

use super::builtins;
use super::error::RuntimeError;
use super::value::{Callable, Value};
use super::Interpreter;

impl Interpreter {
    /// Parses and evaluates an [`ExprSrc`], the entry point every statement
    /// handler uses. Nothing here is cached: a loop condition is re-parsed
    /// from its source text on every iteration.
    pub(super) fn eval_src(&mut self, src: &ExprSrc) -> Result<Value, RuntimeError> {
        let tree = expr::parse_expr(&src.text).map_err(|e| RuntimeError::from_expr_error(src.line, e))?;
        self.eval(&tree, src.line)
    }

    pub(super) fn eval(&mut self, expr: &Expr, line: usize) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Float(n) => Ok(Value::Float(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Nothing => Ok(Value::Nothing),
            Expr::Var(name) => self
                .env
                .get(name)
                .ok_or_else(|| RuntimeError::undefined_variable(line, name)),
            Expr::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval(item, line)?);
                }
                Ok(Value::new_list(values))
            }
            Expr::Index(base, index) => {
                let base = self.eval(base, line)?;
                let index = self.eval(index, line)?;
                self.eval_index(base, index, line)
            }
            Expr::Slice(base, start, end) => {
                let base = self.eval(base, line)?;
                let start = start.as_ref().map(|e| self.eval(e, line)).transpose()?;
                let end = end.as_ref().map(|e| self.eval(e, line)).transpose()?;
                self.eval_slice(base, start, end, line)
            }
            Expr::Unary(op, inner) => {
                let value = self.eval(inner, line)?;
                self.eval_unary(*op, value, line)
            }
            Expr::Binary(op, lhs, rhs) => self.eval_binary(*op, lhs, rhs, line),
            Expr::Call(name, args) => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg, line)?);
                }
                self.call_named(name, values, line)
            }
        }
    }

    /// Resolves `name` to a callable and invokes it. Built-ins live in the
    /// global frame as ordinary `Callable` values, so a user definition of
    /// the same name shadows them exactly like any other assignment would.
    pub(super) fn call_named(&mut self, name: &str, args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
        match self.env.get(name) {
            Some(Value::Callable(callable)) => self.call_callable(callable, args, line),
            Some(other) => Err(RuntimeError::type_mismatch(
                line,
                format!("'{name}' is a {}, not callable", other.type_name()),
            )),
            None => Err(RuntimeError::undefined_variable(line, name)),
        }
    }

    pub(super) fn call_callable(&mut self, callable: Callable, args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
        match callable {
            Callable::Builtin(name) => builtins::call(&name, args, line),
            Callable::User(user_fn) => self.call_user_fn(user_fn, args, line),
        }
    }

    fn call_user_fn(&mut self, user_fn: Rc<super::value::UserFn>, args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
        if args.len() != user_fn.params.len() {
            return Err(RuntimeError::arity_mismatch(
                line,
                format!(
                    "'{}' expects {} argument(s), got {}",
                    user_fn.name,
                    user_fn.params.len(),
                    args.len()
                ),
            ));
        }

        tracing::debug!(function = %user_fn.name, "entering call frame");
        let stashed = self.env.enter_call();
        for (param, value) in user_fn.params.iter().zip(args.into_iter()) {
            self.env.define_local(param, value);
        }

        let result = self.exec_block(&user_fn.body);

        self.env.restore(stashed);
        tracing::debug!(function = %user_fn.name, "exiting call frame");

        match result? {
            super::control::Flow::Return(value) => Ok(value),
            _ => Ok(Value::Nothing),
        }
    }

    fn eval_unary(&self, op: UnOp, value: Value, line: usize) -> Result<Value, RuntimeError> {
        match op {
            UnOp::Not => Ok(Value::Bool(!value.is_truthy())),
            UnOp::Neg => match value {
                Value::Int(n) => Ok(Value::Int(-n)),
                Value::Float(n) => Ok(Value::Float(-n)),
                other => Err(RuntimeError::type_mismatch(
                    line,
                    format!("cannot negate {}", other.type_name()),
                )),
            },
        }
    }

    fn eval_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr, line: usize) -> Result<Value, RuntimeError> {
        // `and`/`or` short-circuit, so the right operand is evaluated lazily.
        if matches!(op, BinOp::And) {
            let left = self.eval(lhs, line)?;
            if !left.is_truthy() {
                return Ok(Value::Bool(false));
            }
            let right = self.eval(rhs, line)?;
            return Ok(Value::Bool(right.is_truthy()));
        }
        if matches!(op, BinOp::Or) {
            let left = self.eval(lhs, line)?;
            if left.is_truthy() {
                return Ok(Value::Bool(true));
            }
            let right = self.eval(rhs, line)?;
            return Ok(Value::Bool(right.is_truthy()));
        }

        let left = self.eval(lhs, line)?;
        let right = self.eval(rhs, line)?;

        match op {
            BinOp::Add => self.eval_add(left, right, line),
            BinOp::Sub => numeric_op(left, right, line, "-", |a, b| a - b, |a, b| a - b),
            BinOp::Mul => numeric_op(left, right, line, "*", |a, b| a * b, |a, b| a * b),
            BinOp::Div => self.eval_div(left, right, line),
            BinOp::Mod => self.eval_mod(left, right, line),
            BinOp::Lt => Ok(Value::Bool(compare(left, right, line)?.is_lt())),
            BinOp::Le => Ok(Value::Bool(compare(left, right, line)?.is_le())),
            BinOp::Gt => Ok(Value::Bool(compare(left, right, line)?.is_gt())),
            BinOp::Ge => Ok(Value::Bool(compare(left, right, line)?.is_ge())),
            BinOp::Eq => Ok(Value::Bool(left.equals(&right))),
            BinOp::Ne => Ok(Value::Bool(!left.equals(&right))),
            BinOp::Contains => self.eval_contains(left, right, line),
            BinOp::NotContains => {
                let contains = self.eval_contains(left, right, line)?;
                Ok(Value::Bool(!contains.is_truthy()))
            }
            BinOp::And | BinOp::Or => unreachable!("handled above"),
        }
    }

    fn eval_add(&self, left: Value, right: Value, line: usize) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
            (Value::List(a), Value::List(b)) => {
                let mut items = a.borrow().clone();
                items.extend(b.borrow().iter().cloned());
                Ok(Value::new_list(items))
            }
            (a, b) => numeric_op(a, b, line, "+", |x, y| x + y, |x, y| x + y),
        }
    }

    fn eval_div(&self, left: Value, right: Value, line: usize) -> Result<Value, RuntimeError> {
        let a = left
            .as_f64()
            .ok_or_else(|| RuntimeError::type_mismatch(line, format!("'/' does not accept {}", left.type_name())))?;
        let b = right
            .as_f64()
            .ok_or_else(|| RuntimeError::type_mismatch(line, format!("'/' does not accept {}", right.type_name())))?;
        if b == 0.0 {
            return Err(RuntimeError::division_by_zero(line));
        }
        if let (Value::Int(x), Value::Int(y)) = (&left, &right) {
            if x % y == 0 {
                return Ok(Value::Int(x / y));
            }
        }
        Ok(Value::Float(a / b))
    }

    fn eval_mod(&self, left: Value, right: Value, line: usize) -> Result<Value, RuntimeError> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => {
                if b == 0 {
                    return Err(RuntimeError::division_by_zero(line));
                }
                Ok(Value::Int(a % b))
            }
            (a, b) => {
                let x = a
                    .as_f64()
                    .ok_or_else(|| RuntimeError::type_mismatch(line, format!("'%' does not accept {}", a.type_name())))?;
                let y = b
                    .as_f64()
                    .ok_or_else(|| RuntimeError::type_mismatch(line, format!("'%' does not accept {}", b.type_name())))?;
                if y == 0.0 {
                    return Err(RuntimeError::division_by_zero(line));
                }
                Ok(Value::Float(x % y))
            }
        }
    }

    fn eval_contains(&self, left: Value, right: Value, line: usize) -> Result<Value, RuntimeError> {
        match left {
            Value::List(items) => Ok(Value::Bool(items.borrow().iter().any(|v| v.equals(&right)))),
            Value::Str(s) => match right {
                Value::Str(needle) => Ok(Value::Bool(s.contains(&needle))),
                other => Err(RuntimeError::type_mismatch(
                    line,
                    format!("cannot check string contains {}", other.type_name()),
                )),
            },
            other => Err(RuntimeError::type_mismatch(
                line,
                format!("'contains' does not accept {}", other.type_name()),
            )),
        }
    }

    fn eval_index(&self, base: Value, index: Value, line: usize) -> Result<Value, RuntimeError> {
        let idx = match index {
            Value::Int(n) => n,
            other => {
                return Err(RuntimeError::bad_index(
                    line,
                    format!("index must be a number, got {}", other.type_name()),
                ))
            }
        };
        match base {
            Value::List(items) => {
                let items = items.borrow();
                let resolved = resolve_index(idx, items.len(), line)?;
                Ok(items[resolved].clone())
            }
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let resolved = resolve_index(idx, chars.len(), line)?;
                Ok(Value::Str(chars[resolved].to_string()))
            }
            other => Err(RuntimeError::bad_index(
                line,
                format!("cannot index into {}", other.type_name()),
            )),
        }
    }

    fn eval_slice(
        &self,
        base: Value,
        start: Option<Value>,
        end: Option<Value>,
        line: usize,
    ) -> Result<Value, RuntimeError> {
        let to_i64 = |v: Option<Value>, default: i64, line: usize| -> Result<i64, RuntimeError> {
            match v {
                None => Ok(default),
                Some(Value::Int(n)) => Ok(n),
                Some(other) => Err(RuntimeError::bad_index(
                    line,
                    format!("slice bound must be a number, got {}", other.type_name()),
                )),
            }
        };

        match base {
            Value::List(items) => {
                let items = items.borrow();
                let (start, end) = resolve_slice(start, end, items.len(), line, &to_i64)?;
                Ok(Value::new_list(items[start..end].to_vec()))
            }
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let (start, end) = resolve_slice(start, end, chars.len(), line, &to_i64)?;
                Ok(Value::Str(chars[start..end].iter().collect()))
            }
            other => Err(RuntimeError::bad_index(
                line,
                format!("cannot slice {}", other.type_name()),
            )),
        }
    }
}

#[allow(clippy::type_complexity)]
fn resolve_slice(
    start: Option<Value>,
    end: Option<Value>,
    len: usize,
    line: usize,
    to_i64: &dyn Fn(Option<Value>, i64, usize) -> Result<i64, RuntimeError>,
) -> Result<(usize, usize), RuntimeError> {
    let clamp = |n: i64| -> usize {
        let n = if n < 0 { (len as i64 + n).max(0) } else { n };
        (n as usize).min(len)
    };
    let start = clamp(to_i64(start, 0, line)?);
    let end = clamp(to_i64(end, len as i64, line)?);
    Ok((start, start.max(end).min(len).max(start.min(end))))
}

fn resolve_index(idx: i64, len: usize, line: usize) -> Result<usize, RuntimeError> {
    let resolved = if idx < 0 { len as i64 + idx } else { idx };
    if resolved < 0 || resolved as usize >= len {
        return Err(RuntimeError::bad_index(line, format!("index {idx} out of range")));
    }
    Ok(resolved as usize)
}

fn numeric_op(
    left: Value,
    right: Value,
    line: usize,
    symbol: &str,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(*a, *b))),
        _ => {
            let a = left
                .as_f64()
                .ok_or_else(|| RuntimeError::type_mismatch(line, format!("'{symbol}' does not accept {}", left.type_name())))?;
            let b = right
                .as_f64()
                .ok_or_else(|| RuntimeError::type_mismatch(line, format!("'{symbol}' does not accept {}", right.type_name())))?;
            Ok(Value::Float(float_op(a, b)))
        }
    }
}

fn compare(left: Value, right: Value, line: usize) -> Result<std::cmp::Ordering, RuntimeError> {
    match (&left, &right) {
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => {
            let a = left
                .as_f64()
                .ok_or_else(|| RuntimeError::type_mismatch(line, format!("cannot compare {}", left.type_name())))?;
            let b = right
                .as_f64()
                .ok_or_else(|| RuntimeError::type_mismatch(line, format!("cannot compare {}", right.type_name())))?;
            a.partial_cmp(&b)
                .ok_or_else(|| RuntimeError::type_mismatch(line, "cannot compare values"))
        }
    }
}
