//! The fixed table of built-in callables pre-populated into the global
//! frame. Invoked through the same call path as user-defined functions.
//!
//! `open_window`, `draw_pixel`, and `http_get` stand in for the host-provided
//! GUI and network primitives described in the design: the real backends are
//! out of scope, so these log what they were asked to do via `tracing` and
//! return `nothing`.

use std::cmp::Ordering;
use std::time::Duration;

use rand::Rng;

use super::error::RuntimeError;
use super::value::Value;

/// Names recognized by [`call`]. Used by the REPL's `:vars` listing and by
/// the parser's call-arity checks do not apply here (built-ins take variable
/// arity by design, each enforcing its own).
pub const NAMES: &[&str] = &[
    "len", "str", "int", "float", "bool", "range", "list", "abs", "min", "max", "sum", "round",
    "sorted", "random", "random_int", "random_float", "choice", "sleep", "open_window",
    "draw_pixel", "http_get",
];

pub fn is_builtin(name: &str) -> bool {
    NAMES.contains(&name)
}

pub fn call(name: &str, args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    match name {
        "len" => len(args, line),
        "str" => Ok(Value::Str(expect_one(args, line, "str")?.display())),
        "int" => to_int(args, line),
        "float" => to_float(args, line),
        "bool" => Ok(Value::Bool(expect_one(args, line, "bool")?.is_truthy())),
        "range" => range(args, line),
        "list" => list(args),
        "abs" => abs(args, line),
        "min" => extremum(args, line, Ordering::Less),
        "max" => extremum(args, line, Ordering::Greater),
        "sum" => sum(args, line),
        "round" => round(args, line),
        "sorted" => sorted(args, line),
        "random" => {
            arity(&args, line, "random", 0)?;
            Ok(Value::Float(rand::thread_rng().gen_range(0.0..1.0)))
        }
        "random_int" => random_int(args, line),
        "random_float" => random_float(args, line),
        "choice" => choice(args, line),
        "sleep" => sleep(args, line),
        "open_window" => {
            tracing::debug!(?args, "open_window stand-in invoked");
            Ok(Value::Nothing)
        }
        "draw_pixel" => {
            tracing::debug!(?args, "draw_pixel stand-in invoked");
            Ok(Value::Nothing)
        }
        "http_get" => {
            tracing::debug!(?args, "http_get stand-in invoked");
            Ok(Value::Nothing)
        }
        other => Err(RuntimeError::undefined_variable(line, other)),
    }
}

fn arity(args: &[Value], line: usize, name: &str, expected: usize) -> Result<(), RuntimeError> {
    if args.len() != expected {
        return Err(RuntimeError::arity_mismatch(
            line,
            format!(
                "'{name}' expects {expected} argument(s), got {}",
                args.len()
            ),
        ));
    }
    Ok(())
}

fn expect_one(mut args: Vec<Value>, line: usize, name: &str) -> Result<Value, RuntimeError> {
    arity(&args, line, name, 1)?;
    Ok(args.remove(0))
}

fn as_number(v: &Value, line: usize) -> Result<f64, RuntimeError> {
    v.as_f64()
        .ok_or_else(|| RuntimeError::type_mismatch(line, format!("expected a number, got {}", v.type_name())))
}

fn len(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    let v = expect_one(args, line, "len")?;
    match v {
        Value::Str(s) => Ok(Value::Int(s.chars().count() as i64)),
        Value::List(items) => Ok(Value::Int(items.borrow().len() as i64)),
        other => Err(RuntimeError::type_mismatch(
            line,
            format!("'len' does not accept {}", other.type_name()),
        )),
    }
}

fn to_int(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    let v = expect_one(args, line, "int")?;
    match v {
        Value::Int(n) => Ok(Value::Int(n)),
        Value::Float(n) => Ok(Value::Int(n as i64)),
        Value::Bool(b) => Ok(Value::Int(b as i64)),
        Value::Str(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| RuntimeError::type_mismatch(line, format!("cannot convert '{s}' to a number"))),
        other => Err(RuntimeError::type_mismatch(
            line,
            format!("'int' does not accept {}", other.type_name()),
        )),
    }
}

fn to_float(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    let v = expect_one(args, line, "float")?;
    match v {
        Value::Int(n) => Ok(Value::Float(n as f64)),
        Value::Float(n) => Ok(Value::Float(n)),
        Value::Bool(b) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),
        Value::Str(s) => s
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| RuntimeError::type_mismatch(line, format!("cannot convert '{s}' to a number"))),
        other => Err(RuntimeError::type_mismatch(
            line,
            format!("'float' does not accept {}", other.type_name()),
        )),
    }
}

fn range(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    let (start, end) = match args.len() {
        1 => (0, as_number(&args[0], line)? as i64),
        2 => (
            as_number(&args[0], line)? as i64,
            as_number(&args[1], line)? as i64,
        ),
        n => {
            return Err(RuntimeError::arity_mismatch(
                line,
                format!("'range' expects 1 or 2 arguments, got {n}"),
            ))
        }
    };
    Ok(Value::new_list((start..end).map(Value::Int).collect()))
}

fn list(args: Vec<Value>) -> Result<Value, RuntimeError> {
    if args.len() == 1 {
        match &args[0] {
            Value::List(items) => return Ok(Value::new_list(items.borrow().clone())),
            Value::Str(s) => {
                return Ok(Value::new_list(
                    s.chars().map(|c| Value::Str(c.to_string())).collect(),
                ))
            }
            _ => {}
        }
    }
    Ok(Value::new_list(args))
}

fn abs(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    match expect_one(args, line, "abs")? {
        Value::Int(n) => Ok(Value::Int(n.abs())),
        Value::Float(n) => Ok(Value::Float(n.abs())),
        other => Err(RuntimeError::type_mismatch(
            line,
            format!("'abs' does not accept {}", other.type_name()),
        )),
    }
}

fn operand_list(args: Vec<Value>, line: usize, name: &str) -> Result<Vec<Value>, RuntimeError> {
    if args.len() == 1 {
        if let Value::List(items) = &args[0] {
            return Ok(items.borrow().clone());
        }
    }
    if args.is_empty() {
        return Err(RuntimeError::arity_mismatch(
            line,
            format!("'{name}' expects at least one argument"),
        ));
    }
    Ok(args)
}

fn compare_values(a: &Value, b: &Value, line: usize) -> Result<Ordering, RuntimeError> {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        _ => {
            let x = as_number(a, line)?;
            let y = as_number(b, line)?;
            x.partial_cmp(&y)
                .ok_or_else(|| RuntimeError::type_mismatch(line, "cannot compare values"))
        }
    }
}

fn extremum(args: Vec<Value>, line: usize, want: Ordering) -> Result<Value, RuntimeError> {
    let name = if want == Ordering::Less { "min" } else { "max" };
    let items = operand_list(args, line, name)?;
    if items.is_empty() {
        return Err(RuntimeError::type_mismatch(line, format!("'{name}' of an empty list")));
    }
    let mut best = items[0].clone();
    for item in &items[1..] {
        if compare_values(item, &best, line)? == want {
            best = item.clone();
        }
    }
    Ok(best)
}

fn sum(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    let items = operand_list(args, line, "sum")?;
    let mut int_total: i64 = 0;
    let mut float_total: f64 = 0.0;
    let mut is_float = false;
    for item in &items {
        match item {
            Value::Int(n) => {
                int_total += n;
                float_total += *n as f64;
            }
            Value::Float(n) => {
                is_float = true;
                float_total += n;
            }
            other => {
                return Err(RuntimeError::type_mismatch(
                    line,
                    format!("'sum' does not accept {}", other.type_name()),
                ))
            }
        }
    }
    Ok(if is_float {
        Value::Float(float_total)
    } else {
        Value::Int(int_total)
    })
}

fn round(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    match args.len() {
        1 => {
            let n = as_number(&args[0], line)?;
            Ok(Value::Int(n.round() as i64))
        }
        2 => {
            let n = as_number(&args[0], line)?;
            let digits = as_number(&args[1], line)? as i32;
            let factor = 10f64.powi(digits);
            Ok(Value::Float((n * factor).round() / factor))
        }
        n => Err(RuntimeError::arity_mismatch(
            line,
            format!("'round' expects 1 or 2 arguments, got {n}"),
        )),
    }
}

fn sorted(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    let mut items = operand_list(args, line, "sorted")?;
    let mut err = None;
    items.sort_by(|a, b| match compare_values(a, b, line) {
        Ok(ord) => ord,
        Err(e) => {
            err = Some(e);
            Ordering::Equal
        }
    });
    if let Some(e) = err {
        return Err(e);
    }
    Ok(Value::new_list(items))
}

fn random_int(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    arity(&args, line, "random_int", 2)?;
    let low = as_number(&args[0], line)? as i64;
    let high = as_number(&args[1], line)? as i64;
    if low > high {
        return Err(RuntimeError::type_mismatch(
            line,
            "'random_int' lower bound exceeds upper bound",
        ));
    }
    Ok(Value::Int(rand::thread_rng().gen_range(low..=high)))
}

fn random_float(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    arity(&args, line, "random_float", 2)?;
    let low = as_number(&args[0], line)?;
    let high = as_number(&args[1], line)?;
    if low > high {
        return Err(RuntimeError::type_mismatch(
            line,
            "'random_float' lower bound exceeds upper bound",
        ));
    }
    Ok(Value::Float(rand::thread_rng().gen_range(low..=high)))
}

fn choice(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    let v = expect_one(args, line, "choice")?;
    match v {
        Value::List(items) => {
            let items = items.borrow();
            if items.is_empty() {
                return Err(RuntimeError::type_mismatch(line, "'choice' on an empty list"));
            }
            let idx = rand::thread_rng().gen_range(0..items.len());
            Ok(items[idx].clone())
        }
        other => Err(RuntimeError::type_mismatch(
            line,
            format!("'choice' does not accept {}", other.type_name()),
        )),
    }
}

fn sleep(args: Vec<Value>, line: usize) -> Result<Value, RuntimeError> {
    let seconds = as_number(&expect_one(args, line, "sleep")?, line)?;
    if seconds > 0.0 {
        std::thread::sleep(Duration::from_secs_f64(seconds));
    }
    Ok(Value::Nothing)
}
