//! Statement dispatch and per-form builders.
//!
//! Every accepted phrasing of a statement is recognized here by its own
//! leading-word pattern and built directly into the canonical AST node for
//! that statement kind — alias folding is this convergence, not a separate
//! text-rewriting pass.

use super::error::{ParseError, ParseErrorKind};
use super::helpers::{
    first_word, is_identifier, rsplit_once_word, split_list, split_once_word, strip_prefix_words,
    strip_suffix_word, validate_balanced, Parser,
};
use crate::aliases;
use crate::ast::{ExprSrc, IfBranch, LoopCtrlKind, MathOp, Stmt, StmtKind};
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloserTag {
    EndIf,
    OtherwiseIf,
    Otherwise,
    EndRepeat,
    EndFor,
    EndDefine,
}

fn closer_tag(text: &str) -> Option<CloserTag> {
    if strip_prefix_words(text, &["end", "if"]).is_some() || strip_prefix_words(text, &["finish", "if"]).is_some() {
        return Some(CloserTag::EndIf);
    }
    if strip_prefix_words(text, &["otherwise", "if"]).is_some() || strip_prefix_words(text, &["or", "if"]).is_some() {
        return Some(CloserTag::OtherwiseIf);
    }
    if text.eq_ignore_ascii_case("otherwise") || text.eq_ignore_ascii_case("else") {
        return Some(CloserTag::Otherwise);
    }
    if strip_prefix_words(text, &["end", "repeat"]).is_some() || strip_prefix_words(text, &["finish", "repeat"]).is_some() {
        return Some(CloserTag::EndRepeat);
    }
    if strip_prefix_words(text, &["end", "for"]).is_some() || strip_prefix_words(text, &["finish", "for"]).is_some() {
        return Some(CloserTag::EndFor);
    }
    if strip_prefix_words(text, &["end", "define"]).is_some()
        || strip_prefix_words(text, &["end", "function"]).is_some()
        || strip_prefix_words(text, &["finish", "function"]).is_some()
    {
        return Some(CloserTag::EndDefine);
    }
    None
}

impl Parser {
    pub(super) fn parse_program(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let stmts = self.parse_block_until(&[])?;
        if !self.at_end() {
            let tok = self.peek().expect("not at end");
            return Err(ParseError::unexpected_closer(tok.line, &tok.text));
        }
        Ok(stmts)
    }

    /// Parses statements until a token matching one of `terminators` is seen
    /// (not consumed) or input ends. An empty `terminators` means "consume
    /// to end of input"; an unexpected closer at that level is an error.
    fn parse_block_until(&mut self, terminators: &[CloserTag]) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        loop {
            match self.peek() {
                None => {
                    if terminators.is_empty() {
                        break;
                    }
                    return Err(ParseError::missing_closer(self.last_line(), describe_terminators(terminators)));
                }
                Some(tok) => {
                    if let Some(tag) = closer_tag(&tok.text) {
                        if terminators.contains(&tag) {
                            break;
                        }
                        if terminators.is_empty() {
                            return Err(ParseError::unexpected_closer(tok.line, &tok.text));
                        }
                        break;
                    }
                    stmts.push(self.parse_statement()?);
                }
            }
        }
        Ok(stmts)
    }

    fn expect_closer(&mut self, tag: CloserTag) -> Result<Token, ParseError> {
        match self.peek() {
            Some(tok) if closer_tag(&tok.text) == Some(tag) => Ok(self.advance().unwrap()),
            Some(tok) => Err(ParseError::unexpected_closer(tok.line, &tok.text)),
            None => Err(ParseError::missing_closer(self.last_line(), describe_terminators(&[tag]))),
        }
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let tok = self.advance().expect("parse_statement called at end of input");
        let line = tok.line;
        let text = tok.text.as_str();
        let word = first_word(text).to_lowercase();

        let result = match word.as_str() {
            "set" => parse_assign_set(text, line),
            "let" => parse_assign_let(text, line),
            "put" => parse_assign_put(text, line),
            "say" | "print" | "show" => parse_say(&word, text, line),
            "ask" => parse_ask(text, line),
            "add" => parse_math_prefix(MathOp::Add, "add", "to", text, line),
            "subtract" => parse_math_prefix(MathOp::Sub, "subtract", "from", text, line),
            "increase" => parse_math_suffix(MathOp::Add, "increase", text, line),
            "decrease" => parse_math_suffix(MathOp::Sub, "decrease", text, line),
            "multiply" => parse_math_suffix(MathOp::Mul, "multiply", text, line),
            "divide" => parse_math_suffix(MathOp::Div, "divide", text, line),
            "create" | "make" => parse_list_create(&word, text, line),
            "remove" => parse_list_remove("remove", "from", text, line),
            "take" => parse_list_remove("take", "from", text, line),
            "if" => self.parse_if("if", text, line),
            "when" => self.parse_if("when", text, line),
            "repeat" => self.parse_repeat(text, line),
            "do" => self.parse_do_times(text, line),
            "while" => self.parse_while_do(text, line),
            "for" => self.parse_for_each(text, line),
            "define" | "function" => self.parse_define(&word, text, line),
            "call" | "run" => parse_call_stmt(&word, text, line),
            "return" => parse_return("return", text, line),
            "give" => parse_return_give(text, line),
            "stop" | "break" => Ok(Stmt::new(StmtKind::LoopCtrl { kind: LoopCtrlKind::Break }, line)),
            "skip" | "next" => Ok(Stmt::new(StmtKind::LoopCtrl { kind: LoopCtrlKind::Continue }, line)),
            _ => match crate::expr::parse_expr(text) {
                Ok(_) => Ok(Stmt::new(StmtKind::ExprStmt { expr: ExprSrc::new(text, line) }, line)),
                Err(_) => Err(ParseError::unknown_statement(line, text)),
            },
        };

        result.map_err(|err: ParseError| {
            if err.kind == ParseErrorKind::UnknownStatement {
                match aliases::suggest(&word) {
                    Some(s) => err.with_suggestion(s),
                    None => err,
                }
            } else {
                err
            }
        })
    }

    fn parse_if(&mut self, opener: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
        let mut branches = vec![self.parse_if_branch(opener, text, line)?];
        let mut else_body = None;

        loop {
            let tok = self.peek().ok_or_else(|| ParseError::missing_closer(line, "end if"))?;
            match closer_tag(&tok.text) {
                Some(CloserTag::OtherwiseIf) => {
                    let tok = self.advance().unwrap();
                    branches.push(self.parse_elif_branch(&tok.text, tok.line)?);
                }
                Some(CloserTag::Otherwise) => {
                    self.advance();
                    let body = self.parse_block_until(&[CloserTag::EndIf])?;
                    else_body = Some(body);
                    self.expect_closer(CloserTag::EndIf)?;
                    break;
                }
                Some(CloserTag::EndIf) => {
                    self.expect_closer(CloserTag::EndIf)?;
                    break;
                }
                Some(_) => return Err(ParseError::unexpected_closer(tok.line, &tok.text)),
                None => unreachable!("parse_block_until only stops at a closer or end of input"),
            }
        }

        Ok(Stmt::new(StmtKind::If { branches, else_body }, line))
    }

    fn parse_if_branch(&mut self, opener: &str, text: &str, line: usize) -> Result<IfBranch, ParseError> {
        let rest = strip_prefix_words(text, &[opener])
            .ok_or_else(|| ParseError::malformed_condition(line, format!("malformed '{opener}' statement")))?;
        let condition_text = strip_suffix_word(rest, "then")
            .ok_or_else(|| ParseError::malformed_condition(line, "'if' condition must end with 'then'"))?;
        validate_balanced(condition_text, line)?;
        let body = self.parse_block_until(&[CloserTag::OtherwiseIf, CloserTag::Otherwise, CloserTag::EndIf])?;
        Ok(IfBranch { condition: ExprSrc::new(condition_text, line), body })
    }

    fn parse_elif_branch(&mut self, text: &str, line: usize) -> Result<IfBranch, ParseError> {
        let rest = strip_prefix_words(text, &["otherwise", "if"])
            .or_else(|| strip_prefix_words(text, &["or", "if"]))
            .ok_or_else(|| ParseError::malformed_condition(line, "malformed 'otherwise if' statement"))?;
        let condition_text = strip_suffix_word(rest, "then")
            .ok_or_else(|| ParseError::malformed_condition(line, "'otherwise if' condition must end with 'then'"))?;
        validate_balanced(condition_text, line)?;
        let body = self.parse_block_until(&[CloserTag::OtherwiseIf, CloserTag::Otherwise, CloserTag::EndIf])?;
        Ok(IfBranch { condition: ExprSrc::new(condition_text, line), body })
    }

    fn parse_repeat(&mut self, text: &str, line: usize) -> Result<Stmt, ParseError> {
        if let Some(rest) = strip_prefix_words(text, &["repeat", "while"]) {
            validate_balanced(rest, line)?;
            let body = self.parse_block_until(&[CloserTag::EndRepeat])?;
            self.expect_closer(CloserTag::EndRepeat)?;
            return Ok(Stmt::new(StmtKind::RepeatWhile { condition: ExprSrc::new(rest, line), body }, line));
        }
        if let Some(rest) = strip_prefix_words(text, &["repeat"]) {
            let count_text = strip_suffix_word(rest, "times")
                .ok_or_else(|| ParseError::malformed_condition(line, "'repeat' must end with 'times', or use 'repeat while'"))?;
            validate_balanced(count_text, line)?;
            let body = self.parse_block_until(&[CloserTag::EndRepeat])?;
            self.expect_closer(CloserTag::EndRepeat)?;
            return Ok(Stmt::new(StmtKind::RepeatCount { count: ExprSrc::new(count_text, line), body }, line));
        }
        Err(ParseError::unknown_statement(line, text))
    }

    fn parse_do_times(&mut self, text: &str, line: usize) -> Result<Stmt, ParseError> {
        let rest = strip_prefix_words(text, &["do"]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
        let count_text =
            strip_suffix_word(rest, "times").ok_or_else(|| ParseError::malformed_condition(line, "'do' must end with 'times'"))?;
        validate_balanced(count_text, line)?;
        let body = self.parse_block_until(&[CloserTag::EndRepeat])?;
        self.expect_closer(CloserTag::EndRepeat)?;
        Ok(Stmt::new(StmtKind::RepeatCount { count: ExprSrc::new(count_text, line), body }, line))
    }

    fn parse_while_do(&mut self, text: &str, line: usize) -> Result<Stmt, ParseError> {
        let rest = strip_prefix_words(text, &["while"]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
        let condition_text =
            strip_suffix_word(rest, "do").ok_or_else(|| ParseError::malformed_condition(line, "'while' must end with 'do'"))?;
        validate_balanced(condition_text, line)?;
        let body = self.parse_block_until(&[CloserTag::EndRepeat])?;
        self.expect_closer(CloserTag::EndRepeat)?;
        Ok(Stmt::new(StmtKind::RepeatWhile { condition: ExprSrc::new(condition_text, line), body }, line))
    }

    fn parse_for_each(&mut self, text: &str, line: usize) -> Result<Stmt, ParseError> {
        let rest = strip_prefix_words(text, &["for", "each"])
            .or_else(|| strip_prefix_words(text, &["for", "every"]))
            .ok_or_else(|| ParseError::malformed_condition(line, "'for' must be followed by 'each'/'every'"))?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let var = parts.next().unwrap_or("").to_string();
        if !is_identifier(&var) {
            return Err(ParseError::malformed_condition(line, format!("'{var}' is not a valid variable name")));
        }
        let remainder = parts.next().unwrap_or("").trim();
        let iterable_text = strip_prefix_words(remainder, &["in"])
            .ok_or_else(|| ParseError::malformed_condition(line, "'for each' must include 'in <expression>'"))?;
        validate_balanced(iterable_text, line)?;

        let body = self.parse_block_until(&[CloserTag::EndFor])?;
        self.expect_closer(CloserTag::EndFor)?;
        Ok(Stmt::new(StmtKind::ForEach { var, iterable: ExprSrc::new(iterable_text, line), body }, line))
    }

    fn parse_define(&mut self, opener: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
        let rest = strip_prefix_words(text, &[opener]).ok_or_else(|| ParseError::unknown_statement(line, text))?;

        let mut parts = rest.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or("").to_string();
        let remainder = parts.next().unwrap_or("").trim();
        let params = if remainder.is_empty() {
            Vec::new()
        } else {
            let param_text = strip_prefix_words(remainder, &["with"])
                .ok_or_else(|| ParseError::bad_parameter_list(line, "expected 'with' before parameter list"))?;
            let names = split_list(param_text, line)?;
            for n in &names {
                if !is_identifier(n) {
                    return Err(ParseError::bad_parameter_list(line, format!("'{n}' is not a valid parameter name")));
                }
            }
            names
        };

        if !is_identifier(&name) {
            return Err(ParseError::malformed_condition(line, format!("'{name}' is not a valid function name")));
        }

        let body = self.parse_block_until(&[CloserTag::EndDefine])?;
        self.expect_closer(CloserTag::EndDefine)?;
        Ok(Stmt::new(StmtKind::DefineFn { name, params, body }, line))
    }
}

fn parse_assign_set(text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &["set"]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let mut parts = rest.splitn(2, char::is_whitespace);
    let target = parts.next().unwrap_or("").to_string();
    let remainder = parts.next().unwrap_or("").trim();
    let expr_text = strip_prefix_words(remainder, &["to"])
        .ok_or_else(|| ParseError::malformed_condition(line, "'set' must be followed by '<name> to <expression>'"))?;
    finish_assign(target, expr_text, line)
}

fn parse_assign_let(text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &["let"]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let mut parts = rest.splitn(2, char::is_whitespace);
    let target = parts.next().unwrap_or("").to_string();
    let remainder = parts.next().unwrap_or("").trim();
    let expr_text = strip_prefix_words(remainder, &["be"])
        .ok_or_else(|| ParseError::malformed_condition(line, "'let' must be followed by '<name> be <expression>'"))?;
    finish_assign(target, expr_text, line)
}

fn parse_assign_put(text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &["put"]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let (expr_text, target) = rsplit_once_word(rest, "into")
        .ok_or_else(|| ParseError::malformed_condition(line, "'put' must be followed by '<expression> into <name>'"))?;
    finish_assign(target, &expr_text, line)
}

fn finish_assign(target: String, expr_text: &str, line: usize) -> Result<Stmt, ParseError> {
    if !is_identifier(&target) {
        return Err(ParseError::malformed_condition(line, format!("'{target}' is not a valid variable name")));
    }
    if expr_text.is_empty() {
        return Err(ParseError::malformed_condition(line, "missing expression"));
    }
    validate_balanced(expr_text, line)?;
    Ok(Stmt::new(StmtKind::Assign { target, expr: ExprSrc::new(expr_text, line) }, line))
}

fn parse_say(opener: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &[opener]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    if rest.is_empty() {
        return Err(ParseError::malformed_condition(line, format!("'{opener}' needs an expression")));
    }
    validate_balanced(rest, line)?;
    Ok(Stmt::new(StmtKind::Say { expr: ExprSrc::new(rest, line) }, line))
}

fn parse_ask(text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &["ask"]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let (prompt_text, remainder) = split_once_word(rest, "and set")
        .ok_or_else(|| ParseError::malformed_condition(line, "'ask' must be followed by '<prompt> and set <name> to it'"))?;
    let target = strip_suffix_word(&remainder, "it")
        .and_then(|r| strip_suffix_word(r, "to"))
        .ok_or_else(|| ParseError::malformed_condition(line, "'ask ... and set' must end with '<name> to it'"))?
        .to_string();
    if !is_identifier(&target) {
        return Err(ParseError::malformed_condition(line, format!("'{target}' is not a valid variable name")));
    }
    validate_balanced(&prompt_text, line)?;
    Ok(Stmt::new(StmtKind::Ask { prompt: ExprSrc::new(prompt_text, line), target }, line))
}

fn parse_math_prefix(op: MathOp, opener: &str, joiner: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &[opener]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let (operand_text, target) = rsplit_once_word(rest, joiner)
        .ok_or_else(|| ParseError::malformed_condition(line, format!("'{opener}' must be followed by '<expression> {joiner} <name>'")))?;
    if !is_identifier(&target) {
        return Err(ParseError::malformed_condition(line, format!("'{target}' is not a valid variable name")));
    }
    validate_balanced(&operand_text, line)?;
    Ok(Stmt::new(StmtKind::MathMut { op, target, operand: ExprSrc::new(operand_text, line) }, line))
}

fn parse_math_suffix(op: MathOp, opener: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &[opener]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let mut parts = rest.splitn(2, char::is_whitespace);
    let target = parts.next().unwrap_or("").to_string();
    let remainder = parts.next().unwrap_or("").trim();
    let operand_text = strip_prefix_words(remainder, &["by"])
        .ok_or_else(|| ParseError::malformed_condition(line, format!("'{opener}' must be followed by '<name> by <expression>'")))?;
    if !is_identifier(&target) {
        return Err(ParseError::malformed_condition(line, format!("'{target}' is not a valid variable name")));
    }
    validate_balanced(operand_text, line)?;
    Ok(Stmt::new(StmtKind::MathMut { op, target, operand: ExprSrc::new(operand_text, line) }, line))
}

fn parse_list_create(opener: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &[opener]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let target = strip_prefix_words(rest, &["list"])
        .ok_or_else(|| ParseError::malformed_condition(line, format!("'{opener}' must be followed by 'list <name>'")))?
        .to_string();
    if !is_identifier(&target) {
        return Err(ParseError::malformed_condition(line, format!("'{target}' is not a valid variable name")));
    }
    Ok(Stmt::new(StmtKind::ListCreate { target }, line))
}

fn parse_list_remove(opener: &str, joiner: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &[opener]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let (value_text, target) = rsplit_once_word(rest, joiner)
        .ok_or_else(|| ParseError::malformed_condition(line, format!("'{opener}' must be followed by '<expression> {joiner} <name>'")))?;
    if !is_identifier(&target) {
        return Err(ParseError::malformed_condition(line, format!("'{target}' is not a valid variable name")));
    }
    validate_balanced(&value_text, line)?;
    Ok(Stmt::new(StmtKind::ListRemove { target, value: ExprSrc::new(value_text, line) }, line))
}

fn parse_call_stmt(opener: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &[opener]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let (name, args) = parse_call_head(rest, line)?;
    Ok(Stmt::new(StmtKind::CallStmt { name, args }, line))
}

fn parse_call_head(rest: &str, line: usize) -> Result<(String, Vec<ExprSrc>), ParseError> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("").to_string();
    if !is_identifier(&name) {
        return Err(ParseError::malformed_condition(line, format!("'{name}' is not a valid function name")));
    }
    let remainder = parts.next().unwrap_or("").trim();
    let args = if remainder.is_empty() {
        Vec::new()
    } else {
        let arg_text = strip_prefix_words(remainder, &["with"])
            .ok_or_else(|| ParseError::bad_parameter_list(line, "expected 'with' before argument list"))?;
        validate_balanced(arg_text, line)?;
        split_list(arg_text, line)?.into_iter().map(|s| ExprSrc::new(s, line)).collect()
    };
    Ok((name, args))
}

fn parse_return(opener: &str, text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &[opener]).ok_or_else(|| ParseError::unknown_statement(line, text))?;
    let expr = if rest.is_empty() {
        None
    } else {
        validate_balanced(rest, line)?;
        Some(ExprSrc::new(rest, line))
    };
    Ok(Stmt::new(StmtKind::Return { expr }, line))
}

fn parse_return_give(text: &str, line: usize) -> Result<Stmt, ParseError> {
    let rest = strip_prefix_words(text, &["give", "back"])
        .ok_or_else(|| ParseError::malformed_condition(line, "'give' must be followed by 'back [expression]'"))?;
    let expr = if rest.is_empty() {
        None
    } else {
        validate_balanced(rest, line)?;
        Some(ExprSrc::new(rest, line))
    };
    Ok(Stmt::new(StmtKind::Return { expr }, line))
}

fn describe_terminators(tags: &[CloserTag]) -> &'static str {
    match tags.first() {
        Some(CloserTag::EndIf) => "end if",
        Some(CloserTag::EndRepeat) => "end repeat",
        Some(CloserTag::EndFor) => "end for",
        Some(CloserTag::EndDefine) => "end define",
        _ => "a block closer",
    }
}
