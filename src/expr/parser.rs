//! Recursive-descent parser turning a folded [`Tok`] stream into an [`Expr`]
//! tree.
//!
//! Precedence, loosest to tightest: `or` → `and` → `not` → comparison →
//! additive → multiplicative → unary minus → postfix (index/slice/call) →
//! primary. Comparisons don't chain: `a is at least 1 is at most 9` is a
//! syntax error, not a chained comparison.
//!
//! Call argument lists and the operands of `random between A and B` are
//! parsed one precedence level below `and`/`or` so that a literal `and`
//! separating arguments isn't swallowed as the logical operator.

use super::ast::{BinOp, Expr, UnOp};
use super::error::ExprError;
use super::token::Tok;

struct Parser {
    toks: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Tok {
        &self.toks[self.pos]
    }

    fn advance(&mut self) -> Tok {
        let tok = self.toks[self.pos].clone();
        if self.pos + 1 < self.toks.len() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, tok: &Tok) -> Result<(), ExprError> {
        if self.peek() == tok {
            self.advance();
            Ok(())
        } else {
            Err(ExprError::syntax(format!(
                "expected {tok:?}, found {:?}",
                self.peek()
            )))
        }
    }

    fn ident_word(&self, word: &str) -> bool {
        matches!(self.peek(), Tok::Ident(w) if w.eq_ignore_ascii_case(word))
    }

    fn parse_expr(&mut self) -> Result<Expr, ExprError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Tok::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Binary(BinOp::Or, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_not()?;
        while matches!(self.peek(), Tok::And) {
            self.advance();
            let right = self.parse_not()?;
            left = Expr::Binary(BinOp::And, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ExprError> {
        if matches!(self.peek(), Tok::Not) {
            self.advance();
            let inner = self.parse_not()?;
            return Ok(Expr::Unary(UnOp::Not, Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExprError> {
        let left = self.parse_additive()?;
        let op = match self.peek() {
            Tok::Lt => BinOp::Lt,
            Tok::Le => BinOp::Le,
            Tok::Gt => BinOp::Gt,
            Tok::Ge => BinOp::Ge,
            Tok::EqEq => BinOp::Eq,
            Tok::Ne => BinOp::Ne,
            Tok::Contains => BinOp::Contains,
            Tok::NotContains => BinOp::NotContains,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_additive()?;
        if matches!(
            self.peek(),
            Tok::Lt | Tok::Le | Tok::Gt | Tok::Ge | Tok::EqEq | Tok::Ne | Tok::Contains | Tok::NotContains
        ) {
            return Err(ExprError::syntax("comparisons do not chain"));
        }
        Ok(Expr::Binary(op, Box::new(left), Box::new(right)))
    }

    fn parse_additive(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Tok::Plus => BinOp::Add,
                Tok::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Tok::Star => BinOp::Mul,
                Tok::Slash => BinOp::Div,
                Tok::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if matches!(self.peek(), Tok::Minus) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Expr::Unary(UnOp::Neg, Box::new(inner)));
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        let mut expr = self.parse_primary()?;
        loop {
            if matches!(self.peek(), Tok::LBracket) {
                self.advance();
                expr = self.parse_index_or_slice(expr)?;
                continue;
            }
            break;
        }
        Ok(expr)
    }

    fn parse_index_or_slice(&mut self, base: Expr) -> Result<Expr, ExprError> {
        if matches!(self.peek(), Tok::Colon) {
            self.advance();
            let end = if matches!(self.peek(), Tok::RBracket) {
                None
            } else {
                Some(Box::new(self.parse_expr()?))
            };
            self.eat(&Tok::RBracket)?;
            return Ok(Expr::Slice(Box::new(base), None, end));
        }

        let first = self.parse_expr()?;

        if matches!(self.peek(), Tok::Colon) {
            self.advance();
            let end = if matches!(self.peek(), Tok::RBracket) {
                None
            } else {
                Some(Box::new(self.parse_expr()?))
            };
            self.eat(&Tok::RBracket)?;
            return Ok(Expr::Slice(Box::new(base), Some(Box::new(first)), end));
        }

        self.eat(&Tok::RBracket)?;
        Ok(Expr::Index(Box::new(base), Box::new(first)))
    }

    /// Parses a call's argument list, terminated by `end`. Arguments are
    /// separated consistently by either commas or the word `and`, never a
    /// mix; each argument is parsed one level below `and`/`or` so a
    /// separating `and` is never mistaken for the logical operator.
    fn parse_args(&mut self, end: &Tok) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.peek() == end {
            return Ok(args);
        }

        args.push(self.parse_not()?);

        let mut sep: Option<Tok> = None;
        loop {
            let found = match self.peek() {
                Tok::Comma => Tok::Comma,
                Tok::And => Tok::And,
                _ => break,
            };
            match &sep {
                None => sep = Some(found.clone()),
                Some(s) if *s == found => {}
                Some(_) => {
                    return Err(ExprError::syntax(
                        "argument list mixes comma and 'and' separators",
                    ))
                }
            }
            self.advance();
            args.push(self.parse_not()?);
        }

        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        match self.advance() {
            Tok::Int(n) => Ok(Expr::Int(n)),
            Tok::Float(n) => Ok(Expr::Float(n)),
            Tok::Str(s) => Ok(Expr::Str(s)),
            Tok::Bool(b) => Ok(Expr::Bool(b)),
            Tok::Nothing => Ok(Expr::Nothing),
            Tok::LParen => {
                let inner = self.parse_expr()?;
                self.eat(&Tok::RParen)?;
                Ok(inner)
            }
            Tok::LBracket => {
                let items = self.parse_args(&Tok::RBracket)?;
                self.eat(&Tok::RBracket)?;
                Ok(Expr::List(items))
            }
            Tok::Ident(name) => self.parse_ident_primary(name),
            other => Err(ExprError::syntax(format!(
                "unexpected token {other:?} in expression"
            ))),
        }
    }

    fn parse_ident_primary(&mut self, name: String) -> Result<Expr, ExprError> {
        if name.eq_ignore_ascii_case("random") {
            return self.parse_random_form();
        }

        if name.eq_ignore_ascii_case("call") {
            return self.parse_call_form();
        }

        if matches!(self.peek(), Tok::LParen) {
            self.advance();
            let args = self.parse_args(&Tok::RParen)?;
            self.eat(&Tok::RParen)?;
            return Ok(Expr::Call(name, args));
        }

        Ok(Expr::Var(name))
    }

    /// `random between A and B`, `random choice from E`, or bare `random`.
    fn parse_random_form(&mut self) -> Result<Expr, ExprError> {
        if self.ident_word("between") {
            self.advance();
            let low = self.parse_comparison()?;
            self.eat(&Tok::And)?;
            let high = self.parse_comparison()?;
            return Ok(Expr::Call("random_int".into(), vec![low, high]));
        }

        if self.ident_word("choice") {
            self.advance();
            if !self.ident_word("from") {
                return Err(ExprError::syntax("expected 'from' after 'random choice'"));
            }
            self.advance();
            let source = self.parse_or()?;
            return Ok(Expr::Call("choice".into(), vec![source]));
        }

        Ok(Expr::Call("random".into(), vec![]))
    }

    /// `call F` or `call F with A, B` / `call F with A and B`.
    fn parse_call_form(&mut self) -> Result<Expr, ExprError> {
        let name = match self.advance() {
            Tok::Ident(name) => name,
            other => {
                return Err(ExprError::syntax(format!(
                    "expected function name after 'call', found {other:?}"
                )))
            }
        };

        if !self.ident_word("with") {
            return Ok(Expr::Call(name, vec![]));
        }
        self.advance();

        let mut args = vec![self.parse_not()?];
        let mut sep: Option<Tok> = None;
        loop {
            let found = match self.peek() {
                Tok::Comma => Tok::Comma,
                Tok::And => Tok::And,
                _ => break,
            };
            match &sep {
                None => sep = Some(found.clone()),
                Some(s) if *s == found => {}
                Some(_) => {
                    return Err(ExprError::syntax(
                        "argument list mixes comma and 'and' separators",
                    ))
                }
            }
            self.advance();
            args.push(self.parse_not()?);
        }

        Ok(Expr::Call(name, args))
    }
}

/// Parses a complete expression from a folded token stream, requiring every
/// token to be consumed.
pub fn parse(toks: Vec<Tok>) -> Result<Expr, ExprError> {
    let mut parser = Parser { toks, pos: 0 };
    let expr = parser.parse_expr()?;
    if !matches!(parser.peek(), Tok::Eof) {
        return Err(ExprError::syntax(format!(
            "unexpected trailing token {:?}",
            parser.peek()
        )));
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::tokenize;

    fn parse_src(src: &str) -> Expr {
        parse(tokenize(src).unwrap()).unwrap()
    }

    #[test]
    fn parses_precedence() {
        let expr = parse_src("1 + 2 * 3");
        match expr {
            Expr::Binary(BinOp::Add, l, r) => {
                assert!(matches!(*l, Expr::Int(1)));
                assert!(matches!(*r, Expr::Binary(BinOp::Mul, _, _)));
            }
            _ => panic!("expected addition at top level"),
        }
    }

    #[test]
    fn parses_comparison() {
        let expr = parse_src("score is at least 90");
        assert!(matches!(expr, Expr::Binary(BinOp::Ge, _, _)));
    }

    #[test]
    fn rejects_chained_comparison() {
        let toks = tokenize("a is at least 1 is at most 9").unwrap();
        assert!(parse(toks).is_err());
    }

    #[test]
    fn parses_random_between() {
        let expr = parse_src("random between 1 and 10");
        match expr {
            Expr::Call(name, args) => {
                assert_eq!(name, "random_int");
                assert_eq!(args.len(), 2);
            }
            _ => panic!("expected call"),
        }
    }

    #[test]
    fn parses_random_choice() {
        let expr = parse_src("random choice from my_list");
        match expr {
            Expr::Call(name, args) => {
                assert_eq!(name, "choice");
                assert_eq!(args.len(), 1);
            }
            _ => panic!("expected call"),
        }
    }

    #[test]
    fn parses_bare_random() {
        let expr = parse_src("random");
        assert!(matches!(expr, Expr::Call(ref name, ref args) if name == "random" && args.is_empty()));
    }

    #[test]
    fn parses_call_with_and_separated_args() {
        let expr = parse_src("call add with 1 and 2");
        match expr {
            Expr::Call(name, args) => {
                assert_eq!(name, "add");
                assert_eq!(args.len(), 2);
            }
            _ => panic!("expected call"),
        }
    }

    #[test]
    fn rejects_mixed_separators() {
        let toks = tokenize("call add with 1, 2 and 3").unwrap();
        assert!(parse(toks).is_err());
    }

    #[test]
    fn parses_index_and_slice() {
        assert!(matches!(parse_src("items[0]"), Expr::Index(_, _)));
        assert!(matches!(parse_src("items[1:3]"), Expr::Slice(_, Some(_), Some(_))));
        assert!(matches!(parse_src("items[:3]"), Expr::Slice(_, None, Some(_))));
    }
}
