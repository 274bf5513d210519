//! Tokenizer for the embedded expression sub-language.
//!
//! Runs in two passes: a character scanner produces [`RawTok`]s (words,
//! numbers, strings, single-char punctuation), then a phrase-folding pass
//! collapses runs of words into the multi-word English comparison operators
//! of the canonical table (`is at least`, `does not contain`, ...), longest
//! phrase first.

use super::error::ExprError;
use super::token::Tok;

#[derive(Debug, Clone, PartialEq)]
enum RawTok {
    Word(String),
    Int(i64),
    Float(f64),
    Str(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    Ne,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Colon,
}

/// Multi-word phrases recognized by the folding pass, longest first so that
/// e.g. "is not equal to" wins over the shorter "is not".
const PHRASES: &[(&[&str], Tok)] = &[
    (&["is", "greater", "than", "or", "equal", "to"], Tok::Ge),
    (&["is", "less", "than", "or", "equal", "to"], Tok::Le),
    (&["is", "not", "equal", "to"], Tok::Ne),
    (&["does", "not", "contain"], Tok::NotContains),
    (&["is", "equal", "to"], Tok::EqEq),
    (&["is", "greater", "than"], Tok::Gt),
    (&["is", "less", "than"], Tok::Lt),
    (&["is", "bigger", "than"], Tok::Gt),
    (&["is", "smaller", "than"], Tok::Lt),
    (&["is", "at", "least"], Tok::Ge),
    (&["is", "at", "most"], Tok::Le),
    (&["is", "not"], Tok::Ne),
    (&["equals"], Tok::EqEq),
    (&["contains"], Tok::Contains),
    (&["and"], Tok::And),
    (&["or"], Tok::Or),
    (&["not"], Tok::Not),
];

fn raw_tokenize(src: &str) -> Result<Vec<RawTok>, ExprError> {
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0;
    let mut out = Vec::new();

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '"' {
            let mut s = String::new();
            i += 1;
            let mut closed = false;
            while i < chars.len() {
                let ch = chars[i];
                if ch == '"' {
                    closed = true;
                    i += 1;
                    break;
                }
                if ch == '\\' && i + 1 < chars.len() {
                    let esc = chars[i + 1];
                    s.push(match esc {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '\\' => '\\',
                        '"' => '"',
                        other => {
                            return Err(ExprError::syntax(format!(
                                "unknown escape sequence '\\{other}' in string literal"
                            )))
                        }
                    });
                    i += 2;
                } else {
                    s.push(ch);
                    i += 1;
                }
            }
            if !closed {
                return Err(ExprError::syntax("unterminated string literal"));
            }
            out.push(RawTok::Str(s));
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let mut is_float = false;
            if i < chars.len() && chars[i] == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit() {
                is_float = true;
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            let text: String = chars[start..i].iter().collect();
            if is_float {
                let value: f64 = text
                    .parse()
                    .map_err(|_| ExprError::syntax(format!("invalid number literal '{text}'")))?;
                out.push(RawTok::Float(value));
            } else {
                let value: i64 = text
                    .parse()
                    .map_err(|_| ExprError::syntax(format!("invalid number literal '{text}'")))?;
                out.push(RawTok::Int(value));
            }
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(RawTok::Word(word));
            continue;
        }

        macro_rules! two_char {
            ($second:expr, $both:expr, $single:expr) => {{
                if i + 1 < chars.len() && chars[i + 1] == $second {
                    i += 2;
                    out.push($both);
                } else {
                    i += 1;
                    out.push($single);
                }
            }};
        }

        match c {
            '+' => {
                i += 1;
                out.push(RawTok::Plus);
            }
            '-' => {
                i += 1;
                out.push(RawTok::Minus);
            }
            '*' => {
                i += 1;
                out.push(RawTok::Star);
            }
            '/' => {
                i += 1;
                out.push(RawTok::Slash);
            }
            '%' => {
                i += 1;
                out.push(RawTok::Percent);
            }
            '(' => {
                i += 1;
                out.push(RawTok::LParen);
            }
            ')' => {
                i += 1;
                out.push(RawTok::RParen);
            }
            '[' => {
                i += 1;
                out.push(RawTok::LBracket);
            }
            ']' => {
                i += 1;
                out.push(RawTok::RBracket);
            }
            ',' => {
                i += 1;
                out.push(RawTok::Comma);
            }
            ':' => {
                i += 1;
                out.push(RawTok::Colon);
            }
            '<' => two_char!('=', RawTok::Le, RawTok::Lt),
            '>' => two_char!('=', RawTok::Ge, RawTok::Gt),
            '=' => two_char!('=', RawTok::EqEq, RawTok::EqEq),
            '!' => {
                if i + 1 < chars.len() && chars[i + 1] == '=' {
                    i += 2;
                    out.push(RawTok::Ne);
                } else {
                    return Err(ExprError::syntax("unexpected character '!'"));
                }
            }
            other => {
                return Err(ExprError::syntax(format!("unexpected character '{other}'")));
            }
        }
    }

    Ok(out)
}

fn fold_phrases(raw: Vec<RawTok>) -> Vec<Tok> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < raw.len() {
        if let RawTok::Word(w) = &raw[i] {
            let lower = w.to_lowercase();

            if lower == "true" {
                out.push(Tok::Bool(true));
                i += 1;
                continue;
            }
            if lower == "false" {
                out.push(Tok::Bool(false));
                i += 1;
                continue;
            }
            if lower == "nothing" {
                out.push(Tok::Nothing);
                i += 1;
                continue;
            }

            let mut matched = None;
            for (phrase, tok) in PHRASES {
                if i + phrase.len() > raw.len() {
                    continue;
                }
                let matches = phrase.iter().enumerate().all(|(offset, word)| {
                    matches!(&raw[i + offset], RawTok::Word(w) if w.to_lowercase() == *word)
                });
                if matches {
                    matched = Some((phrase.len(), tok.clone()));
                    break;
                }
            }

            if let Some((len, tok)) = matched {
                out.push(tok);
                i += len;
                continue;
            }

            out.push(Tok::Ident(w.clone()));
            i += 1;
            continue;
        }

        out.push(match &raw[i] {
            RawTok::Int(n) => Tok::Int(*n),
            RawTok::Float(n) => Tok::Float(*n),
            RawTok::Str(s) => Tok::Str(s.clone()),
            RawTok::Plus => Tok::Plus,
            RawTok::Minus => Tok::Minus,
            RawTok::Star => Tok::Star,
            RawTok::Slash => Tok::Slash,
            RawTok::Percent => Tok::Percent,
            RawTok::Lt => Tok::Lt,
            RawTok::Le => Tok::Le,
            RawTok::Gt => Tok::Gt,
            RawTok::Ge => Tok::Ge,
            RawTok::EqEq => Tok::EqEq,
            RawTok::Ne => Tok::Ne,
            RawTok::LParen => Tok::LParen,
            RawTok::RParen => Tok::RParen,
            RawTok::LBracket => Tok::LBracket,
            RawTok::RBracket => Tok::RBracket,
            RawTok::Comma => Tok::Comma,
            RawTok::Colon => Tok::Colon,
            RawTok::Word(_) => unreachable!(),
        });
        i += 1;
    }

    out.push(Tok::Eof);
    out
}

/// Tokenizes an expression's surface text into a folded token stream.
pub fn tokenize(src: &str) -> Result<Vec<Tok>, ExprError> {
    let raw = raw_tokenize(src)?;
    Ok(fold_phrases(raw))
}
