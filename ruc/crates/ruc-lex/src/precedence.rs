//! Precedence classification of bare operators.
//!
//! The band of an operator is decided from its character composition alone.
//! The same character means different things in different company: `+` is
//! additive, `+=` is an assignment, `<` compares, `<<` shifts, `<<<` is a
//! user-defined shift-like operator, `<->` is bidirectional. The walk
//! tracks the strongest single-character reading, the strongest
//! doubled-character reading, and four shape flags, then arbitrates.

use crate::token::{Prec, Token, TokenKind};

/// Single-character readings.
fn single(c: char) -> Option<Prec> {
    Some(match c {
        '!' => Prec::Cmp,
        '=' => Prec::Exchange,
        '<' => Prec::Back,
        '>' => Prec::Front,
        '|' => Prec::Pipe,
        '[' => Prec::Open,
        ']' => Prec::Close,
        '*' | '/' | '%' => Prec::Mul,
        '+' | '-' => Prec::Add,
        _ => return None,
    })
}

/// Doubled-character readings, triggered by two equal adjacent characters.
fn double(c: char) -> Option<Prec> {
    Some(match c {
        '=' => Prec::Cmp,
        '<' | '>' => Prec::Shift,
        '*' => Prec::Pow,
        '~' => Prec::BitNot,
        '&' => Prec::BitAnd,
        '^' => Prec::BitXor,
        '|' => Prec::BitOr,
        '.' => Prec::Range,
        _ => return None,
    })
}

/// Classifies one operator spelling.
pub fn classify(text: &str) -> Prec {
    if matches!(text, "<" | ">" | "<=" | ">=") {
        return Prec::Cmp;
    }

    let mut prev = '\0';
    let mut max_unary = Prec::Intern;
    let mut max_binary = Prec::Intern;
    let (mut is_open, mut is_close, mut is_front, mut is_back) = (false, false, false, false);

    for curr in text.chars() {
        if prev == curr {
            if let Some(p) = double(curr) {
                max_binary = max_binary.max(p);
            }
        }
        if prev == '<' && curr == '>' {
            max_binary = max_binary.max(Prec::Cmp);
        }
        if let Some(p) = single(curr) {
            max_unary = max_unary.max(p);
            match p {
                Prec::Open => is_open = true,
                Prec::Close => is_close = true,
                Prec::Front => is_front = true,
                Prec::Back => is_back = true,
                // a `!` turns the whole spelling comparative: `!=`, `=!=`
                Prec::Cmp => max_binary = max_binary.max(max_unary).max(Prec::Cmp),
                _ => {}
            }
        }
        prev = curr;
    }

    if is_open && is_close {
        return Prec::Intern;
    }
    if is_open || is_close {
        return max_unary;
    }
    if max_unary == Prec::Pipe && max_binary != Prec::BitOr {
        return max_unary;
    }
    if max_unary == Prec::Exchange && max_binary != Prec::Cmp && max_binary != Prec::Range {
        return max_unary;
    }
    if max_binary != Prec::Intern {
        return max_binary;
    }
    if is_front && is_back {
        return Prec::Bidirect;
    }
    max_unary
}

/// The classifier stage: assigns bands to `operator_` tokens and passes
/// every other token through unchanged.
pub struct Precedence<I> {
    inner: I,
}

impl<I> Precedence<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<'src, I> Iterator for Precedence<I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token = self.inner.next()?;
        if token.kind == TokenKind::Operator {
            token.prec = classify(token.text);
        }
        Some(token)
    }
}
