//! Invocation inference.
//!
//! A token glued to the end of a value-producing token changes role: an
//! opening brace becomes a call brace (`f(` is invocation, `f (` is
//! grouping) and an operand becomes tight-bound (`a?` attaches to `a`
//! before anything else does). The previous token must itself be
//! value-like (`close`, `intern` or `unary` precedence) and must not be a
//! member dot, whose right-hand side stays an ordinary operand.

use crate::token::{Prec, Token, TokenKind};

/// The invocation-inference stage.
pub struct Invoke<'src, I> {
    inner: I,
    prev: Token<'src>,
}

impl<'src, I> Invoke<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            prev: Token::NONE,
        }
    }
}

impl<'src, I> Iterator for Invoke<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token = self.inner.next()?;
        let prev = self.prev;
        if prev.is_some()
            && prev.kind != TokenKind::OpDot
            && matches!(prev.prec, Prec::Close | Prec::Intern | Prec::Unary)
            && prev.abuts(&token)
        {
            if token.prec == Prec::Open {
                token.prec = Prec::InvOpen;
            } else if token.prec == Prec::Intern {
                token.prec = Prec::Unary;
            }
        }
        self.prev = token;
        Some(token)
    }
}
