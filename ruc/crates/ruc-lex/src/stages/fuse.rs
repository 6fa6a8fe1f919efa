//! Adjacency fusion: two consecutive tokens of given kinds that abut in the
//! source are replaced by a single token of a result kind spanning both
//! texts. The pipeline instantiates this once, for `!`+`in` → `not_in`.

use crate::token::{Token, TokenKind};

/// A parametric fusion stage.
pub struct Fuse<'src, I> {
    inner: I,
    source: &'src str,
    left: TokenKind,
    right: TokenKind,
    result: TokenKind,
    peeked: Option<Token<'src>>,
}

impl<'src, I> Fuse<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    /// Builds a fusion of `left`+`right` → `result` over `inner`; `source`
    /// is the buffer both token texts borrow from.
    pub fn new(inner: I, source: &'src str, left: TokenKind, right: TokenKind, result: TokenKind) -> Self {
        Self {
            inner,
            source,
            left,
            right,
            result,
            peeked: None,
        }
    }
}

impl<'src, I> Iterator for Fuse<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.peeked.take().or_else(|| self.inner.next())?;
        if current.kind == self.left {
            if let Some(next) = self.inner.next() {
                if next.kind == self.right && current.abuts(&next) {
                    // The fused token inherits the right token's precedence
                    // and the left token's position.
                    let mut fused = next;
                    fused.kind = self.result;
                    fused.text = &self.source[current.offset..next.end_offset()];
                    fused.offset = current.offset;
                    fused.line = current.line;
                    fused.column = current.column;
                    fused.prefix = current.text.len();
                    return Some(fused);
                }
                self.peeked = Some(next);
            }
        }
        Some(current)
    }
}
