//! Dot-edge splitting.
//!
//! An operator whose text starts or ends with a single `.` is really two
//! tokens: the dot (member access) and the operator body. `+.` is `+` then
//! `.`, and `.+` is `.` then `+`. Three shapes are exempt:
//!
//! - a lone `.` (classified by the operator-keyword stage instead),
//! - a `..` edge (range operators keep their dots), and
//! - a dot on *both* edges (`.!.` is one operator).
//!
//! The stage buffers at most one token so the split pair comes out in
//! source order with correct columns.

use crate::token::{Token, TokenKind};

/// True when the split applies with the dot on the chosen edge: the dot must
/// not be doubled and the opposite edge must not be a dot.
fn splits(text: &str, at_end: bool) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < 2 {
        return false;
    }
    let (edge, inner, far) = if at_end {
        (bytes[bytes.len() - 1], bytes[bytes.len() - 2], bytes[0])
    } else {
        (bytes[0], bytes[1], bytes[bytes.len() - 1])
    };
    edge == b'.' && inner != b'.' && far != b'.'
}

/// A dot-edge split stage; see [`DotSplit::at_right`] and
/// [`DotSplit::at_left`].
pub struct DotSplit<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    inner: I,
    pending: Option<Token<'src>>,
    at_end: bool,
}

impl<'src, I> DotSplit<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    /// Splits `op.` into `op` and `.`.
    pub fn at_right(inner: I) -> Self {
        Self {
            inner,
            pending: None,
            at_end: true,
        }
    }

    /// Splits `.op` into `.` and `op`.
    pub fn at_left(inner: I) -> Self {
        Self {
            inner,
            pending: None,
            at_end: false,
        }
    }
}

impl<'src, I> Iterator for DotSplit<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(stashed) = self.pending.take() {
            return Some(stashed);
        }
        let token = self.inner.next()?;
        if token.kind != TokenKind::Operator || !splits(token.text, self.at_end) {
            return Some(token);
        }

        let len = token.text.len();
        if self.at_end {
            let scalars = token.text.chars().count() as u32;
            let mut body = token;
            body.text = &token.text[..len - 1];
            let dot = Token::new(
                TokenKind::OpDot,
                &token.text[len - 1..],
                token.offset + len - 1,
                token.line,
                token.column + scalars - 1,
            );
            self.pending = Some(dot);
            Some(body)
        } else {
            let dot = Token::new(
                TokenKind::OpDot,
                &token.text[..1],
                token.offset,
                token.line,
                token.column,
            );
            let mut body = token;
            body.text = &token.text[1..];
            body.offset += 1;
            body.column += 1;
            self.pending = Some(body);
            Some(dot)
        }
    }
}
