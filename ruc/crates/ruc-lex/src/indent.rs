//! Indentation resolution.
//!
//! A stack of indent widths (initially `[0]`) turns newline tokens into
//! block structure. A deeper line opens a block only when the last
//! substantive token could introduce one: an opening brace, a boolean or
//! clause keyword, an assignment, or a syntactic marker. Everything else
//! treats the deeper line as a continuation and the newline flows through
//! unchanged. A shallower line closes every level it passed, one `dedent`
//! per level.
//!
//! The resolver also closes still-open levels when the stream ends, so
//! every `indent` is matched by a `dedent` no matter how the input stops.

use std::collections::VecDeque;

use crate::token::{Prec, Token, TokenKind};

/// Contexts after which a deeper line opens a block.
fn opens_block(prec: Prec) -> bool {
    matches!(
        prec,
        Prec::Open
            | Prec::InvOpen
            | Prec::And
            | Prec::Or
            | Prec::While
            | Prec::Exchange
            | Prec::Other
    )
}

/// The indentation-resolution stage.
pub struct Indents<'src, I> {
    inner: I,
    stack: Vec<usize>,
    /// Precedence of the last non-newline token seen.
    prev_prec: Prec,
    /// Position directly after the last token, for end-of-stream dedents.
    last_end: (usize, u32, u32),
    pending: VecDeque<Token<'src>>,
    exhausted: bool,
}

impl<'src, I> Indents<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            stack: vec![0],
            prev_prec: Prec::Intern,
            last_end: (0, 0, 0),
            pending: VecDeque::new(),
            exhausted: false,
        }
    }

    fn top(&self) -> usize {
        *self.stack.last().expect("indent stack is never empty")
    }
}

impl<'src, I> Iterator for Indents<'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            if self.exhausted {
                return None;
            }

            let Some(token) = self.inner.next() else {
                self.exhausted = true;
                let (offset, line, column) = self.last_end;
                while self.stack.len() > 1 {
                    self.stack.pop();
                    log::debug!("indent stack closed at end of stream");
                    self.pending.push_back(Token::with_prec(
                        TokenKind::Dedent,
                        Prec::Close,
                        "",
                        offset,
                        line,
                        column,
                    ));
                }
                continue;
            };

            self.last_end = (
                token.end_offset(),
                token.line,
                token.column + token.text.chars().count() as u32,
            );

            if token.kind != TokenKind::Newline {
                self.prev_prec = token.prec;
                return Some(token);
            }

            let width = token.text.len();
            let top = self.top();

            if width > top {
                if opens_block(self.prev_prec) {
                    log::debug!("indent {top} -> {width}");
                    self.stack.push(width);
                    let mut indent = token;
                    indent.kind = TokenKind::Indent;
                    indent.prec = Prec::Open;
                    return Some(indent);
                }
                // continuation line; the newline stays a separator
                return Some(token);
            }

            if width == top {
                return Some(token);
            }

            let mut dedent = token;
            dedent.kind = TokenKind::Dedent;
            dedent.prec = Prec::Close;
            while self.stack.len() > 1 && width < self.top() {
                log::debug!("dedent {} -> {width}", self.top());
                self.stack.pop();
                self.pending.push_back(dedent);
            }
            if width == self.top() {
                self.pending.push_back(token);
            }
            // a width between two levels drops the newline entirely
        }
    }
}
