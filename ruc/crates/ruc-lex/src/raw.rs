//! Raw scanner: byte stream in, raw token stream out.
//!
//! The scanner advances by trying a fixed ordered list of rules; the first
//! rule that recognizes the input wins. Whitespace and comments are consumed
//! without emitting anything. Every other shape of input produces a token,
//! including one `error` token per unrecognizable scalar, so the scanner
//! itself can never fail.
//!
//! Two framing conventions matter to the downstream stages:
//!
//! - the stream opens with a newline token carrying the first line's indent
//!   run (blank and comment-only lines are absorbed so only the last run is
//!   reported), and
//! - exactly one trailing newline token is emitted at end of input.

mod number;

use crate::cursor::Cursor;
use crate::token::{Prec, Token, TokenKind};
use crate::unicode::{is_explicit_char, is_name_continue, is_name_start, is_operator_char};

/// The raw scanner. Iterate it to drain the token stream.
pub struct RawScanner<'src> {
    cursor: Cursor<'src>,
    started: bool,
    finished: bool,
}

impl<'src> RawScanner<'src> {
    /// Creates a scanner over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            started: false,
            finished: false,
        }
    }

    /// Consumes `\r`, `\n` or `\r\n` once.
    fn skip_endl(&mut self) {
        if self.cursor.current_char() == '\r' {
            self.cursor.advance();
        }
        if self.cursor.current_char() == '\n' {
            self.cursor.advance();
        }
    }

    /// Consumes a `##` comment up to the line end, if one starts here.
    fn skip_comment(&mut self) {
        if self.cursor.current_char() == '#' && self.cursor.nth_char(1) == '#' {
            self.cursor
                .advance_while(|c| c != '\n' && c != '\r');
        }
    }

    /// Consumes a newline run: line breaks, blank lines and comment-only
    /// lines, reporting a single newline token that carries the indent run
    /// of the last line reached.
    ///
    /// Sets `finished` when the run ends at end of input, which makes this
    /// doubly the end-of-stream rule: the final token of every stream is a
    /// newline produced here.
    fn newline_run(&mut self) -> Token<'src> {
        loop {
            self.skip_endl();
            let start = self.cursor.position();
            let line = self.cursor.line();
            let column = self.cursor.column();
            self.cursor.advance_while(|c| c == ' ');
            let token = Token::with_prec(
                TokenKind::Newline,
                Prec::Semicolon,
                self.cursor.slice_from(start),
                start,
                line,
                column,
            );
            self.skip_comment();
            if self.cursor.is_at_end() {
                self.finished = true;
                return token;
            }
            let c = self.cursor.current_char();
            if c != '\r' && c != '\n' {
                return token;
            }
        }
    }

    /// Emits a single-character symbol token.
    fn symbol(&mut self, kind: TokenKind, prec: Prec) -> Token<'src> {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance();
        Token::with_prec(kind, prec, self.cursor.slice_from(start), start, line, column)
    }

    /// String literal rule. The opening quote-run length selects the closing
    /// delimiter; a run of exactly two is the immediately closed empty
    /// string.
    fn scan_string(&mut self) -> Token<'src> {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance_while(|c| c == '"');
        let run_len = self.cursor.position() - start;

        if run_len == 2 {
            let mut token = Token::with_prec(
                TokenKind::String,
                Prec::Intern,
                self.cursor.slice_from(start),
                start,
                line,
                column,
            );
            token.prefix = 1;
            token.postfix = 1;
            token.shift = 1;
            return token;
        }

        let closed = self.scan_to_closing_run(start, run_len, false);
        let end = self.cursor.position();
        let mut token = Token::with_prec(
            if closed {
                TokenKind::String
            } else {
                TokenKind::ErrorUnclosedString
            },
            Prec::Intern,
            self.cursor.slice(start, end),
            start,
            line,
            column,
        );
        token.prefix = run_len;
        token.postfix = if closed { run_len } else { 0 };
        token.shift = run_len as i64;
        token
    }

    /// Advances until the trailing `run_len` bytes repeat the opening quote
    /// run that started at `start`. The window check only engages once the
    /// cursor has moved past the opening run itself, so `"""` does not close
    /// against its own opening quotes. Returns whether the closing run was
    /// found.
    fn scan_to_closing_run(&mut self, start: usize, run_len: usize, stop_at_endl: bool) -> bool {
        let bytes = self.cursor.bytes();
        let run = &bytes[start..start + run_len];
        loop {
            let p = self.cursor.position();
            if p >= start + run_len + 1 && &bytes[p - run_len..p] == run {
                return true;
            }
            if self.cursor.is_at_end() {
                return false;
            }
            let c = self.cursor.current_char();
            if stop_at_endl && (c == '\r' || c == '\n') {
                return false;
            }
            self.cursor.advance();
        }
    }

    /// Identifier rule.
    fn scan_name(&mut self) -> Token<'src> {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance_while(is_name_continue);
        Token::new(
            TokenKind::Identifier,
            self.cursor.slice_from(start),
            start,
            line,
            column,
        )
    }

    /// Quote-run rule: characters, explicit-quoted names and operators.
    fn scan_quote(&mut self) -> Token<'src> {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance_while(|c| c == '\'');
        let run_len = self.cursor.position() - start;

        match run_len {
            1 => self.scan_single_quoted(start, line, column),
            // `'''` is the quote character itself.
            3 => {
                let mut token = Token::new(
                    TokenKind::Character,
                    self.cursor.slice(start + 1, start + 2),
                    start + 1,
                    line,
                    column + 1,
                );
                token.shift = 1;
                token
            }
            _ => {
                let closed = self.scan_to_closing_run(start, run_len, true);
                let end = self.cursor.position();
                if closed {
                    let mut token = Token::new(
                        TokenKind::IdExpl,
                        self.cursor.slice(start + run_len, end - run_len),
                        start + run_len,
                        line,
                        column + run_len as u32,
                    );
                    token.shift = run_len as i64;
                    token
                } else {
                    let mut token = Token::new(
                        TokenKind::ErrorNameUnclosedString,
                        self.cursor.slice(start, end),
                        start,
                        line,
                        column,
                    );
                    token.prefix = run_len;
                    token.shift = run_len as i64;
                    token
                }
            }
        }
    }

    /// The lone-quote cases: `'x'`, `'\n'`-style escapes, and the bare
    /// graphic run that spells an explicit operator (`'a+-`).
    fn scan_single_quoted(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        let standalone = |this: &Self| {
            Token::new(
                TokenKind::ErrorStandaloneQuo,
                this.cursor.slice(start, start + 1),
                start,
                line,
                column,
            )
        };

        if self.cursor.is_at_end() {
            return standalone(self);
        }

        if self.cursor.current_char() == '\\' {
            let body_start = self.cursor.position();
            self.cursor.advance();
            if self.cursor.is_at_end() {
                return self.unclosed_char(start, line, column);
            }
            let escape = self.cursor.current_char();
            self.cursor.advance();
            if matches!(escape, 'x' | 'X' | 'u' | 'U') {
                self.cursor.advance_while(|c| c.is_ascii_hexdigit());
            }
            if self.cursor.current_char() != '\'' {
                return self.unclosed_char(start, line, column);
            }
            self.cursor.advance();
            let end = self.cursor.position();
            return Token::new(
                TokenKind::Character,
                self.cursor.slice(body_start, end - 1),
                body_start,
                line,
                column + 1,
            );
        }

        if self.cursor.nth_char(1) == '\'' {
            let body_start = self.cursor.position();
            self.cursor.advance();
            self.cursor.advance();
            let end = self.cursor.position();
            return Token::new(
                TokenKind::Character,
                self.cursor.slice(body_start, end - 1),
                body_start,
                line,
                column + 1,
            );
        }

        let run_start = self.cursor.position();
        self.cursor.advance_while(is_explicit_char);
        if self.cursor.position() > run_start {
            let mut token = Token::new(
                TokenKind::OpExpl,
                self.cursor.slice_from(run_start),
                run_start,
                line,
                column + 1,
            );
            token.shift = 1;
            token
        } else {
            standalone(self)
        }
    }

    fn unclosed_char(&self, start: usize, line: u32, column: u32) -> Token<'src> {
        Token::new(
            TokenKind::ErrorUnclosedString,
            self.cursor.slice(start, self.cursor.position()),
            start,
            line,
            column,
        )
    }

    /// Operator rule: a maximal run of operator scalars.
    fn scan_operator(&mut self) -> Token<'src> {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance_while(is_operator_char);
        Token::new(
            TokenKind::Operator,
            self.cursor.slice_from(start),
            start,
            line,
            column,
        )
    }

    /// Error fallback: consume one scalar.
    fn scan_error(&mut self) -> Token<'src> {
        let start = self.cursor.position();
        let line = self.cursor.line();
        let column = self.cursor.column();
        self.cursor.advance();
        Token::new(
            TokenKind::Error,
            self.cursor.slice_from(start),
            start,
            line,
            column,
        )
    }
}

impl<'src> Iterator for RawScanner<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.newline_run());
        }

        loop {
            if self.cursor.is_at_end() {
                if self.finished {
                    return None;
                }
                self.finished = true;
                return Some(self.newline_run());
            }

            let c = self.cursor.current_char();
            return Some(match c {
                ' ' => {
                    self.cursor.advance();
                    continue;
                }
                '(' => self.symbol(TokenKind::BrOpen, Prec::Open),
                ')' => self.symbol(TokenKind::BrClose, Prec::Close),
                '{' => self.symbol(TokenKind::BrCurOpen, Prec::Open),
                '}' => self.symbol(TokenKind::BrCurClose, Prec::Close),
                ',' => self.symbol(TokenKind::Comma, Prec::Comma),
                ';' => self.symbol(TokenKind::Semicolon, Prec::Semicolon),
                '#' if self.cursor.nth_char(1) == '#' => {
                    self.skip_comment();
                    continue;
                }
                '#' => self.symbol(TokenKind::Sharp, Prec::Other),
                '\r' | '\n' => self.newline_run(),
                '"' => self.scan_string(),
                '\'' => self.scan_quote(),
                _ => {
                    if c.is_ascii_digit() || (c == '.' && self.cursor.nth_char(1).is_ascii_digit())
                    {
                        number::scan_number(&mut self.cursor)
                    } else if is_name_start(c) {
                        self.scan_name()
                    } else if is_operator_char(c) {
                        self.scan_operator()
                    } else {
                        self.scan_error()
                    }
                }
            });
        }
    }
}
