//! ruc-par - Precedence-driven expression parser for the Ru language.
//!
//! The parser consumes the refined token stream of `ruc-lex` and produces
//! one [`Expression`]. The grammar is a table of precedence levels walked
//! loosest-to-tightest; each level contributes a binary rule and a prefix
//! or postfix rule, with associativity and the unary side read from the
//! two low bits of the level's [`Prec`] value. Below the table sits the
//! juxtaposition core: application, invocation braces, member dots.
//!
//! Statement separators (`;`, line ends) delimit expressions at the
//! outermost level and inside braces; the syntactic markers of the `tree`
//! and `other` bands (`is`, `by`, `prp`, `:=`, `=>`, `#`) also separate,
//! but are kept in the surrounding sequence as simple nodes because they
//! carry meaning of their own. `indent`/`dedent` arrive with bracket
//! precedences and therefore parse as braced blocks with no extra rules.
//!
//! The parser backtracks between alternatives by position snapshot and
//! reports a single [`ParseError`] carrying the furthest token that
//! blocked progress together with the ordered set of alternatives that
//! were acceptable there.
//!
//! # Example
//!
//! ```
//! use ruc_lex::lex;
//! use ruc_par::{parse, Expression};
//!
//! let expr = parse(lex("a + b * c")).unwrap();
//! assert!(matches!(expr, Expression::Binary { .. }));
//! ```

pub mod ast;
mod expr;

mod edge_cases;

use indexmap::IndexSet;
use thiserror::Error;

use ruc_lex::{Prec, Token, TokenKind};
use ruc_util::{codes, Diagnostic};

pub use ast::{Expression, Operator};

/// Parser failure: the position and kind of the blocking token, and what
/// would have been accepted instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token no grammar rule could consume.
    #[error(
        "expected {} but found {found:?} at {line}:{column}",
        expected_list(.expected)
    )]
    UnexpectedToken {
        /// 0-based line of the blocking token.
        line: u32,
        /// 0-based column of the blocking token.
        column: u32,
        /// Kind of the blocking token; `None` when the input ended early.
        found: TokenKind,
        /// Alternatives acceptable at that position, in grammar order.
        expected: Vec<&'static str>,
    },
    /// `a == b == c` and friends: comparisons do not associate.
    #[error("comparison operators cannot be chained (found {found:?} at {line}:{column})")]
    ChainedComparison {
        /// 0-based line of the second comparison operator.
        line: u32,
        /// 0-based column of the second comparison operator.
        column: u32,
        /// Kind of the second comparison operator.
        found: TokenKind,
    },
}

fn expected_list(expected: &[&'static str]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => (*only).to_string(),
        more => format!("one of: {}", more.join(", ")),
    }
}

impl ParseError {
    /// The failure as a diagnostic, for callers collecting lexer and
    /// parser problems through one channel.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::UnexpectedToken { line, column, .. } => {
                Diagnostic::error(self.to_string(), *line, *column)
                    .with_code(codes::E_PAR_UNEXPECTED_TOKEN)
            }
            ParseError::ChainedComparison { line, column, .. } => {
                Diagnostic::error(self.to_string(), *line, *column)
                    .with_code(codes::E_PAR_CHAINED_COMPARISON)
            }
        }
    }
}

/// Parses a token stream into one expression.
///
/// The stream is drained eagerly; the parser needs random access for its
/// backtracking alternatives. Error tokens are operands like any others —
/// lexical problems are reported by `ruc_lex::report`, not here.
pub fn parse<'src>(
    tokens: impl IntoIterator<Item = Token<'src>>,
) -> Result<Expression<'src>, ParseError> {
    let mut parser = Parser::new(tokens.into_iter().collect());
    match parser.parse_sequence() {
        Some(expression) if parser.at_end() => Ok(expression),
        Some(_) => {
            parser.fail("end of input");
            Err(parser.take_error())
        }
        None => Err(parser.take_error()),
    }
}

/// The parser state: the token buffer, a cursor, and the furthest-failure
/// bookkeeping that turns a backtracking run into one coherent error.
pub(crate) struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    pos: usize,
    failure_pos: usize,
    expected: IndexSet<&'static str>,
    chained: Option<ParseError>,
}

impl<'src> Parser<'src> {
    /// Creates a parser over a drained token buffer.
    pub(crate) fn new(tokens: Vec<Token<'src>>) -> Self {
        Self {
            tokens,
            pos: 0,
            failure_pos: 0,
            expected: IndexSet::new(),
            chained: None,
        }
    }

    pub(crate) fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).copied()
    }

    pub(crate) fn bump(&mut self) -> Option<Token<'src>> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn save(&self) -> usize {
        self.pos
    }

    pub(crate) fn restore(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Records that `what` would have been acceptable at the cursor.
    /// Failures before the furthest one reached so far are subsumed.
    pub(crate) fn fail(&mut self, what: &'static str) {
        if self.pos > self.failure_pos {
            self.failure_pos = self.pos;
            self.expected.clear();
        }
        if self.pos == self.failure_pos {
            self.expected.insert(what);
        }
    }

    /// Consumes the next token when its band is `prec`.
    pub(crate) fn take_prec(&mut self, prec: Prec, what: &'static str) -> Option<Token<'src>> {
        match self.peek() {
            Some(token) if token.prec == prec => {
                self.pos += 1;
                Some(token)
            }
            _ => {
                self.fail(what);
                None
            }
        }
    }

    /// Records the chained-comparison failure; it outranks the positional
    /// error when the parse aborts.
    pub(crate) fn fail_chained(&mut self, token: Token<'src>) {
        if self.chained.is_none() {
            self.chained = Some(ParseError::ChainedComparison {
                line: token.line,
                column: token.column,
                found: token.kind,
            });
        }
    }

    /// Builds the error for an aborted parse.
    pub(crate) fn take_error(&mut self) -> ParseError {
        if let Some(error) = self.chained.take() {
            log::debug!("parse failed: {error}");
            return error;
        }
        let (line, column, found) = match self.tokens.get(self.failure_pos) {
            Some(token) => (token.line, token.column, token.kind),
            None => match self.tokens.last() {
                Some(last) => (
                    last.line,
                    last.column + last.text.chars().count() as u32,
                    TokenKind::None,
                ),
                None => (0, 0, TokenKind::None),
            },
        };
        let error = ParseError::UnexpectedToken {
            line,
            column,
            found,
            expected: self.expected.iter().copied().collect(),
        };
        log::debug!("parse failed: {error}");
        error
    }

    /// The statement-sequence rule: expressions separated by semicolon-band
    /// tokens, with `tree`/`other` markers preserved as simple nodes. Stops
    /// before a `close`-band token so braced rules can claim it.
    pub(crate) fn parse_sequence(&mut self) -> Option<Expression<'src>> {
        let mut items = Vec::new();
        loop {
            while let Some(token) = self.peek() {
                match token.prec {
                    Prec::Semicolon => {
                        self.bump();
                    }
                    Prec::Tree | Prec::Other => {
                        self.bump();
                        items.push(Expression::Simple(token));
                    }
                    _ => break,
                }
            }

            match self.peek() {
                None => break,
                Some(token) if token.prec == Prec::Close => break,
                Some(_) => {}
            }

            items.push(self.parse_expr()?);

            match self.peek() {
                None => {}
                Some(token)
                    if matches!(
                        token.prec,
                        Prec::Semicolon | Prec::Tree | Prec::Other | Prec::Close
                    ) => {}
                Some(_) => {
                    self.fail("a statement separator");
                    return None;
                }
            }
        }

        Some(match items.len() {
            1 => items.pop().expect("just checked"),
            _ => Expression::Multiple(items),
        })
    }
}
