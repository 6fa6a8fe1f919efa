//! The expression grammar.
//!
//! One table drives everything: [`LEVELS`] lists the operator bands from
//! tightest to loosest binding. For a level `p` the parser derives all of
//! its rules from the two bits packed into the band value:
//!
//! - `associativity(p)` picks `binary(curr, p, lower)` (left) or
//!   `binary(lower, p, curr)` (right);
//! - `unary_side(p)` picks the prefix form `op E` (left) or the postfix
//!   form `E op` (right) as the level's unary rule.
//!
//! `cmp` is the exception: comparisons do not associate, so a second
//! comparison operator at the same level aborts the parse.
//!
//! An operator position accepts the dotted form `operand . op`, which
//! packs the operand into the [`Operator`] it qualifies. Below the table
//! sits the juxtaposition core: application by adjacency, invocation
//! braces, member dots, and the braced rule that `indent`/`dedent` blocks
//! share with ordinary brackets.

use ruc_lex::{associativity, unary_side, Dir, Prec, TokenKind};

use crate::ast::{combine, Expression, Operator};
use crate::Parser;

/// Operator bands handled by the level walk, tightest first. The
/// `semicolon` band is the sequence rule; everything tighter than `pow`
/// is juxtaposition.
const LEVELS: [Prec; 23] = [
    Prec::Pow,
    Prec::Mul,
    Prec::Add,
    Prec::Shift,
    Prec::BitNot,
    Prec::BitAnd,
    Prec::BitXor,
    Prec::BitOr,
    Prec::Range,
    Prec::Cmp,
    Prec::Bidirect,
    Prec::Front,
    Prec::Back,
    Prec::Either,
    Prec::Pair,
    Prec::Init,
    Prec::Comma,
    Prec::Pipe,
    Prec::Not,
    Prec::And,
    Prec::Or,
    Prec::Exchange,
    Prec::While,
];

fn level_name(prec: Prec) -> &'static str {
    match prec {
        Prec::Pow => "a power operator",
        Prec::Mul => "a multiplicative operator",
        Prec::Add => "an additive operator",
        Prec::Shift => "a shift operator",
        Prec::BitNot => "a bitwise-not operator",
        Prec::BitAnd => "a bitwise-and operator",
        Prec::BitXor => "a bitwise-xor operator",
        Prec::BitOr => "a bitwise-or operator",
        Prec::Range => "a range operator",
        Prec::Cmp => "a comparison operator",
        Prec::Bidirect => "a bidirectional operator",
        Prec::Front => "a front operator",
        Prec::Back => "a back operator",
        Prec::Either => "'|'",
        Prec::Pair => "':'",
        Prec::Init => "an initializer operator",
        Prec::Comma => "','",
        Prec::Pipe => "a pipe operator",
        Prec::Not => "'not'",
        Prec::And => "'and'",
        Prec::Or => "'or'",
        Prec::Exchange => "an assignment operator",
        Prec::While => "a clause keyword",
        _ => "an operator",
    }
}

impl<'src> Parser<'src> {
    /// One full expression, statement separators excluded.
    pub(crate) fn parse_expr(&mut self) -> Option<Expression<'src>> {
        self.parse_binding(LEVELS.len() - 1)
    }

    fn parse_lower(&mut self, level: usize) -> Option<Expression<'src>> {
        if level == 0 {
            self.parse_juxt()
        } else {
            self.parse_binding(level - 1)
        }
    }

    /// Parses the binary and unary rules of `LEVELS[level]`.
    fn parse_binding(&mut self, level: usize) -> Option<Expression<'src>> {
        let prec = LEVELS[level];
        let mut lhs = self.parse_head(level, prec)?;

        if prec == Prec::Cmp {
            // non-associative: one comparison, and a second one is an error
            let save = self.save();
            if let Some(op) = self.parse_operator(prec) {
                if let Some(rhs) = self.parse_lower(level) {
                    match self.peek() {
                        Some(next) if next.prec == Prec::Cmp => {
                            self.fail_chained(next);
                            self.restore(save);
                        }
                        _ => {
                            lhs = Expression::Binary {
                                left: Box::new(lhs),
                                op,
                                right: Box::new(rhs),
                            };
                        }
                    }
                } else {
                    self.restore(save);
                }
            }
            return Some(lhs);
        }

        match associativity(prec) {
            Dir::Left => loop {
                let save = self.save();
                let Some(op) = self.parse_operator(prec) else {
                    break Some(lhs);
                };
                if let Some(rhs) = self.parse_lower(level) {
                    lhs = Expression::Binary {
                        left: Box::new(lhs),
                        op,
                        right: Box::new(rhs),
                    };
                } else if unary_side(prec) == Dir::Right {
                    lhs = Expression::Right {
                        child: Box::new(lhs),
                        op,
                    };
                } else {
                    self.restore(save);
                    break Some(lhs);
                }
            },
            Dir::Right => {
                let save = self.save();
                if let Some(op) = self.parse_operator(prec) {
                    if let Some(rhs) = self.parse_binding(level) {
                        lhs = Expression::Binary {
                            left: Box::new(lhs),
                            op,
                            right: Box::new(rhs),
                        };
                    } else if unary_side(prec) == Dir::Right {
                        lhs = Expression::Right {
                            child: Box::new(lhs),
                            op,
                        };
                    } else {
                        self.restore(save);
                    }
                }
                Some(lhs)
            }
        }
    }

    /// The head of a level: its prefix unary form when the band attaches on
    /// the left, otherwise the next-tighter rule.
    fn parse_head(&mut self, level: usize, prec: Prec) -> Option<Expression<'src>> {
        if unary_side(prec) == Dir::Left {
            let save = self.save();
            if let Some(op) = self.parse_operator(prec) {
                if let Some(child) = self.parse_binding(level) {
                    return Some(Expression::Left {
                        op,
                        child: Box::new(child),
                    });
                }
                self.restore(save);
            }
        }
        self.parse_lower(level)
    }

    /// An operator of band `prec`: either a bare token or the dotted form
    /// `operand . op` carrying the operand as context.
    fn parse_operator(&mut self, prec: Prec) -> Option<Operator<'src>> {
        let save = self.save();
        if let Some(base) = self.take_simple_operand() {
            if self.take_dot().is_some() {
                if let Some(token) = self.take_prec(prec, level_name(prec)) {
                    return Some(Operator::dotted(Expression::Simple(base), token));
                }
            }
            self.restore(save);
        }
        Some(Operator::bare(self.take_prec(prec, level_name(prec))?))
    }

    /// A single operand token: `intern` or tight-bound `unary`, but never
    /// the member dot.
    fn take_simple_operand(&mut self) -> Option<ruc_lex::Token<'src>> {
        match self.peek() {
            Some(token)
                if matches!(token.prec, Prec::Intern | Prec::Unary)
                    && token.kind != TokenKind::OpDot =>
            {
                self.bump()
            }
            _ => None,
        }
    }

    /// A member dot, tight or spaced.
    fn take_dot(&mut self) -> Option<ruc_lex::Token<'src>> {
        match self.peek() {
            Some(token)
                if token.kind == TokenKind::OpDot
                    && matches!(token.prec, Prec::Intern | Prec::Unary) =>
            {
                self.bump()
            }
            _ => None,
        }
    }

    /// The juxtaposition core: an atom followed by any run of application
    /// operands, invocation braces and member accesses, combined
    /// left-to-right.
    pub(crate) fn parse_juxt(&mut self) -> Option<Expression<'src>> {
        let mut lhs = self.parse_atom()?;
        loop {
            let save = self.save();

            if let Some(dot) = self.take_dot() {
                if let Some(member) = self.take_simple_operand() {
                    lhs = Expression::Binary {
                        left: Box::new(lhs),
                        op: Operator::bare(dot),
                        right: Box::new(Expression::Simple(member)),
                    };
                    continue;
                }
                // dotted brace: `a.(…)` packs the operand into the open
                if let Some(next) = self.peek() {
                    if matches!(next.prec, Prec::Open | Prec::InvOpen) {
                        if let Some(Expression::Braced { mut open, mid, close }) =
                            self.parse_braced(next.prec)
                        {
                            open.left = Some(Box::new(lhs));
                            lhs = Expression::Braced { open, mid, close };
                            continue;
                        }
                    }
                }
                self.restore(save);
                break;
            }

            match self.peek() {
                Some(token) if matches!(token.prec, Prec::Open | Prec::InvOpen) => {
                    match self.parse_braced(token.prec) {
                        Some(braced) => lhs = combine(lhs, braced),
                        None => break,
                    }
                }
                Some(token)
                    if matches!(token.prec, Prec::Intern | Prec::Unary)
                        && token.kind != TokenKind::OpDot =>
                {
                    self.bump();
                    lhs = combine(lhs, Expression::Simple(token));
                }
                _ => break,
            }
        }
        Some(lhs)
    }

    /// A primary: a simple operand or a braced group.
    fn parse_atom(&mut self) -> Option<Expression<'src>> {
        match self.peek() {
            Some(token)
                if matches!(token.prec, Prec::Intern | Prec::Unary)
                    && token.kind != TokenKind::OpDot =>
            {
                self.bump();
                Some(Expression::Simple(token))
            }
            Some(token) if matches!(token.prec, Prec::Open | Prec::InvOpen) => {
                self.parse_braced(token.prec)
            }
            _ => {
                self.fail("an operand");
                None
            }
        }
    }

    /// A braced group: open token, optional inner sequence, close token.
    /// `indent`/`dedent` blocks arrive with the same precedences and parse
    /// here unchanged.
    pub(crate) fn parse_braced(&mut self, open_prec: Prec) -> Option<Expression<'src>> {
        let save = self.save();
        let what = if open_prec == Prec::InvOpen {
            "an invocation bracket"
        } else {
            "an opening bracket"
        };
        let open = Operator::bare(self.take_prec(open_prec, what)?);

        if let Some(close) = self.peek().filter(|t| t.prec == Prec::Close) {
            self.bump();
            return Some(Expression::Braced {
                open,
                mid: None,
                close,
            });
        }

        let Some(mid) = self.parse_sequence() else {
            self.restore(save);
            return None;
        };
        let Some(close) = self.take_prec(Prec::Close, "a closing bracket") else {
            self.restore(save);
            return None;
        };
        Some(Expression::Braced {
            open,
            mid: Some(Box::new(mid)),
            close,
        })
    }
}
