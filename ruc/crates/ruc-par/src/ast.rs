//! Expression AST.
//!
//! The parser produces one [`Expression`] per input; a program is usually a
//! [`Expression::Multiple`] of its statements. Nodes own their children
//! exclusively, so the tree can be traversed, transformed or dropped
//! without bookkeeping. Token text inside the tree still borrows the
//! source buffer.

use ruc_lex::{Prec, Token};

/// An operator occurrence.
///
/// Besides the operator token itself this carries an optional left operand:
/// the dotted form `a.+ b` packs `a` into the operator it qualifies, and a
/// dotted opening bracket `a.(…)` does the same for the brace. A plain
/// operator has `left: None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operator<'src> {
    /// Left operand carried by a dotted operator.
    pub left: Option<Box<Expression<'src>>>,
    /// The operator token; its `prec` matches the grammar rule that
    /// consumed it.
    pub token: Token<'src>,
}

impl<'src> Operator<'src> {
    /// An operator with no carried operand.
    pub fn bare(token: Token<'src>) -> Self {
        Self { left: None, token }
    }

    /// A dotted operator carrying its left operand.
    pub fn dotted(left: Expression<'src>, token: Token<'src>) -> Self {
        Self {
            left: Some(Box::new(left)),
            token,
        }
    }
}

/// The expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression<'src> {
    /// A single atom.
    Simple(Token<'src>),
    /// Postfix: `E op`.
    Right {
        child: Box<Expression<'src>>,
        op: Operator<'src>,
    },
    /// Prefix: `op E`.
    Left {
        op: Operator<'src>,
        child: Box<Expression<'src>>,
    },
    /// Juxtaposition: `E E'`.
    Apply {
        left: Box<Expression<'src>>,
        right: Box<Expression<'src>>,
    },
    /// Infix: `E op E'`.
    Binary {
        left: Box<Expression<'src>>,
        op: Operator<'src>,
        right: Box<Expression<'src>>,
    },
    /// `( E )`; `mid` is `None` for the empty form `()`.
    Braced {
        open: Operator<'src>,
        mid: Option<Box<Expression<'src>>>,
        close: Token<'src>,
    },
    /// `( E ) E'` — a braced head applied to an operand.
    LeftBraced {
        open: Operator<'src>,
        mid: Option<Box<Expression<'src>>>,
        close: Token<'src>,
        right: Box<Expression<'src>>,
    },
    /// `E ( E' )` — invocation.
    RightBraced {
        left: Box<Expression<'src>>,
        open: Operator<'src>,
        mid: Option<Box<Expression<'src>>>,
        close: Token<'src>,
    },
    /// `E ( E' ) E''`.
    Ternary {
        left: Box<Expression<'src>>,
        open: Operator<'src>,
        mid: Option<Box<Expression<'src>>>,
        close: Token<'src>,
        right: Box<Expression<'src>>,
    },
    /// A sequence of statements or separated expressions.
    Multiple(Vec<Expression<'src>>),
}

impl<'src> Expression<'src> {
    /// The token text when this is a simple atom.
    pub fn simple_text(&self) -> Option<&'src str> {
        match self {
            Expression::Simple(token) => Some(token.text),
            _ => None,
        }
    }

    /// True for the two bracket-headed callee shapes.
    pub fn is_braced(&self) -> bool {
        matches!(
            self,
            Expression::Braced { .. } | Expression::LeftBraced { .. }
        )
    }
}

/// Combines two juxtaposed expressions into the application shape the
/// operands call for: a tight-braced right operand is an invocation, a
/// braced left side applies to its right neighbor, an invocation gaining a
/// trailing operand becomes ternary, and anything else is a plain apply.
pub(crate) fn combine<'src>(lhs: Expression<'src>, rhs: Expression<'src>) -> Expression<'src> {
    match rhs {
        Expression::Braced { open, mid, close } if open.token.prec == Prec::InvOpen => {
            Expression::RightBraced {
                left: Box::new(lhs),
                open,
                mid,
                close,
            }
        }
        rhs => match lhs {
            Expression::Braced { open, mid, close } => Expression::LeftBraced {
                open,
                mid,
                close,
                right: Box::new(rhs),
            },
            Expression::RightBraced {
                left,
                open,
                mid,
                close,
            } => Expression::Ternary {
                left,
                open,
                mid,
                close,
                right: Box::new(rhs),
            },
            lhs => Expression::Apply {
                left: Box::new(lhs),
                right: Box::new(rhs),
            },
        },
    }
}
