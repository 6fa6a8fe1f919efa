//! Operator-keyword classification: bare operators whose spelling has a
//! dedicated syntactic role are reclassified before the generic precedence
//! classifier runs.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::token::{Prec, Token, TokenKind};

lazy_static! {
    static ref OPERATOR_KEYWORDS: FxHashMap<&'static str, (TokenKind, Prec)> = {
        use Prec::*;
        use TokenKind::*;
        let mut map = FxHashMap::default();
        map.insert(":=", (OpInit, Other));
        map.insert("=>", (OpFn, Other));
        map.insert("!", (OpMove, Intern));
        map.insert("...", (OpDots, Intern));
        map.insert("=", (OpExchange, Exchange));
        map.insert("&", (OpRef, Intern));
        map.insert(".", (OpDot, Intern));
        map.insert("|", (OpEither, Either));
        map.insert(":", (OpPair, Pair));
        map
    };
}

/// The operator-keyword stage.
pub struct OperatorKeywords<I> {
    inner: I,
}

impl<I> OperatorKeywords<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<'src, I> Iterator for OperatorKeywords<I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token = self.inner.next()?;
        if token.kind == TokenKind::Operator {
            if let Some(&(kind, prec)) = OPERATOR_KEYWORDS.get(token.text) {
                token.kind = kind;
                token.prec = prec;
            }
        }
        Some(token)
    }
}
