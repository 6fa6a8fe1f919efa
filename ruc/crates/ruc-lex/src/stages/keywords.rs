//! Keyword classification: identifier tokens whose text matches a reserved
//! word are reclassified with the keyword's kind and precedence band.
//!
//! Explicit-quoted identifiers (`''fn''`) still carry the `id_expl` kind at
//! this point in the pipeline, which is what lets a program use a keyword
//! spelling as a plain name.

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

use crate::token::{Prec, Token, TokenKind};

lazy_static! {
    static ref KEYWORDS: FxHashMap<&'static str, (TokenKind, Prec)> = {
        use Prec::*;
        use TokenKind::*;
        let mut map = FxHashMap::default();
        map.insert("_", (KwUnderscore, Intern));
        map.insert("and", (KwAnd, And));
        map.insert("as", (KwAs, Intern));
        map.insert("by", (KwBy, Tree));
        map.insert("class", (KwClass, While));
        map.insert("const", (KwConst, Intern));
        map.insert("else", (KwElse, Or));
        map.insert("fn", (KwFn, While));
        map.insert("for", (KwFor, And));
        map.insert("impl", (KwImpl, Intern));
        map.insert("in", (KwIn, Cmp));
        map.insert("is", (KwIs, Tree));
        map.insert("match", (KwMatch, And));
        map.insert("module", (KwModule, While));
        map.insert("mut", (KwMut, Intern));
        map.insert("not", (KwNot, Not));
        map.insert("or", (KwOr, Or));
        map.insert("out", (KwOut, Intern));
        map.insert("priv", (KwPriv, Intern));
        map.insert("prp", (KwPrp, Tree));
        map.insert("pub", (KwPub, Intern));
        map.insert("return", (KwReturn, While));
        map.insert("then", (KwThen, And));
        map.insert("trait", (KwTrait, While));
        map.insert("type", (KwType, While));
        map.insert("use", (KwUse, Intern));
        map.insert("with", (KwWith, Intern));
        map.insert("when", (KwWhen, Intern));
        map.insert("while", (KwWhile, While));
        map.insert("yield", (KwYield, While));
        map
    };
}

/// The keyword classification stage.
pub struct Keywords<I> {
    inner: I,
}

impl<I> Keywords<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<'src, I> Iterator for Keywords<I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut token = self.inner.next()?;
        if token.kind == TokenKind::Identifier {
            if let Some(&(kind, prec)) = KEYWORDS.get(token.text) {
                token.kind = kind;
                token.prec = prec;
            }
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(text: &str) -> Token<'_> {
        Token::new(TokenKind::Identifier, text, 0, 0, 0)
    }

    fn classify(text: &str) -> (TokenKind, Prec) {
        let token = Keywords::new(std::iter::once(ident(text))).next().unwrap();
        (token.kind, token.prec)
    }

    #[test]
    fn test_keyword_table_covers_thirty_words() {
        assert_eq!(KEYWORDS.len(), 30);
    }

    #[test]
    fn test_clause_keywords() {
        assert_eq!(classify("fn"), (TokenKind::KwFn, Prec::While));
        assert_eq!(classify("return"), (TokenKind::KwReturn, Prec::While));
        assert_eq!(classify("while"), (TokenKind::KwWhile, Prec::While));
        assert_eq!(classify("yield"), (TokenKind::KwYield, Prec::While));
    }

    #[test]
    fn test_boolean_keywords() {
        assert_eq!(classify("and"), (TokenKind::KwAnd, Prec::And));
        assert_eq!(classify("or"), (TokenKind::KwOr, Prec::Or));
        assert_eq!(classify("not"), (TokenKind::KwNot, Prec::Not));
        assert_eq!(classify("in"), (TokenKind::KwIn, Prec::Cmp));
    }

    #[test]
    fn test_tree_keywords() {
        assert_eq!(classify("is"), (TokenKind::KwIs, Prec::Tree));
        assert_eq!(classify("by"), (TokenKind::KwBy, Prec::Tree));
        assert_eq!(classify("prp"), (TokenKind::KwPrp, Prec::Tree));
    }

    #[test]
    fn test_qualifiers_stay_intern() {
        assert_eq!(classify("pub"), (TokenKind::KwPub, Prec::Intern));
        assert_eq!(classify("mut"), (TokenKind::KwMut, Prec::Intern));
        assert_eq!(classify("_"), (TokenKind::KwUnderscore, Prec::Intern));
    }

    #[test]
    fn test_non_keyword_passes() {
        assert_eq!(classify("fnord"), (TokenKind::Identifier, Prec::Intern));
    }

    #[test]
    fn test_explicit_spelling_is_not_classified() {
        let token = Token::new(TokenKind::IdExpl, "fn", 0, 0, 0);
        let out = Keywords::new(std::iter::once(token)).next().unwrap();
        assert_eq!(out.kind, TokenKind::IdExpl);
    }
}
