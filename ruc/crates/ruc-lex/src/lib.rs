//! ruc-lex - Lexical analyzer for the Ru language.
//!
//! The lexer is a chain of lazy stream transformations. The raw scanner
//! cuts the byte stream into tokens; every later stage is an iterator
//! adaptor that reclassifies, splits, fuses or annotates tokens as they
//! flow past, with at most one token of private state (the indentation
//! resolver additionally keeps its stack of widths):
//!
//! ```text
//! source text
//!   → raw scanner          symbols, comments, newlines+indent runs,
//!                          numbers, strings, names, quote runs, operators
//!   → keywords             identifier → kw_* where the spelling is reserved
//!   → dot split (right)    `!.`  → `!` `.`
//!   → dot split (left)     `.+`  → `.` `+`
//!   → operator keywords    `:=` `=>` `!` `...` `=` `&` `.` `|` `:`
//!   → fusion               `!`+`in` → `not_in` when adjacent
//!   → precedence           bands for bare operators, from spelling alone
//!   → indentation          newline → indent/dedent/newline via width stack
//!   → quote normalization  id_expl → identifier, op_expl → operator
//!   → invocation inference `f(` call brace, `a?` tight operand
//!   → tokens
//! ```
//!
//! The pipeline never fails. Malformed input surfaces as `error_*` tokens
//! that downstream stages pass through untouched; [`report::diagnostics`]
//! turns them into diagnostics when a caller wants messages instead of
//! tokens.
//!
//! All token text is zero-copy: slices of the input buffer, valid for as
//! long as the buffer lives.
//!
//! # Example
//!
//! ```
//! use ruc_lex::{lex, TokenKind};
//!
//! let kinds: Vec<_> = lex("a + b").map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Newline,
//!         TokenKind::Identifier,
//!         TokenKind::Operator,
//!         TokenKind::Identifier,
//!         TokenKind::Newline,
//!     ]
//! );
//! ```

pub mod cursor;
pub mod indent;
pub mod precedence;
pub mod raw;
pub mod report;
pub mod stages;
pub mod token;
pub mod unicode;

mod edge_cases;

pub use raw::RawScanner;
pub use token::{associativity, unary_side, Dir, Prec, Token, TokenKind};

/// Lexes `source` into the refined token stream.
///
/// The stream always begins with a newline token carrying the first line's
/// indent and ends with exactly one newline token; iterator exhaustion is
/// the end-of-input marker.
pub fn lex(source: &str) -> impl Iterator<Item = Token<'_>> {
    let tokens = RawScanner::new(source);
    let tokens = stages::Keywords::new(tokens);
    let tokens = stages::DotSplit::at_right(tokens);
    let tokens = stages::DotSplit::at_left(tokens);
    let tokens = stages::OperatorKeywords::new(tokens);
    let tokens = stages::Fuse::new(
        tokens,
        source,
        TokenKind::OpMove,
        TokenKind::KwIn,
        TokenKind::NotIn,
    );
    let tokens = precedence::Precedence::new(tokens);
    let tokens = indent::Indents::new(tokens);
    let tokens = stages::Noexpl::new(tokens);
    stages::Invoke::new(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenKind::*;

    fn lexed(source: &str) -> Vec<(TokenKind, &str)> {
        lex(source).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_strings_in_row() {
        assert_eq!(
            lexed(r#""""abc""""iu""""#),
            vec![
                (Newline, ""),
                (String, r#""""abc""""#),
                (String, r#""iu""#),
                (String, r#""""#),
                (Newline, ""),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lexed("22_222_-22_222      -0.+0   .f 0x.3dp+0 0.0e-x"),
            vec![
                (Newline, ""),
                (Number, "22_222_"),
                (Operator, "-"),
                (Number, "22_222"),
                (Operator, "-"),
                (Number, "0."),
                (Operator, "+"),
                (Number, "0"),
                (OpDot, "."),
                (Identifier, "f"),
                (Number, "0x.3dp+0"),
                (Number, "0.0e"),
                (Operator, "-"),
                (Identifier, "x"),
                (Newline, ""),
            ]
        );
    }

    #[test]
    fn test_multiline_indentation() {
        assert_eq!(
            lexed("( ##abc\r    qwerty\n     :=\r\n##kuk\n\n\n. !. .!."),
            vec![
                (Newline, ""),
                (BrOpen, "("),
                (Indent, "    "),
                (Identifier, "qwerty"),
                (Newline, "     "),
                (OpInit, ":="),
                (Dedent, ""),
                (Newline, ""),
                (OpDot, "."),
                (OpMove, "!"),
                (OpDot, "."),
                (Operator, ".!."),
                (Newline, ""),
            ]
        );
    }

    #[test]
    fn test_quotes() {
        assert_eq!(
            lexed(
                r#"'1'2'a+-''123''''' ''''1234543215'''''{/}english or spanish... '... ##end"#
            ),
            vec![
                (Newline, ""),
                (Character, "1"),
                (Number, "2"),
                (Operator, "a+-"),
                (Identifier, "123"),
                (Character, "'"),
                (Identifier, "1234543215"),
                (ErrorStandaloneQuo, "'"),
                (BrCurOpen, "{"),
                (Operator, "/"),
                (BrCurClose, "}"),
                (Identifier, "english"),
                (KwOr, "or"),
                (Identifier, "spanish"),
                (OpDots, "..."),
                (Operator, "..."),
                (Newline, ""),
            ]
        );
    }

    #[test]
    fn test_explicit_operator_stays_operand_like() {
        // `'...` escapes the op_dots classification and the band refinement
        let tokens: Vec<_> = lex("'...").collect();
        let explicit = tokens[1];
        assert_eq!(explicit.kind, Operator);
        assert_eq!(explicit.prec, Prec::Intern);
        assert_eq!(explicit.shift, 1);
    }

    #[test]
    fn test_not_in_fusion() {
        let tokens: Vec<_> = lex("a !in b").collect();
        let fused = tokens[2];
        assert_eq!(fused.kind, NotIn);
        assert_eq!(fused.text, "!in");
        assert_eq!(fused.prec, Prec::Cmp);
        assert_eq!(fused.prefix, 1);

        // separated pair stays two tokens
        let tokens: Vec<_> = lex("a ! in b").collect();
        assert_eq!(tokens[2].kind, OpMove);
        assert_eq!(tokens[3].kind, KwIn);
    }

    #[test]
    fn test_invocation_vs_grouping() {
        let tokens: Vec<_> = lex("f(x) g (y)").collect();
        let call = tokens.iter().find(|t| t.text == "(" && t.offset == 1).unwrap();
        assert_eq!(call.prec, Prec::InvOpen);
        let group = tokens.iter().find(|t| t.text == "(" && t.offset > 5).unwrap();
        assert_eq!(group.prec, Prec::Open);
    }

    #[test]
    fn test_keywords_and_operators_mix() {
        let kinds: Vec<_> = lex("fn f => return not a and b").map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                Newline, KwFn, Identifier, OpFn, KwReturn, KwNot, Identifier, KwAnd, Identifier,
                Newline,
            ]
        );
    }

    #[test]
    fn test_exchange_opens_block() {
        assert_eq!(
            lexed("f =\n    x"),
            vec![
                (Newline, ""),
                (Identifier, "f"),
                (OpExchange, "="),
                (Indent, "    "),
                (Identifier, "x"),
                (Dedent, ""),
                (Newline, ""),
            ]
        );
    }

    #[test]
    fn test_pipeline_is_deterministic() {
        let source = "fn f(x) =>\n    x ** 2 ## comment\n'...";
        let first: Vec<_> = lex(source).collect();
        let second: Vec<_> = lex(source).collect();
        assert_eq!(first, second);
    }
}
