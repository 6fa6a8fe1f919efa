//! Edge case tests for the parser over the full lexer pipeline.

#[cfg(test)]
mod tests {
    use crate::{parse, Expression, ParseError};
    use ruc_lex::{lex, Prec, TokenKind};

    fn parsed(source: &str) -> Expression<'_> {
        parse(lex(source)).unwrap_or_else(|e| panic!("parse of {source:?} failed: {e}"))
    }

    #[test]
    fn test_edge_deeply_nested_groups() {
        let mut expr = parsed("((((x))))");
        for _ in 0..4 {
            expr = match expr {
                Expression::Braced { mid, .. } => *mid.expect("non-empty group"),
                other => panic!("expected a group, got {other:?}"),
            };
        }
        assert_eq!(expr.simple_text(), Some("x"));
    }

    #[test]
    fn test_edge_comma_level() {
        let expr = parsed("a, b, c");
        match expr {
            Expression::Binary { op, .. } => assert_eq!(op.token.kind, TokenKind::Comma),
            other => panic!("expected a comma node, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_trailing_comma_is_postfix() {
        let expr = parsed("a,");
        match expr {
            Expression::Right { op, .. } => assert_eq!(op.token.kind, TokenKind::Comma),
            other => panic!("expected postfix comma, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_pair_and_either() {
        let expr = parsed("x : int | float");
        // `|` binds tighter than `:`, so the pair is the root
        match &expr {
            Expression::Binary { op, right, .. } => {
                assert_eq!(op.token.kind, TokenKind::OpPair);
                match &**right {
                    Expression::Binary { op, .. } => {
                        assert_eq!(op.token.kind, TokenKind::OpEither);
                    }
                    other => panic!("expected `|` under `:`, got {other:?}"),
                }
            }
            other => panic!("expected a binary node, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_then_else_tiers() {
        let expr = parsed("c then a else b");
        match expr {
            Expression::Binary { op, left, .. } => {
                assert_eq!(op.token.kind, TokenKind::KwElse);
                match *left {
                    Expression::Binary { op, .. } => assert_eq!(op.token.kind, TokenKind::KwThen),
                    other => panic!("expected `then` under `else`, got {other:?}"),
                }
            }
            other => panic!("expected a binary node, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_clause_with_block_and_sequence() {
        let source = "fn f =>\n    a\n    b\ng";
        let expr = parsed(source);
        match expr {
            Expression::Multiple(items) => {
                // `fn f`, the `=>` marker, the block, then `g`
                assert_eq!(items.len(), 4);
                assert_eq!(items[1].simple_text(), Some("=>"));
                assert!(matches!(items[2], Expression::Braced { .. }));
                assert_eq!(items[3].simple_text(), Some("g"));
            }
            other => panic!("expected a sequence, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_error_tokens_parse_as_operands() {
        // lexical errors do not abort parsing
        let expr = parsed("x = 0x");
        match expr {
            Expression::Binary { right, .. } => match *right {
                Expression::Simple(token) => assert_eq!(token.kind, TokenKind::ErrorBadInt),
                other => panic!("expected the error operand, got {other:?}"),
            },
            other => panic!("expected a binary node, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_explicit_operator_is_an_operand() {
        // `'+` escapes operator status, so it applies by juxtaposition
        let expr = parsed("f '+");
        assert!(matches!(expr, Expression::Apply { .. }));
    }

    #[test]
    fn test_edge_move_marker_applies() {
        let expr = parsed("f !x");
        match expr {
            Expression::Apply { left, right } => {
                assert!(matches!(*left, Expression::Apply { .. }));
                assert_eq!(right.simple_text(), Some("x"));
            }
            other => panic!("expected apply, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_range_binds_looser_than_additive() {
        let expr = parsed("a + 1 .. b");
        match expr {
            Expression::Binary { op, .. } => assert_eq!(op.token.prec, Prec::Range),
            other => panic!("expected a binary node, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_parse_is_deterministic() {
        let source = "f(x) then (a, b) |> g else h.k\nnext";
        assert_eq!(parsed(source), parsed(source));
    }

    #[test]
    fn test_edge_only_separators() {
        assert_eq!(parsed(";;\n\n;"), Expression::Multiple(vec![]));
    }

    #[test]
    fn test_edge_chained_comparison_inside_group_fails() {
        assert!(matches!(
            parse(lex("(a == b == c)")),
            Err(ParseError::ChainedComparison { .. })
        ));
    }

    #[test]
    fn test_edge_distinct_comparisons_in_groups_pass() {
        let expr = parsed("(a == b) == c");
        match expr {
            Expression::Binary { op, .. } => assert_eq!(op.token.prec, Prec::Cmp),
            other => panic!("expected a binary node, got {other:?}"),
        }
    }
}
