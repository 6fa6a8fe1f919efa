//! Folding error tokens into diagnostics.
//!
//! The lexer never fails: malformed input becomes `error_*` tokens that ride
//! the pipeline like any other token. This module is the reporting side of
//! that contract — it turns those tokens into [`Diagnostic`]s so a caller
//! can surface every lexical problem of a compilation unit at once.

use ruc_util::{codes, Diagnostic, Handler};

use crate::token::{Token, TokenKind};

/// Builds the diagnostic for one error token. Returns `None` for ordinary
/// tokens.
pub fn diagnose(token: &Token<'_>) -> Option<Diagnostic> {
    let (code, message) = match token.kind {
        TokenKind::Error => (
            codes::E_LEX_UNEXPECTED_CHAR,
            format!("unexpected character {:?}", token.text),
        ),
        TokenKind::ErrorUnclosedString => (
            codes::E_LEX_UNCLOSED_STRING,
            "string literal is missing its closing quotes".to_string(),
        ),
        TokenKind::ErrorNameUnclosedString => (
            codes::E_LEX_UNCLOSED_NAME,
            "explicit-quoted name is missing its closing quotes".to_string(),
        ),
        TokenKind::ErrorStandaloneQuo => (
            codes::E_LEX_STANDALONE_QUOTE,
            "this quote opens neither a character nor an explicit name".to_string(),
        ),
        TokenKind::ErrorBadInt => (
            codes::E_LEX_BAD_INT,
            format!("malformed number literal {:?}", token.text),
        ),
        _ => return None,
    };
    Some(Diagnostic::error(message, token.line, token.column).with_code(code))
}

/// Collects a diagnostic for every error token in the stream.
pub fn diagnostics<'src>(tokens: impl Iterator<Item = Token<'src>>) -> Vec<Diagnostic> {
    tokens.filter_map(|t| diagnose(&t)).collect()
}

/// Reports every error token into `handler`, passing the stream through
/// otherwise untouched. Lets a caller lex, parse and collect lexical errors
/// in a single pass.
pub fn reporting<'src, 'h>(
    tokens: impl Iterator<Item = Token<'src>> + 'h,
    handler: &'h Handler,
) -> impl Iterator<Item = Token<'src>> + 'h {
    tokens.inspect(move |token| {
        if let Some(diagnostic) = diagnose(token) {
            handler.emit(diagnostic);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex;

    #[test]
    fn test_multiple_errors_per_input() {
        let diags = diagnostics(lex("\t \"unclosed"));
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].code, Some(codes::E_LEX_UNEXPECTED_CHAR));
        assert_eq!(diags[1].code, Some(codes::E_LEX_UNCLOSED_STRING));
    }

    #[test]
    fn test_positions_are_token_positions() {
        let diags = diagnostics(lex("ok '"));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, Some(codes::E_LEX_STANDALONE_QUOTE));
        assert_eq!(diags[0].line, 0);
        assert_eq!(diags[0].column, 3);
    }

    #[test]
    fn test_clean_input_has_no_diagnostics() {
        assert!(diagnostics(lex("a + b * c")).is_empty());
    }

    #[test]
    fn test_reporting_passes_tokens_through() {
        let handler = Handler::new();
        let source = "0x + 1";
        let with: Vec<_> = reporting(lex(source), &handler).collect();
        let without: Vec<_> = lex(source).collect();
        assert_eq!(with, without);
        assert!(handler.has_errors());
        assert_eq!(handler.take()[0].code, Some(codes::E_LEX_BAD_INT));
    }
}
