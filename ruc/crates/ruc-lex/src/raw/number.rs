//! Number literal rule.
//!
//! Grammar, shared by the decimal, hex (`0x`) and binary (`0b`) forms:
//!
//! ```text
//! number   = [ prefix ] groups [ "." groups? ] [ marker sign? decimals ]
//! groups   = group ( "'" group )*        group = digit ( digit | "_" )*
//! ```
//!
//! The fraction dot is not consumed when a second dot follows (`1..5` keeps
//! its range operator) and either side of the dot may be empty as long as
//! the literal contains at least one digit somewhere. The exponent marker
//! (`e`/`E` after decimals, `p`/`P` after a base prefix) is committed as
//! soon as it is seen; when no exponent digits follow, the marker stays in
//! the literal and `shift` stays zero. A base prefix with no digits at all
//! is malformed and produces an `error_bad_int` token covering the consumed
//! text.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Scans a number literal. The caller guarantees the input starts with a
/// decimal digit, or with a `.` immediately followed by one.
pub(crate) fn scan_number<'src>(cursor: &mut Cursor<'src>) -> Token<'src> {
    let start = cursor.position();
    let line = cursor.line();
    let column = cursor.column();

    let (radix, marker_lower, marker_upper, prefix_len) = if cursor.starts_with("0x")
        || cursor.starts_with("0X")
    {
        (16u32, 'p', 'P', 2usize)
    } else if cursor.starts_with("0b") || cursor.starts_with("0B") {
        (2, 'p', 'P', 2)
    } else {
        (10, 'e', 'E', 0)
    };
    for _ in 0..prefix_len {
        cursor.advance();
    }

    let mut has_digits = scan_groups(cursor, radix);

    if cursor.current_char() == '.' && cursor.nth_char(1) != '.' {
        // A dot not part of `..` belongs to the literal even when no
        // fraction digits follow (`0.` is a number, `0.+` is `0.` then `+`).
        // Without any digit before it, digits after it are what justify
        // consuming the dot at all.
        if has_digits || cursor.nth_char(1).is_digit(radix) {
            cursor.advance();
            has_digits |= scan_groups(cursor, radix);
        }
    }

    if !has_digits {
        // Only reachable behind a base prefix; bare input always has a
        // digit by the caller's guarantee.
        let mut token = Token::new(
            TokenKind::ErrorBadInt,
            cursor.slice_from(start),
            start,
            line,
            column,
        );
        token.prefix = prefix_len;
        return token;
    }

    let mut shift = 0i64;
    let c = cursor.current_char();
    if c == marker_lower || c == marker_upper {
        cursor.advance();
        let after_marker = cursor.snapshot();
        let negative = match cursor.current_char() {
            '+' => {
                cursor.advance();
                false
            }
            '-' => {
                cursor.advance();
                true
            }
            _ => false,
        };
        let mut any = false;
        let mut value = 0i64;
        while let Some(digit) = cursor.current_char().to_digit(10) {
            any = true;
            value = value.saturating_mul(10).saturating_add(digit as i64);
            cursor.advance();
        }
        if any {
            shift = if negative { value.saturating_neg() } else { value };
        } else {
            cursor.restore(after_marker);
        }
    }

    let mut token = Token::new(
        TokenKind::Number,
        cursor.slice_from(start),
        start,
        line,
        column,
    );
    token.prefix = prefix_len;
    token.shift = shift;
    token
}

/// Scans `'`-separated digit groups; underscores ride along after the first
/// digit of a group. The separator is consumed only when a digit follows,
/// so `2'a` stops after `2` with the quote untouched.
fn scan_groups(cursor: &mut Cursor<'_>, radix: u32) -> bool {
    let mut any = false;
    loop {
        if !cursor.current_char().is_digit(radix) {
            return any;
        }
        any = true;
        cursor.advance();
        cursor.advance_while(|c| c.is_digit(radix) || c == '_');

        if cursor.current_char() == '\'' && cursor.nth_char(1).is_digit(radix) {
            cursor.advance();
            continue;
        }
        return any;
    }
}
