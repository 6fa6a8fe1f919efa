//! Character cursor for the raw scanner.
//!
//! Tracks a byte position together with the 0-based line and scalar-counted
//! column of that position. Columns count Unicode scalars rather than bytes
//! so that token positions are meaningful for any UTF-8 input.

/// A cursor over a UTF-8 source buffer.
///
/// # Example
///
/// ```
/// use ruc_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("ab");
/// assert_eq!(cursor.current_char(), 'a');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), 'b');
/// assert_eq!(cursor.column(), 1);
/// ```
pub struct Cursor<'src> {
    source: &'src str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Creates a cursor at the start of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            line: 0,
            column: 0,
        }
    }

    /// The scalar at the cursor, or `'\0'` at the end of input.
    #[inline]
    pub fn current_char(&self) -> char {
        self.source[self.position..].chars().next().unwrap_or('\0')
    }

    /// The `n`-th scalar after the cursor (0 = current), or `'\0'`.
    #[inline]
    pub fn nth_char(&self, n: usize) -> char {
        self.source[self.position..].chars().nth(n).unwrap_or('\0')
    }

    /// Returns true if the remaining input starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.source[self.position..].starts_with(prefix)
    }

    /// Advances over one scalar, updating line and column.
    ///
    /// A line break is `\n`, or a `\r` not followed by `\n` (the `\r` of a
    /// `\r\n` pair defers to the `\n`).
    pub fn advance(&mut self) {
        let Some(c) = self.source[self.position..].chars().next() else {
            return;
        };
        self.position += c.len_utf8();
        let breaks = c == '\n' || (c == '\r' && self.current_char() != '\n');
        if breaks {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Advances while `pred` holds for the current scalar.
    pub fn advance_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while !self.is_at_end() && pred(self.current_char()) {
            self.advance();
        }
    }

    /// Consumes `expected` if it is the current scalar.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns true at the end of the source.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Current byte position.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// 0-based line of the cursor.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 0-based column of the cursor, in Unicode scalars.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Slice of the source from `start` up to the cursor.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.position]
    }

    /// Slice of the source between byte positions.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'src str {
        &self.source[start..end]
    }

    /// The full source buffer.
    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Raw bytes of the source, for delimiter-window comparisons that must
    /// not be constrained to scalar boundaries.
    #[inline]
    pub fn bytes(&self) -> &'src [u8] {
        self.source.as_bytes()
    }

    /// Saves the cursor state.
    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Restores a previously saved state.
    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

/// A restorable cursor state.
#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    position: usize,
    line: u32,
    column: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor() {
        let cursor = Cursor::new("let x");
        assert_eq!(cursor.current_char(), 'l');
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.line(), 0);
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_advance_ascii() {
        let mut cursor = Cursor::new("abc");
        cursor.advance();
        assert_eq!(cursor.current_char(), 'b');
        cursor.advance();
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current_char(), '\0');
    }

    #[test]
    fn test_advance_utf8_columns() {
        let mut cursor = Cursor::new("αβx");
        cursor.advance();
        assert_eq!(cursor.column(), 1);
        assert_eq!(cursor.position(), 2);
        cursor.advance();
        assert_eq!(cursor.column(), 2);
        assert_eq!(cursor.current_char(), 'x');
    }

    #[test]
    fn test_line_tracking_lf() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_line_tracking_crlf_counts_once() {
        let mut cursor = Cursor::new("a\r\nb");
        cursor.advance();
        cursor.advance(); // \r defers to \n
        assert_eq!(cursor.line(), 0);
        cursor.advance(); // \n breaks
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_line_tracking_bare_cr() {
        let mut cursor = Cursor::new("a\rb");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_nth_char() {
        let cursor = Cursor::new("xyz");
        assert_eq!(cursor.nth_char(0), 'x');
        assert_eq!(cursor.nth_char(2), 'z');
        assert_eq!(cursor.nth_char(3), '\0');
    }

    #[test]
    fn test_slice_from() {
        let mut cursor = Cursor::new("hello");
        let start = cursor.position();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), "he");
    }

    #[test]
    fn test_match_char() {
        let mut cursor = Cursor::new("=>");
        assert!(cursor.match_char('='));
        assert!(!cursor.match_char('='));
        assert!(cursor.match_char('>'));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut cursor = Cursor::new("abc\ndef");
        let saved = cursor.snapshot();
        for _ in 0..5 {
            cursor.advance();
        }
        assert_eq!(cursor.line(), 1);
        cursor.restore(saved);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.line(), 0);
        assert_eq!(cursor.column(), 0);
    }

    #[test]
    fn test_advance_while() {
        let mut cursor = Cursor::new("   x");
        cursor.advance_while(|c| c == ' ');
        assert_eq!(cursor.current_char(), 'x');
        assert_eq!(cursor.column(), 3);
    }

    #[test]
    fn test_empty_source() {
        let mut cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        cursor.advance();
        assert_eq!(cursor.position(), 0);
    }
}
