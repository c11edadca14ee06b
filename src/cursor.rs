//! Byte cursor for the URL and e-mail grammars.
//!
//! Words are short and bounded by `MAX_WORD_LEN`, so the cursor keeps a
//! plain index into the slice; every access is a checked `get`.

/// Forward-only cursor over a word or a paste buffer.
///
/// Offsets are absolute into the whole input, so a cursor started in the
/// middle of a paste buffer reports positions the scanner can slice with.
///
/// # Example
/// ```
/// use ferrolink::cursor::Cursor;
///
/// let mut cursor = Cursor::new(b"HTTP://example.com");
/// assert!(cursor.eat_ignore_case(b"http://"));
/// assert!(cursor.at(b'e'));
/// assert_eq!(cursor.skip_while(|b| b.is_ascii_alphabetic()), 7);
/// assert_eq!(cursor.offset(), 14);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Start at `offset`, clamped to the end of input.
    #[inline]
    pub fn new_at(input: &'a [u8], offset: usize) -> Self {
        Self {
            input,
            pos: offset.min(input.len()),
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos == self.input.len()
    }

    /// Byte `n` positions past the current one.
    #[inline]
    pub fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.input.get(self.pos.checked_add(n)?).copied()
    }

    #[inline]
    pub fn at(&self, b: u8) -> bool {
        self.peek_ahead(0) == Some(b)
    }

    /// Move forward `n` bytes, stopping at the end of input.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.input.len());
    }

    #[inline]
    pub fn bump(&mut self) {
        self.advance(1);
    }

    /// Consume `b` if it is next.
    #[inline]
    pub fn eat(&mut self, b: u8) -> bool {
        let hit = self.at(b);
        if hit {
            self.bump();
        }
        hit
    }

    /// Consume `prefix` if it is next, comparing ASCII case-insensitively.
    #[inline]
    pub fn eat_ignore_case(&mut self, prefix: &[u8]) -> bool {
        let hit = self
            .remaining_slice()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if hit {
            self.advance(prefix.len());
        }
        hit
    }

    /// Consume bytes while `predicate` holds; returns how many.
    #[inline]
    pub fn skip_while(&mut self, predicate: impl FnMut(u8) -> bool) -> usize {
        self.skip_while_max(usize::MAX, predicate)
    }

    /// Like [`skip_while`](Self::skip_while), consuming at most `max` bytes.
    #[inline]
    pub fn skip_while_max(&mut self, max: usize, mut predicate: impl FnMut(u8) -> bool) -> usize {
        let n = self
            .remaining_slice()
            .iter()
            .take(max)
            .take_while(|&&b| predicate(b))
            .count();
        self.pos += n;
        n
    }

    #[inline]
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let mut cursor = Cursor::new(b"");
        assert!(cursor.is_eof());
        assert!(!cursor.eat(b'a'));
        assert_eq!(cursor.skip_while(|_| true), 0);
    }

    #[test]
    fn test_offsets_are_absolute() {
        let mut cursor = Cursor::new_at(b"go x.io", 3);
        assert!(cursor.at(b'x'));
        cursor.advance(2);
        assert_eq!(cursor.offset(), 5);
        assert_eq!(cursor.remaining_slice(), b"io");
    }

    #[test]
    fn test_clamping() {
        let mut cursor = Cursor::new(b"abc");
        cursor.advance(usize::MAX);
        assert!(cursor.is_eof());
        assert_eq!(Cursor::new_at(b"ab", 9).offset(), 2);
        assert_eq!(Cursor::new(b"ab").peek_ahead(usize::MAX), None);
    }

    #[test]
    fn test_eat_ignore_case() {
        let mut cursor = Cursor::new(b"HttpS://x");
        assert!(!cursor.eat_ignore_case(b"http://"));
        assert!(cursor.eat_ignore_case(b"https"));
        assert!(cursor.eat(b':'));
        assert_eq!(cursor.offset(), 6);
        assert!(!cursor.eat_ignore_case(b"//x.io"));
    }

    #[test]
    fn test_skip_while_max() {
        let mut cursor = Cursor::new(b"12345.");
        assert_eq!(cursor.skip_while_max(3, |b| b.is_ascii_digit()), 3);
        assert_eq!(cursor.peek_ahead(0), Some(b'4'));
        assert_eq!(cursor.skip_while(|b| b.is_ascii_digit()), 2);
        assert!(cursor.eat(b'.'));
    }
}
