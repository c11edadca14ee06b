//! HTML escaping for rendered document text and link attributes.
//!
//! Fast-path optimized: finds the first escapable byte with memchr and
//! bulk-copies the segments between escapes. Everything escaped is ASCII,
//! so the output stays valid UTF-8.

use memchr::{memchr2, memchr3};

/// Where the escaped bytes end up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Context {
    /// Element text: `<`, `>` and `&`.
    Text,
    /// Double-quoted attribute value: additionally `"` and `'`.
    Attribute,
}

/// Lookup table indexed by byte: 1 for text escapes, 2 for attribute-only.
const ESCAPE_CLASS: [u8; 256] = {
    let mut table = [0u8; 256];
    table[b'<' as usize] = 1;
    table[b'>' as usize] = 1;
    table[b'&' as usize] = 1;
    table[b'"' as usize] = 2;
    table[b'\'' as usize] = 2;
    table
};

impl Context {
    #[inline]
    fn escapes(self, b: u8) -> bool {
        match self {
            Context::Text => ESCAPE_CLASS[b as usize] == 1,
            Context::Attribute => ESCAPE_CLASS[b as usize] != 0,
        }
    }

    #[inline]
    fn first_escape(self, input: &[u8]) -> Option<usize> {
        let markup = memchr3(b'<', b'>', b'&', input);
        match self {
            Context::Text => markup,
            Context::Attribute => match (markup, memchr2(b'"', b'\'', input)) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
        }
    }
}

#[inline]
fn entity(b: u8) -> &'static [u8] {
    match b {
        b'<' => b"&lt;",
        b'>' => b"&gt;",
        b'&' => b"&amp;",
        b'"' => b"&quot;",
        b'\'' => b"&#39;",
        _ => unreachable!("byte {b:#04x} is not escapable"),
    }
}

/// Escape `input` for `context`, appending to `out`.
///
/// # Example
/// ```
/// use ferrolink::escape::{escape_into, Context};
///
/// let mut out = Vec::new();
/// escape_into(&mut out, b"a < b & \"c\"", Context::Text);
/// assert_eq!(out, b"a &lt; b &amp; \"c\"");
///
/// out.clear();
/// escape_into(&mut out, b"say \"hi\"", Context::Attribute);
/// assert_eq!(out, b"say &quot;hi&quot;");
/// ```
pub fn escape_into(out: &mut Vec<u8>, input: &[u8], context: Context) {
    let Some(first) = context.first_escape(input) else {
        out.extend_from_slice(input);
        return;
    };
    out.extend_from_slice(&input[..first]);

    let mut pos = first;
    while pos < input.len() {
        let run = pos;
        while pos < input.len() && !context.escapes(input[pos]) {
            pos += 1;
        }
        out.extend_from_slice(&input[run..pos]);
        if pos < input.len() {
            out.extend_from_slice(entity(input[pos]));
            pos += 1;
        }
    }
}

/// Escape element text.
#[inline]
pub fn escape_text_into(out: &mut Vec<u8>, input: &[u8]) {
    escape_into(out, input, Context::Text)
}

/// Escape a double-quoted attribute value.
#[inline]
pub fn escape_attr_into(out: &mut Vec<u8>, input: &[u8]) {
    escape_into(out, input, Context::Attribute)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(input: &str) -> String {
        let mut out = Vec::new();
        escape_text_into(&mut out, input.as_bytes());
        String::from_utf8(out).unwrap()
    }

    fn attr(input: &str) -> String {
        let mut out = Vec::new();
        escape_attr_into(&mut out, input.as_bytes());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_passthrough() {
        assert_eq!(text("http://example.com"), "http://example.com");
        assert_eq!(text(""), "");
    }

    #[test]
    fn test_text_markup() {
        assert_eq!(text("<script>"), "&lt;script&gt;");
        assert_eq!(text("fish & chips"), "fish &amp; chips");
        assert_eq!(text("<<<"), "&lt;&lt;&lt;");
    }

    #[test]
    fn test_text_keeps_quotes() {
        assert_eq!(text("it's \"fine\""), "it's \"fine\"");
    }

    #[test]
    fn test_attr_escapes_quotes() {
        assert_eq!(attr("http://x.io/?a=1&b=\"2\""), "http://x.io/?a=1&amp;b=&quot;2&quot;");
        assert_eq!(attr("it's"), "it&#39;s");
    }

    #[test]
    fn test_escape_at_boundaries() {
        assert_eq!(text("<"), "&lt;");
        assert_eq!(text("hello<"), "hello&lt;");
        assert_eq!(text("<hello"), "&lt;hello");
    }

    #[test]
    fn test_unicode() {
        assert_eq!(text("Grüße <b>"), "Grüße &lt;b&gt;");
    }
}
