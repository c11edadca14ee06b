//! HTML output writer for rendered documents and pasted fragments.

use crate::escape;

/// HTML output writer with a pre-allocated, reusable buffer.
///
/// # Example
/// ```
/// use ferrolink::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.paragraph_start();
/// writer.write_escaped_text("see ");
/// writer.link_start("http://example.com");
/// writer.write_escaped_text("example");
/// writer.link_end();
/// writer.paragraph_end();
///
/// assert_eq!(
///     writer.into_string(),
///     "<p>see <a href=\"http://example.com\">example</a></p>"
/// );
/// ```
pub struct HtmlWriter {
    out: Vec<u8>,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(256),
        }
    }

    /// Create with capacity for rewriting an input of `input_len` bytes.
    ///
    /// Anchors roughly double the size of the text they wrap; most input is
    /// not wrapped, so a quarter extra is reserved.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: Vec::with_capacity(input_len + input_len / 4),
        }
    }

    /// Write a string without escaping.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.out.extend_from_slice(s.as_bytes());
    }

    /// Write text with HTML escaping (for element content).
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        escape::escape_text_into(&mut self.out, text.as_bytes());
    }

    /// Write attribute value with full escaping (including quotes).
    #[inline]
    pub fn write_escaped_attr(&mut self, attr: &str) {
        escape::escape_attr_into(&mut self.out, attr.as_bytes());
    }

    /// Write link start: `<a href="url">`
    #[inline]
    pub fn link_start(&mut self, href: &str) {
        self.write_string("<a href=\"");
        self.write_escaped_attr(href);
        self.write_string("\">");
    }

    /// Write link end: `</a>`
    #[inline]
    pub fn link_end(&mut self) {
        self.write_string("</a>");
    }

    /// Write a complete anchor around already-encoded text:
    /// `<a href="{scheme}{url}">{url}</a>`.
    ///
    /// Pasted content arrives HTML-encoded, so it is written verbatim.
    #[inline]
    pub fn raw_link(&mut self, scheme: &str, url: &str) {
        self.write_string("<a href=\"");
        self.write_string(scheme);
        self.write_string(url);
        self.write_string("\">");
        self.write_string(url);
        self.link_end();
    }

    /// Write paragraph start: `<p>`
    #[inline]
    pub fn paragraph_start(&mut self) {
        self.write_string("<p>");
    }

    /// Write paragraph end: `</p>`
    #[inline]
    pub fn paragraph_end(&mut self) {
        self.write_string("</p>");
    }

    /// Write line break: `<br>`
    #[inline]
    pub fn line_break(&mut self) {
        self.write_string("<br>");
    }

    /// Current output length.
    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Check if output is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Clear output for reuse (keeps capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.out.clear();
    }

    /// Get output as str.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: only str data and ASCII entities are ever written
        unsafe { std::str::from_utf8_unchecked(&self.out) }
    }

    /// Take ownership as String.
    #[inline]
    pub fn into_string(self) -> String {
        // SAFETY: only str data and ASCII entities are ever written
        unsafe { String::from_utf8_unchecked(self.out) }
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Write for HtmlWriter {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.write_string(s);
        Ok(())
    }
}
