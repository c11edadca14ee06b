//! Paste normalization.
//!
//! Plain pasted content gets every URL and e-mail address wrapped in an
//! anchor. Content that already carries markup is left alone, apart from
//! stripping the `<u><font color="#…">…</font></u>` wrapper some office
//! suites emit around pasted links.

use std::borrow::Cow;

use log::{debug, trace};
use memchr::memmem;

use crate::limits::MAX_PASTE_LEN;
use crate::render::HtmlWriter;
use crate::validate::{self, LinkKind};

const ARTIFACT_GUARD: &[u8] = b"<u><font color=\"";
const ARTIFACT_OPEN: &[u8] = b"<u><font color=\"#";
const ARTIFACT_CLOSE: &[u8] = b"</font></u>";

/// How the content reached the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasteMethod {
    /// Clipboard paste.
    Paste,
    /// Drag and drop.
    Drop,
    /// Copy/cut inside the same editor.
    Internal,
}

/// A paste event as the host delivers it. `data` is rewritten in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasteEvent {
    pub method: PasteMethod,
    pub data: String,
}

impl PasteEvent {
    pub fn new(method: PasteMethod, data: impl Into<String>) -> Self {
        Self {
            method,
            data: data.into(),
        }
    }
}

/// Normalize pasted content.
///
/// # Example
/// ```
/// use ferrolink::paste::normalize;
///
/// assert_eq!(
///     normalize("Visit http://x.io, thanks"),
///     "Visit <a href=\"http://x.io\">http://x.io</a>, thanks"
/// );
/// assert_eq!(
///     normalize("<u><font color=\"#0563c1\">x.io</font></u>"),
///     "x.io"
/// );
/// ```
pub fn normalize(data: &str) -> Cow<'_, str> {
    if data.len() > MAX_PASTE_LEN {
        debug!("paste of {} bytes left untouched", data.len());
        return Cow::Borrowed(data);
    }
    if has_markup(data) {
        strip_font_artifact(data)
    } else {
        linkify(data)
    }
}

/// Whether the content contains markup, raw or entity-encoded.
pub fn has_markup(data: &str) -> bool {
    if memchr::memchr(b'<', data.as_bytes()).is_some() {
        return true;
    }
    memchr::memchr(b'&', data.as_bytes()).is_some()
        && html_escape::decode_html_entities(data).contains('<')
}

/// Remove `<u><font color="#…">` openers and `</font></u>` closers.
///
/// Only runs when the content contains the artifact's opening sequence.
pub fn strip_font_artifact(data: &str) -> Cow<'_, str> {
    let bytes = data.as_bytes();
    if memmem::find(bytes, ARTIFACT_GUARD).is_none() {
        return Cow::Borrowed(data);
    }

    let mut out = String::with_capacity(data.len());
    let mut copied = 0;
    let mut pos = 0;
    while let Some(i) = memchr::memchr(b'<', &bytes[pos..]) {
        let at = pos + i;
        let skip = artifact_len(&bytes[at..]);
        if skip > 0 {
            out.push_str(&data[copied..at]);
            pos = at + skip;
            copied = pos;
        } else {
            pos = at + 1;
        }
    }
    out.push_str(&data[copied..]);

    if out.len() == data.len() {
        Cow::Borrowed(data)
    } else {
        trace!("stripped font artifact from paste");
        Cow::Owned(out)
    }
}

/// Length of an artifact tag at the start of input, 0 if there is none.
fn artifact_len(input: &[u8]) -> usize {
    if input.starts_with(ARTIFACT_CLOSE) {
        return ARTIFACT_CLOSE.len();
    }
    if !input.starts_with(ARTIFACT_OPEN) {
        return 0;
    }
    // The color value runs to the first `">` on the same line
    let rest = &input[ARTIFACT_OPEN.len()..];
    let line = memchr::memchr2(b'\n', b'\r', rest).map_or(rest, |eol| &rest[..eol]);
    match memmem::find(line, b"\">") {
        Some(end) => ARTIFACT_OPEN.len() + end + 2,
        None => 0,
    }
}

/// A URL or e-mail address found in plain content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkMatch {
    /// Byte range of the match in the scanned content.
    pub start: usize,
    pub end: usize,
    /// `None` when the match fails re-validation and stays plain text.
    pub kind: Option<LinkKind>,
}

impl LinkMatch {
    #[inline]
    pub fn as_str<'a>(&self, data: &'a str) -> &'a str {
        &data[self.start..self.end]
    }
}

/// Iterator over the link matches in plain content, in order.
///
/// # Example
/// ```
/// use ferrolink::paste::find_links;
/// use ferrolink::LinkKind;
///
/// let data = "a.io and b@c.de";
/// let found: Vec<_> = find_links(data).map(|m| (m.as_str(data), m.kind)).collect();
/// assert_eq!(
///     found,
///     [("a.io", Some(LinkKind::Url)), ("b@c.de", Some(LinkKind::Email))]
/// );
/// ```
pub fn find_links(data: &str) -> Links<'_> {
    Links { data, pos: 0 }
}

pub struct Links<'a> {
    data: &'a str,
    pos: usize,
}

impl Iterator for Links<'_> {
    type Item = LinkMatch;

    fn next(&mut self) -> Option<LinkMatch> {
        let bytes = self.data.as_bytes();
        while self.pos < bytes.len() {
            let pos = self.pos;
            if !starts_token(bytes, pos) {
                self.pos += 1;
                continue;
            }
            let Some(len) = match_len(bytes, pos) else {
                self.pos += 1;
                continue;
            };
            self.pos = pos + len;
            // Matches are ASCII, so both ends fall on char boundaries
            let kind = validate::classify(&self.data[pos..pos + len]);
            return Some(LinkMatch {
                start: pos,
                end: pos + len,
                kind,
            });
        }
        None
    }
}

/// Wrap every URL and e-mail address in plain content with an anchor.
pub fn linkify(data: &str) -> Cow<'_, str> {
    let mut writer: Option<HtmlWriter> = None;
    let mut copied = 0;

    for m in find_links(data) {
        let w = writer.get_or_insert_with(|| HtmlWriter::with_capacity_for(data.len()));
        w.write_string(&data[copied..m.start]);
        let matched = m.as_str(data);
        match m.kind {
            Some(LinkKind::Email) => w.raw_link("mailto:", matched),
            Some(LinkKind::Url) => w.raw_link("", matched),
            None => w.write_string(matched),
        }
        copied = m.end;
    }

    match writer {
        Some(mut w) => {
            w.write_string(&data[copied..]);
            Cow::Owned(w.into_string())
        }
        None => Cow::Borrowed(data),
    }
}

/// Longest e-mail or URL at `pos` that ends on a word boundary.
fn match_len(bytes: &[u8], pos: usize) -> Option<usize> {
    let email = validate::email_prefix_len(bytes, pos).unwrap_or(0);
    let url = validate::url_prefix_len(bytes, pos).unwrap_or(0);
    let len = email.max(url);
    if len == 0 || !ends_token(bytes, pos + len) {
        return None;
    }
    Some(len)
}

/// Bytes that continue a word, URL or address.
#[inline]
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || b >= 0x80
        || matches!(
            b,
            b'.' | b'-' | b'_' | b'@' | b'/' | b':' | b'%' | b'~' | b'+' | b'=' | b'&' | b'#' | b'?'
        )
}

#[inline]
fn starts_token(bytes: &[u8], pos: usize) -> bool {
    pos == 0 || !is_word_byte(bytes[pos - 1])
}

#[inline]
fn ends_token(bytes: &[u8], end: usize) -> bool {
    match bytes.get(end) {
        None => true,
        Some(&b) => !(b.is_ascii_alphanumeric() || b >= 0x80 || matches!(b, b'@' | b'_' | b'-')),
    }
}
