//! URL and e-mail recognition.
//!
//! Pure byte-level matchers, no regex. Each grammar has a prefix form
//! (`*_prefix_len`: longest match starting at a position) used by the paste
//! scanner, and an anchored form (`is_valid_*`: the whole word must match)
//! used on typed words.
//!
//! URL grammar (ASCII, case-insensitive):
//!
//! ```text
//! url      = [ "http" ["s"] "://" ] host [ ":" digits ] *( "/" *path ) [ "?" *query ] [ "#" *frag ]
//! host     = 1*( label "." ) 2*alpha | 1*3digit 3( "." 1*3digit )
//! label    = alnum [ *( alnum | "-" ) alnum ]
//! path     = alnum | "-" | "%" | "_" | "." | "~" | "+"
//! query    = path | ";" | "&" | "="
//! frag     = alnum | "-" | "_"
//! ```
//!
//! E-mail grammar: `1*(alnum | "." | "_" | "-") "@" 1*(alnum | "." | "-") "." 2*alpha`.

use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::limits::MAX_WORD_LEN;

/// What a recognized word links to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Url,
    Email,
}

impl LinkKind {
    /// Build the `href` for a recognized word.
    ///
    /// E-mails get a `mailto:` scheme. Scheme-less URLs get `http://` when
    /// `append_protocol` is set.
    ///
    /// # Example
    /// ```
    /// use ferrolink::LinkKind;
    ///
    /// assert_eq!(LinkKind::Email.href("a@b.co", true), "mailto:a@b.co");
    /// assert_eq!(LinkKind::Url.href("example.com", true), "http://example.com");
    /// assert_eq!(LinkKind::Url.href("example.com", false), "example.com");
    /// assert_eq!(LinkKind::Url.href("https://x.io", true), "https://x.io");
    /// ```
    pub fn href(self, word: &str, append_protocol: bool) -> Cow<'_, str> {
        match self {
            LinkKind::Email => Cow::Owned(format!("mailto:{word}")),
            LinkKind::Url if append_protocol && scheme_len(word.as_bytes()) == 0 => {
                Cow::Owned(format!("http://{word}"))
            }
            LinkKind::Url => Cow::Borrowed(word),
        }
    }
}

/// Classify a word, preferring the e-mail form.
///
/// # Example
/// ```
/// use ferrolink::{classify, LinkKind};
///
/// assert_eq!(classify("a@b.co"), Some(LinkKind::Email));
/// assert_eq!(classify("http://example.com"), Some(LinkKind::Url));
/// assert_eq!(classify("hello"), None);
/// ```
pub fn classify(word: &str) -> Option<LinkKind> {
    if word.is_empty() || word.len() > MAX_WORD_LEN {
        return None;
    }
    if is_valid_email(word) {
        Some(LinkKind::Email)
    } else if is_valid_url(word) {
        Some(LinkKind::Url)
    } else {
        None
    }
}

/// Check if the whole word is a URL.
pub fn is_valid_url(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.len() <= MAX_WORD_LEN && url_prefix_len(bytes, 0) == Some(bytes.len())
}

/// Check if the whole word is an e-mail address.
pub fn is_valid_email(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.len() <= MAX_WORD_LEN && email_prefix_len(bytes, 0) == Some(bytes.len())
}

/// Length of the longest URL starting at `start`.
pub fn url_prefix_len(input: &[u8], start: usize) -> Option<usize> {
    let mut c = Cursor::new_at(input, start);
    if c.is_eof() {
        return None;
    }
    c.advance(scheme_len(c.remaining_slice()));

    let host = host_len(c.remaining_slice())?;
    c.advance(host);

    // Port needs at least one digit, otherwise the colon is not part of the URL
    if c.at(b':') && c.peek_ahead(1).is_some_and(|b| b.is_ascii_digit()) {
        c.bump();
        c.skip_while(|b| b.is_ascii_digit());
    }
    while c.eat(b'/') {
        c.skip_while(is_path_byte);
    }
    if c.eat(b'?') {
        c.skip_while(is_query_byte);
    }
    if c.eat(b'#') {
        c.skip_while(is_fragment_byte);
    }

    Some(c.offset() - start)
}

/// Length of the longest e-mail address starting at `start`.
pub fn email_prefix_len(input: &[u8], start: usize) -> Option<usize> {
    let mut c = Cursor::new_at(input, start);
    if c.is_eof() {
        return None;
    }
    if c.skip_while(is_local_byte) == 0 || !c.eat(b'@') {
        return None;
    }

    let domain_start = c.offset();
    let domain_len = c.skip_while(is_domain_byte);
    let domain = &input[domain_start..domain_start + domain_len];

    // The part before the final label is `1*(alnum | "." | "-")`, so any dot
    // past the first byte may end it; keep the one giving the longest match.
    let mut best = None;
    for (dot, _) in domain.iter().enumerate().filter(|(_, b)| **b == b'.') {
        if dot == 0 {
            continue;
        }
        let letters = leading_alpha(&domain[dot + 1..]);
        if letters >= 2 {
            best = Some(dot + 1 + letters);
        }
    }

    best.map(|end| domain_start + end - start)
}

/// Length of a leading `http://` or `https://`, 0 if absent.
#[inline]
fn scheme_len(input: &[u8]) -> usize {
    let mut c = Cursor::new(input);
    if c.eat_ignore_case(b"https://") || c.eat_ignore_case(b"http://") {
        c.offset()
    } else {
        0
    }
}

/// Longest host at the start of input; on a tie the hostname wins.
fn host_len(input: &[u8]) -> Option<usize> {
    match (domain_len(input), ipv4_len(input)) {
        (Some(d), Some(ip)) => Some(d.max(ip)),
        (d, ip) => d.or(ip),
    }
}

/// Longest dotted hostname ending in a 2+ letter label.
fn domain_len(input: &[u8]) -> Option<usize> {
    let run = input
        .iter()
        .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
        .count();
    let run = &input[..run];

    let mut best = None;
    let mut label_start = 0;
    let mut first = true;
    loop {
        let label_end = memchr::memchr(b'.', &run[label_start..])
            .map_or(run.len(), |i| label_start + i);
        let label = &run[label_start..label_end];

        if !first {
            let letters = leading_alpha(label);
            if letters >= 2 {
                best = Some(label_start + letters);
            }
        }
        if !is_label(label) || label_end == run.len() {
            break;
        }
        label_start = label_end + 1;
        first = false;
    }
    best
}

/// Dotted-quad numeric address with 1 to 3 digits per group.
fn ipv4_len(input: &[u8]) -> Option<usize> {
    let mut c = Cursor::new(input);
    for group in 0..4 {
        if c.skip_while_max(3, |b| b.is_ascii_digit()) == 0 {
            return None;
        }
        if group < 3 && !c.eat(b'.') {
            return None;
        }
    }
    Some(c.offset())
}

#[inline]
fn is_label(label: &[u8]) -> bool {
    match (label.first(), label.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && label.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-')
        }
        _ => false,
    }
}

#[inline]
fn leading_alpha(input: &[u8]) -> usize {
    input.iter().take_while(|b| b.is_ascii_alphabetic()).count()
}

#[inline]
fn is_path_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'%' | b'_' | b'.' | b'~' | b'+')
}

#[inline]
fn is_query_byte(b: u8) -> bool {
    is_path_byte(b) || matches!(b, b';' | b'&' | b'=')
}

#[inline]
fn is_fragment_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

#[inline]
fn is_local_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-')
}

#[inline]
fn is_domain_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'-'
}
