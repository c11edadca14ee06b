//! Recover the word the user just finished typing.
//!
//! After a delimiter key the word sits right before the caret, minus the
//! delimiter itself. After Enter the caret has moved into a fresh block, so
//! the word is the tail of the previous block.

use log::trace;

use crate::key::KeyCode;
use crate::limits::{MAX_DESCENT, MAX_SIBLING_WALK};
use crate::range::{NodeId, Range};
use crate::surface::Surface;

/// Where the extracted word ends: a text node and a character offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaretAnchor {
    pub node: NodeId,
    pub offset: usize,
}

/// Word found before the caret, with the anchor it was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractionResult {
    pub word: String,
    /// `None` when no text node was found upstream.
    pub anchor: Option<CaretAnchor>,
    pub key: KeyCode,
}

impl ExtractionResult {
    fn empty(key: KeyCode) -> Self {
        Self {
            word: String::new(),
            anchor: None,
            key,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Extract the last word before the caret.
///
/// Returns `None` when there is nothing to work on: no selection, or the
/// word after Enter is already a link.
pub fn extract<S: Surface + ?Sized>(surface: &S, key: KeyCode) -> Option<ExtractionResult> {
    let Some(range) = surface.selection() else {
        trace!("no selection, nothing to extract");
        return None;
    };

    if key == KeyCode::Enter {
        extract_after_enter(surface, &range)
    } else {
        Some(extract_before_delimiter(surface, &range, key))
    }
}

fn extract_before_delimiter<S: Surface + ?Sized>(
    surface: &S,
    range: &Range,
    key: KeyCode,
) -> ExtractionResult {
    let node = range.start.node;
    // Last character is the delimiter
    let Some(offset) = range.start.offset.checked_sub(1) else {
        return ExtractionResult::empty(key);
    };

    let text = surface.text(node);
    ExtractionResult {
        word: last_word(prefix_chars(&text, offset)).to_owned(),
        anchor: Some(CaretAnchor { node, offset }),
        key,
    }
}

fn extract_after_enter<S: Surface + ?Sized>(surface: &S, range: &Range) -> Option<ExtractionResult> {
    let mut previous = surface.previous_sibling(range.start.node);
    let mut steps = 0;
    // Skip whitespace text and line breaks sitting between blocks
    while let Some(node) = previous {
        if surface.is_container(node) {
            break;
        }
        steps += 1;
        if steps > MAX_SIBLING_WALK {
            previous = None;
            break;
        }
        previous = surface.previous_sibling(node);
    }

    let Some(block) = previous else {
        return Some(ExtractionResult::empty(KeyCode::Enter));
    };

    match last_text_node(surface, block) {
        Upstream::Link(link) => {
            trace!("previous block already ends in link {link}");
            None
        }
        Upstream::Text(node) => {
            let text = surface.text(node);
            Some(ExtractionResult {
                word: last_word(&text).to_owned(),
                anchor: Some(CaretAnchor {
                    node,
                    offset: text.chars().count(),
                }),
                key: KeyCode::Enter,
            })
        }
        Upstream::Nothing => Some(ExtractionResult::empty(KeyCode::Enter)),
    }
}

enum Upstream {
    Text(NodeId),
    Link(NodeId),
    Nothing,
}

/// Last node carrying text inside a block, descending through inline
/// elements and skipping textless trailing nodes such as `<br>`.
fn last_text_node<S: Surface + ?Sized>(surface: &S, block: NodeId) -> Upstream {
    let mut node = surface.last_child(block);
    let mut steps = 0;
    let mut depth = 0;

    while let Some(current) = node {
        if surface.text(current).is_empty() {
            steps += 1;
            if steps > MAX_SIBLING_WALK {
                break;
            }
            node = surface.previous_sibling(current);
        } else if surface.is_link(current) {
            return Upstream::Link(current);
        } else if surface.is_container(current) {
            depth += 1;
            if depth > MAX_DESCENT {
                break;
            }
            node = surface.last_child(current);
        } else {
            return Upstream::Text(current);
        }
    }
    Upstream::Nothing
}

/// Whitespace as a contenteditable surface produces it, including no-break
/// spaces and the zero-width no-break space browsers insert as filler.
#[inline]
pub fn is_word_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Last maximal run of non-whitespace characters.
///
/// # Example
/// ```
/// use ferrolink::extract::last_word;
///
/// assert_eq!(last_word("see http://example.com"), "http://example.com");
/// assert_eq!(last_word("trailing   "), "trailing");
/// assert_eq!(last_word(" \t "), "");
/// ```
pub fn last_word(source: &str) -> &str {
    let trimmed = source.trim_end_matches(is_word_space);
    match trimmed.rfind(is_word_space) {
        Some(i) => {
            // Skip the whitespace character itself, which may be multi-byte
            let ws_len = trimmed[i..].chars().next().map_or(1, char::len_utf8);
            &trimmed[i + ws_len..]
        }
        None => trimmed,
    }
}

/// First `n` characters of `text`.
#[inline]
fn prefix_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
