//! In-memory editable document.
//!
//! A small arena-backed tree (root, paragraphs, text, links, line breaks)
//! that implements [`Surface`] and [`Listeners`] the way a browser-hosted
//! editor does: text offsets count characters, element offsets count
//! children, link creation splits text nodes, and link removal unwraps in
//! place without merging the resulting text nodes.
//!
//! It also provides the native editing defaults a host runs when the engine
//! does not cancel a key: inserting text, splitting a paragraph on Enter and
//! deleting backward on Backspace.

use std::borrow::Cow;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::range::{NodeId, Position, Range};
use crate::render::HtmlWriter;
use crate::surface::{EventKind, Listeners, Notification, Surface};

const ROOT: NodeId = NodeId(0);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Paragraph,
    Text(String),
    Link { href: String },
    LineBreak,
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Editable document with a selection, listener registry and notification log.
///
/// # Example
/// ```
/// use ferrolink::dom::Document;
///
/// let mut doc = Document::from_text("hello\nworld");
/// assert_eq!(doc.to_html(), "<p>hello</p><p>world</p>");
/// doc.insert_text("!").unwrap();
/// assert_eq!(doc.to_text(), "hello\nworld!");
/// ```
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    selection: Option<Range>,
    listeners: FxHashMap<EventKind, u32>,
    notifications: Vec<Notification>,
    native_autodetect: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document: one paragraph with an empty text node, caret inside.
    pub fn new() -> Self {
        let mut doc = Self::bare();
        let text = doc.push_paragraph("");
        doc.selection = Some(Range::caret(Position::start_of(text)));
        doc
    }

    /// One paragraph per line of `text`, caret at the end.
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::bare();
        let mut last = None;
        for line in text.split('\n') {
            last = Some(doc.push_paragraph(line));
        }
        if let Some(node) = last {
            let end = match &doc.nodes[node.index()].kind {
                NodeKind::Text(s) => s.chars().count(),
                _ => 0,
            };
            doc.selection = Some(Range::caret(Position::new(node, end)));
        }
        doc
    }

    fn bare() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
            selection: None,
            listeners: FxHashMap::default(),
            notifications: Vec::new(),
            native_autodetect: true,
        }
    }

    /// Append a paragraph holding `text` (a line break when empty).
    /// Returns the caret node for the new paragraph.
    fn push_paragraph(&mut self, text: &str) -> NodeId {
        let block = self.alloc(NodeKind::Paragraph);
        let len = self.nodes[ROOT.index()].children.len();
        self.insert_child(ROOT, len, block);
        // The first paragraph keeps a text node so a fresh document has a caret target
        if text.is_empty() && len > 0 {
            let br = self.alloc(NodeKind::LineBreak);
            self.insert_child(block, 0, br);
            block
        } else {
            let node = self.alloc(NodeKind::Text(text.to_owned()));
            self.insert_child(block, 0, node);
            node
        }
    }

    // --- Inspection ---

    #[inline]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(id.index()).map(|n| &n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Start of the selection.
    pub fn caret(&self) -> Option<Position> {
        self.selection.map(|r| r.start)
    }

    pub fn set_caret(&mut self, at: Position) -> Result<()> {
        self.node(at.node)?;
        self.selection = Some(Range::caret(at));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn is_listening(&self, event: EventKind) -> bool {
        self.listeners.contains_key(&event)
    }

    pub fn listener_priority(&self, event: EventKind) -> Option<u32> {
        self.listeners.get(&event).copied()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn native_autodetect(&self) -> bool {
        self.native_autodetect
    }

    /// Links in document order as `(href, text)`.
    pub fn links(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.collect_links(ROOT, &mut out);
        out
    }

    fn collect_links(&self, id: NodeId, out: &mut Vec<(String, String)>) {
        if let NodeKind::Link { href } = &self.nodes[id.index()].kind {
            out.push((href.clone(), self.text(id).into_owned()));
        }
        for &child in &self.nodes[id.index()].children {
            self.collect_links(child, out);
        }
    }

    // --- Rendering ---

    pub fn to_html(&self) -> String {
        let mut writer = HtmlWriter::new();
        self.render(ROOT, &mut writer);
        writer.into_string()
    }

    fn render(&self, id: NodeId, w: &mut HtmlWriter) {
        let node = &self.nodes[id.index()];
        match &node.kind {
            NodeKind::Root => self.render_children(node, w),
            NodeKind::Paragraph => {
                w.paragraph_start();
                self.render_children(node, w);
                w.paragraph_end();
            }
            NodeKind::Link { href } => {
                w.link_start(href);
                self.render_children(node, w);
                w.link_end();
            }
            NodeKind::Text(text) => w.write_escaped_text(text),
            NodeKind::LineBreak => w.line_break(),
        }
    }

    fn render_children(&self, node: &Node, w: &mut HtmlWriter) {
        for &child in &node.children {
            self.render(child, w);
        }
    }

    /// Plain text, one line per paragraph.
    pub fn to_text(&self) -> String {
        self.nodes[ROOT.index()]
            .children
            .iter()
            .map(|&block| self.text(block).into_owned())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // --- Native editing ---

    /// Insert text at the caret and move the caret after it.
    pub fn insert_text(&mut self, s: &str) -> Result<()> {
        let at = self.selection.ok_or(Error::NoSelection)?.start;
        let (node, offset) = self.text_position(at)?;
        let NodeKind::Text(text) = &mut self.nodes[node.index()].kind else {
            return Err(Error::NotText(node));
        };
        let byte = byte_offset(text, offset);
        text.insert_str(byte, s);
        self.selection = Some(Range::caret(Position::new(node, offset + s.chars().count())));
        Ok(())
    }

    /// Insert `text` wrapped in a link at the caret; the caret ends up after it.
    pub fn insert_link(&mut self, href: &str, text: &str) -> Result<NodeId> {
        let at = self.selection.ok_or(Error::NoSelection)?.start;
        let (node, offset) = self.text_position(at)?;
        self.selection = Some(Range::caret(Position::new(node, offset)));
        self.insert_text(text)?;
        self.selection = Some(Range::within(node, offset, offset + text.chars().count()));
        self.create_link(href).ok_or(Error::NotText(node))
    }

    /// Split the paragraph at the caret (Enter). Returns the new paragraph.
    pub fn split_block(&mut self) -> Result<NodeId> {
        let at = self.selection.ok_or(Error::NoSelection)?.start;
        let block = self.block_of(at.node).ok_or(Error::UnknownNode(at.node))?;

        let split_index = match &self.node(at.node)?.kind {
            NodeKind::Text(text) => {
                let len = text.chars().count();
                let (parent, index) = self.index_in_parent(at.node).ok_or(Error::UnknownNode(at.node))?;
                if parent != block {
                    self.top_level_index(block, at.node) + 1
                } else if at.offset == 0 {
                    index
                } else if at.offset >= len {
                    index + 1
                } else {
                    let tail = self.split_text(at.node, at.offset);
                    self.insert_child(block, index + 1, tail);
                    index + 1
                }
            }
            NodeKind::Paragraph if at.node == block => at.offset.min(self.children(block).len()),
            _ => self.top_level_index(block, at.node) + 1,
        };

        let moved: Vec<NodeId> = self.nodes[block.index()].children.drain(split_index..).collect();
        let new_block = self.alloc(NodeKind::Paragraph);
        let (_, block_index) = self.index_in_parent(block).ok_or(Error::UnknownNode(block))?;
        self.insert_child(ROOT, block_index + 1, new_block);
        for node in moved {
            self.nodes[node.index()].parent = Some(new_block);
            self.nodes[new_block.index()].children.push(node);
        }
        self.ensure_placeholder(block);
        self.ensure_placeholder(new_block);

        self.selection = Some(Range::caret(Position::start_of(new_block)));
        Ok(new_block)
    }

    /// Delete the character before the caret (Backspace), merging with the
    /// previous paragraph at the start of a paragraph.
    pub fn delete_backward(&mut self) -> Result<()> {
        let at = self.selection.ok_or(Error::NoSelection)?.start;
        let block = self.block_of(at.node).ok_or(Error::UnknownNode(at.node))?;

        if let NodeKind::Text(text) = &mut self.node_mut(at.node)?.kind {
            if at.offset > 0 {
                let from = byte_offset(text, at.offset - 1);
                let to = byte_offset(text, at.offset);
                text.replace_range(from..to, "");
                self.selection = Some(Range::caret(Position::new(at.node, at.offset - 1)));
                return Ok(());
            }
        }

        let mut leaf = self.leaf_before(block, at);
        while let Some(node) = leaf {
            let len = self.text_len(node);
            if len > 0 {
                if let NodeKind::Text(text) = &mut self.nodes[node.index()].kind {
                    let from = byte_offset(text, len - 1);
                    text.truncate(from);
                }
                self.selection = Some(Range::caret(Position::new(node, len - 1)));
                return Ok(());
            }
            if matches!(self.nodes[node.index()].kind, NodeKind::LineBreak) {
                self.detach_node(node);
                return Ok(());
            }
            leaf = self.previous_leaf(block, node);
        }

        self.merge_into_previous(block);
        Ok(())
    }

    fn merge_into_previous(&mut self, block: NodeId) {
        let Some(previous) = self.previous_sibling(block) else {
            return;
        };
        self.drop_placeholder(previous);
        self.drop_placeholder(block);

        let caret = match self.children(previous).last() {
            Some(&last) if matches!(self.nodes[last.index()].kind, NodeKind::Text(_)) => {
                Position::new(last, self.text_len(last))
            }
            _ => Position::new(previous, self.children(previous).len()),
        };

        let moved = std::mem::take(&mut self.nodes[block.index()].children);
        for node in moved {
            self.nodes[node.index()].parent = Some(previous);
            self.nodes[previous.index()].children.push(node);
        }
        self.ensure_placeholder(previous);
        self.detach_node(block);
        self.selection = Some(Range::caret(caret));
    }

    // --- Tree plumbing ---

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.index()).ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(Error::UnknownNode(id))
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        let children = &mut self.nodes[parent.index()].children;
        let index = index.min(children.len());
        children.insert(index, child);
    }

    /// Remove a node from its parent; it stays in the arena, unreachable.
    fn detach_node(&mut self, id: NodeId) {
        if let Some((parent, index)) = self.index_in_parent(id) {
            self.nodes[parent.index()].children.remove(index);
            self.nodes[id.index()].parent = None;
        }
    }

    fn index_in_parent(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.nodes.get(id.index())?.parent?;
        let index = self.nodes[parent.index()]
            .children
            .iter()
            .position(|&c| c == id)?;
        Some((parent, index))
    }

    fn block_of(&self, id: NodeId) -> Option<NodeId> {
        let mut node = Some(id);
        while let Some(current) = node {
            match self.nodes.get(current.index())?.kind {
                NodeKind::Paragraph => return Some(current),
                // A caret on the root itself resolves to the block under it
                NodeKind::Root => return self.nodes[ROOT.index()].children.first().copied(),
                _ => node = self.nodes[current.index()].parent,
            }
        }
        None
    }

    /// Index of the child of `block` that contains `id`.
    fn top_level_index(&self, block: NodeId, id: NodeId) -> usize {
        let mut node = id;
        while let Some(parent) = self.nodes[node.index()].parent {
            if parent == block {
                break;
            }
            node = parent;
        }
        self.children(block)
            .iter()
            .position(|&c| c == node)
            .unwrap_or(0)
    }

    fn text_len(&self, id: NodeId) -> usize {
        match &self.nodes[id.index()].kind {
            NodeKind::Text(text) => text.chars().count(),
            _ => 0,
        }
    }

    /// Cut a text node at a character offset; returns the detached tail.
    fn split_text(&mut self, id: NodeId, offset: usize) -> NodeId {
        let tail = match &mut self.nodes[id.index()].kind {
            NodeKind::Text(text) => {
                let byte = byte_offset(text, offset);
                text.split_off(byte)
            }
            _ => String::new(),
        };
        self.alloc(NodeKind::Text(tail))
    }

    /// Resolve a position to a text node, creating one if the caret sits
    /// between elements.
    fn text_position(&mut self, at: Position) -> Result<(NodeId, usize)> {
        let node = self.node(at.node)?;
        match &node.kind {
            NodeKind::Text(text) => {
                let len = text.chars().count();
                if at.offset > len {
                    return Err(Error::OffsetOutOfBounds {
                        node: at.node,
                        offset: at.offset,
                        len,
                    });
                }
                Ok((at.node, at.offset))
            }
            NodeKind::LineBreak => {
                let (parent, index) = self.index_in_parent(at.node).ok_or(Error::UnknownNode(at.node))?;
                self.text_position(Position::new(parent, index))
            }
            NodeKind::Root => {
                let block = self.block_of(ROOT).ok_or(Error::UnknownNode(ROOT))?;
                self.text_position(Position::start_of(block))
            }
            NodeKind::Paragraph | NodeKind::Link { .. } => {
                let children = &node.children;
                if at.offset > children.len() {
                    return Err(Error::OffsetOutOfBounds {
                        node: at.node,
                        offset: at.offset,
                        len: children.len(),
                    });
                }
                let is_text = |id: &NodeId| matches!(self.nodes[id.index()].kind, NodeKind::Text(_));
                if let Some(&child) = children.get(at.offset).filter(|c| is_text(c)) {
                    return Ok((child, 0));
                }
                if let Some(&child) = at.offset.checked_sub(1).and_then(|i| children.get(i)).filter(|c| is_text(c)) {
                    return Ok((child, self.text_len(child)));
                }

                let parent = at.node;
                let placeholder = children.len() == 1
                    && matches!(self.nodes[children[0].index()].kind, NodeKind::LineBreak);
                let text = self.alloc(NodeKind::Text(String::new()));
                if placeholder {
                    let br = self.nodes[parent.index()].children[0];
                    self.detach_node(br);
                    self.insert_child(parent, 0, text);
                } else {
                    self.insert_child(parent, at.offset, text);
                }
                Ok((text, 0))
            }
        }
    }

    /// Empty paragraphs hold a `<br>` so they keep their height.
    fn ensure_placeholder(&mut self, block: NodeId) {
        if self.nodes[block.index()].children.is_empty() {
            let br = self.alloc(NodeKind::LineBreak);
            self.insert_child(block, 0, br);
        }
    }

    fn drop_placeholder(&mut self, block: NodeId) {
        let children = &self.nodes[block.index()].children;
        if children.len() == 1 && matches!(self.nodes[children[0].index()].kind, NodeKind::LineBreak) {
            let br = children[0];
            self.detach_node(br);
        }
    }

    fn last_leaf(&self, id: NodeId) -> NodeId {
        let mut node = id;
        while let Some(&last) = self.nodes[node.index()].children.last() {
            node = last;
        }
        node
    }

    /// Leaf preceding `id` in document order, staying inside `block`.
    fn previous_leaf(&self, block: NodeId, id: NodeId) -> Option<NodeId> {
        let mut node = id;
        loop {
            if node == block {
                return None;
            }
            if let Some(previous) = self.previous_sibling(node) {
                return Some(self.last_leaf(previous));
            }
            node = self.nodes[node.index()].parent?;
        }
    }

    /// Leaf right before a caret position, staying inside `block`.
    fn leaf_before(&self, block: NodeId, at: Position) -> Option<NodeId> {
        match self.nodes[at.node.index()].kind {
            NodeKind::Text(_) | NodeKind::LineBreak => self.previous_leaf(block, at.node),
            _ => match at.offset.checked_sub(1).and_then(|i| self.children(at.node).get(i)) {
                Some(&child) => Some(self.last_leaf(child)),
                None => self.previous_leaf(block, at.node),
            },
        }
    }

    fn has_link_ancestor(&self, id: NodeId) -> bool {
        let mut node = Some(id);
        while let Some(current) = node {
            if matches!(self.nodes[current.index()].kind, NodeKind::Link { .. }) {
                return true;
            }
            node = self.nodes[current.index()].parent;
        }
        false
    }

    fn unwrap(&mut self, link: NodeId) {
        let Some((parent, index)) = self.index_in_parent(link) else {
            return;
        };
        let children = std::mem::take(&mut self.nodes[link.index()].children);
        for &child in &children {
            self.nodes[child.index()].parent = Some(parent);
        }
        let first = children.first().copied();
        self.nodes[parent.index()]
            .children
            .splice(index..=index, children);
        self.nodes[link.index()].parent = None;

        let caret = match first {
            Some(node) => Position::start_of(node),
            None => Position::new(parent, index),
        };
        self.selection = Some(Range::caret(caret));
    }
}

impl Surface for Document {
    fn selection(&self) -> Option<Range> {
        self.selection
    }

    fn select(&mut self, range: Range) {
        self.selection = Some(range);
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (parent, index) = self.index_in_parent(node)?;
        index
            .checked_sub(1)
            .map(|i| self.nodes[parent.index()].children[i])
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (parent, index) = self.index_in_parent(node)?;
        self.nodes[parent.index()].children.get(index + 1).copied()
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).last().copied()
    }

    fn is_container(&self, node: NodeId) -> bool {
        matches!(
            self.kind(node),
            Some(NodeKind::Root | NodeKind::Paragraph | NodeKind::Link { .. })
        )
    }

    fn text(&self, node: NodeId) -> Cow<'_, str> {
        match self.kind(node) {
            Some(NodeKind::Text(text)) => Cow::Borrowed(text.as_str()),
            Some(NodeKind::LineBreak) | None => Cow::Borrowed(""),
            Some(_) => {
                let mut out = String::new();
                for &child in self.children(node) {
                    out.push_str(&self.text(child));
                }
                Cow::Owned(out)
            }
        }
    }

    fn is_link(&self, node: NodeId) -> bool {
        matches!(self.kind(node), Some(NodeKind::Link { .. }))
    }

    fn create_link(&mut self, href: &str) -> Option<NodeId> {
        let range = self.selection?;
        let node = range.start.node;
        let (start, end) = (range.start.offset, range.end.offset);
        if !range.is_single_node() || start >= end || end > self.text_len(node) {
            return None;
        }
        if !matches!(self.kind(node), Some(NodeKind::Text(_))) || self.has_link_ancestor(node) {
            return None;
        }
        let (parent, index) = self.index_in_parent(node)?;

        if end < self.text_len(node) {
            let tail = self.split_text(node, end);
            self.insert_child(parent, index + 1, tail);
        }

        let link = self.alloc(NodeKind::Link {
            href: href.to_owned(),
        });
        if start == 0 {
            self.nodes[parent.index()].children[index] = link;
            self.nodes[link.index()].parent = Some(parent);
            self.insert_child(link, 0, node);
        } else {
            let word = self.split_text(node, start);
            self.insert_child(parent, index + 1, link);
            self.insert_child(link, 0, word);
        }

        let caret = match self.next_sibling(link) {
            Some(next) if matches!(self.nodes[next.index()].kind, NodeKind::Text(_)) => {
                Position::start_of(next)
            }
            _ => {
                let (parent, index) = self.index_in_parent(link)?;
                Position::new(parent, index + 1)
            }
        };
        self.selection = Some(Range::caret(caret));
        Some(link)
    }

    fn remove_link(&mut self) {
        let Some(range) = self.selection else {
            return;
        };
        let mut node = Some(range.start.node);
        while let Some(current) = node {
            if self.is_link(current) {
                self.unwrap(current);
                return;
            }
            node = self.parent(current);
        }
    }

    fn next_editable_node(&self, range: &Range) -> Option<NodeId> {
        let mut block = self.block_of(range.start.node)?;
        while let Some(next) = self.next_sibling(block) {
            if matches!(self.nodes[next.index()].kind, NodeKind::Paragraph) {
                return Some(next);
            }
            block = next;
        }
        None
    }

    fn enclosing_node(&self, range: &Range) -> Option<NodeId> {
        let at = range.start;
        match self.kind(at.node)? {
            NodeKind::Text(_) => Some(at.node),
            _ => self
                .children(at.node)
                .get(at.offset)
                .copied()
                .filter(|&c| matches!(self.nodes[c.index()].kind, NodeKind::Text(_))),
        }
    }

    fn position_after(&self, node: NodeId) -> Option<Position> {
        let (parent, index) = self.index_in_parent(node)?;
        Some(Position::new(parent, index + 1))
    }

    fn set_native_autodetect(&mut self, enabled: bool) {
        self.native_autodetect = enabled;
    }
}

impl Listeners for Document {
    fn attach(&mut self, event: EventKind, priority: u32) {
        self.listeners.insert(event, priority);
    }

    fn detach(&mut self, event: EventKind) {
        self.listeners.remove(&event);
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}

/// Byte index of the `n`th character, or the length if past the end.
#[inline]
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document() {
        let doc = Document::new();
        assert_eq!(doc.to_html(), "<p></p>");
        assert!(doc.caret().is_some());
        assert!(doc.native_autodetect());
    }

    #[test]
    fn test_from_text_empty_line() {
        let doc = Document::from_text("a\n\nb");
        assert_eq!(doc.to_html(), "<p>a</p><p><br></p><p>b</p>");
        assert_eq!(doc.to_text(), "a\n\nb");
    }

    #[test]
    fn test_insert_text_unicode() {
        let mut doc = Document::new();
        doc.insert_text("héllo").unwrap();
        let caret = doc.caret().unwrap();
        assert_eq!(caret.offset, 5);
        doc.insert_text("!").unwrap();
        assert_eq!(doc.to_text(), "héllo!");
    }

    #[test]
    fn test_split_block_at_end() {
        let mut doc = Document::new();
        doc.insert_text("one").unwrap();
        let block = doc.split_block().unwrap();
        assert_eq!(doc.to_html(), "<p>one</p><p><br></p>");
        assert_eq!(doc.caret(), Some(Position::start_of(block)));
        doc.insert_text("two").unwrap();
        assert_eq!(doc.to_html(), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_split_block_mid_text() {
        let mut doc = Document::new();
        doc.insert_text("onetwo").unwrap();
        let text = doc.caret().unwrap().node;
        doc.set_caret(Position::new(text, 3)).unwrap();
        doc.split_block().unwrap();
        assert_eq!(doc.to_html(), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_delete_backward() {
        let mut doc = Document::new();
        doc.insert_text("ab").unwrap();
        doc.delete_backward().unwrap();
        assert_eq!(doc.to_text(), "a");
    }

    #[test]
    fn test_delete_backward_merges_blocks() {
        let mut doc = Document::new();
        doc.insert_text("one").unwrap();
        doc.split_block().unwrap();
        doc.delete_backward().unwrap();
        assert_eq!(doc.to_html(), "<p>one</p>");
        doc.insert_text("!").unwrap();
        assert_eq!(doc.to_html(), "<p>one!</p>");
    }

    #[test]
    fn test_create_and_remove_link() {
        let mut doc = Document::new();
        doc.insert_text("go x.io now").unwrap();
        let text = doc.caret().unwrap().node;
        doc.select(Range::within(text, 3, 7));
        let link = doc.create_link("http://x.io").unwrap();
        assert_eq!(doc.to_html(), "<p>go <a href=\"http://x.io\">x.io</a> now</p>");
        assert_eq!(doc.next_sibling(text), Some(link));

        let end = doc.position_after(link).unwrap();
        doc.select(Range::new(Position::start_of(link), end));
        doc.remove_link();
        assert_eq!(doc.to_html(), "<p>go x.io now</p>");
        assert!(doc.links().is_empty());
    }

    #[test]
    fn test_create_link_whole_text() {
        let mut doc = Document::new();
        doc.insert_text("x.io").unwrap();
        let text = doc.caret().unwrap().node;
        doc.select(Range::within(text, 0, 4));
        let link = doc.create_link("x.io").unwrap();
        assert_eq!(doc.parent(text), Some(link));
        assert_eq!(doc.next_sibling(text), None);
    }

    #[test]
    fn test_no_nested_links() {
        let mut doc = Document::new();
        doc.insert_text("x.io").unwrap();
        let text = doc.caret().unwrap().node;
        doc.select(Range::within(text, 0, 4));
        doc.create_link("x.io").unwrap();
        doc.select(Range::within(text, 0, 2));
        assert_eq!(doc.create_link("x"), None);
    }

    #[test]
    fn test_insert_link_then_text() {
        let mut doc = Document::new();
        doc.insert_text("mail ").unwrap();
        doc.insert_link("mailto:a@b.co", "a@b.co").unwrap();
        doc.insert_text(" now").unwrap();
        assert_eq!(
            doc.to_html(),
            "<p>mail <a href=\"mailto:a@b.co\">a@b.co</a> now</p>"
        );
        assert_eq!(doc.links(), [("mailto:a@b.co".to_owned(), "a@b.co".to_owned())]);
    }

    #[test]
    fn test_listeners() {
        let mut doc = Document::new();
        doc.attach(EventKind::KeyDown, 1);
        assert_eq!(doc.listener_priority(EventKind::KeyDown), Some(1));
        doc.detach(EventKind::KeyDown);
        doc.detach(EventKind::KeyDown);
        assert!(!doc.is_listening(EventKind::KeyDown));
    }

    #[test]
    fn test_escaped_render() {
        let doc = Document::from_text("a < b");
        assert_eq!(doc.to_html(), "<p>a &lt; b</p>");
    }
}
