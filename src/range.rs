//! Node-relative positions and ranges on an editable surface.
//!
//! A position is a `(node, offset)` pair resolved by the host surface:
//! offsets count characters inside text nodes and children inside
//! elements, the same convention DOM ranges use.

use std::fmt;

/// Opaque handle to a node of the editable surface.
///
/// The engine never dereferences it; only the host surface knows what a
/// `NodeId` points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Index form, for arena-backed hosts.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Create from an arena index.
    ///
    /// # Panics
    /// Panics in debug mode if the index exceeds u32::MAX.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize);
        Self(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A point inside the surface: a container node and an offset into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub node: NodeId,
    pub offset: usize,
}

impl Position {
    #[inline]
    pub const fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }

    /// Position at the very start of a node.
    #[inline]
    pub const fn start_of(node: NodeId) -> Self {
        Self { node, offset: 0 }
    }
}

/// A selection or insertion point: a `(start, end)` pair of positions.
///
/// # Example
/// ```
/// use ferrolink::{NodeId, Position, Range};
///
/// let text = NodeId(3);
/// let range = Range::within(text, 4, 22);
/// assert_eq!(range.start, Position::new(text, 4));
/// assert!(!range.is_collapsed());
/// assert!(Range::caret(Position::new(text, 0)).is_collapsed());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Create a new range.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Collapsed range (a caret) at a position.
    #[inline]
    pub const fn caret(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Range spanning `start..end` inside a single node.
    #[inline]
    pub const fn within(node: NodeId, start: usize, end: usize) -> Self {
        Self {
            start: Position::new(node, start),
            end: Position::new(node, end),
        }
    }

    /// Check if the range is a caret.
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Whether both ends lie in the same node.
    #[inline]
    pub fn is_single_node(&self) -> bool {
        self.start.node == self.end.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_within() {
        let r = Range::within(NodeId(1), 10, 20);
        assert_eq!(r.start.offset, 10);
        assert_eq!(r.end.offset, 20);
        assert!(r.is_single_node());
        assert!(!r.is_collapsed());
    }

    #[test]
    fn test_range_caret() {
        let r = Range::caret(Position::new(NodeId(2), 5));
        assert!(r.is_collapsed());
        assert!(r.is_single_node());
    }

    #[test]
    fn test_range_spanning_nodes() {
        let r = Range::new(Position::new(NodeId(1), 3), Position::new(NodeId(2), 0));
        assert!(!r.is_single_node());
        assert!(!r.is_collapsed());
    }

    #[test]
    fn test_node_id_index() {
        let id = NodeId::from_index(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.to_string(), "#42");
    }
}
