//! Host capabilities the engine consumes.
//!
//! The editable surface, its selection and its event system belong to the
//! host editor. The engine only sees them through these two traits, which
//! keeps it testable against the in-memory [`Document`](crate::dom::Document).

use std::borrow::Cow;

use crate::range::{NodeId, Position, Range};

/// Events the engine subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyUp,
    KeyDown,
    Paste,
}

/// Notifications the engine emits for external listeners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// A word was turned into a link; carries the new link node.
    AutolinkAdded(NodeId),
}

/// Read and mutate access to the editable region.
pub trait Surface {
    /// Current selection, if the surface has one.
    fn selection(&self) -> Option<Range>;

    /// Replace the selection.
    fn select(&mut self, range: Range);

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn last_child(&self, node: NodeId) -> Option<NodeId>;

    /// Whether the node can hold children. Text nodes and bare line breaks
    /// cannot.
    fn is_container(&self, node: NodeId) -> bool;

    /// Text content of a node and its descendants.
    fn text(&self, node: NodeId) -> Cow<'_, str>;

    /// Whether the node is a hyperlink element.
    fn is_link(&self, node: NodeId) -> bool;

    /// Wrap the current selection in a hyperlink pointing at `href`.
    ///
    /// Returns the new link node, or `None` if the host refused.
    fn create_link(&mut self, href: &str) -> Option<NodeId>;

    /// Unwrap the link at (or around) the current selection back to plain
    /// text in place.
    fn remove_link(&mut self);

    /// First editable node after the range, typically the next block.
    fn next_editable_node(&self, range: &Range) -> Option<NodeId>;

    /// Node that encloses the range start, when it is one the caret can sit in.
    fn enclosing_node(&self, range: &Range) -> Option<NodeId>;

    /// Position just after a node inside its parent.
    fn position_after(&self, node: NodeId) -> Option<Position>;

    /// Switch the host's own URL autodetection on or off.
    fn set_native_autodetect(&mut self, _enabled: bool) {}
}

/// Event subscription and notification on the host.
pub trait Listeners {
    /// Attach the engine's listener for `event`. Lower priorities run first.
    fn attach(&mut self, event: EventKind, priority: u32);

    /// Detach the engine's listener for `event`. Detaching twice is a no-op.
    fn detach(&mut self, event: EventKind);

    fn notify(&mut self, notification: Notification);
}
