//! Error type for fallible operations outside the event handlers.
//!
//! Event handlers never fail: a missing selection or an invalid word simply
//! means no autolink happens. Errors only surface from direct document
//! mutation, replay scripts and the CLI.

use thiserror::Error;

use crate::range::NodeId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("node {0} does not exist in this document")]
    UnknownNode(NodeId),

    #[error("node {0} is not a text node")]
    NotText(NodeId),

    #[error("offset {offset} is out of bounds for node {node} (len={len})")]
    OffsetOutOfBounds { node: NodeId, offset: usize, len: usize },

    #[error("document has no active selection")]
    NoSelection,

    #[error("unknown key name '{{{0}}}' in replay script")]
    UnknownKey(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
