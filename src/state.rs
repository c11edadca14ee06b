//! Autolink undo state machine.
//!
//! Two states: `Idle`, and `PendingUndo` right after a link was created.
//! Transitions are pure; they return the effects the engine must apply to
//! the host.

use smallvec::SmallVec;

use crate::extract::CaretAnchor;
use crate::key::KeyCode;
use crate::range::NodeId;

/// The link created by the last autolink, with the anchor it was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingLink {
    pub link: NodeId,
    pub anchor: CaretAnchor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    PendingUndo(PendingLink),
}

/// Side effect requested by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Attach the one-shot key-down listener at undo priority.
    ListenKeyDown,
    /// Detach the key-down listener.
    UnlistenKeyDown,
    /// Unwrap the pending link back to text.
    Unlink(PendingLink),
    /// Suppress the host's default action for the current key.
    CancelKey,
}

pub type Effects = SmallVec<[Effect; 3]>;

impl State {
    /// A link was just created.
    ///
    /// A stale pending link is dropped; the key-down listener is attached
    /// fresh for the new one.
    pub fn link_created(self, pending: PendingLink) -> (State, Effects) {
        let mut effects = Effects::new();
        if let State::PendingUndo(_) = self {
            effects.push(Effect::UnlistenKeyDown);
        }
        effects.push(Effect::ListenKeyDown);
        (State::PendingUndo(pending), effects)
    }

    /// A key went down. Any key commits the pending link; Backspace undoes it.
    pub fn key_down(self, key: KeyCode) -> (State, Effects) {
        let mut effects = Effects::new();
        let State::PendingUndo(pending) = self else {
            return (State::Idle, effects);
        };

        effects.push(Effect::UnlistenKeyDown);
        if key == KeyCode::Backspace {
            effects.push(Effect::CancelKey);
            effects.push(Effect::Unlink(pending));
        }
        (State::Idle, effects)
    }

    #[inline]
    pub fn pending(&self) -> Option<&PendingLink> {
        match self {
            State::PendingUndo(pending) => Some(pending),
            State::Idle => None,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, State::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(link: u32) -> PendingLink {
        PendingLink {
            link: NodeId(link),
            anchor: CaretAnchor {
                node: NodeId(1),
                offset: 4,
            },
        }
    }

    #[test]
    fn test_create_from_idle() {
        let (state, effects) = State::Idle.link_created(pending(7));
        assert_eq!(state, State::PendingUndo(pending(7)));
        assert_eq!(effects.as_slice(), &[Effect::ListenKeyDown]);
    }

    #[test]
    fn test_create_replaces_pending() {
        let (state, effects) = State::PendingUndo(pending(7)).link_created(pending(9));
        assert_eq!(state.pending().map(|p| p.link), Some(NodeId(9)));
        assert_eq!(
            effects.as_slice(),
            &[Effect::UnlistenKeyDown, Effect::ListenKeyDown]
        );
    }

    #[test]
    fn test_backspace_undoes() {
        let (state, effects) = State::PendingUndo(pending(7)).key_down(KeyCode::Backspace);
        assert!(state.is_idle());
        assert_eq!(
            effects.as_slice(),
            &[
                Effect::UnlistenKeyDown,
                Effect::CancelKey,
                Effect::Unlink(pending(7))
            ]
        );
    }

    #[test]
    fn test_other_key_commits() {
        let (state, effects) = State::PendingUndo(pending(7)).key_down(KeyCode::Other(65));
        assert!(state.is_idle());
        assert_eq!(effects.as_slice(), &[Effect::UnlistenKeyDown]);
    }

    #[test]
    fn test_key_down_when_idle() {
        let (state, effects) = State::Idle.key_down(KeyCode::Backspace);
        assert!(state.is_idle());
        assert!(effects.is_empty());
    }
}
