//! DoS prevention constants and listener priorities.
//!
//! These limits keep every handler bounded no matter how large or
//! deeply nested the editable surface becomes.

/// Longest word (in bytes) that is still considered for autolinking.
pub const MAX_WORD_LEN: usize = 2048;

/// Maximum number of siblings visited when walking backward after Enter.
pub const MAX_SIBLING_WALK: usize = 64;

/// Maximum element depth descended while looking for the last text node.
pub const MAX_DESCENT: usize = 32;

/// Paste data longer than this is passed through without linkification.
pub const MAX_PASTE_LEN: usize = 1024 * 1024;

/// Priority of the one-shot undo listener. Lower runs first; 1 is the highest.
pub const UNDO_LISTENER_PRIORITY: u32 = 1;

/// Priority of the long-lived key-up and paste listeners.
pub const DEFAULT_LISTENER_PRIORITY: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_are_reasonable() {
        const { assert!(MAX_WORD_LEN >= 256) };
        const { assert!(MAX_SIBLING_WALK >= 16) };
        const { assert!(MAX_DESCENT >= 16) };
        const { assert!(MAX_DESCENT <= 64) };
        const { assert!(UNDO_LISTENER_PRIORITY < DEFAULT_LISTENER_PRIORITY) };
    }
}
