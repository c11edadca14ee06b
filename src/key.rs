//! Key codes the engine reacts to.

/// A key as reported by the host's keyboard events.
///
/// Only Comma, Enter, Semicolon and Space are delimiters; Backspace matters
/// only while an undo is pending. Everything else is `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Comma,
    Enter,
    Semicolon,
    Space,
    Other(u32),
}

impl KeyCode {
    pub const BACKSPACE: u32 = 8;
    pub const ENTER: u32 = 13;
    pub const SPACE: u32 = 32;
    pub const SEMICOLON: u32 = 186;
    pub const COMMA: u32 = 188;

    /// Map a native `keyCode` value.
    pub const fn from_code(code: u32) -> Self {
        match code {
            Self::BACKSPACE => KeyCode::Backspace,
            Self::COMMA => KeyCode::Comma,
            Self::ENTER => KeyCode::Enter,
            Self::SEMICOLON => KeyCode::Semicolon,
            Self::SPACE => KeyCode::Space,
            other => KeyCode::Other(other),
        }
    }

    /// Native `keyCode` value.
    pub const fn code(self) -> u32 {
        match self {
            KeyCode::Backspace => Self::BACKSPACE,
            KeyCode::Comma => Self::COMMA,
            KeyCode::Enter => Self::ENTER,
            KeyCode::Semicolon => Self::SEMICOLON,
            KeyCode::Space => Self::SPACE,
            KeyCode::Other(code) => code,
        }
    }

    /// Key that produces a typed character.
    ///
    /// Letters map to their upper-case code like browsers report them and
    /// other ASCII characters to their byte value. Non-ASCII characters have
    /// no stable key code and map to `Other(0)`.
    pub fn for_char(ch: char) -> Self {
        match ch {
            ' ' => KeyCode::Space,
            ',' => KeyCode::Comma,
            ';' => KeyCode::Semicolon,
            '\n' | '\r' => KeyCode::Enter,
            '\u{8}' => KeyCode::Backspace,
            c if c.is_ascii_alphanumeric() => KeyCode::Other(c.to_ascii_uppercase() as u32),
            c if c.is_ascii() => KeyCode::Other(c as u32),
            _ => KeyCode::Other(0),
        }
    }

    /// Character the key inserts, for delimiters that insert one.
    #[inline]
    pub const fn typed_char(self) -> Option<char> {
        match self {
            KeyCode::Comma => Some(','),
            KeyCode::Semicolon => Some(';'),
            KeyCode::Space => Some(' '),
            _ => None,
        }
    }

    /// Whether releasing this key ends a word.
    #[inline]
    pub const fn is_delimiter(self) -> bool {
        matches!(
            self,
            KeyCode::Comma | KeyCode::Enter | KeyCode::Semicolon | KeyCode::Space
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_codes() {
        assert_eq!(KeyCode::from_code(8), KeyCode::Backspace);
        assert_eq!(KeyCode::from_code(13), KeyCode::Enter);
        assert_eq!(KeyCode::from_code(32), KeyCode::Space);
        assert_eq!(KeyCode::from_code(186), KeyCode::Semicolon);
        assert_eq!(KeyCode::from_code(188), KeyCode::Comma);
        assert_eq!(KeyCode::from_code(65), KeyCode::Other(65));
        assert_eq!(KeyCode::Comma.code(), 188);
    }

    #[test]
    fn test_delimiters() {
        assert!(KeyCode::Space.is_delimiter());
        assert!(KeyCode::Enter.is_delimiter());
        assert!(KeyCode::Comma.is_delimiter());
        assert!(KeyCode::Semicolon.is_delimiter());
        assert!(!KeyCode::Backspace.is_delimiter());
        assert!(!KeyCode::Other(65).is_delimiter());
    }

    #[test]
    fn test_for_char() {
        assert_eq!(KeyCode::for_char(' '), KeyCode::Space);
        assert_eq!(KeyCode::for_char('\n'), KeyCode::Enter);
        assert_eq!(KeyCode::for_char('a'), KeyCode::Other(65));
        assert_eq!(KeyCode::for_char('.'), KeyCode::Other('.' as u32));
        assert_eq!(KeyCode::for_char('\u{ba}'), KeyCode::Other(0));
        assert_eq!(KeyCode::for_char('é'), KeyCode::Other(0));
        assert!(!KeyCode::for_char('\u{bc}').is_delimiter());
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(KeyCode::Space.typed_char(), Some(' '));
        assert_eq!(KeyCode::Semicolon.typed_char(), Some(';'));
        assert_eq!(KeyCode::Enter.typed_char(), None);
        assert_eq!(KeyCode::Other(65).typed_char(), None);
    }
}
