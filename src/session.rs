//! Keystroke-level driver for an engine bound to an in-memory document.
//!
//! Dispatches keys in browser order: key-down (to the engine while its undo
//! listener is attached), the native default action unless the engine
//! cancelled it, then key-up.

use log::{debug, trace};

use crate::dom::Document;
use crate::engine::{Engine, KeyDisposition};
use crate::error::{Error, Result};
use crate::key::KeyCode;
use crate::paste::{self, PasteEvent, PasteMethod};
use crate::range::NodeId;
use crate::surface::EventKind;
use crate::Options;

/// One step of a replay script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// A typed character.
    Char(char),
    /// A named key.
    Key(KeyCode),
}

/// Native action a key performs when nobody cancels it.
#[derive(Clone, Copy, Debug)]
enum DefaultAction {
    Insert(char),
    SplitBlock,
    DeleteBackward,
    Nothing,
}

impl DefaultAction {
    fn for_key(key: KeyCode) -> Self {
        match key {
            KeyCode::Enter => DefaultAction::SplitBlock,
            KeyCode::Backspace => DefaultAction::DeleteBackward,
            key => key.typed_char().map_or(DefaultAction::Nothing, DefaultAction::Insert),
        }
    }
}

/// An engine and the document it is bound to.
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    document: Document,
}

impl Session {
    /// Session over an empty document.
    pub fn new(options: Options) -> Self {
        Self::with_document(options, Document::new())
    }

    /// Session over an existing document. The engine is bound right away.
    pub fn with_document(options: Options, mut document: Document) -> Self {
        let mut engine = Engine::new(options);
        engine.bind(&mut document);
        Self { engine, document }
    }

    #[inline]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Press a named key. Returns the link created on key-up, if any.
    pub fn press(&mut self, key: KeyCode) -> Result<Option<NodeId>> {
        self.dispatch(key, DefaultAction::for_key(key))
    }

    /// Type one character.
    pub fn type_char(&mut self, ch: char) -> Result<Option<NodeId>> {
        let key = KeyCode::for_char(ch);
        let action = match key {
            KeyCode::Enter => DefaultAction::SplitBlock,
            KeyCode::Backspace => DefaultAction::DeleteBackward,
            _ => DefaultAction::Insert(ch),
        };
        self.dispatch(key, action)
    }

    /// Type a string character by character. `\r\n` counts as one Enter.
    ///
    /// Returns every link created along the way.
    pub fn type_str(&mut self, text: &str) -> Result<Vec<NodeId>> {
        let mut links = Vec::new();
        for ch in text.chars().filter(|&c| c != '\r') {
            links.extend(self.type_char(ch)?);
        }
        Ok(links)
    }

    /// Replay a keystroke script (see [`parse_script`]).
    pub fn replay(&mut self, script: &str) -> Result<Vec<NodeId>> {
        let mut links = Vec::new();
        for input in parse_script(script)? {
            let link = match input {
                Input::Char(ch) => self.type_char(ch)?,
                Input::Key(key) => self.press(key)?,
            };
            links.extend(link);
        }
        Ok(links)
    }

    /// Paste content at the caret.
    ///
    /// Plain content the paste listener linkified is inserted with its URLs
    /// and e-mail addresses as links; anything else, including markup after
    /// artifact stripping, is inserted as text. Returns the normalized payload
    /// the host would receive.
    pub fn paste(&mut self, method: PasteMethod, data: &str) -> Result<String> {
        let mut event = PasteEvent::new(method, data);
        let rewritten =
            self.document.is_listening(EventKind::Paste) && self.engine.on_paste(&mut event);

        // Build links only where the payload got them, so both agree
        if rewritten && !paste::has_markup(data) {
            let mut copied = 0;
            for m in paste::find_links(data) {
                self.insert_plain(&data[copied..m.start])?;
                match m.kind {
                    Some(kind) => {
                        let text = m.as_str(data);
                        self.document.insert_link(&kind.href(text, false), text)?;
                    }
                    None => self.insert_plain(m.as_str(data))?,
                }
                copied = m.end;
            }
            self.insert_plain(&data[copied..])?;
        } else {
            self.insert_plain(&event.data)?;
        }
        debug!("pasted {} bytes ({method:?})", data.len());
        Ok(event.data)
    }

    /// Insert text, splitting paragraphs at line breaks.
    fn insert_plain(&mut self, text: &str) -> Result<()> {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.document.split_block()?;
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            if !line.is_empty() {
                self.document.insert_text(line)?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, key: KeyCode, action: DefaultAction) -> Result<Option<NodeId>> {
        trace!("key {key:?} ({})", key.code());
        let disposition = if self.document.is_listening(EventKind::KeyDown) {
            self.engine.on_key_down(&mut self.document, key)
        } else {
            KeyDisposition::Continue
        };

        if disposition == KeyDisposition::Continue {
            match action {
                DefaultAction::Insert(ch) => {
                    let mut buf = [0u8; 4];
                    self.document.insert_text(ch.encode_utf8(&mut buf))?;
                }
                DefaultAction::SplitBlock => {
                    self.document.split_block()?;
                }
                DefaultAction::DeleteBackward => self.document.delete_backward()?,
                DefaultAction::Nothing => {}
            }
        }

        if !self.document.is_listening(EventKind::KeyUp) {
            return Ok(None);
        }
        Ok(self.engine.on_key_up(&mut self.document, key))
    }
}

/// Parse a replay script.
///
/// Characters are typed as-is; `{enter}`, `{backspace}`, `{space}`,
/// `{comma}` and `{semicolon}` press the named key, `{186}` presses the key
/// with that native code and `{{` types a brace.
///
/// # Example
/// ```
/// use ferrolink::session::{parse_script, Input};
/// use ferrolink::KeyCode;
///
/// let inputs = parse_script("a{enter}{188}{{").unwrap();
/// assert_eq!(
///     inputs,
///     [
///         Input::Char('a'),
///         Input::Key(KeyCode::Enter),
///         Input::Key(KeyCode::Comma),
///         Input::Char('{'),
///     ]
/// );
/// assert!(parse_script("{tab}").is_err());
/// ```
pub fn parse_script(script: &str) -> Result<Vec<Input>> {
    let mut inputs = Vec::with_capacity(script.len());
    let mut rest = script;

    while let Some(i) = memchr::memchr(b'{', rest.as_bytes()) {
        inputs.extend(rest[..i].chars().map(Input::Char));
        let after = &rest[i + 1..];
        if let Some(tail) = after.strip_prefix('{') {
            inputs.push(Input::Char('{'));
            rest = tail;
            continue;
        }
        let Some(close) = memchr::memchr(b'}', after.as_bytes()) else {
            return Err(Error::UnknownKey(after.to_owned()));
        };
        inputs.push(Input::Key(named_key(&after[..close])?));
        rest = &after[close + 1..];
    }
    inputs.extend(rest.chars().map(Input::Char));
    Ok(inputs)
}

fn named_key(name: &str) -> Result<KeyCode> {
    if let Ok(code) = name.parse::<u32>() {
        return Ok(KeyCode::from_code(code));
    }
    let key = match name.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "space" => KeyCode::Space,
        "comma" => KeyCode::Comma,
        "semicolon" => KeyCode::Semicolon,
        _ => return Err(Error::UnknownKey(name.to_owned())),
    };
    Ok(key)
}
