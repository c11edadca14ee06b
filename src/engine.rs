//! The autolink engine: listener binding, link creation and one-shot undo.
//!
//! The host forwards key-up, key-down and paste events; the engine reads and
//! mutates the surface through [`Surface`] and manages its own listeners
//! through [`Listeners`]. Every handler completes synchronously and never
//! fails: a missing selection or an invalid word just means no autolink.

use std::borrow::Cow;

use log::{debug, trace};

use crate::extract::{self, ExtractionResult};
use crate::image::ImageFit;
use crate::key::KeyCode;
use crate::limits::{DEFAULT_LISTENER_PRIORITY, UNDO_LISTENER_PRIORITY};
use crate::paste::{self, PasteEvent, PasteMethod};
use crate::range::{NodeId, Position, Range};
use crate::state::{Effect, Effects, PendingLink, State};
use crate::surface::{EventKind, Listeners, Notification, Surface};
use crate::validate::{self, LinkKind};
use crate::Options;

/// What the host should do with the key after the engine saw it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Run the default action and other listeners.
    Continue,
    /// The engine consumed the key; skip the default action.
    Cancel,
}

/// Autolink engine for one editable surface.
///
/// # Example
/// ```
/// use ferrolink::{dom::Document, Engine, KeyCode, Options};
///
/// let mut doc = Document::new();
/// let mut engine = Engine::new(Options::default());
/// engine.bind(&mut doc);
///
/// doc.insert_text("see http://example.com ").unwrap();
/// let link = engine.on_key_up(&mut doc, KeyCode::Space);
/// assert!(link.is_some());
/// assert_eq!(
///     doc.to_html(),
///     "<p>see <a href=\"http://example.com\">http://example.com</a> </p>"
/// );
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    options: Options,
    state: State,
    bound: bool,
}

impl Engine {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            state: State::Idle,
            bound: false,
        }
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Attach the long-lived listeners once the surface content is ready.
    ///
    /// Binding an already bound engine does nothing.
    pub fn bind<H>(&mut self, host: &mut H)
    where
        H: Surface + Listeners + ?Sized,
    {
        if self.bound {
            return;
        }
        host.attach(EventKind::KeyUp, DEFAULT_LISTENER_PRIORITY);
        if self.options.linkify_paste {
            host.attach(EventKind::Paste, DEFAULT_LISTENER_PRIORITY);
        }
        if self.options.suppress_native_autodetect {
            host.set_native_autodetect(false);
        }
        self.bound = true;
        debug!("autolink engine bound to surface");
    }

    /// Key-up handler. After a delimiter, links the word before it.
    ///
    /// Returns the created link node, if any.
    pub fn on_key_up<H>(&mut self, host: &mut H, key: KeyCode) -> Option<NodeId>
    where
        H: Surface + Listeners + ?Sized,
    {
        if !key.is_delimiter() {
            return None;
        }
        let extraction = extract::extract(host, key)?;
        if extraction.is_empty() {
            return None;
        }
        let Some(kind) = validate::classify(&extraction.word) else {
            trace!("'{}' is not a link", extraction.word);
            return None;
        };
        self.create_link(host, &extraction, kind)
    }

    /// Key-down handler, only listened to while an undo is pending.
    pub fn on_key_down<H>(&mut self, host: &mut H, key: KeyCode) -> KeyDisposition
    where
        H: Surface + Listeners + ?Sized,
    {
        let (state, effects) = self.state.key_down(key);
        self.state = state;
        self.apply(host, effects)
    }

    /// Paste handler. Rewrites plain pasted content in place.
    ///
    /// Returns `true` if the data changed.
    pub fn on_paste(&self, event: &mut PasteEvent) -> bool {
        if !self.options.linkify_paste || event.method != PasteMethod::Paste {
            return false;
        }
        let normalized = match paste::normalize(&event.data) {
            Cow::Owned(data) => data,
            Cow::Borrowed(_) => return false,
        };
        event.data = normalized;
        true
    }

    /// Fit a pasted or dropped image to the configured limits.
    ///
    /// Images the limits admit are returned unchanged; larger ones go through
    /// the host's scaler.
    pub fn fit_image<'a, F>(
        &self,
        fitter: &F,
        data_url: &'a str,
        mime_type: &str,
        (width, height): (u32, u32),
    ) -> Cow<'a, str>
    where
        F: ImageFit + ?Sized,
    {
        let limits = &self.options.image_limits;
        if limits.admits(width, height) {
            return Cow::Borrowed(data_url);
        }
        debug!("scaling {width}x{height} {mime_type} image");
        Cow::Owned(fitter.fit(data_url, mime_type, limits))
    }

    /// Replace the extracted word with a link and move the caret past it.
    ///
    /// After Enter the caret goes to the start of the next block. After the
    /// other delimiters it goes into the node following the link, at offset 1
    /// when that node starts with the delimiter the key already typed and at
    /// offset 0 otherwise, so further typing lands after the delimiter.
    ///
    /// If the host drops the selection while creating the link, the link stays
    /// undoable and the caret is left where the host put it.
    pub fn create_link<H>(
        &mut self,
        host: &mut H,
        extraction: &ExtractionResult,
        kind: LinkKind,
    ) -> Option<NodeId>
    where
        H: Surface + Listeners + ?Sized,
    {
        let anchor = extraction.anchor?;
        let len = extraction.word.chars().count();
        let Some(start) = anchor.offset.checked_sub(len) else {
            debug!("anchor offset {} shorter than word", anchor.offset);
            return None;
        };

        host.select(Range::within(anchor.node, start, anchor.offset));
        let href = kind.href(&extraction.word, self.options.append_protocol);
        let Some(link) = host.create_link(&href) else {
            debug!("host refused to create link for '{}'", extraction.word);
            return None;
        };
        debug!("autolinked '{}' as {href} ({link})", extraction.word);
        host.notify(Notification::AutolinkAdded(link));

        let (state, effects) = self.state.link_created(PendingLink { link, anchor });
        self.state = state;
        self.apply(host, effects);

        // The host may have dropped the selection while creating the link
        let Some(range) = host.selection() else {
            debug!("no selection after creating {link}, caret left in place");
            return Some(link);
        };
        let caret = if extraction.key == KeyCode::Enter {
            host.next_editable_node(&range).map(Position::start_of)
        } else {
            host.enclosing_node(&range).map(|node| {
                // The delimiter was already inserted; keep typing after it
                let typed = extraction
                    .key
                    .typed_char()
                    .is_some_and(|c| host.text(node).starts_with(c));
                Position::new(node, usize::from(typed))
            })
        };
        if let Some(at) = caret {
            host.select(Range::caret(at));
        }
        Some(link)
    }

    /// Unwrap the pending link and put the caret back where it was.
    fn unlink<H>(&self, host: &mut H, pending: &PendingLink)
    where
        H: Surface + Listeners + ?Sized,
    {
        let Some(range) = host.selection() else {
            debug!("no selection, {} left in place", pending.link);
            return;
        };
        let caret = range.start;

        let target = host
            .next_sibling(pending.anchor.node)
            .unwrap_or(pending.anchor.node);
        let Some(end) = host.position_after(target) else {
            debug!("{target} is detached, nothing to unlink");
            return;
        };

        host.select(Range::new(Position::start_of(target), end));
        host.remove_link();
        host.select(Range::caret(caret));
        debug!("removed autolink {}", pending.link);
    }

    fn apply<H>(&self, host: &mut H, effects: Effects) -> KeyDisposition
    where
        H: Surface + Listeners + ?Sized,
    {
        let mut disposition = KeyDisposition::Continue;
        for effect in effects {
            match effect {
                Effect::ListenKeyDown => host.attach(EventKind::KeyDown, UNDO_LISTENER_PRIORITY),
                Effect::UnlistenKeyDown => host.detach(EventKind::KeyDown),
                Effect::CancelKey => disposition = KeyDisposition::Cancel,
                Effect::Unlink(pending) => self.unlink(host, &pending),
            }
        }
        disposition
    }
}
