//! ferrolink: autolinking for rich-text editing surfaces
//!
//! Turns URLs and e-mail addresses into hyperlinks as the user types them,
//! undoes the conversion when the very next key is Backspace, and linkifies
//! plain pasted content in bulk.
//!
//! # Design Principles
//! - No regex: URL and e-mail grammars are byte-level scanners
//! - Host-agnostic: the editor is reached only through [`Surface`] and [`Listeners`]
//! - Explicit state: undo bookkeeping is a two-state machine with pure transitions
//! - Bounded work: every walk over the surface is capped (see [`limits`])
//!
//! # Example
//! ```
//! use ferrolink::{Options, Session};
//!
//! let mut session = Session::new(Options::default());
//! session.type_str("see http://example.com ").unwrap();
//! assert_eq!(
//!     session.document().to_html(),
//!     "<p>see <a href=\"http://example.com\">http://example.com</a> </p>"
//! );
//! ```

pub mod cursor;
pub mod dom;
pub mod engine;
pub mod error;
pub mod escape;
pub mod extract;
pub mod image;
pub mod key;
pub mod limits;
pub mod paste;
pub mod range;
pub mod render;
pub mod session;
pub mod state;
pub mod surface;
pub mod validate;

// Re-export primary types
pub use dom::Document;
pub use engine::{Engine, KeyDisposition};
pub use error::{Error, Result};
pub use extract::{CaretAnchor, ExtractionResult};
pub use image::FitLimits;
pub use key::KeyCode;
pub use paste::{PasteEvent, PasteMethod};
pub use range::{NodeId, Position, Range};
pub use render::HtmlWriter;
pub use session::Session;
pub use surface::{EventKind, Listeners, Notification, Surface};
pub use validate::{classify, is_valid_email, is_valid_url, LinkKind};

/// Engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Turn off the host's own URL autodetection when binding, so links are
    /// not created twice. The host integration decides this, not the engine.
    pub suppress_native_autodetect: bool,
    /// Prefix `http://` to scheme-less URLs when linking typed words.
    pub append_protocol: bool,
    /// Listen to paste events and linkify plain pasted content.
    pub linkify_paste: bool,
    /// Size limits for pasted or dropped images.
    pub image_limits: FitLimits,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            suppress_native_autodetect: false,
            append_protocol: true,
            linkify_paste: true,
            image_limits: FitLimits::default(),
        }
    }
}

/// Wrap every URL and e-mail address in plain text with an anchor.
///
/// Content that already carries markup is returned as-is, minus known
/// paste artifacts.
///
/// # Example
/// ```
/// let html = ferrolink::linkify("mail a@b.co or visit x.io");
/// assert_eq!(
///     html,
///     "mail <a href=\"mailto:a@b.co\">a@b.co</a> or visit <a href=\"x.io\">x.io</a>"
/// );
/// ```
pub fn linkify(text: &str) -> String {
    paste::normalize(text).into_owned()
}
