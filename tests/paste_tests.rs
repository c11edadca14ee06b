//! Paste normalization tests.

use ferrolink::paste::{normalize, strip_font_artifact};
use ferrolink::{Engine, Options, PasteEvent, PasteMethod, Session};
use proptest::prelude::*;

fn paste(data: &str) -> String {
    let engine = Engine::new(Options::default());
    let mut event = PasteEvent::new(PasteMethod::Paste, data);
    engine.on_paste(&mut event);
    event.data
}

#[test]
fn single_url_in_prose() {
    assert_eq!(
        paste("Visit http://x.io, thanks"),
        "Visit <a href=\"http://x.io\">http://x.io</a>, thanks"
    );
}

#[test]
fn email_uses_mailto() {
    assert_eq!(
        paste("mail me: a@b.co."),
        "mail me: <a href=\"mailto:a@b.co\">a@b.co</a>."
    );
}

#[test]
fn several_lines() {
    assert_eq!(
        paste("one x.io\ntwo https://y.io/p?q=1"),
        "one <a href=\"x.io\">x.io</a>\ntwo <a href=\"https://y.io/p?q=1\">https://y.io/p?q=1</a>"
    );
}

#[test]
fn dotted_quad_with_port() {
    assert_eq!(
        paste("db at 10.0.0.1:5432 now"),
        "db at <a href=\"10.0.0.1:5432\">10.0.0.1:5432</a> now"
    );
}

#[test]
fn font_artifact_is_stripped() {
    let data = "<p><u><font color=\"#ff0000\">x.io</font></u></p>";
    assert_eq!(paste(data), "<p>x.io</p>");
}

#[test]
fn font_artifact_repeated() {
    let data = "<u><font color=\"#0563c1\">a</font></u> and <u><font color=\"#0563c1\">b</font></u>";
    assert_eq!(strip_font_artifact(data), "a and b");
}

#[test]
fn markup_without_artifact_is_untouched() {
    let data = "<b>see x.io</b>";
    assert_eq!(paste(data), data);
}

#[test]
fn encoded_markup_is_untouched() {
    let data = "&lt;b&gt; x.io";
    assert_eq!(paste(data), data);
}

#[test]
fn drop_and_internal_are_ignored() {
    let engine = Engine::new(Options::default());
    for method in [PasteMethod::Drop, PasteMethod::Internal] {
        let mut event = PasteEvent::new(method, "x.io");
        assert!(!engine.on_paste(&mut event));
        assert_eq!(event.data, "x.io");
    }
}

#[test]
fn disabled_paste_linking() {
    let engine = Engine::new(Options {
        linkify_paste: false,
        ..Options::default()
    });
    let mut event = PasteEvent::new(PasteMethod::Paste, "x.io");
    assert!(!engine.on_paste(&mut event));
}

#[test]
fn overlong_match_stays_text() {
    let data = format!("see {}.com now", "a".repeat(3000));
    assert_eq!(normalize(&data), data);
}

#[test]
fn session_paste_builds_blocks_and_links() {
    let mut session = Session::new(Options::default());
    session
        .paste(PasteMethod::Paste, "first a@b.co\nthen x.io")
        .unwrap();
    assert_eq!(
        session.document().to_html(),
        "<p>first <a href=\"mailto:a@b.co\">a@b.co</a></p><p>then <a href=\"x.io\">x.io</a></p>"
    );
}

/// Drop every `<...>` tag from output whose input had no `<`.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

proptest! {
    #[test]
    fn linkify_preserves_text(data in "[a-z0-9 .@/:,\n-]{0,60}") {
        let out = normalize(&data);
        prop_assert_eq!(strip_tags(&out), data);
    }

    #[test]
    fn plain_words_pass_through(data in "[a-zA-Z ,;]{0,60}") {
        prop_assert_eq!(normalize(&data), data.as_str());
    }
}
