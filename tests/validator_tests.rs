//! URL and e-mail recognition tests.
//!
//! Table cases live in tests/fixtures/validator_cases.json; the properties
//! below cover whole families of words.

use ferrolink::extract::last_word;
use ferrolink::{LinkKind, classify, is_valid_email, is_valid_url};
use proptest::prelude::*;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
struct ValidatorCase {
    word: String,
    url: bool,
    email: bool,
    note: String,
}

fn load_cases() -> Vec<ValidatorCase> {
    let json = fs::read_to_string("tests/fixtures/validator_cases.json")
        .expect("Failed to read tests/fixtures/validator_cases.json");
    serde_json::from_str(&json).expect("Failed to parse validator_cases.json")
}

#[test]
fn fixture_cases() {
    let cases = load_cases();
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let url = is_valid_url(&case.word);
        let email = is_valid_email(&case.word);
        if url != case.url || email != case.email {
            failures.push(format!(
                "{:?} ({}): url={url} email={email}, expected url={} email={}",
                case.word, case.note, case.url, case.email
            ));
        }
    }
    assert!(failures.is_empty(), "validator mismatches:\n{}", failures.join("\n"));
}

#[test]
fn fixture_classification_prefers_email() {
    for case in load_cases() {
        let expected = if case.email {
            Some(LinkKind::Email)
        } else if case.url {
            Some(LinkKind::Url)
        } else {
            None
        };
        assert_eq!(classify(&case.word), expected, "{}", case.note);
    }
}

#[test]
fn overlong_word_is_rejected() {
    let word = format!("{}.com", "a".repeat(4096));
    assert_eq!(classify(&word), None);
}

#[test]
fn href_forms() {
    assert_eq!(LinkKind::Email.href("a@b.co", false), "mailto:a@b.co");
    assert_eq!(LinkKind::Url.href("www.x.io", true), "http://www.x.io");
    assert_eq!(LinkKind::Url.href("HTTPS://x.io", true), "HTTPS://x.io");
}

proptest! {
    #[test]
    fn generated_emails_are_valid(
        local in "[a-z0-9][a-z0-9._-]{0,12}",
        domain in "[a-z0-9]{1,10}",
        tld in "[a-z]{2,6}",
    ) {
        let word = format!("{local}@{domain}.{tld}");
        prop_assert!(is_valid_email(&word));
        prop_assert_eq!(classify(&word), Some(LinkKind::Email));
    }

    #[test]
    fn generated_hosts_are_urls(
        name in "[a-z0-9]{1,10}",
        tld in "[a-z]{2,6}",
        secure in any::<bool>(),
        path in "(/[a-z0-9]{0,8}){0,3}",
    ) {
        let scheme = if secure { "https://" } else { "http://" };
        let word = format!("{scheme}{name}.{tld}{path}");
        prop_assert!(is_valid_url(&word));
        prop_assert!(!is_valid_email(&word));
    }

    #[test]
    fn whitespace_never_links(left in "[a-z.]{1,8}", right in "[a-z.@]{1,12}") {
        let word = format!("{left} {right}");
        prop_assert_eq!(classify(&word), None);
    }

    #[test]
    fn blank_source_yields_empty_word(source in "[ \t\u{a0}\u{feff}]{0,16}") {
        prop_assert_eq!(last_word(&source), "");
    }

    #[test]
    fn last_word_has_no_whitespace(source in "[a-z .\t]{0,40}") {
        let word = last_word(&source);
        prop_assert!(!word.contains(char::is_whitespace));
        prop_assert!(source.trim_end().ends_with(word));
    }
}
