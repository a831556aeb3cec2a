//! Property-based tests for inbound classification.
//!
//! These tests verify the classification heuristic for ALL inputs, not just
//! the handful of lines a real server sends.

use parley_proto::{ClassifiedMessage, classify};
use proptest::prelude::*;

/// Text that does not start with the chat marker.
fn notice_text() -> impl Strategy<Value = String> {
    any::<String>().prop_filter("must not start with '['", |s| !s.starts_with('['))
}

/// Sender prefix: chat marker followed by colon-free text.
fn sender_text() -> impl Strategy<Value = String> {
    "[^:]{0,24}".prop_map(|s| format!("[{s}"))
}

proptest! {
    #[test]
    fn prop_non_bracket_text_is_info(text in notice_text()) {
        // PROPERTY: Info carries the exact original text, colons included
        prop_assert_eq!(classify(&text), ClassifiedMessage::Info { text: text.clone() });
    }

    #[test]
    fn prop_first_colon_splits(sender in sender_text(), body in ".{0,64}") {
        let line = format!("{sender}:{body}");

        match classify(&line) {
            ClassifiedMessage::Chat { sender: got_sender, body: got_body } => {
                prop_assert_eq!(got_sender, sender);
                prop_assert_eq!(got_body, body.trim());
            },
            ClassifiedMessage::Info { .. } => prop_assert!(false, "bracketed line must be chat"),
        }
    }

    #[test]
    fn prop_no_colon_means_empty_body(sender in sender_text()) {
        prop_assert_eq!(classify(&sender), ClassifiedMessage::Chat {
            sender: sender.clone(),
            body: String::new(),
        });
    }

    #[test]
    fn prop_classify_never_loses_sender_text(text in ".{0,128}") {
        // PROPERTY: a chat sender is always a prefix of the original line
        if let ClassifiedMessage::Chat { sender, .. } = classify(&text) {
            prop_assert!(text.starts_with(&sender));
        }
    }
}
