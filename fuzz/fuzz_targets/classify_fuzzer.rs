//! Fuzz target for the message classifier
//!
//! Classification must never panic and must only ever split the input, never
//! invent text.
//!
//! # Invariants
//!
//! - Text not starting with `[` is returned verbatim as info
//! - The sender is a prefix of the input
//! - The body is a trimmed suffix of the input after the first `:`

#![no_main]

use libfuzzer_sys::fuzz_target;
use parley_proto::{ClassifiedMessage, classify};

fuzz_target!(|text: &str| {
    match classify(text) {
        ClassifiedMessage::Info { text: info } => {
            assert!(!text.starts_with('['));
            assert_eq!(info, text);
        },
        ClassifiedMessage::Chat { sender, body } => {
            assert!(text.starts_with('['));
            assert!(text.starts_with(&sender));
            assert!(!sender.contains(':'));
            match text.split_once(':') {
                Some((_, rest)) => assert_eq!(body, rest.trim()),
                None => assert!(body.is_empty()),
            }
        },
    }
});
