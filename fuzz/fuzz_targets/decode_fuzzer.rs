//! Fuzz target for inbound payload decoding
//!
//! Decoding arbitrary bytes should NEVER panic. Valid UTF-8 decodes to the
//! same text; invalid input reports where the valid prefix ends.

#![no_main]

use libfuzzer_sys::fuzz_target;
use parley_proto::{DecodeError, decode_text};

fuzz_target!(|data: &[u8]| {
    match decode_text(data) {
        Ok(text) => assert_eq!(text.as_bytes(), data),
        Err(DecodeError::InvalidUtf8 { valid_up_to, len }) => {
            assert_eq!(len, data.len());
            assert!(valid_up_to < len);
            assert!(std::str::from_utf8(&data[..valid_up_to]).is_ok());
        },
    }
});
