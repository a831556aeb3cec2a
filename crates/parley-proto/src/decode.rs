//! Payload decoding.
//!
//! Binary transport messages are decoded with a fixed character encoding
//! (UTF-8). Decoding is all-or-nothing: callers never observe partial text.

use thiserror::Error;

/// Payload could not be converted to text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload is not valid UTF-8.
    #[error("invalid UTF-8 after {valid_up_to} bytes (payload length {len})")]
    InvalidUtf8 {
        /// Length of the longest valid prefix.
        valid_up_to: usize,
        /// Total payload length.
        len: usize,
    },
}

/// Decode a binary payload into text.
pub fn decode_text(bytes: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| DecodeError::InvalidUtf8 { valid_up_to: e.valid_up_to(), len: bytes.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8() {
        assert_eq!(decode_text("[chat] zoë: héllo".as_bytes()), Ok("[chat] zoë: héllo".to_owned()));
    }

    #[test]
    fn empty_payload_is_empty_text() {
        assert_eq!(decode_text(&[]), Ok(String::new()));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = decode_text(&[b'h', b'i', 0xFF, b'!']).unwrap_err();
        assert_eq!(err, DecodeError::InvalidUtf8 { valid_up_to: 2, len: 4 });
    }

    #[test]
    fn rejects_truncated_multibyte() {
        // First two bytes of a three-byte sequence
        assert!(decode_text(&[0xE2, 0x82]).is_err());
    }
}
