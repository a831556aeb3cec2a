//! Parley wire protocol
//!
//! The protocol has no binary framing: every message is a single line of text
//! carried in one transport message. Outbound text is either a slash command
//! ([`Command`]) or a verbatim chat body. Inbound text is split into notices
//! and chat lines by [`classify`].
//!
//! # Components
//!
//! - [`Command`]: Outbound command encoding (`/name`, `/join`, chat)
//! - [`classify`]: Inbound message classification
//! - [`decode_text`]: Fixed UTF-8 decoding of binary payloads

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod classify;
mod command;
mod decode;

pub use classify::{CHAT_MARKER, ClassifiedMessage, SENDER_DELIMITER, classify};
pub use command::{COMMAND_PREFIX, Command, DEFAULT_ROOM};
pub use decode::{DecodeError, decode_text};
