//! Inbound message classification.
//!
//! The protocol carries no type tags, so the client tells notices and chat
//! apart by convention: chat lines are prefixed with a bracketed room tag and
//! the sender is everything before the first [`SENDER_DELIMITER`].
//!
//! ```text
//! "[chat] bob: hi there"   -> Chat { sender: "[chat] bob", body: "hi there" }
//! "Welcome to chat"        -> Info { text: "Welcome to chat" }
//! ```
//!
//! A notice that happens to start with `[` is misread as chat. That is how
//! the protocol behaves and is kept as-is.

/// Leading character that marks a chat line.
pub const CHAT_MARKER: char = '[';

/// Separator between sender and body. Only the first occurrence splits.
pub const SENDER_DELIMITER: char = ':';

/// Result of classifying an inbound payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedMessage {
    /// System or administrative notice, rendered verbatim.
    Info {
        /// Full payload text.
        text: String,
    },
    /// Chat line from another user.
    Chat {
        /// Text before the first delimiter, including the room tag.
        sender: String,
        /// Trimmed text after the first delimiter. Empty if there was none.
        body: String,
    },
}

impl ClassifiedMessage {
    /// True for chat lines.
    pub fn is_chat(&self) -> bool {
        matches!(self, Self::Chat { .. })
    }
}

/// Classify an inbound payload.
pub fn classify(text: &str) -> ClassifiedMessage {
    if !text.starts_with(CHAT_MARKER) {
        return ClassifiedMessage::Info { text: text.to_owned() };
    }

    match text.split_once(SENDER_DELIMITER) {
        Some((sender, rest)) => {
            ClassifiedMessage::Chat { sender: sender.to_owned(), body: rest.trim().to_owned() }
        },
        None => ClassifiedMessage::Chat { sender: text.to_owned(), body: String::new() },
    }
}
