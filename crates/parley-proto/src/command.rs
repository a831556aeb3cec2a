//! Outbound commands.
//!
//! Commands are plain text lines. Control commands start with
//! [`COMMAND_PREFIX`]; anything else is a chat body and goes out verbatim.

use std::fmt;

/// Prefix marking a control command.
pub const COMMAND_PREFIX: char = '/';

/// Room joined on every connection.
pub const DEFAULT_ROOM: &str = "chat";

/// An outbound protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a display identity (`/name <identity>`).
    SetName(String),
    /// Join a room (`/join <room>`).
    JoinRoom(String),
    /// Chat body. The protocol has no envelope for chat, so the body is the
    /// whole line.
    Chat(String),
}

impl Command {
    /// Command that joins [`DEFAULT_ROOM`].
    pub fn join_default() -> Self {
        Self::JoinRoom(DEFAULT_ROOM.to_owned())
    }

    /// Encode into the line sent over the transport.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetName(identity) => write!(f, "{COMMAND_PREFIX}name {identity}"),
            Self::JoinRoom(room) => write!(f, "{COMMAND_PREFIX}join {room}"),
            Self::Chat(body) => f.write_str(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_name_encoding() {
        assert_eq!(Command::SetName("x7q".into()).encode(), "/name x7q");
    }

    #[test]
    fn join_default_room() {
        assert_eq!(Command::join_default().encode(), "/join chat");
    }

    #[test]
    fn chat_is_verbatim() {
        // Chat text that looks like a command is still sent as-is
        assert_eq!(Command::Chat("/shrug ok".into()).encode(), "/shrug ok");
        assert_eq!(Command::Chat("hey".into()).encode(), "hey");
    }
}
