//! Client events and actions.

use parley_proto::ClassifiedMessage;

use crate::{Identity, SessionState};

/// Lifecycle event emitted by a transport.
///
/// A transport emits exactly one `Opened` per successful connection, zero or
/// more `PayloadReceived` while open, and exactly one terminal event (`Closed`
/// or `Errored`) that ends the stream. A connection that never opens emits
/// only `Errored`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Connection established.
    Opened,
    /// Fully decoded text payload.
    PayloadReceived(String),
    /// Connection closed normally.
    Closed,
    /// Connection failed or never opened.
    Errored {
        /// Human-readable failure description.
        reason: String,
    },
}

impl TransportEvent {
    /// True for `Closed` and `Errored`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Errored { .. })
    }
}

/// Events the caller feeds into the client.
///
/// The caller is responsible for:
/// - Forwarding transport lifecycle events in the order they occurred
/// - Forwarding user send requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Lifecycle event from the transport.
    Transport(TransportEvent),

    /// User wants to send a chat message.
    SubmitMessage {
        /// Raw input text, untrimmed.
        text: String,
    },
}

impl From<TransportEvent> for ClientEvent {
    fn from(event: TransportEvent) -> Self {
        Self::Transport(event)
    }
}

/// Actions the client produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// Send this text over the transport.
    Send(String),

    /// Deliver a classified inbound message to the application layer.
    Deliver(ClassifiedMessage),

    /// A user message was accepted for sending.
    Sent {
        /// Original input, as typed.
        body: String,
    },

    /// Identity registered and room joined.
    ///
    /// No server acknowledgment is involved; this is emitted as soon as both
    /// commands are queued.
    Joined {
        /// Identity registered for this session.
        identity: Identity,
        /// Room joined.
        room: String,
    },

    /// Session reached a terminal state.
    Ended {
        /// `Closed` or `Errored`.
        state: SessionState,
        /// Failure description for `Errored`.
        reason: Option<String>,
    },
}
