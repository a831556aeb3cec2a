//! Observable connection state.

/// Connection state as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempted yet.
    Idle,
    /// Connection in progress.
    Connecting,
    /// Identity registered and room joined.
    Joined {
        /// Identity registered for this session.
        identity: String,
        /// Room joined.
        room: String,
    },
    /// Connection closed normally.
    Closed,
    /// Connection failed.
    Errored {
        /// Failure description.
        reason: String,
    },
}

impl ConnectionState {
    /// True for `Closed` and `Errored`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Errored { .. })
    }
}
