//! Per-connection session state.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐  Opened  ┌────────────┐  /name + /join  ┌────────┐
//! │ Idle │─────────>│ Connecting │────────────────>│ Joined │
//! └──────┘          └────────────┘                 └────────┘
//!     │                                                 │
//!     │ Closed / Errored (from any state)               │
//!     ↓                                                 ↓
//! ┌──────────────────┐                        ┌──────────────────┐
//! │ Closed | Errored │<───────────────────────│ Closed | Errored │
//! └──────────────────┘                        └──────────────────┘
//! ```

use parley_proto::DEFAULT_ROOM;

use crate::Identity;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, transport not yet open.
    Idle,
    /// Transport open, identity and join commands being issued.
    Connecting,
    /// Identity registered and room joined (fire-and-forget).
    Joined,
    /// Transport closed normally. Terminal.
    Closed,
    /// Transport failed. Terminal.
    Errored,
}

impl SessionState {
    /// True for `Closed` and `Errored`.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Closed | Self::Errored)
    }
}

/// State owned by one connection lifetime.
#[derive(Debug, Clone)]
pub struct Session {
    /// Identity assigned on open. `None` until the transport opens.
    identity: Option<Identity>,
    /// Room joined on open.
    room: String,
    /// Current lifecycle state.
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an idle session for the default room.
    pub fn new() -> Self {
        Self { identity: None, room: DEFAULT_ROOM.to_owned(), state: SessionState::Idle }
    }

    /// Assigned identity. `None` before the transport opens.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Room joined by this session.
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        self.state = state;
    }

    pub(crate) fn assign_identity(&mut self, identity: Identity) {
        debug_assert!(self.identity.is_none(), "identity is assigned once per session");
        self.identity = Some(identity);
    }
}
