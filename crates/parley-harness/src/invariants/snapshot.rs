//! Observable state captured for invariant checks.

use parley_app::{App, ConnectionState, TranscriptEntry};

/// Observable App state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    /// Connection state.
    pub state: ConnectionState,
    /// Transcript entries in append order.
    pub entries: Vec<TranscriptEntry>,
}

impl AppSnapshot {
    /// Capture the observable state of `app`.
    pub fn from_app(app: &App) -> Self {
        Self { state: app.connection_state().clone(), entries: app.transcript().entries().to_vec() }
    }

    /// Snapshot of a freshly created App.
    pub fn idle() -> Self {
        Self { state: ConnectionState::Idle, entries: Vec::new() }
    }

    /// True if this snapshot marks the start of a new connection.
    pub fn is_fresh_connection(&self) -> bool {
        self.state == ConnectionState::Connecting && self.entries.is_empty()
    }
}

/// Pair of consecutive observations.
///
/// `previous` is `None` for the first observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSnapshot {
    /// Observation before the current one.
    pub previous: Option<AppSnapshot>,
    /// Latest observation.
    pub current: AppSnapshot,
}

impl SystemSnapshot {
    /// First observation of a run.
    pub fn initial(current: AppSnapshot) -> Self {
        Self { previous: None, current }
    }

    /// Observation following `previous`.
    pub fn transition(previous: AppSnapshot, current: AppSnapshot) -> Self {
        Self { previous: Some(previous), current }
    }
}
