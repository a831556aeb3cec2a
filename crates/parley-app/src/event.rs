//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - Front-end notifications (Resize) and system ticks.
//! - Session notifications translated from the underlying client.

use crate::TranscriptEntry;

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Connection in progress.
    Connecting,

    /// Identity registered and room joined.
    Joined {
        /// Identity registered for this session.
        identity: String,
        /// Room joined.
        room: String,
    },

    /// Entry to append to the transcript.
    EntryAppended(TranscriptEntry),

    /// Connection closed normally.
    Closed,

    /// Connection failed.
    Errored {
        /// Failure description.
        reason: String,
    },

    /// Non-fatal error to surface to the user.
    Error {
        /// Error description.
        message: String,
    },
}
