//! Rules for the transcript and connection lifecycle.

use parley_app::ConnectionState;

use super::{Invariant, InvariantResult, SystemSnapshot, Violation};

/// Transcript entries are never removed, reordered, or rewritten.
///
/// The previous transcript must be a prefix of the current one, except when
/// a new connection starts with an empty transcript.
pub struct TranscriptPrefixStable;

impl Invariant for TranscriptPrefixStable {
    fn name(&self) -> &'static str {
        "TranscriptPrefixStable"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(previous) = &state.previous else {
            return Ok(());
        };
        if state.current.is_fresh_connection() {
            return Ok(());
        }

        let current = &state.current.entries;
        if !current.starts_with(&previous.entries) {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "transcript of {} entries is not a prefix of the next {} entries",
                    previous.entries.len(),
                    current.len()
                ),
            });
        }
        Ok(())
    }
}

/// Once closed or errored, a connection stays in that state until a new
/// connection starts.
pub struct TerminalStateIsFinal;

impl Invariant for TerminalStateIsFinal {
    fn name(&self) -> &'static str {
        "TerminalStateIsFinal"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        let Some(previous) = &state.previous else {
            return Ok(());
        };
        if !previous.state.is_terminal() || state.current.is_fresh_connection() {
            return Ok(());
        }

        if state.current.state != previous.state {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "left terminal state {:?} for {:?}",
                    previous.state, state.current.state
                ),
            });
        }
        Ok(())
    }
}

/// No entry is recorded before a connection has been attempted.
pub struct EntriesRequireConnection;

impl Invariant for EntriesRequireConnection {
    fn name(&self) -> &'static str {
        "EntriesRequireConnection"
    }

    fn check(&self, state: &SystemSnapshot) -> InvariantResult {
        if state.current.state == ConnectionState::Idle && !state.current.entries.is_empty() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{} entries while idle", state.current.entries.len()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use parley_app::TranscriptEntry;

    use super::*;
    use crate::AppSnapshot;

    fn entry(body: &str) -> TranscriptEntry {
        TranscriptEntry::sent(body, NaiveDateTime::default())
    }

    fn joined(entries: Vec<TranscriptEntry>) -> AppSnapshot {
        AppSnapshot {
            state: ConnectionState::Joined { identity: "abcde".into(), room: "chat".into() },
            entries,
        }
    }

    #[test]
    fn appended_entry_keeps_prefix() {
        let snapshot =
            SystemSnapshot::transition(joined(vec![entry("a")]), joined(vec![entry("a"), entry("b")]));
        assert!(TranscriptPrefixStable.check(&snapshot).is_ok());
    }

    #[test]
    fn rewritten_entry_breaks_prefix() {
        let snapshot = SystemSnapshot::transition(joined(vec![entry("a")]), joined(vec![entry("z")]));
        assert!(TranscriptPrefixStable.check(&snapshot).is_err());
    }

    #[test]
    fn fresh_connection_resets_transcript() {
        let fresh = AppSnapshot { state: ConnectionState::Connecting, entries: Vec::new() };
        let snapshot = SystemSnapshot::transition(joined(vec![entry("a")]), fresh);
        assert!(TranscriptPrefixStable.check(&snapshot).is_ok());
    }

    #[test]
    fn closed_to_joined_is_violation() {
        let closed = AppSnapshot { state: ConnectionState::Closed, entries: Vec::new() };
        let snapshot = SystemSnapshot::transition(closed, joined(Vec::new()));

        let violation = TerminalStateIsFinal.check(&snapshot).unwrap_err();
        assert_eq!(violation.invariant, "TerminalStateIsFinal");
    }

    #[test]
    fn closed_stays_closed() {
        let closed = AppSnapshot { state: ConnectionState::Closed, entries: vec![entry("a")] };
        let snapshot = SystemSnapshot::transition(closed.clone(), closed);
        assert!(TerminalStateIsFinal.check(&snapshot).is_ok());
    }

    #[test]
    fn idle_with_entries_is_violation() {
        let snapshot = SystemSnapshot::initial(AppSnapshot {
            state: ConnectionState::Idle,
            entries: vec![entry("a")],
        });
        assert!(EntriesRequireConnection.check(&snapshot).is_err());
    }
}
