//! Client error types.

use thiserror::Error;

use crate::SessionState;

/// Errors produced by the session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Event is not valid in the current session state.
    #[error("invalid session state: cannot {operation} while {state:?}")]
    InvalidState {
        /// State when the event arrived.
        state: SessionState,
        /// Operation that was attempted.
        operation: &'static str,
    },
}
