//! Application layer for Parley
//!
//! Pure state machines and generic runtime for UI and protocol orchestration,
//! enabling deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: UI state machine (connection status, transcript, status line)
//! - [`Transcript`]: Append-only log of rendered entries ([`TranscriptSink`])
//! - [`Bridge`]: Protocol bridge (translates App actions to Client events)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod runtime;
mod state;
mod transcript;

pub use action::AppAction;
pub use app::{App, STATUS_TICKS};
pub use bridge::Bridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use runtime::Runtime;
pub use state::ConnectionState;
pub use transcript::{EntryKind, SENT_LABEL, Transcript, TranscriptEntry, TranscriptSink};
